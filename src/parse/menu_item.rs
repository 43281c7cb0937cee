use scraper::ElementRef;
use serde::Serialize;

use super::nutrition::{Nutrient, Nutrition, Reading};
use crate::parse::text::{all_texts, first_text};
use crate::static_selector;

/// Placeholder the site prints in place of a missing dish name.
const MISSING_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    name: String,
    traits: Vec<String>,
    #[serde(flatten)]
    nutrition: Nutrition,
}

impl MenuItem {
    /// Reads one `li` from a course's item list.
    ///
    /// Returns `None` for nodes without a name (blank or the `Unknown` placeholder) or without any
    /// trait tags: section headers and the nested trait/allergen `li`s of real items land here too.
    pub fn from_html_element(element: ElementRef<'_>) -> Option<Self> {
        static_selector!(NAME_SELECTOR <- ".item-name");
        static_selector!(TRAIT_SELECTOR <- ".traits li");
        static_selector!(NUTRITION_SELECTOR <- ".nutrition");

        let name = first_text(&NAME_SELECTOR, element)
            .filter(|name| !name.is_empty() && name != MISSING_NAME)?;
        let traits = all_texts(&TRAIT_SELECTOR, element);
        if traits.is_empty() {
            log::trace!("skipping {name:?}: no traits");
            return None;
        }
        let nutrition = element
            .select(&NUTRITION_SELECTOR)
            .next()
            .map(Nutrition::from_html_element)
            .unwrap_or_default();

        Some(Self {
            name,
            traits,
            nutrition,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn traits(&self) -> &[String] {
        &self.traits
    }

    pub const fn calories(&self) -> &Reading<String> {
        self.nutrition.calories()
    }

    pub fn allergens(&self) -> &[String] {
        self.nutrition.allergens()
    }

    pub const fn nutrient(&self, nutrient: Nutrient) -> &Reading<String> {
        self.nutrition.nutrients().get(nutrient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;
    use serde_json::json;

    fn item_from(fragment: &str) -> Option<MenuItem> {
        static_selector!(ITEM_SELECTOR <- "li.item");
        let html = Html::parse_fragment(fragment);
        let element = html
            .root_element()
            .select(&ITEM_SELECTOR)
            .next()
            .expect("fixture should have an item");
        MenuItem::from_html_element(element)
    }

    #[test]
    fn test_menu_item_from_html_element() {
        // trimmed down copy of an item from a south quad lunch menu
        let html =
            std::fs::read_to_string("./src/parse/html_examples/menu/menu_item.html").unwrap(); // file system should be reliable
        let doc = Html::parse_document(&html);
        static_selector!(ITEM_SELECTOR <- ".items > li");
        let element = doc.root_element().select(&ITEM_SELECTOR).next().unwrap();
        let item = MenuItem::from_html_element(element).expect("The example html should be valid");

        assert_eq!(item.name(), "Grilled Chicken Breast");
        assert_eq!(item.traits(), ["Halal", "Gluten Free"]);
        assert_eq!(item.calories(), &Reading::Known("180".to_owned()));
        assert_eq!(item.allergens(), ["soy"]);
        assert_eq!(item.nutrient(Nutrient::TotalFat), &Reading::Known("4g".to_owned()));
        assert_eq!(item.nutrient(Nutrient::Cholesterol), &Reading::Known("85".to_owned()));
        assert_eq!(item.nutrient(Nutrient::Sodium), &Reading::Known("420".to_owned()));
        assert_eq!(item.nutrient(Nutrient::Sugars), &Reading::Known("0g".to_owned()));
        assert_eq!(item.nutrient(Nutrient::Protein), &Reading::Known("33g".to_owned()));
    }

    #[test]
    fn test_item_without_nutrition() {
        let item = item_from(
            r#"<ul><li class="item">
                <div class="item-name"> Fresh Fruit </div>
                <ul class="traits"><li>Vegan</li></ul>
            </li></ul>"#,
        )
        .expect("named item with a trait should be kept");
        assert_eq!(item.name(), "Fresh Fruit");
        assert_eq!(item.traits(), ["Vegan"]);
        assert!(item.calories().is_unknown());
        assert!(item.allergens().is_empty());
        for nutrient in Nutrient::ALL {
            assert!(item.nutrient(nutrient).is_unknown());
        }
    }

    #[test]
    fn test_item_without_name_is_dropped() {
        let item = item_from(
            r#"<ul><li class="item">
                <ul class="traits"><li>Vegan</li></ul>
                <div class="nutrition"><table><tr class="portion-calories"><td>Calories 90</td></tr>
                <tr><td>Protein 3g</td></tr></table>
                <div class="allergens"><ul><li>wheat</li></ul></div></div>
            </li></ul>"#,
        );
        assert_eq!(item, None);

        let blank = item_from(
            r#"<ul><li class="item"><div class="item-name">   </div>
                <ul class="traits"><li>Vegan</li></ul></li></ul>"#,
        );
        assert_eq!(blank, None);
    }

    #[test]
    fn test_item_without_traits_is_dropped() {
        let item = item_from(
            r#"<ul><li class="item">
                <div class="item-name">Build Your Own Omelet</div>
                <div class="nutrition"><table><tr class="portion-calories"><td>Calories 300</td></tr></table></div>
            </li></ul>"#,
        );
        assert_eq!(item, None);
    }

    #[test]
    fn test_unknown_name_is_dropped() {
        let item = item_from(
            r#"<ul><li class="item"><div class="item-name"> Unknown </div>
                <ul class="traits"><li>Vegetarian</li></ul>
                <div class="nutrition"><table><tr class="portion-calories"><td>Calories 120</td></tr></table></div>
            </li></ul>"#,
        );
        assert_eq!(item, None);

        // only the exact placeholder is treated as missing
        let item = item_from(
            r#"<ul><li class="item"><div class="item-name">Unknown Soup</div>
                <ul class="traits"><li>Vegetarian</li></ul></li></ul>"#,
        )
        .expect("a longer name is a real dish");
        assert_eq!(item.name(), "Unknown Soup");
    }

    #[test]
    fn test_serialize_field_names() {
        let item = item_from(
            r#"<ul><li class="item"><div class="item-name">Tofu Scramble</div>
                <ul class="traits"><li>Vegan</li><li>Spicy</li></ul>
                <div class="nutrition"><table>
                    <tr class="portion-calories"><td>Calories 210</td></tr>
                    <tr><td>Total Fat 9g</td></tr>
                </table></div></li></ul>"#,
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "name": "Tofu Scramble",
                "traits": ["Vegan", "Spicy"],
                "calories": "210",
                "allergens": [],
                "sodium": "unknown",
                "cholesterol": "unknown",
                "sugars": "unknown",
                "protein": "unknown",
                "totalFat": "9g",
            })
        );
    }
}
