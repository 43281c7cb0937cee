use scraper::Html;

use super::menu_item::MenuItem;
use crate::static_selector;

/// Every menu item on a rendered dining hall page, in page order.
///
/// The page is expected to contain the `.courses_wrapper` marker; fetchers refuse to hand over pages
/// that don't, so a page without it simply yields no items.
pub fn extract(document: &Html) -> Vec<MenuItem> {
    static_selector!(ITEM_SELECTOR <- ".courses_wrapper .items li");
    document
        .root_element()
        .select(&ITEM_SELECTOR)
        .filter_map(MenuItem::from_html_element)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::nutrition::{Nutrient, Reading};
    use std::fs;

    fn load(name: &str) -> Html {
        let html = fs::read_to_string(format!("./src/parse/html_examples/menu/{name}")).unwrap();
        Html::parse_document(&html)
    }

    fn known(value: &str) -> Reading<String> {
        Reading::Known(value.to_owned())
    }

    #[test]
    fn test_extract_three_items() {
        let items = extract(&load("three_items.html"));
        assert_eq!(items.len(), 2);

        let chili = &items[0];
        assert_eq!(chili.name(), "Vegan Chili");
        assert_eq!(chili.traits(), ["Vegan", "Spicy"]);
        assert_eq!(chili.calories(), &known("250"));
        assert_eq!(chili.allergens(), ["soy", "wheat"]);
        assert_eq!(chili.nutrient(Nutrient::TotalFat), &known("5g"));
        assert_eq!(chili.nutrient(Nutrient::Cholesterol), &known("0"));
        assert_eq!(chili.nutrient(Nutrient::Sodium), &known("640"));
        assert_eq!(chili.nutrient(Nutrient::Sugars), &known("6g"));
        assert_eq!(chili.nutrient(Nutrient::Protein), &known("12g"));

        let broccoli = &items[1];
        assert_eq!(broccoli.name(), "Steamed Broccoli");
        assert_eq!(broccoli.traits(), ["Vegan"]);
        assert_eq!(broccoli.calories(), &known("35"));
        assert!(broccoli.allergens().is_empty());
        for nutrient in Nutrient::ALL {
            assert!(!broccoli.nutrient(nutrient).is_unknown());
        }
    }

    #[test]
    fn test_extract_dining_hall() {
        let items = extract(&load("dining_hall.html"));
        let names: Vec<&str> = items.iter().map(MenuItem::name).collect();
        // the omelet station has no traits and one lunch entry has no name
        assert_eq!(
            names,
            ["Scrambled Eggs", "Hash Brown Patty", "Salmon Teriyaki", "Jasmine Rice"]
        );

        let hash_browns = &items[1];
        assert!(hash_browns.calories().is_unknown());
        assert!(hash_browns.allergens().is_empty());
        for nutrient in Nutrient::ALL {
            assert!(hash_browns.nutrient(nutrient).is_unknown());
        }

        let salmon = &items[2];
        assert!(salmon.calories().is_unknown());
        assert_eq!(salmon.allergens(), ["fish", "soy", "wheat"]);
        assert_eq!(salmon.nutrient(Nutrient::TotalFat), &known("14g"));
        // digits stop at the thousands separator
        assert_eq!(salmon.nutrient(Nutrient::Sodium), &known("1"));
        assert!(salmon.nutrient(Nutrient::Cholesterol).is_unknown());
        assert!(salmon.nutrient(Nutrient::Sugars).is_unknown());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let html = fs::read_to_string("./src/parse/html_examples/menu/dining_hall.html").unwrap();
        let document = Html::parse_document(&html);
        let first = extract(&document);
        assert_eq!(first, extract(&document));
        assert_eq!(first, extract(&Html::parse_document(&html)));
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&extract(&document)).unwrap()
        );
    }

    #[test]
    fn test_extract_without_marker() {
        assert!(extract(&load("closed.html")).is_empty());
        let outside = Html::parse_document(
            r#"<ul class="items"><li><div class="item-name">Pizza</div><ul class="traits"><li>Vegetarian</li></ul></li></ul>"#,
        );
        assert!(extract(&outside).is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_extraction() {
        let html = fs::read_to_string("./src/parse/html_examples/menu/dining_hall.html").unwrap();
        let expected = extract(&Html::parse_document(&html));
        let mut results = vec![Vec::new(); 8];
        tokio_scoped::scope(|scope| {
            for slot in &mut results {
                let html = &html;
                scope.spawn(async move {
                    *slot = extract(&Html::parse_document(html));
                });
            }
        });
        for result in results {
            assert_eq!(result, expected);
        }
    }
}
