use std::fmt::Display;

use scraper::ElementRef;
use serde::{Serialize, Serializer};

use crate::parse::text::{all_texts, text_content};
use crate::{static_regex, static_selector};

/// Wire form of a value that could not be read from the page.
pub const UNKNOWN: &str = "unknown";

/// A nutrition value as printed on the page, or `Unknown` when it is missing or unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Reading<T> {
    Known(T),
    #[default]
    Unknown,
}

impl<T> Reading<T> {
    pub const fn known(&self) -> Option<&T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Unknown => None,
        }
    }

    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl<T> From<Option<T>> for Reading<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

// always a string on the wire: "450", "12g" or "unknown"
impl<T: Display> Serialize for Reading<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(v) => serializer.collect_str(v),
            Self::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nutrient {
    Sodium,
    Cholesterol,
    Sugars,
    Protein,
    TotalFat,
}

impl Nutrient {
    pub const ALL: [Self; 5] = [
        Self::Sodium,
        Self::Cholesterol,
        Self::Sugars,
        Self::Protein,
        Self::TotalFat,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sodium => "Sodium",
            Self::Cholesterol => "Cholesterol",
            Self::Sugars => "Sugars",
            Self::Protein => "Protein",
            Self::TotalFat => "Total Fat",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.label() == label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrients {
    sodium: Reading<String>,
    cholesterol: Reading<String>,
    sugars: Reading<String>,
    protein: Reading<String>,
    total_fat: Reading<String>,
}

impl Nutrients {
    /// Folds table cell texts into nutrient values. A label seen in several cells keeps the value from the last one.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        cells
            .into_iter()
            .filter_map(|cell| match_nutrient(cell.as_ref()))
            .fold(Self::default(), |acc, (nutrient, value)| {
                acc.with(nutrient, value)
            })
    }

    #[must_use]
    pub fn with(mut self, nutrient: Nutrient, value: String) -> Self {
        let slot = match nutrient {
            Nutrient::Sodium => &mut self.sodium,
            Nutrient::Cholesterol => &mut self.cholesterol,
            Nutrient::Sugars => &mut self.sugars,
            Nutrient::Protein => &mut self.protein,
            Nutrient::TotalFat => &mut self.total_fat,
        };
        *slot = Reading::Known(value);
        self
    }

    pub const fn get(&self, nutrient: Nutrient) -> &Reading<String> {
        match nutrient {
            Nutrient::Sodium => &self.sodium,
            Nutrient::Cholesterol => &self.cholesterol,
            Nutrient::Sugars => &self.sugars,
            Nutrient::Protein => &self.protein,
            Nutrient::TotalFat => &self.total_fat,
        }
    }
}

/// Matches cells like `Total Fat 12g`. Only a trailing `g` is kept as the unit, so `Sodium 210mg` reads as `210`.
pub fn match_nutrient(cell: &str) -> Option<(Nutrient, String)> {
    static_regex!(NUTRIENT_REGEX <- r"(Sodium|Cholesterol|Sugars|Protein|Total Fat)\s*([0-9]+g?)");
    let captures = NUTRIENT_REGEX.captures(cell.trim())?;
    let nutrient = Nutrient::from_label(captures.get(1)?.as_str())?;
    Some((nutrient, captures.get(2)?.as_str().to_owned()))
}

/// Digit run of the first `Calories <digits>` in `text`, exactly as printed.
pub fn parse_calories(text: &str) -> Reading<String> {
    static_regex!(CALORIES_REGEX <- r"Calories\s*([0-9]+)");
    CALORIES_REGEX
        .captures(text)
        .and_then(|c| Some(c.get(1)?.as_str().to_owned()))
        .into()
}

/// Everything read from an item's nutrition block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    calories: Reading<String>,
    allergens: Vec<String>,
    #[serde(flatten)]
    nutrients: Nutrients,
}

impl Nutrition {
    /// `element` is the `.nutrition` block of one menu item.
    pub fn from_html_element(element: ElementRef<'_>) -> Self {
        static_selector!(CALORIES_SELECTOR <- ".portion-calories");
        static_selector!(ALLERGENS_SELECTOR <- ".allergens");
        static_selector!(ALLERGEN_SELECTOR <- "li");
        static_selector!(CELL_SELECTOR <- "td");

        let calories = element
            .select(&CALORIES_SELECTOR)
            .next()
            .map_or(Reading::Unknown, |row| {
                parse_calories(&row.text().collect::<String>())
            });

        // no allergens region means nothing to declare
        let allergens = element
            .select(&ALLERGENS_SELECTOR)
            .next()
            .map(|region| all_texts(&ALLERGEN_SELECTOR, region))
            .unwrap_or_default();

        let nutrients = Nutrients::from_cells(element.select(&CELL_SELECTOR).map(text_content));

        Self {
            calories,
            allergens,
            nutrients,
        }
    }

    pub const fn calories(&self) -> &Reading<String> {
        &self.calories
    }

    pub fn allergens(&self) -> &[String] {
        &self.allergens
    }

    pub const fn nutrients(&self) -> &Nutrients {
        &self.nutrients
    }
}
