use scraper::{ElementRef, Selector};

/// All descendant text of `element` joined together, with surrounding whitespace trimmed.
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Trimmed text of the first match of `selector` under `element`, if there is one.
pub fn first_text(selector: &Selector, element: ElementRef<'_>) -> Option<String> {
    element.select(selector).next().map(text_content)
}

/// Trimmed text of every match of `selector` under `element`, in document order.
pub fn all_texts(selector: &Selector, element: ElementRef<'_>) -> Vec<String> {
    element.select(selector).map(text_content).collect()
}
