pub mod links;
pub mod page;
pub mod slug;
pub mod table;

pub use links::*;
pub use page::*;
pub use slug::*;
pub use table::*;

use scraper::ElementRef;

/// Collapse every whitespace run (including non-breaking spaces) to one space and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All descendant text of an element, space separated, then cleaned.
///
/// `<td><b>P10</b>outdoor</td>` reads as `P10 outdoor`.
pub fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Модуль\n\t P10\u{a0} outdoor  "), "Модуль P10 outdoor");
        assert_eq!(clean_text(" \n "), "");
    }

    #[test]
    fn element_text_separates_adjacent_nodes() {
        let doc = Html::parse_fragment("<div><b>P10</b>outdoor <i> SMD </i></div>");
        let div = doc.select(&Selector::parse("div").unwrap()).next().unwrap();
        assert_eq!(element_text(div), "P10 outdoor SMD");
    }
}
