use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use super::element_text;
use crate::models::SpecTable;

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("Invalid row selector"));
static CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th, td").expect("Invalid cell selector"));

/// Read a specification table as label/value pairs.
///
/// Each row contributes its first two non-empty cells (`th` or `td`, in
/// document order); rows with fewer are ignored.
pub fn extract_specs(table: ElementRef<'_>) -> SpecTable {
    let mut specs = SpecTable::new();

    for row in table.select(&ROW) {
        let mut cells = row
            .select(&CELL)
            .map(element_text)
            .filter(|text| !text.is_empty());

        if let (Some(label), Some(value)) = (cells.next(), cells.next()) {
            specs.insert(label, value);
        }
    }

    specs
}
