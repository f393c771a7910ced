//! Table style definitions and the legacy color palette.
//!
//! Neither collection is built from style descriptions. They are carried
//! from a loaded document to the written one unchanged; the element bodies
//! stay as raw markup.

use serde::{Deserialize, Serialize};

/// The `tableStyles` collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyles {
    /// Name of the style applied to new tables
    pub default_table_style: Option<String>,
    /// Name of the style applied to new pivot tables
    pub default_pivot_style: Option<String>,
    pub styles: Vec<TableStyle>,
}

impl TableStyles {
    /// Value of the `count` attribute.
    #[inline]
    pub fn count(&self) -> usize {
        self.styles.len()
    }

    pub fn get(&self, name: &str) -> Option<&TableStyle> {
        self.styles.iter().find(|style| style.name == name)
    }
}

/// A custom `tableStyle` element.
///
/// Its `tableStyleElement` children refer to differential formats by index,
/// which stay valid because pre-seeded dxfs keep their indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyle {
    pub name: String,
    /// Usable for pivot tables
    pub pivot: Option<bool>,
    /// Usable for tables
    pub table: Option<bool>,
    /// Declared number of `tableStyleElement` children
    pub count: Option<u32>,
    /// Raw inner markup
    pub elements_xml: String,
}

/// The `colors` element: a modified legacy palette and recently used colors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleColors {
    /// Raw inner markup (`indexedColors`, `mruColors`)
    pub xml: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_styles_lookup() {
        let styles = TableStyles {
            default_table_style: Some("TableStyleMedium2".to_string()),
            default_pivot_style: Some("PivotStyleLight16".to_string()),
            styles: vec![TableStyle {
                name: "Banded".to_string(),
                pivot: Some(false),
                count: Some(1),
                elements_xml: r#"<tableStyleElement type="firstRowStripe" dxfId="0"/>"#
                    .to_string(),
                ..Default::default()
            }],
        };

        assert_eq!(styles.count(), 1);
        assert_eq!(styles.get("Banded").and_then(|s| s.count), Some(1));
        assert!(styles.get("Missing").is_none());
        assert_eq!(TableStyles::default().count(), 0);
    }
}
