//! Font information and definitions.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use super::color::{Color, ColorSpec, to_optional_color};
use crate::error::{Result, StyleError};

/// Largest font size accepted, in points.
pub const MAX_FONT_SIZE: f64 = 409.0;

/// Underline styles (`ST_UnderlineValues`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnderlineStyle {
    Single,
    Double,
    SingleAccounting,
    DoubleAccounting,
    None,
}

impl UnderlineStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::SingleAccounting => "singleAccounting",
            Self::DoubleAccounting => "doubleAccounting",
            Self::None => "none",
        }
    }
}

/// Superscript / subscript run alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignRun {
    Baseline,
    Superscript,
    Subscript,
}

/// Font scheme membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontScheme {
    Major,
    Minor,
    None,
}

/// A font record.
///
/// Every property is optional: a property that is absent is written as no
/// element at all, which is not the same as writing its default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub strike: Option<bool>,
    pub outline: Option<bool>,
    pub shadow: Option<bool>,
    pub condense: Option<bool>,
    pub extend: Option<bool>,
    pub underline: Option<UnderlineStyle>,
    pub vert_align: Option<VerticalAlignRun>,
    /// Font size in points
    pub size: Option<OrderedFloat<f64>>,
    pub color: Option<Color>,
    /// Font name/family (e.g., "Calibri", "Arial")
    pub name: Option<String>,
    /// Font family class (1=Roman, 2=Swiss, 3=Modern, 4=Script, 5=Decorative)
    pub family: Option<u32>,
    pub charset: Option<u32>,
    pub scheme: Option<FontScheme>,
}

impl Font {
    /// The font every new workbook starts with at index 0.
    pub fn workbook_default() -> Self {
        Self {
            size: Some(OrderedFloat(11.0)),
            color: Some(Color::theme(1)),
            name: Some("Calibri".to_string()),
            family: Some(2),
            scheme: Some(FontScheme::Minor),
            ..Default::default()
        }
    }

    pub fn to_spec(&self) -> FontSpec {
        FontSpec {
            bold: self.bold,
            italic: self.italic,
            strike: self.strike,
            outline: self.outline,
            shadow: self.shadow,
            condense: self.condense,
            extend: self.extend,
            underline: self.underline,
            vert_align: self.vert_align,
            size: self.size.map(|s| s.0),
            color: self.color.as_ref().map(Color::to_spec),
            name: self.name.clone(),
            family: self.family,
            charset: self.charset,
            scheme: self.scheme,
        }
    }
}

/// Caller-facing font description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub strike: Option<bool>,
    pub outline: Option<bool>,
    pub shadow: Option<bool>,
    pub condense: Option<bool>,
    pub extend: Option<bool>,
    pub underline: Option<UnderlineStyle>,
    pub vert_align: Option<VerticalAlignRun>,
    pub size: Option<f64>,
    pub color: Option<ColorSpec>,
    pub name: Option<String>,
    pub family: Option<u32>,
    pub charset: Option<u32>,
    pub scheme: Option<FontScheme>,
}

impl FontSpec {
    /// Validate and build the font record.
    pub fn to_font(&self) -> Result<Font> {
        if let Some(size) = self.size
            && !(size.is_finite() && size > 0.0 && size <= MAX_FONT_SIZE)
        {
            return Err(StyleError::invalid(format!(
                "font size {} must be in (0, {}]",
                size, MAX_FONT_SIZE
            )));
        }
        if let Some(name) = &self.name
            && name.is_empty()
        {
            return Err(StyleError::invalid("font name is empty"));
        }
        if let Some(family) = self.family
            && family > 14
        {
            return Err(StyleError::invalid(format!(
                "font family class {} is outside 0-14",
                family
            )));
        }
        if let Some(charset) = self.charset
            && charset > 255
        {
            return Err(StyleError::invalid(format!(
                "font charset {} is outside 0-255",
                charset
            )));
        }

        Ok(Font {
            bold: self.bold,
            italic: self.italic,
            strike: self.strike,
            outline: self.outline,
            shadow: self.shadow,
            condense: self.condense,
            extend: self.extend,
            underline: self.underline,
            vert_align: self.vert_align,
            size: self.size.map(OrderedFloat),
            color: to_optional_color(self.color.as_ref())?,
            name: self.name.clone(),
            family: self.family,
            charset: self.charset,
            scheme: self.scheme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_must_be_positive() {
        for size in [0.0, -1.0, f64::NAN, f64::INFINITY, 410.0] {
            let spec = FontSpec {
                size: Some(size),
                ..Default::default()
            };
            assert!(
                matches!(spec.to_font(), Err(StyleError::InvalidStyle(_))),
                "size {size} should be rejected"
            );
        }
    }

    #[test]
    fn test_absent_and_default_stay_distinct() {
        let absent = FontSpec::default().to_font().unwrap();
        let explicit = FontSpec {
            bold: Some(false),
            ..Default::default()
        }
        .to_font()
        .unwrap();
        assert_ne!(absent, explicit);
    }

    #[test]
    fn test_invalid_color_propagates() {
        let spec = FontSpec {
            color: Some(ColorSpec {
                rgb: Some("FF0000".to_string()),
                theme: Some(2),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(spec.to_font().is_err());
    }

    #[test]
    fn test_spec_round_trip() {
        let spec = FontSpec {
            bold: Some(true),
            underline: Some(UnderlineStyle::Double),
            vert_align: Some(VerticalAlignRun::Superscript),
            size: Some(12.5),
            color: Some(ColorSpec::theme(1, Some(0.25))),
            name: Some("Arial".to_string()),
            family: Some(2),
            charset: Some(0),
            scheme: Some(FontScheme::None),
            ..Default::default()
        };
        assert_eq!(spec.to_font().unwrap().to_spec(), spec);
        assert_eq!(
            Font::workbook_default().to_spec().to_font().unwrap(),
            Font::workbook_default()
        );
    }
}
