//! Caller-facing style descriptions and resolved styles.

use serde::{Deserialize, Serialize};

use super::alignment::{Alignment, Protection};
use super::border::{Border, BorderSpec};
use super::cell_style::{ApplyFlags, CellXf};
use super::fill::{Fill, FillSpec};
use super::font::{Font, FontSpec};
use super::number_format::{MAX_DECIMAL_PLACES, NumFmt, NumFmtRequest, NumFmtSelector};
use crate::error::{Result, StyleError};

/// A high-level style as callers supply it.
///
/// Every facet is optional. A facet that is present sets the matching apply
/// flag on the registered cell format, even when its value equals the
/// workbook default; a facet that is absent is inherited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDescription {
    pub border: Option<Vec<BorderSpec>>,
    pub fill: Option<FillSpec>,
    pub font: Option<FontSpec>,
    pub alignment: Option<Alignment>,
    pub protection: Option<Protection>,
    pub number_format: Option<NumFmtSelector>,
    /// Rewrites the fraction digits of a built-in number format
    pub decimal_places: Option<u32>,
    /// Adds a red negative section to a built-in number format
    pub negative_red: bool,
    pub lang: Option<String>,
    pub quote_prefix: bool,
    /// Name of the named cell style this style inherits from
    pub parent_style: Option<String>,
}

/// A description validated and decomposed into records, not yet interned.
#[derive(Debug, Clone)]
pub(crate) struct StyleParts {
    pub num_fmt: Option<NumFmtRequest>,
    pub font: Option<Font>,
    pub fill: Option<Fill>,
    pub border: Option<Border>,
    pub alignment: Option<Alignment>,
    pub protection: Option<Protection>,
}

impl StyleParts {
    /// Apply flags follow presence, not value.
    pub fn apply_flags(&self) -> ApplyFlags {
        let mut flags = ApplyFlags::empty();
        flags.set(ApplyFlags::NUMBER_FORMAT, self.num_fmt.is_some());
        flags.set(ApplyFlags::FONT, self.font.is_some());
        flags.set(ApplyFlags::FILL, self.fill.is_some());
        flags.set(ApplyFlags::BORDER, self.border.is_some());
        flags.set(ApplyFlags::ALIGNMENT, self.alignment.is_some());
        flags.set(ApplyFlags::PROTECTION, self.protection.is_some());
        flags
    }
}

impl StyleDescription {
    /// Validate every facet and build the records, without touching any table.
    pub(crate) fn to_parts(&self) -> Result<StyleParts> {
        if let Some(places) = self.decimal_places
            && places > MAX_DECIMAL_PLACES
        {
            return Err(StyleError::invalid(format!(
                "decimal places {} exceeds {}",
                places, MAX_DECIMAL_PLACES
            )));
        }
        let num_fmt = self
            .number_format
            .as_ref()
            .map(|s| s.to_request(self.decimal_places, self.negative_red))
            .transpose()?;
        let font = self.font.as_ref().map(FontSpec::to_font).transpose()?;
        let fill = self.fill.as_ref().map(FillSpec::to_fill).transpose()?;
        let border = self
            .border
            .as_deref()
            .map(Border::from_specs)
            .transpose()?;
        if let Some(alignment) = &self.alignment {
            alignment.validate()?;
        }

        Ok(StyleParts {
            num_fmt,
            font,
            fill,
            border,
            alignment: self.alignment.clone(),
            protection: self.protection,
        })
    }
}

/// Everything a cell format index stands for, with foreign keys dereferenced.
///
/// Unlike [`StyleDescription`], every facet is filled in whether or not its
/// apply flag is set; consult `xf.apply` to decide what to honor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStyle {
    pub index: usize,
    pub xf: CellXf,
    /// Stored record, or the built-in code for reserved ids (empty when unknown)
    pub num_fmt: NumFmt,
    pub font: Font,
    pub fill: Fill,
    pub border: Border,
    /// Name of the parent named style, if one points at `xf.xf_id`
    pub parent_style: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::color::ColorSpec;
    use crate::styles::font::FontSpec;

    #[test]
    fn test_apply_flags_follow_presence() {
        let parts = StyleDescription {
            font: Some(FontSpec::default()),
            protection: Some(Protection::default()),
            ..Default::default()
        }
        .to_parts()
        .unwrap();
        assert_eq!(
            parts.apply_flags(),
            ApplyFlags::FONT | ApplyFlags::PROTECTION
        );

        let empty = StyleDescription::default().to_parts().unwrap();
        assert!(empty.apply_flags().is_empty());
    }

    #[test]
    fn test_to_parts_validates_every_facet() {
        let bad_fill = StyleDescription {
            font: Some(FontSpec {
                bold: Some(true),
                ..Default::default()
            }),
            fill: Some(FillSpec {
                pattern: Some(Default::default()),
                gradient: Some(Default::default()),
            }),
            ..Default::default()
        };
        assert!(bad_fill.to_parts().is_err());

        let bad_border_color = StyleDescription {
            border: Some(vec![BorderSpec::new(
                crate::styles::border::BorderEdge::Top,
                crate::styles::border::BorderLineStyle::Thin,
                Some(ColorSpec::default()),
            )]),
            ..Default::default()
        };
        assert!(bad_border_color.to_parts().is_err());
    }

    #[test]
    fn test_decimal_places_checked_without_builtin_format() {
        let no_format = StyleDescription {
            decimal_places: Some(999),
            ..Default::default()
        };
        assert!(matches!(
            no_format.to_parts(),
            Err(StyleError::InvalidStyle(_))
        ));

        let custom = StyleDescription {
            number_format: Some(NumFmtSelector::Custom("0.0".to_string())),
            decimal_places: Some(31),
            ..Default::default()
        };
        assert!(custom.to_parts().is_err());

        let in_range = StyleDescription {
            decimal_places: Some(30),
            ..Default::default()
        };
        assert!(in_range.to_parts().is_ok());
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "font": {"bold": true, "size": 12.0, "color": {"rgb": "FF0000"}},
            "fill": {"pattern": {"pattern_type": "solid", "fg_color": {"theme": 4, "tint": 0.4}}},
            "border": [{"edge": "bottom", "style": "double"}],
            "number_format": {"custom": "0.00%"},
            "lang": "en-US"
        }"#;
        let description: StyleDescription = serde_json::from_str(json).unwrap();

        assert_eq!(description.font.as_ref().and_then(|f| f.bold), Some(true));
        assert_eq!(
            description.number_format,
            Some(NumFmtSelector::Custom("0.00%".to_string()))
        );
        assert_eq!(description.border.as_ref().map(Vec::len), Some(1));
        assert!(description.to_parts().is_ok());

        let back: StyleDescription =
            serde_json::from_str(&serde_json::to_string(&description).unwrap()).unwrap();
        assert_eq!(back, description);
    }
}
