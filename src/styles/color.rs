//! Colors used by fonts, fills and borders.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleError};

/// Highest index of the legacy indexed palette (64 = system foreground,
/// 65 = system background).
pub const MAX_INDEXED_COLOR: u32 = 65;

/// A color as stored in a style record.
///
/// Exactly one way of naming a color is present, so a record can never carry
/// both an explicit RGB value and a theme reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// Application-chosen (automatic) color
    Auto,
    /// Explicit RGB or ARGB hex value, stored as supplied (e.g. "FF0000", "FFFF0000")
    Rgb(String),
    /// Legacy indexed palette entry
    Indexed(u32),
    /// Theme palette entry with an optional tint in [-1.0, 1.0]
    Theme {
        index: u32,
        tint: Option<OrderedFloat<f64>>,
    },
}

impl Color {
    /// Theme color without tint.
    #[inline]
    pub fn theme(index: u32) -> Self {
        Color::Theme { index, tint: None }
    }

    /// Convert back into the caller-facing form.
    pub fn to_spec(&self) -> ColorSpec {
        match self {
            Color::Auto => ColorSpec::auto(),
            Color::Rgb(rgb) => ColorSpec::rgb(rgb.clone()),
            Color::Indexed(index) => ColorSpec::indexed(*index),
            Color::Theme { index, tint } => ColorSpec {
                theme: Some(*index),
                tint: tint.map(|t| t.0),
                ..Default::default()
            },
        }
    }
}

/// Caller-facing color, mirroring the attributes of a `CT_Color` element.
///
/// Any combination of fields can be set here; [`ColorSpec::to_color`] is what
/// rejects the combinations that do not name exactly one color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorSpec {
    #[serde(default)]
    pub auto: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<f64>,
}

impl ColorSpec {
    #[inline]
    pub fn auto() -> Self {
        Self {
            auto: true,
            ..Default::default()
        }
    }

    #[inline]
    pub fn rgb(rgb: impl Into<String>) -> Self {
        Self {
            rgb: Some(rgb.into()),
            ..Default::default()
        }
    }

    #[inline]
    pub fn indexed(index: u32) -> Self {
        Self {
            indexed: Some(index),
            ..Default::default()
        }
    }

    #[inline]
    pub fn theme(index: u32, tint: Option<f64>) -> Self {
        Self {
            theme: Some(index),
            tint,
            ..Default::default()
        }
    }

    /// Validate and build the stored color.
    pub fn to_color(&self) -> Result<Color> {
        let named = [
            self.auto,
            self.rgb.is_some(),
            self.indexed.is_some(),
            self.theme.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();

        match named {
            0 => return Err(StyleError::invalid("color does not name any value")),
            1 => {},
            _ => {
                return Err(StyleError::invalid(format!(
                    "color must set exactly one of auto, rgb, indexed or theme: {:?}",
                    self
                )));
            },
        }

        if self.tint.is_some() && self.theme.is_none() {
            return Err(StyleError::invalid("tint is only valid on a theme color"));
        }

        if self.auto {
            return Ok(Color::Auto);
        }
        if let Some(rgb) = &self.rgb {
            validate_rgb(rgb)?;
            return Ok(Color::Rgb(rgb.clone()));
        }
        if let Some(index) = self.indexed {
            if index > MAX_INDEXED_COLOR {
                return Err(StyleError::invalid(format!(
                    "indexed color {} is outside the palette (0-{})",
                    index, MAX_INDEXED_COLOR
                )));
            }
            return Ok(Color::Indexed(index));
        }

        // Only theme is left.
        let index = self.theme.unwrap_or_default();
        let tint = match self.tint {
            Some(tint) if !(-1.0..=1.0).contains(&tint) => {
                return Err(StyleError::invalid(format!(
                    "tint {} is outside [-1.0, 1.0]",
                    tint
                )));
            },
            tint => tint.map(OrderedFloat),
        };
        Ok(Color::Theme { index, tint })
    }
}

/// RGB values are 6 (RGB) or 8 (ARGB) hex digits without a prefix.
fn validate_rgb(rgb: &str) -> Result<()> {
    if (rgb.len() == 6 || rgb.len() == 8) && rgb.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(StyleError::invalid(format!(
            "rgb color {:?} must be 6 or 8 hex digits",
            rgb
        )))
    }
}

/// Build an optional color, keeping absence as absence.
#[inline]
pub(crate) fn to_optional_color(spec: Option<&ColorSpec>) -> Result<Option<Color>> {
    spec.map(ColorSpec::to_color).transpose()
}
