//! Cell alignment and protection blocks.
//!
//! Both blocks are embedded directly in cell format records, so they are
//! shared between the caller-facing description and the stored record.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleError};

/// Largest indent level.
pub const MAX_INDENT: u32 = 250;

/// Text rotation value for vertically stacked text.
pub const VERTICAL_TEXT_ROTATION: u32 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlignment {
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
    CenterContinuous,
    Distributed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
    Justify,
    Distributed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingOrder {
    Context,
    LeftToRight,
    RightToLeft,
}

/// Alignment information for cell content.
///
/// Controls how text is positioned within a cell both horizontally
/// and vertically, as well as text wrapping and rotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Alignment {
    pub horizontal: Option<HorizontalAlignment>,
    pub vertical: Option<VerticalAlignment>,
    /// Indent level (for horizontal alignment)
    pub indent: Option<u32>,
    pub relative_indent: Option<i32>,
    /// Text rotation (angle in degrees, 0-180, or 255 for vertical)
    pub text_rotation: Option<u32>,
    pub reading_order: Option<ReadingOrder>,
    pub wrap_text: bool,
    pub shrink_to_fit: bool,
    pub justify_last_line: bool,
}

impl Alignment {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new alignment with horizontal and vertical settings.
    #[inline]
    pub fn with_alignment(
        horizontal: Option<HorizontalAlignment>,
        vertical: Option<VerticalAlignment>,
    ) -> Self {
        Self {
            horizontal,
            vertical,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(rotation) = self.text_rotation
            && rotation > 180
            && rotation != VERTICAL_TEXT_ROTATION
        {
            return Err(StyleError::invalid(format!(
                "text rotation {} must be 0-180 or 255",
                rotation
            )));
        }
        if let Some(indent) = self.indent
            && indent > MAX_INDENT
        {
            return Err(StyleError::invalid(format!(
                "indent {} exceeds {}",
                indent, MAX_INDENT
            )));
        }
        if let Some(relative) = self.relative_indent
            && !(-255..=255).contains(&relative)
        {
            return Err(StyleError::invalid(format!(
                "relative indent {} is outside -255..=255",
                relative
            )));
        }
        Ok(())
    }
}

/// Cell protection properties. They only take effect on protected sheets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Protection {
    pub hidden: Option<bool>,
    pub locked: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_range() {
        for rotation in [0, 90, 180, 255] {
            let alignment = Alignment {
                text_rotation: Some(rotation),
                ..Default::default()
            };
            assert!(alignment.validate().is_ok());
        }
        let alignment = Alignment {
            text_rotation: Some(200),
            ..Default::default()
        };
        assert!(alignment.validate().is_err());
    }

    #[test]
    fn test_indent_limits() {
        let too_deep = Alignment {
            horizontal: Some(HorizontalAlignment::Left),
            indent: Some(251),
            ..Default::default()
        };
        assert!(too_deep.validate().is_err());

        let relative = Alignment {
            relative_indent: Some(-256),
            ..Default::default()
        };
        assert!(relative.validate().is_err());

        let centered = Alignment::with_alignment(
            Some(HorizontalAlignment::Center),
            Some(VerticalAlignment::Center),
        );
        assert!(centered.validate().is_ok());
    }
}
