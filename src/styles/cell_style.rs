//! Cell format records (`xf`) and named cell styles.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::alignment::{Alignment, Protection};

bitflags! {
    /// Which facets of an xf record a consumer should honor.
    ///
    /// A facet whose flag is clear is inherited from the parent style even
    /// when the record carries a foreign key for it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ApplyFlags: u8 {
        /// applyNumberFormat
        const NUMBER_FORMAT = 0x01;
        /// applyFont
        const FONT = 0x02;
        /// applyFill
        const FILL = 0x04;
        /// applyBorder
        const BORDER = 0x08;
        /// applyAlignment
        const ALIGNMENT = 0x10;
        /// applyProtection
        const PROTECTION = 0x20;
    }
}

impl Default for ApplyFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// A cell format record.
///
/// References fonts, fills, borders, and number formats by their IDs. The
/// same shape is used for `cellXfs` (what cells point at) and `cellStyleXfs`
/// (the master records of named styles, which have no parent).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellXf {
    /// Number format ID (built-in or custom)
    pub num_fmt_id: u32,
    /// Index into fonts
    pub font_id: usize,
    /// Index into fills
    pub fill_id: usize,
    /// Index into borders
    pub border_id: usize,
    /// Parent record in cellStyleXfs
    pub xf_id: Option<usize>,
    pub apply: ApplyFlags,
    pub alignment: Option<Alignment>,
    pub protection: Option<Protection>,
    /// Quote prefix flag (for preserving leading apostrophe)
    pub quote_prefix: bool,
    pub pivot_button: bool,
    pub lang: Option<String>,
}

impl CellXf {
    /// Cell format 0 of every workbook: everything default, parent is "Normal".
    pub fn default_cell() -> Self {
        Self {
            xf_id: Some(0),
            ..Default::default()
        }
    }

    /// Cell style format 0 of every workbook.
    #[inline]
    pub fn default_style() -> Self {
        Self::default()
    }

    #[inline]
    pub fn applies(&self, flag: ApplyFlags) -> bool {
        self.apply.contains(flag)
    }
}

/// A named cell style (`cellStyle` element), e.g. "Normal" or "Heading 1".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedCellStyle {
    pub name: String,
    /// Index into cellStyleXfs
    pub xf_id: usize,
    pub builtin_id: Option<u32>,
    pub i_level: Option<u32>,
    pub hidden: Option<bool>,
    pub custom_builtin: Option<bool>,
}

impl NamedCellStyle {
    pub fn new(name: impl Into<String>, xf_id: usize) -> Self {
        Self {
            name: name.into(),
            xf_id,
            builtin_id: None,
            i_level: None,
            hidden: None,
            custom_builtin: None,
        }
    }

    /// The "Normal" style every workbook starts with.
    pub fn normal() -> Self {
        Self {
            builtin_id: Some(0),
            ..Self::new("Normal", 0)
        }
    }
}
