//! Differential formatting records (`dxf`).
//!
//! A dxf carries only the facets it changes, embedded inline, and is applied
//! on top of whatever formatting the target already has. Conditional
//! formatting rules and table styles refer to dxfs by index.

use serde::{Deserialize, Serialize};

use super::alignment::{Alignment, Protection};
use super::border::{Border, BorderSpec};
use super::fill::{Fill, FillSpec};
use super::font::{Font, FontSpec};
use super::number_format::{NumFmt, NumFmtRequest, NumFmtSelector, builtin_format_code};
use crate::error::Result;

/// A differential format record.
///
/// Derived equality gives exactly the overlay semantics: facets absent on
/// both sides compare equal, a facet present on one side only does not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dxf {
    pub font: Option<Font>,
    pub num_fmt: Option<NumFmt>,
    pub fill: Option<Fill>,
    pub alignment: Option<Alignment>,
    pub border: Option<Border>,
    pub protection: Option<Protection>,
}

impl Dxf {
    /// Check if no facet is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_spec(&self) -> DxfSpec {
        DxfSpec {
            font: self.font.as_ref().map(Font::to_spec),
            number_format: self
                .num_fmt
                .as_ref()
                .map(|n| NumFmtSelector::for_record(n.id, Some(&n.format_code))),
            fill: self.fill.as_ref().map(Fill::to_spec),
            alignment: self.alignment.clone(),
            border: self.border.as_ref().map(Border::to_specs),
            protection: self.protection,
        }
    }
}

/// Caller-facing partial style for conditional formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DxfSpec {
    pub font: Option<FontSpec>,
    pub number_format: Option<NumFmtSelector>,
    pub fill: Option<FillSpec>,
    pub alignment: Option<Alignment>,
    pub border: Option<Vec<BorderSpec>>,
    pub protection: Option<Protection>,
}

impl DxfSpec {
    /// Validate and build the record.
    ///
    /// `custom_id` picks the id embedded for a custom format code; it must
    /// not touch any table.
    pub(crate) fn to_dxf(&self, custom_id: impl FnOnce(&str) -> Result<u32>) -> Result<Dxf> {
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

        let num_fmt = match &self.number_format {
            None => None,
            Some(selector) => Some(match selector.to_request(None, false)? {
                NumFmtRequest::Id(id) => {
                    NumFmt::new(id, builtin_format_code(id).unwrap_or_default())
                },
                NumFmtRequest::Code(code) => NumFmt::new(custom_id(&code)?, code),
            }),
        };

        Ok(Dxf {
            font,
            num_fmt,
            fill,
            alignment: self.alignment.clone(),
            border,
            protection: self.protection,
        })
    }
}
