//! Number format records and the number format table.

use std::collections::HashMap;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleError, TableKind};

/// First id available to custom number formats; 0-163 are reserved.
pub const FIRST_CUSTOM_NUM_FMT_ID: u32 = 164;

/// Upper bound for the decimal places hint.
pub const MAX_DECIMAL_PLACES: u32 = 30;

/// Canonical codes of the built-in formats that have a locale-independent meaning.
static BUILTIN_NUM_FMTS: phf::Map<u32, &'static str> = phf_map! {
    0u32 => "General",
    1u32 => "0",
    2u32 => "0.00",
    3u32 => "#,##0",
    4u32 => "#,##0.00",
    9u32 => "0%",
    10u32 => "0.00%",
    11u32 => "0.00E+00",
    12u32 => "# ?/?",
    13u32 => "# ??/??",
    14u32 => "mm-dd-yy",
    15u32 => "d-mmm-yy",
    16u32 => "d-mmm",
    17u32 => "mmm-yy",
    18u32 => "h:mm AM/PM",
    19u32 => "h:mm:ss AM/PM",
    20u32 => "h:mm",
    21u32 => "h:mm:ss",
    22u32 => "m/d/yy h:mm",
    37u32 => "#,##0 ;(#,##0)",
    38u32 => "#,##0 ;[Red](#,##0)",
    39u32 => "#,##0.00;(#,##0.00)",
    40u32 => "#,##0.00;[Red](#,##0.00)",
    45u32 => "mm:ss",
    46u32 => "[h]:mm:ss",
    47u32 => "mmss.0",
    48u32 => "##0.0E+0",
    49u32 => "@",
};

/// Get the canonical format code for a built-in number format id.
///
/// Returns `None` for ids outside the reserved range and for reserved ids
/// whose meaning depends on the locale.
#[inline]
pub fn builtin_format_code(id: u32) -> Option<&'static str> {
    BUILTIN_NUM_FMTS.get(&id).copied()
}

/// Check whether an id falls in the reserved built-in range.
#[inline]
pub const fn is_builtin_id(id: u32) -> bool {
    id < FIRST_CUSTOM_NUM_FMT_ID
}

/// A number format record (`numFmt` element).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumFmt {
    /// Format id referenced by cell formats
    pub id: u32,
    /// Format code (e.g., "0.00%", "mm/dd/yyyy")
    pub format_code: String,
}

impl NumFmt {
    #[inline]
    pub fn new(id: u32, format_code: impl Into<String>) -> Self {
        Self {
            id,
            format_code: format_code.into(),
        }
    }

    /// Check if this record uses a reserved built-in id.
    #[inline]
    pub fn is_builtin(&self) -> bool {
        is_builtin_id(self.id)
    }
}

/// How a style description picks its number format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumFmtSelector {
    /// One of the reserved built-in ids (0-163)
    Builtin(u32),
    /// A custom format code, interned into the table
    Custom(String),
}

/// A validated number format request, ready to be interned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NumFmtRequest {
    Id(u32),
    Code(String),
}

impl NumFmtSelector {
    /// Selector for a stored id: reserved ids come back as built-in.
    pub(crate) fn for_record(id: u32, code: Option<&str>) -> Self {
        match code {
            Some(code) if !is_builtin_id(id) => NumFmtSelector::Custom(code.to_string()),
            _ => NumFmtSelector::Builtin(id),
        }
    }

    /// Validate the selector and apply the decimal places and negative-red hints.
    pub(crate) fn to_request(
        &self,
        decimal_places: Option<u32>,
        negative_red: bool,
    ) -> Result<NumFmtRequest> {
        match self {
            NumFmtSelector::Builtin(id) => {
                if !is_builtin_id(*id) {
                    return Err(StyleError::invalid(format!(
                        "number format id {} is not a built-in id (0-{})",
                        id,
                        FIRST_CUSTOM_NUM_FMT_ID - 1
                    )));
                }
                match derive_builtin_code(*id, decimal_places, negative_red)? {
                    Some(code) => Ok(NumFmtRequest::Code(code)),
                    None => Ok(NumFmtRequest::Id(*id)),
                }
            },
            NumFmtSelector::Custom(code) => {
                if code.is_empty() {
                    return Err(StyleError::invalid("custom number format code is empty"));
                }
                Ok(NumFmtRequest::Code(code.clone()))
            },
        }
    }
}

/// Rewrite a built-in format code according to the description hints.
///
/// Returns `None` when the hints leave the built-in format unchanged or the
/// built-in id has no canonical code.
pub(crate) fn derive_builtin_code(
    id: u32,
    decimal_places: Option<u32>,
    negative_red: bool,
) -> Result<Option<String>> {
    if let Some(places) = decimal_places
        && places > MAX_DECIMAL_PLACES
    {
        return Err(StyleError::invalid(format!(
            "decimal places {} exceeds {}",
            places, MAX_DECIMAL_PLACES
        )));
    }

    let Some(base) = builtin_format_code(id) else {
        return Ok(None);
    };

    let mut code = base.to_string();
    if let Some(places) = decimal_places
        && code.contains(".00")
    {
        let fraction = if places == 0 {
            String::new()
        } else {
            format!(".{}", "0".repeat(places as usize))
        };
        code = code.replace(".00", &fraction);
    }
    if negative_red && !code.contains(';') {
        code = format!("{code};[Red]-{code}");
    }

    Ok((code != base).then_some(code))
}

/// Smallest custom id above `id`.
pub(crate) fn next_id_after(id: u32) -> Result<u32> {
    id.checked_add(1)
        .map(|next| next.max(FIRST_CUSTOM_NUM_FMT_ID))
        .ok_or_else(|| StyleError::invalid("no custom number format ids are left"))
}

/// Table of number format records, keyed by format id.
///
/// Unlike the other leaf tables, records are addressed by their `id`
/// rather than their position.
#[derive(Debug, Clone, Default)]
pub struct NumFmtTable {
    records: Vec<NumFmt>,
    by_id: HashMap<u32, usize>,
    by_code: HashMap<String, u32>,
}

impl NumFmtTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a custom format code, returning its id.
    ///
    /// New ids are never below `floor`, which lets callers keep ids handed
    /// out elsewhere (differential formats) from being reused.
    pub fn intern_code(&mut self, code: &str, floor: u32) -> Result<u32> {
        if let Some(&id) = self.by_code.get(code) {
            log::trace!("reusing numFmt {} for {:?}", id, code);
            return Ok(id);
        }

        let id = self.next_custom_id()?.max(floor);
        self.insert(NumFmt::new(id, code));
        log::debug!("appended numFmt {} = {:?}", id, code);
        Ok(id)
    }

    /// Append a record from a loaded document without deduplication.
    pub fn seed(&mut self, record: NumFmt) -> Result<()> {
        if self.by_id.contains_key(&record.id) {
            return Err(StyleError::InvalidSeed(format!(
                "duplicate numFmt id {}",
                record.id
            )));
        }
        self.insert(record);
        Ok(())
    }

    fn insert(&mut self, record: NumFmt) {
        self.by_id.insert(record.id, self.records.len());
        // Overrides of built-in ids are never handed out for custom codes.
        if !record.is_builtin() {
            self.by_code
                .entry(record.format_code.clone())
                .or_insert(record.id);
        }
        self.records.push(record);
    }

    /// Custom id of an already stored code.
    #[inline]
    pub fn find_code(&self, code: &str) -> Option<u32> {
        self.by_code.get(code).copied()
    }

    /// Smallest custom id above every id in the table.
    ///
    /// Fails once `u32::MAX` is taken.
    pub fn next_custom_id(&self) -> Result<u32> {
        match self.records.iter().map(|r| r.id).max() {
            None => Ok(FIRST_CUSTOM_NUM_FMT_ID),
            Some(max) => next_id_after(max),
        }
    }

    /// Get a record by id.
    #[inline]
    pub fn get(&self, id: u32) -> Option<&NumFmt> {
        self.by_id.get(&id).map(|&pos| &self.records[pos])
    }

    /// Get a record by id, failing if it is not stored.
    pub fn resolve(&self, id: u32) -> Result<&NumFmt> {
        self.get(id)
            .ok_or_else(|| StyleError::not_found(TableKind::NumFmt, id as usize))
    }

    /// Effective format code: stored record first, then the built-in table.
    pub fn format_code(&self, id: u32) -> Option<&str> {
        self.get(id)
            .map(|r| r.format_code.as_str())
            .or_else(|| builtin_format_code(id))
    }

    /// Records in insertion (document) order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, NumFmt> {
        self.records.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[NumFmt] {
        &self.records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
