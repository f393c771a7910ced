/// Error types for style table operations.
use std::fmt;

use thiserror::Error;

/// Result type for style table operations.
pub type Result<T> = std::result::Result<T, StyleError>;

/// The tables that make up a workbook style sheet.
///
/// `Display` renders the name of the corresponding `styles.xml` collection
/// element, which is what shows up in error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    NumFmt,
    Font,
    Fill,
    Border,
    CellStyleXf,
    CellXf,
    CellStyle,
    Dxf,
}

impl TableKind {
    /// Element name of the collection in `styles.xml`.
    pub const fn element_name(self) -> &'static str {
        match self {
            Self::NumFmt => "numFmts",
            Self::Font => "fonts",
            Self::Fill => "fills",
            Self::Border => "borders",
            Self::CellStyleXf => "cellStyleXfs",
            Self::CellXf => "cellXfs",
            Self::CellStyle => "cellStyles",
            Self::Dxf => "dxfs",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// Error types for style table operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    /// The style description is contradictory or out of range
    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    /// Index outside the current bounds of a table
    #[error("Style not found: index {index} is out of range for {table}")]
    StyleNotFound { table: TableKind, index: usize },

    /// Parent style name that was never registered
    #[error("Named cell style not found: {0}")]
    NamedStyleNotFound(String),

    /// A stored record points at a leaf index that does not exist
    #[error(
        "Structural corruption: {referenced_by} record {owner} references missing {table} index {index}"
    )]
    StructuralCorruption {
        table: TableKind,
        index: usize,
        referenced_by: TableKind,
        owner: usize,
    },

    /// Bulk pre-seed rejected
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),
}

impl StyleError {
    #[inline]
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        StyleError::InvalidStyle(msg.into())
    }

    #[inline]
    pub(crate) fn not_found(table: TableKind, index: usize) -> Self {
        StyleError::StyleNotFound { table, index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_table() {
        let err = StyleError::not_found(TableKind::CellXf, 7);
        assert_eq!(
            err.to_string(),
            "Style not found: index 7 is out of range for cellXfs"
        );

        let err = StyleError::StructuralCorruption {
            table: TableKind::Font,
            index: 3,
            referenced_by: TableKind::CellXf,
            owner: 1,
        };
        assert_eq!(
            err.to_string(),
            "Structural corruption: cellXfs record 1 references missing fonts index 3"
        );
    }
}
