//! XLSX Style Table - interned formatting tables for spreadsheet writers
//!
//! This library maintains the style part of an XLSX workbook (`styles.xml`):
//! number formats, fonts, fills, borders, cell formats, named cell styles and
//! differential formats. Callers describe a style at a high level and get
//! back the integer index a cell stores; equal descriptions always map to
//! the same index and every record is stored once.
//!
//! # Features
//!
//! - **Interning**: structurally equal records share one index per table
//! - **Apply flags**: explicitly specified facets are recorded even when they
//!   match the workbook default
//! - **Round trip**: a registered index resolves back to its description
//! - **Pre-seeding**: tables of a loaded document keep their original indices
//! - **Thread safety**: one registry per workbook, shareable across threads
//!
//! # Example
//!
//! ```rust
//! use xlsx_style_table::styles::{NumFmtSelector, StyleDescription, StyleRegistry};
//!
//! # fn main() -> xlsx_style_table::Result<()> {
//! let registry = StyleRegistry::new();
//! let percent = StyleDescription {
//!     number_format: Some(NumFmtSelector::Custom("0.0%".to_string())),
//!     ..Default::default()
//! };
//!
//! let index = registry.register(&percent)?;
//! let style = registry.resolve_effective(index)?;
//! assert_eq!(style.num_fmt.id, 164);
//! assert_eq!(style.num_fmt.format_code, "0.0%");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod styles;

pub use error::{Result, StyleError, TableKind};
pub use styles::{StyleDescription, StyleRegistry, StyleSheet};
