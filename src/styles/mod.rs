//! Style tables for XLSX workbooks.
//!
//! Cells in a workbook do not carry formatting themselves; they carry an
//! index into `cellXfs`, and each cell format record in turn points at
//! shared font, fill, border, and number format records. This module builds
//! those tables from high-level style descriptions, interning every record
//! so that equal formatting is stored once.
//!
//! # Architecture
//!
//! - `color`, `font`, `fill`, `border`, `alignment`, `number_format`: leaf
//!   records and the caller-facing specs they are built from
//! - `cell_style`: cell format records, apply flags, and named cell styles
//! - `dxf`: differential formats used by conditional formatting
//! - `description`: the style description callers register
//! - `table`: the append-only interning table shared by all record kinds
//! - `table_style`: table styles and the legacy palette, carried unchanged
//! - `sheet`: the full set of tables with registration and resolution
//! - `registry`: the thread-safe wrapper handed to writers
//!
//! # Example
//!
//! ```rust
//! use xlsx_style_table::styles::{ColorSpec, FillSpec, FontSpec, StyleDescription, StyleRegistry};
//!
//! let registry = StyleRegistry::new();
//! let header = StyleDescription {
//!     font: Some(FontSpec {
//!         bold: Some(true),
//!         size: Some(12.0),
//!         ..Default::default()
//!     }),
//!     fill: Some(FillSpec::solid(ColorSpec::rgb("FF0000"))),
//!     ..Default::default()
//! };
//!
//! let index = registry.register(&header)?;
//! assert_eq!(index, 1);
//! assert_eq!(registry.register(&header)?, index);
//! assert_eq!(registry.resolve(index)?, header);
//! # Ok::<(), xlsx_style_table::StyleError>(())
//! ```

mod alignment;
mod border;
mod cell_style;
mod color;
mod description;
mod dxf;
mod fill;
mod font;
mod number_format;
mod registry;
mod sheet;
mod table;
mod table_style;

pub use alignment::{
    Alignment, HorizontalAlignment, MAX_INDENT, Protection, ReadingOrder, VERTICAL_TEXT_ROTATION,
    VerticalAlignment,
};
pub use border::{Border, BorderEdge, BorderLine, BorderLineStyle, BorderSpec};
pub use cell_style::{ApplyFlags, CellXf, NamedCellStyle};
pub use color::{Color, ColorSpec, MAX_INDEXED_COLOR};
pub use description::{ResolvedStyle, StyleDescription};
pub use dxf::{Dxf, DxfSpec};
pub use fill::{
    Fill, FillSpec, GradientFill, GradientFillSpec, GradientStop, GradientStopSpec, GradientType,
    PatternFill, PatternFillSpec, PatternType,
};
pub use font::{Font, FontScheme, FontSpec, MAX_FONT_SIZE, UnderlineStyle, VerticalAlignRun};
pub use number_format::{
    FIRST_CUSTOM_NUM_FMT_ID, MAX_DECIMAL_PLACES, NumFmt, NumFmtSelector, NumFmtTable,
    builtin_format_code, is_builtin_id,
};
pub use registry::StyleRegistry;
pub use sheet::{StyleSheet, StyleSheetSeed, TableCounts};
pub use table::InternTable;
pub use table_style::{StyleColors, TableStyle, TableStyles};
