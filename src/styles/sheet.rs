//! The complete set of style tables of one workbook.
//!
//! [`StyleSheet`] is plain data with `&mut self` operations; it knows nothing
//! about threads. [`StyleRegistry`](super::StyleRegistry) wraps it in the
//! per-workbook guard.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::border::Border;
use super::cell_style::{ApplyFlags, CellXf, NamedCellStyle};
use super::description::{ResolvedStyle, StyleDescription, StyleParts};
use super::dxf::{Dxf, DxfSpec};
use super::fill::Fill;
use super::font::Font;
use super::number_format::{
    NumFmt, NumFmtRequest, NumFmtSelector, NumFmtTable, builtin_format_code, is_builtin_id,
    next_id_after,
};
use super::table::InternTable;
use super::table_style::{StyleColors, TableStyles};
use crate::error::{Result, StyleError, TableKind};

/// Records of an existing document, in document order.
///
/// Loading a seed preserves every index exactly as written; nothing in it is
/// deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheetSeed {
    pub num_fmts: Vec<NumFmt>,
    pub fonts: Vec<Font>,
    pub fills: Vec<Fill>,
    pub borders: Vec<Border>,
    pub cell_style_xfs: Vec<CellXf>,
    pub cell_xfs: Vec<CellXf>,
    pub cell_styles: Vec<NamedCellStyle>,
    pub dxfs: Vec<Dxf>,
    pub table_styles: Option<TableStyles>,
    pub colors: Option<StyleColors>,
}

/// Length of every table, i.e. the `count` attribute of each collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub num_fmts: usize,
    pub fonts: usize,
    pub fills: usize,
    pub borders: usize,
    pub cell_style_xfs: usize,
    pub cell_xfs: usize,
    pub cell_styles: usize,
    pub dxfs: usize,
}

/// Style tables for a workbook.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    num_fmts: NumFmtTable,
    fonts: InternTable<Font>,
    fills: InternTable<Fill>,
    borders: InternTable<Border>,
    cell_style_xfs: InternTable<CellXf>,
    cell_xfs: InternTable<CellXf>,
    cell_styles: Vec<NamedCellStyle>,
    cell_style_names: HashMap<String, usize>,
    dxfs: InternTable<Dxf>,
    /// Highest custom number format id embedded in a dxf
    dxf_num_fmt_max: Option<u32>,
    table_styles: Option<TableStyles>,
    colors: Option<StyleColors>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSheet {
    /// Create the tables of a new workbook, holding the records every
    /// workbook starts with.
    pub fn new() -> Self {
        let mut sheet = Self::empty();

        sheet.fonts.seed(Font::workbook_default());
        // Consumers expect these two fills first.
        sheet.fills.seed(Fill::none());
        sheet.fills.seed(Fill::gray125());
        sheet.borders.seed(Border::default());
        sheet.cell_style_xfs.seed(CellXf::default_style());
        sheet.cell_xfs.seed(CellXf::default_cell());
        sheet.push_named_style(NamedCellStyle::normal());

        sheet
    }

    /// Create tables with no records at all, ready to be seeded.
    pub fn empty() -> Self {
        Self {
            num_fmts: NumFmtTable::new(),
            fonts: InternTable::new(TableKind::Font),
            fills: InternTable::new(TableKind::Fill),
            borders: InternTable::new(TableKind::Border),
            cell_style_xfs: InternTable::new(TableKind::CellStyleXf),
            cell_xfs: InternTable::new(TableKind::CellXf),
            cell_styles: Vec::new(),
            cell_style_names: HashMap::new(),
            dxfs: InternTable::new(TableKind::Dxf),
            dxf_num_fmt_max: None,
            table_styles: None,
            colors: None,
        }
    }

    /// Build tables from the records of a loaded document.
    pub fn from_seed(seed: StyleSheetSeed) -> Result<Self> {
        let mut sheet = Self::empty();
        sheet.preseed(seed)?;
        Ok(sheet)
    }

    /// Check if no table holds any record.
    pub fn is_empty(&self) -> bool {
        self.counts() == TableCounts::default()
            && self.table_styles.is_none()
            && self.colors.is_none()
    }

    /// Load the records of an existing document into empty tables.
    ///
    /// Records are appended in order starting at index 0 so that the indices
    /// stored in the document's cells stay valid.
    pub fn preseed(&mut self, seed: StyleSheetSeed) -> Result<()> {
        if !self.is_empty() {
            return Err(StyleError::InvalidSeed(
                "tables already hold records".to_string(),
            ));
        }
        let mut ids = HashSet::with_capacity(seed.num_fmts.len());
        if let Some(dup) = seed.num_fmts.iter().find(|n| !ids.insert(n.id)) {
            return Err(StyleError::InvalidSeed(format!(
                "duplicate numFmt id {}",
                dup.id
            )));
        }

        for num_fmt in seed.num_fmts {
            self.num_fmts.seed(num_fmt)?;
        }
        for font in seed.fonts {
            self.fonts.seed(font);
        }
        for fill in seed.fills {
            self.fills.seed(fill);
        }
        for border in seed.borders {
            self.borders.seed(border);
        }
        for xf in seed.cell_style_xfs {
            self.cell_style_xfs.seed(xf);
        }
        for xf in seed.cell_xfs {
            self.cell_xfs.seed(xf);
        }
        for style in seed.cell_styles {
            self.push_named_style(style);
        }
        for dxf in seed.dxfs {
            self.note_dxf_num_fmt(&dxf);
            self.dxfs.seed(dxf);
        }
        self.table_styles = seed.table_styles;
        self.colors = seed.colors;

        log::debug!("pre-seeded style tables: {:?}", self.counts());
        Ok(())
    }

    /// Register a style description and return its cell format index.
    ///
    /// The description is validated completely before any table changes, so
    /// an error leaves the tables untouched.
    pub fn register(&mut self, description: &StyleDescription) -> Result<usize> {
        let parts = description.to_parts()?;
        let parent = self.parent_xf(description.parent_style.as_deref())?;
        let owner = self.cell_xfs.len();
        self.check_defaults(&parts, TableKind::CellXf, owner)?;
        if self.cell_style_xfs.get(parent).is_none() {
            let err = self.corruption(TableKind::CellStyleXf, parent, TableKind::CellXf, owner);
            return Err(err);
        }

        let xf = self.intern_parts(parts, Some(parent), description)?;
        Ok(self.cell_xfs.intern(xf))
    }

    /// Register a named cell style and return its cellStyleXfs index.
    ///
    /// Each named style owns its master record, so two names never share an
    /// index even when their formatting is identical.
    pub fn register_named_style(
        &mut self,
        name: &str,
        description: &StyleDescription,
    ) -> Result<usize> {
        if name.is_empty() {
            return Err(StyleError::invalid("named style name is empty"));
        }
        if self.cell_style_names.contains_key(name) {
            return Err(StyleError::invalid(format!(
                "named style {:?} already exists",
                name
            )));
        }
        if description.parent_style.is_some() {
            return Err(StyleError::invalid(
                "named styles cannot inherit from another named style",
            ));
        }

        let parts = description.to_parts()?;
        let owner = self.cell_style_xfs.len();
        self.check_defaults(&parts, TableKind::CellStyleXf, owner)?;

        let xf = self.intern_parts(parts, None, description)?;
        let index = self.cell_style_xfs.seed(xf);
        self.push_named_style(NamedCellStyle::new(name, index));
        log::debug!("registered named style {:?} at cellStyleXf {}", name, index);
        Ok(index)
    }

    /// Look up a named cell style.
    pub fn named_style(&self, name: &str) -> Option<&NamedCellStyle> {
        self.cell_style_names
            .get(name)
            .map(|&pos| &self.cell_styles[pos])
    }

    /// Raw cell format record.
    #[inline]
    pub fn cell_xf(&self, index: usize) -> Result<&CellXf> {
        self.cell_xfs.resolve(index)
    }

    /// Rebuild the description of a registered style.
    ///
    /// Only facets whose apply flag is set are returned. Hints such as
    /// decimal places come back as the number format they produced.
    pub fn resolve(&self, index: usize) -> Result<StyleDescription> {
        let xf = self.cell_xfs.resolve(index)?;
        let leaves = self.leaves(xf, TableKind::CellXf, index)?;

        let number_format = xf.applies(ApplyFlags::NUMBER_FORMAT).then(|| {
            NumFmtSelector::for_record(
                xf.num_fmt_id,
                leaves.num_fmt.map(|n| n.format_code.as_str()),
            )
        });

        Ok(StyleDescription {
            border: xf
                .applies(ApplyFlags::BORDER)
                .then(|| leaves.border.to_specs()),
            fill: xf.applies(ApplyFlags::FILL).then(|| leaves.fill.to_spec()),
            font: xf.applies(ApplyFlags::FONT).then(|| leaves.font.to_spec()),
            alignment: xf
                .alignment
                .clone()
                .filter(|_| xf.applies(ApplyFlags::ALIGNMENT)),
            protection: xf.protection.filter(|_| xf.applies(ApplyFlags::PROTECTION)),
            number_format,
            decimal_places: None,
            negative_red: false,
            lang: xf.lang.clone(),
            quote_prefix: xf.quote_prefix,
            parent_style: xf
                .xf_id
                .filter(|&id| id != self.default_parent())
                .and_then(|id| self.style_name_for(id))
                .map(str::to_string),
        })
    }

    /// Dereference every foreign key of a registered style.
    pub fn resolve_effective(&self, index: usize) -> Result<ResolvedStyle> {
        let xf = self.cell_xfs.resolve(index)?;
        let leaves = self.leaves(xf, TableKind::CellXf, index)?;

        let num_fmt = match leaves.num_fmt {
            Some(record) => record.clone(),
            None => NumFmt::new(
                xf.num_fmt_id,
                builtin_format_code(xf.num_fmt_id).unwrap_or_default(),
            ),
        };

        Ok(ResolvedStyle {
            index,
            xf: xf.clone(),
            num_fmt,
            font: leaves.font.clone(),
            fill: leaves.fill.clone(),
            border: leaves.border.clone(),
            parent_style: xf
                .xf_id
                .and_then(|id| self.style_name_for(id))
                .map(str::to_string),
        })
    }

    /// Register a differential format and return its index.
    pub fn register_dxf(&mut self, spec: &DxfSpec) -> Result<usize> {
        let dxf = spec.to_dxf(|code| self.dxf_custom_id(code))?;
        self.note_dxf_num_fmt(&dxf);
        Ok(self.dxfs.intern(dxf))
    }

    /// Rebuild the partial description of a differential format.
    pub fn resolve_dxf(&self, index: usize) -> Result<DxfSpec> {
        Ok(self.dxfs.resolve(index)?.to_spec())
    }

    /// Raw differential format record.
    #[inline]
    pub fn dxf(&self, index: usize) -> Result<&Dxf> {
        self.dxfs.resolve(index)
    }

    #[inline]
    pub fn num_fmts(&self) -> &NumFmtTable {
        &self.num_fmts
    }

    #[inline]
    pub fn fonts(&self) -> &InternTable<Font> {
        &self.fonts
    }

    #[inline]
    pub fn fills(&self) -> &InternTable<Fill> {
        &self.fills
    }

    #[inline]
    pub fn borders(&self) -> &InternTable<Border> {
        &self.borders
    }

    #[inline]
    pub fn cell_style_xfs(&self) -> &InternTable<CellXf> {
        &self.cell_style_xfs
    }

    #[inline]
    pub fn cell_xfs(&self) -> &InternTable<CellXf> {
        &self.cell_xfs
    }

    #[inline]
    pub fn cell_styles(&self) -> &[NamedCellStyle] {
        &self.cell_styles
    }

    #[inline]
    pub fn dxfs(&self) -> &InternTable<Dxf> {
        &self.dxfs
    }

    /// Table styles of a loaded document, kept as loaded.
    #[inline]
    pub fn table_styles(&self) -> Option<&TableStyles> {
        self.table_styles.as_ref()
    }

    /// Legacy palette of a loaded document, kept as loaded.
    #[inline]
    pub fn colors(&self) -> Option<&StyleColors> {
        self.colors.as_ref()
    }

    pub fn counts(&self) -> TableCounts {
        TableCounts {
            num_fmts: self.num_fmts.len(),
            fonts: self.fonts.len(),
            fills: self.fills.len(),
            borders: self.borders.len(),
            cell_style_xfs: self.cell_style_xfs.len(),
            cell_xfs: self.cell_xfs.len(),
            cell_styles: self.cell_styles.len(),
            dxfs: self.dxfs.len(),
        }
    }

    /// Intern the leaf records of `parts` and assemble the xf candidate.
    fn intern_parts(
        &mut self,
        parts: StyleParts,
        xf_id: Option<usize>,
        description: &StyleDescription,
    ) -> Result<CellXf> {
        let apply = parts.apply_flags();

        // Runs first, so running out of ids leaves every table untouched.
        let num_fmt_id = match parts.num_fmt {
            None => 0,
            Some(NumFmtRequest::Id(id)) => id,
            Some(NumFmtRequest::Code(code)) => match self.num_fmts.find_code(&code) {
                Some(id) => id,
                None => {
                    let floor = self.custom_id_floor()?;
                    self.num_fmts.intern_code(&code, floor)?
                },
            },
        };
        let font_id = parts.font.map_or(0, |font| self.fonts.intern(font));
        let fill_id = parts.fill.map_or(0, |fill| self.fills.intern(fill));
        let border_id = parts.border.map_or(0, |border| self.borders.intern(border));

        Ok(CellXf {
            num_fmt_id,
            font_id,
            fill_id,
            border_id,
            xf_id,
            apply,
            alignment: parts.alignment,
            protection: parts.protection,
            quote_prefix: description.quote_prefix,
            pivot_button: false,
            lang: description.lang.clone(),
        })
    }

    /// Facets left out of a description fall back to record 0 of their table,
    /// which must exist.
    fn check_defaults(
        &self,
        parts: &StyleParts,
        owner_kind: TableKind,
        owner: usize,
    ) -> Result<()> {
        let missing = if parts.font.is_none() && self.fonts.is_empty() {
            Some(TableKind::Font)
        } else if parts.fill.is_none() && self.fills.is_empty() {
            Some(TableKind::Fill)
        } else if parts.border.is_none() && self.borders.is_empty() {
            Some(TableKind::Border)
        } else {
            None
        };
        match missing {
            Some(table) => Err(self.corruption(table, 0, owner_kind, owner)),
            None => Ok(()),
        }
    }

    /// Parent of styles that name none: the master record of the built-in
    /// "Normal" style, which is record 0 unless a loaded document says
    /// otherwise.
    fn default_parent(&self) -> usize {
        self.cell_styles
            .iter()
            .find(|style| style.builtin_id == Some(0))
            .map_or(0, |style| style.xf_id)
    }

    fn parent_xf(&self, name: Option<&str>) -> Result<usize> {
        match name {
            None => Ok(self.default_parent()),
            Some(name) => self
                .named_style(name)
                .map(|style| style.xf_id)
                .ok_or_else(|| StyleError::NamedStyleNotFound(name.to_string())),
        }
    }

    fn style_name_for(&self, xf_id: usize) -> Option<&str> {
        self.cell_styles
            .iter()
            .find(|style| style.xf_id == xf_id)
            .map(|style| style.name.as_str())
    }

    fn push_named_style(&mut self, style: NamedCellStyle) {
        self.cell_style_names
            .entry(style.name.clone())
            .or_insert(self.cell_styles.len());
        self.cell_styles.push(style);
    }

    /// Look up every record an xf points at.
    fn leaves<'a>(&'a self, xf: &CellXf, kind: TableKind, owner: usize) -> Result<Leaves<'a>> {
        let num_fmt = self.num_fmts.get(xf.num_fmt_id);
        if num_fmt.is_none() && !is_builtin_id(xf.num_fmt_id) {
            let id = xf.num_fmt_id as usize;
            return Err(self.corruption(TableKind::NumFmt, id, kind, owner));
        }
        if let Some(parent) = xf.xf_id
            && kind == TableKind::CellXf
            && self.cell_style_xfs.get(parent).is_none()
        {
            return Err(self.corruption(TableKind::CellStyleXf, parent, kind, owner));
        }

        Ok(Leaves {
            num_fmt,
            font: self.leaf(&self.fonts, xf.font_id, kind, owner)?,
            fill: self.leaf(&self.fills, xf.fill_id, kind, owner)?,
            border: self.leaf(&self.borders, xf.border_id, kind, owner)?,
        })
    }

    fn leaf<'a, T>(
        &self,
        table: &'a InternTable<T>,
        index: usize,
        kind: TableKind,
        owner: usize,
    ) -> Result<&'a T>
    where
        T: Clone + Eq + std::hash::Hash + std::fmt::Debug,
    {
        table
            .get(index)
            .ok_or_else(|| self.corruption(table.kind(), index, kind, owner))
    }

    fn corruption(
        &self,
        table: TableKind,
        index: usize,
        referenced_by: TableKind,
        owner: usize,
    ) -> StyleError {
        log::warn!(
            "{} record {} references missing {} index {}",
            referenced_by,
            owner,
            table,
            index
        );
        StyleError::StructuralCorruption {
            table,
            index,
            referenced_by,
            owner,
        }
    }

    /// New custom number format ids must stay clear of ids embedded in dxfs.
    fn custom_id_floor(&self) -> Result<u32> {
        self.dxf_num_fmt_max.map_or(Ok(0), next_id_after)
    }

    /// Id for a custom code embedded in a dxf. Never mutates the tables.
    fn dxf_custom_id(&self, code: &str) -> Result<u32> {
        let known = self.num_fmts.find_code(code).or_else(|| {
            self.dxfs
                .iter()
                .filter_map(|dxf| dxf.num_fmt.as_ref())
                .find(|n| !n.is_builtin() && n.format_code == code)
                .map(|n| n.id)
        });
        match known {
            Some(id) => Ok(id),
            None => Ok(self.num_fmts.next_custom_id()?.max(self.custom_id_floor()?)),
        }
    }

    fn note_dxf_num_fmt(&mut self, dxf: &Dxf) {
        if let Some(num_fmt) = &dxf.num_fmt
            && !num_fmt.is_builtin()
        {
            let max = self.dxf_num_fmt_max.map_or(num_fmt.id, |max| max.max(num_fmt.id));
            self.dxf_num_fmt_max = Some(max);
        }
    }
}

/// Records an xf points at. `num_fmt` is `None` for built-in ids with no
/// stored override.
struct Leaves<'a> {
    num_fmt: Option<&'a NumFmt>,
    font: &'a Font,
    fill: &'a Fill,
    border: &'a Border,
}
