//! Thread-safe, per-workbook style registry.

use parking_lot::RwLock;

use super::cell_style::{CellXf, NamedCellStyle};
use super::description::{ResolvedStyle, StyleDescription};
use super::dxf::{Dxf, DxfSpec};
use super::sheet::{StyleSheet, StyleSheetSeed, TableCounts};
use crate::error::Result;

/// Owns the style tables of one workbook and serializes access to them.
///
/// A registration holds the write guard for its whole lookup-then-append
/// sequence, so two threads registering equal descriptions always receive
/// the same index and never create duplicate records. Resolution takes the
/// read guard and may run concurrently with other resolutions.
///
/// Thread-safe via parking_lot RwLock; the registry is `Send + Sync` and can
/// be shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    sheet: RwLock<StyleSheet>,
}

impl StyleRegistry {
    /// Registry for a new workbook, holding the default records.
    pub fn new() -> Self {
        Self::from_sheet(StyleSheet::new())
    }

    /// Registry with no records, to be filled with [`StyleRegistry::preseed`].
    pub fn empty() -> Self {
        Self::from_sheet(StyleSheet::empty())
    }

    /// Registry over the records of a loaded document.
    pub fn from_seed(seed: StyleSheetSeed) -> Result<Self> {
        StyleSheet::from_seed(seed).map(Self::from_sheet)
    }

    #[inline]
    pub fn from_sheet(sheet: StyleSheet) -> Self {
        Self {
            sheet: RwLock::new(sheet),
        }
    }

    /// Register a style description and return its cell format index.
    pub fn register(&self, description: &StyleDescription) -> Result<usize> {
        self.sheet.write().register(description)
    }

    /// Rebuild the description of a registered style.
    pub fn resolve(&self, index: usize) -> Result<StyleDescription> {
        self.sheet.read().resolve(index)
    }

    /// Dereference every foreign key of a registered style.
    pub fn resolve_effective(&self, index: usize) -> Result<ResolvedStyle> {
        self.sheet.read().resolve_effective(index)
    }

    /// Copy of a raw cell format record.
    pub fn cell_xf(&self, index: usize) -> Result<CellXf> {
        self.sheet.read().cell_xf(index).cloned()
    }

    /// Register a differential format and return its index.
    pub fn register_dxf(&self, spec: &DxfSpec) -> Result<usize> {
        self.sheet.write().register_dxf(spec)
    }

    pub fn resolve_dxf(&self, index: usize) -> Result<DxfSpec> {
        self.sheet.read().resolve_dxf(index)
    }

    /// Copy of a raw differential format record.
    pub fn dxf(&self, index: usize) -> Result<Dxf> {
        self.sheet.read().dxf(index).cloned()
    }

    /// Register a named cell style and return its cellStyleXfs index.
    pub fn register_named_style(
        &self,
        name: &str,
        description: &StyleDescription,
    ) -> Result<usize> {
        self.sheet.write().register_named_style(name, description)
    }

    pub fn named_style(&self, name: &str) -> Option<NamedCellStyle> {
        self.sheet.read().named_style(name).cloned()
    }

    /// Load the records of an existing document. Only allowed while the
    /// registry is empty.
    pub fn preseed(&self, seed: StyleSheetSeed) -> Result<()> {
        self.sheet.write().preseed(seed)
    }

    /// Consistent copy of every table, e.g. for serialization.
    pub fn snapshot(&self) -> StyleSheet {
        self.sheet.read().clone()
    }

    /// Run `f` against the tables under a single read guard.
    pub fn read<R>(&self, f: impl FnOnce(&StyleSheet) -> R) -> R {
        f(&self.sheet.read())
    }

    pub fn counts(&self) -> TableCounts {
        self.sheet.read().counts()
    }

    /// Take the tables out of the registry.
    #[inline]
    pub fn into_inner(self) -> StyleSheet {
        self.sheet.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use pretty_assertions::assert_eq;
    use rayon::prelude::*;

    use super::*;
    use crate::error::StyleError;
    use crate::styles::border::{BorderEdge, BorderLineStyle, BorderSpec};
    use crate::styles::color::ColorSpec;
    use crate::styles::fill::FillSpec;
    use crate::styles::font::FontSpec;

    fn italic_blue() -> StyleDescription {
        StyleDescription {
            font: Some(FontSpec {
                italic: Some(true),
                color: Some(ColorSpec::rgb("0000FF")),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StyleRegistry>();
    }

    #[test]
    fn test_concurrent_registration_of_equal_descriptions() {
        let registry = Arc::new(StyleRegistry::new());
        let before = registry.counts();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.register(&italic_blue()))
            })
            .collect();
        let indices: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();

        assert!(indices.iter().all(|&i| i == indices[0]));
        let after = registry.counts();
        assert_eq!(after.cell_xfs, before.cell_xfs + 1);
        assert_eq!(after.fonts, before.fonts + 1);
    }

    #[test]
    fn test_concurrent_border_only_registration() {
        let registry = StyleRegistry::new();
        let before = registry.counts();
        let boxed = StyleDescription {
            border: Some(
                [BorderEdge::Left, BorderEdge::Right, BorderEdge::Top, BorderEdge::Bottom]
                    .into_iter()
                    .map(|edge| BorderSpec::new(edge, BorderLineStyle::Thin, None))
                    .collect(),
            ),
            ..Default::default()
        };

        let (a, b) = rayon::join(|| registry.register(&boxed), || registry.register(&boxed));
        assert_eq!(a.unwrap(), b.unwrap());

        let after = registry.counts();
        assert_eq!(after.borders, before.borders + 1);
        assert_eq!(after.cell_xfs, before.cell_xfs + 1);
    }

    #[test]
    fn test_parallel_mixed_registration() {
        let registry = StyleRegistry::new();
        let descriptions: Vec<StyleDescription> = (0..16u32)
            .map(|i| StyleDescription {
                fill: Some(FillSpec::solid(ColorSpec::indexed(i % 4 + 8))),
                ..Default::default()
            })
            .collect();

        let indices: Vec<usize> = descriptions
            .par_iter()
            .map(|d| registry.register(d).unwrap())
            .collect();

        // Equal descriptions share an index, distinct ones never do.
        for (a, da) in indices.iter().zip(&descriptions) {
            for (b, db) in indices.iter().zip(&descriptions) {
                assert_eq!(a == b, da == db);
            }
        }
        let counts = registry.counts();
        assert_eq!(counts.fills, 2 + 4);
        assert_eq!(counts.cell_xfs, 1 + 4);

        let resolved: Vec<StyleDescription> = indices
            .par_iter()
            .map(|&i| registry.resolve(i).unwrap())
            .collect();
        assert_eq!(resolved, descriptions);
    }

    #[test]
    fn test_snapshot_and_read() {
        let registry = StyleRegistry::new();
        let index = registry.register(&italic_blue()).unwrap();

        let snapshot = registry.snapshot();
        registry
            .register(&StyleDescription {
                quote_prefix: true,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(snapshot.counts().cell_xfs, 2);
        assert_eq!(registry.read(|sheet| sheet.cell_xfs().len()), 3);
        assert_eq!(registry.cell_xf(index).unwrap().font_id, 1);
        assert_eq!(registry.into_inner().counts().cell_xfs, 3);
    }

    #[test]
    fn test_preseed_through_registry() {
        let registry = StyleRegistry::empty();
        let seed = StyleRegistry::new().snapshot();
        let seed = StyleSheetSeed {
            fonts: seed.fonts().as_slice().to_vec(),
            fills: seed.fills().as_slice().to_vec(),
            borders: seed.borders().as_slice().to_vec(),
            cell_style_xfs: seed.cell_style_xfs().as_slice().to_vec(),
            cell_xfs: seed.cell_xfs().as_slice().to_vec(),
            cell_styles: seed.cell_styles().to_vec(),
            ..Default::default()
        };

        registry.preseed(seed.clone()).unwrap();
        assert_eq!(registry.counts(), StyleRegistry::new().counts());
        assert!(matches!(
            registry.preseed(seed),
            Err(StyleError::InvalidSeed(_))
        ));
        assert_eq!(registry.named_style("Normal").map(|s| s.xf_id), Some(0));
    }

    #[test]
    fn test_dxf_and_named_styles_through_registry() {
        let registry = StyleRegistry::new();
        let spec = DxfSpec {
            font: Some(FontSpec {
                strike: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        let index = registry.register_dxf(&spec).unwrap();
        assert_eq!(registry.resolve_dxf(index).unwrap(), spec);
        assert!(registry.dxf(index).unwrap().font.is_some());

        let xf = registry
            .register_named_style("Accent", &italic_blue())
            .unwrap();
        assert_eq!(registry.named_style("Accent").map(|s| s.xf_id), Some(xf));
        let effective = registry
            .resolve_effective(
                registry
                    .register(&StyleDescription {
                        parent_style: Some("Accent".to_string()),
                        ..Default::default()
                    })
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(effective.parent_style.as_deref(), Some("Accent"));
    }

    mod proptests {
        use super::*;
        use crate::styles::alignment::{Alignment, HorizontalAlignment, Protection};
        use crate::styles::fill::PatternType;
        use crate::styles::number_format::NumFmtSelector;
        use proptest::prelude::*;

        fn color_strategy() -> impl Strategy<Value = ColorSpec> {
            prop_oneof![
                Just(ColorSpec::auto()),
                "[0-9A-F]{6}".prop_map(ColorSpec::rgb),
                (0u32..=65).prop_map(ColorSpec::indexed),
                (0u32..12, prop::option::of(-100i32..=100))
                    .prop_map(|(i, t)| ColorSpec::theme(i, t.map(|t| t as f64 / 100.0))),
            ]
        }

        fn font_strategy() -> impl Strategy<Value = FontSpec> {
            (
                prop::option::of(any::<bool>()),
                prop::option::of(any::<bool>()),
                prop::option::of(prop_oneof![Just(9.0), Just(11.0), Just(14.5)]),
                prop::option::of(color_strategy()),
                prop::option::of(prop_oneof![
                    Just("Calibri".to_string()),
                    Just("Arial".to_string())
                ]),
            )
                .prop_map(|(bold, italic, size, color, name)| FontSpec {
                    bold,
                    italic,
                    size,
                    color,
                    name,
                    ..Default::default()
                })
        }

        fn fill_strategy() -> impl Strategy<Value = FillSpec> {
            prop_oneof![
                color_strategy().prop_map(FillSpec::solid),
                (prop::option::of(color_strategy()), prop::option::of(color_strategy()))
                    .prop_map(|(fg, bg)| FillSpec::pattern(PatternType::LightGray, fg, bg)),
            ]
        }

        /// Edges in canonical order so resolved specs compare equal.
        fn border_strategy() -> impl Strategy<Value = Vec<BorderSpec>> {
            let line = prop_oneof![
                Just(BorderLineStyle::None),
                Just(BorderLineStyle::Thin),
                Just(BorderLineStyle::Medium),
                Just(BorderLineStyle::Dashed),
                Just(BorderLineStyle::Double),
            ];
            prop::collection::vec((any::<bool>(), line, prop::option::of(color_strategy())), 4)
                .prop_map(|edges| {
                    [BorderEdge::Left, BorderEdge::Right, BorderEdge::Top, BorderEdge::Bottom]
                        .into_iter()
                        .zip(edges)
                        .filter(|(_, (present, _, _))| *present)
                        .map(|(edge, (_, style, color))| {
                            // An edge with neither style nor color is rejected.
                            let color = match style {
                                BorderLineStyle::None => Some(color.unwrap_or_else(ColorSpec::auto)),
                                _ => color,
                            };
                            BorderSpec::new(edge, style, color)
                        })
                        .collect()
                })
        }

        fn description_strategy() -> impl Strategy<Value = StyleDescription> {
            (
                prop::option::of(font_strategy()),
                prop::option::of(fill_strategy()),
                prop::option::of(border_strategy()),
                prop::option::of(prop_oneof![
                    (0u32..50).prop_map(NumFmtSelector::Builtin),
                    "0\\.0{1,4}(%)?".prop_map(NumFmtSelector::Custom),
                ]),
                prop::option::of(any::<bool>().prop_map(|wrap| Alignment {
                    horizontal: Some(HorizontalAlignment::Right),
                    wrap_text: wrap,
                    ..Default::default()
                })),
                prop::option::of(any::<bool>().prop_map(|locked| Protection {
                    locked: Some(locked),
                    hidden: None,
                })),
                any::<bool>(),
            )
                .prop_map(
                    |(font, fill, border, number_format, alignment, protection, quote_prefix)| {
                        StyleDescription {
                            font,
                            fill,
                            border,
                            number_format,
                            alignment,
                            protection,
                            quote_prefix,
                            ..Default::default()
                        }
                    },
                )
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn prop_register_is_idempotent(descriptions in prop::collection::vec(description_strategy(), 1..8)) {
                let registry = StyleRegistry::new();
                let first: Vec<usize> = descriptions
                    .iter()
                    .map(|d| registry.register(d).unwrap())
                    .collect();
                let counts = registry.counts();

                let second: Vec<usize> = descriptions
                    .iter()
                    .map(|d| registry.register(d).unwrap())
                    .collect();
                prop_assert_eq!(first, second);
                prop_assert_eq!(registry.counts(), counts);
            }

            #[test]
            fn prop_resolve_round_trip(description in description_strategy()) {
                let registry = StyleRegistry::new();
                let index = registry.register(&description).unwrap();
                prop_assert_eq!(registry.resolve(index).unwrap(), description);
            }

            #[test]
            fn prop_distinct_descriptions_distinct_indices(
                a in description_strategy(),
                b in description_strategy(),
            ) {
                let registry = StyleRegistry::new();
                let ia = registry.register(&a).unwrap();
                let ib = registry.register(&b).unwrap();
                prop_assert_eq!(ia == ib, a == b);
            }
        }
    }
}
