//! Fill patterns and colors.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::{Color, ColorSpec, to_optional_color};
use crate::error::{Result, StyleError};

/// Cell fill pattern types (`ST_PatternType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    None,
    Solid,
    MediumGray,
    DarkGray,
    LightGray,
    DarkHorizontal,
    DarkVertical,
    DarkDown,
    DarkUp,
    DarkGrid,
    DarkTrellis,
    LightHorizontal,
    LightVertical,
    LightDown,
    LightUp,
    LightGrid,
    LightTrellis,
    Gray125,
    Gray0625,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Solid => "solid",
            Self::MediumGray => "mediumGray",
            Self::DarkGray => "darkGray",
            Self::LightGray => "lightGray",
            Self::DarkHorizontal => "darkHorizontal",
            Self::DarkVertical => "darkVertical",
            Self::DarkDown => "darkDown",
            Self::DarkUp => "darkUp",
            Self::DarkGrid => "darkGrid",
            Self::DarkTrellis => "darkTrellis",
            Self::LightHorizontal => "lightHorizontal",
            Self::LightVertical => "lightVertical",
            Self::LightDown => "lightDown",
            Self::LightUp => "lightUp",
            Self::LightGrid => "lightGrid",
            Self::LightTrellis => "lightTrellis",
            Self::Gray125 => "gray125",
            Self::Gray0625 => "gray0625",
        }
    }
}

/// Gradient interpolation type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientType {
    #[default]
    Linear,
    Path,
}

/// A fill record. Either a pattern or a gradient, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Pattern(PatternFill),
    Gradient(GradientFill),
}

/// Pattern and solid color fills.
///
/// For solid fills the color is the foreground color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternFill {
    pub pattern_type: Option<PatternType>,
    pub fg_color: Option<Color>,
    pub bg_color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GradientFill {
    pub gradient_type: GradientType,
    /// Angle of a linear gradient, in degrees
    pub degree: OrderedFloat<f64>,
    pub left: OrderedFloat<f64>,
    pub right: OrderedFloat<f64>,
    pub top: OrderedFloat<f64>,
    pub bottom: OrderedFloat<f64>,
    pub stops: SmallVec<[GradientStop; 2]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: OrderedFloat<f64>,
    pub color: Color,
}

impl Fill {
    /// Fill 0 of every workbook.
    #[inline]
    pub fn none() -> Self {
        Self::with_pattern(PatternType::None)
    }

    /// Fill 1 of every workbook.
    #[inline]
    pub fn gray125() -> Self {
        Self::with_pattern(PatternType::Gray125)
    }

    fn with_pattern(pattern_type: PatternType) -> Self {
        Fill::Pattern(PatternFill {
            pattern_type: Some(pattern_type),
            ..Default::default()
        })
    }

    /// Check if this is a solid fill.
    pub fn is_solid(&self) -> bool {
        matches!(
            self,
            Fill::Pattern(PatternFill {
                pattern_type: Some(PatternType::Solid),
                ..
            })
        )
    }

    pub fn to_spec(&self) -> FillSpec {
        match self {
            Fill::Pattern(p) => FillSpec {
                pattern: Some(PatternFillSpec {
                    pattern_type: p.pattern_type,
                    fg_color: p.fg_color.as_ref().map(Color::to_spec),
                    bg_color: p.bg_color.as_ref().map(Color::to_spec),
                }),
                gradient: None,
            },
            Fill::Gradient(g) => FillSpec {
                pattern: None,
                gradient: Some(GradientFillSpec {
                    gradient_type: g.gradient_type,
                    degree: g.degree.0,
                    left: g.left.0,
                    right: g.right.0,
                    top: g.top.0,
                    bottom: g.bottom.0,
                    stops: g
                        .stops
                        .iter()
                        .map(|s| GradientStopSpec {
                            position: s.position.0,
                            color: s.color.to_spec(),
                        })
                        .collect(),
                }),
            },
        }
    }
}

/// Caller-facing fill description.
///
/// Both parts are optional so that callers can describe what they have; a
/// valid description sets exactly one of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillSpec {
    pub pattern: Option<PatternFillSpec>,
    pub gradient: Option<GradientFillSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternFillSpec {
    pub pattern_type: Option<PatternType>,
    pub fg_color: Option<ColorSpec>,
    pub bg_color: Option<ColorSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientFillSpec {
    pub gradient_type: GradientType,
    pub degree: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub stops: Vec<GradientStopSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStopSpec {
    pub position: f64,
    pub color: ColorSpec,
}

impl FillSpec {
    /// Solid fill in the given foreground color.
    pub fn solid(color: ColorSpec) -> Self {
        Self::pattern(PatternType::Solid, Some(color), None)
    }

    pub fn pattern(
        pattern_type: PatternType,
        fg_color: Option<ColorSpec>,
        bg_color: Option<ColorSpec>,
    ) -> Self {
        Self {
            pattern: Some(PatternFillSpec {
                pattern_type: Some(pattern_type),
                fg_color,
                bg_color,
            }),
            gradient: None,
        }
    }

    pub fn gradient(gradient: GradientFillSpec) -> Self {
        Self {
            pattern: None,
            gradient: Some(gradient),
        }
    }

    /// Validate and build the fill record.
    pub fn to_fill(&self) -> Result<Fill> {
        match (&self.pattern, &self.gradient) {
            (Some(_), Some(_)) => Err(StyleError::invalid(
                "fill specifies both pattern and gradient data",
            )),
            (None, None) => Err(StyleError::invalid(
                "fill specifies neither pattern nor gradient data",
            )),
            (Some(pattern), None) => Ok(Fill::Pattern(PatternFill {
                pattern_type: pattern.pattern_type,
                fg_color: to_optional_color(pattern.fg_color.as_ref())?,
                bg_color: to_optional_color(pattern.bg_color.as_ref())?,
            })),
            (None, Some(gradient)) => gradient.to_fill(),
        }
    }
}

impl GradientFillSpec {
    fn to_fill(&self) -> Result<Fill> {
        if !self.degree.is_finite() {
            return Err(StyleError::invalid("gradient degree is not finite"));
        }
        for (name, offset) in [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ] {
            check_unit(name, offset)?;
        }

        let mut stops = SmallVec::with_capacity(self.stops.len());
        let mut previous = 0.0;
        for stop in &self.stops {
            check_unit("stop position", stop.position)?;
            if stop.position < previous {
                return Err(StyleError::invalid(format!(
                    "gradient stop at {} comes after a stop at {}",
                    stop.position, previous
                )));
            }
            previous = stop.position;
            stops.push(GradientStop {
                position: OrderedFloat(stop.position),
                color: stop.color.to_color()?,
            });
        }

        Ok(Fill::Gradient(GradientFill {
            gradient_type: self.gradient_type,
            degree: OrderedFloat(self.degree),
            left: OrderedFloat(self.left),
            right: OrderedFloat(self.right),
            top: OrderedFloat(self.top),
            bottom: OrderedFloat(self.bottom),
            stops,
        }))
    }
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(StyleError::invalid(format!(
            "gradient {} {} is outside [0, 1]",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_stop_gradient() -> GradientFillSpec {
        GradientFillSpec {
            degree: 90.0,
            stops: vec![
                GradientStopSpec {
                    position: 0.0,
                    color: ColorSpec::rgb("FFFFFF"),
                },
                GradientStopSpec {
                    position: 1.0,
                    color: ColorSpec::theme(4, None),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_both_variants_rejected() {
        let spec = FillSpec {
            pattern: Some(PatternFillSpec::default()),
            gradient: Some(two_stop_gradient()),
        };
        assert!(matches!(spec.to_fill(), Err(StyleError::InvalidStyle(_))));
    }

    #[test]
    fn test_neither_variant_rejected() {
        assert!(FillSpec::default().to_fill().is_err());
    }

    #[test]
    fn test_solid_fill() {
        let fill = FillSpec::solid(ColorSpec::rgb("FF0000")).to_fill().unwrap();
        assert!(fill.is_solid());
        assert!(!Fill::gray125().is_solid());
    }

    #[test]
    fn test_gradient_validation() {
        let fill = FillSpec::gradient(two_stop_gradient()).to_fill().unwrap();
        match &fill {
            Fill::Gradient(g) => assert_eq!(g.stops.len(), 2),
            other => panic!("expected gradient, got {:?}", other),
        }

        let mut unordered = two_stop_gradient();
        unordered.stops.reverse();
        assert!(FillSpec::gradient(unordered).to_fill().is_err());

        let mut outside = two_stop_gradient();
        outside.top = 1.5;
        assert!(FillSpec::gradient(outside).to_fill().is_err());

        let mut bad_degree = two_stop_gradient();
        bad_degree.degree = f64::NAN;
        assert!(FillSpec::gradient(bad_degree).to_fill().is_err());
    }

    #[test]
    fn test_spec_round_trip() {
        for spec in [
            FillSpec::solid(ColorSpec::rgb("FF0000")),
            FillSpec::pattern(
                PatternType::LightGrid,
                Some(ColorSpec::indexed(10)),
                Some(ColorSpec::auto()),
            ),
            FillSpec::gradient(two_stop_gradient()),
        ] {
            assert_eq!(spec.to_fill().unwrap().to_spec(), spec);
        }
    }
}
