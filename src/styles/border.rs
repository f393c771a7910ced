//! Border styles and definitions.

use serde::{Deserialize, Serialize};

use super::color::{Color, ColorSpec, to_optional_color};
use crate::error::{Result, StyleError};

/// Border line styles (`ST_BorderStyle`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderLineStyle {
    #[default]
    None,
    Thin,
    Medium,
    Dashed,
    Dotted,
    Thick,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

impl BorderLineStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Thin => "thin",
            Self::Medium => "medium",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Thick => "thick",
            Self::Double => "double",
            Self::Hair => "hair",
            Self::MediumDashed => "mediumDashed",
            Self::DashDot => "dashDot",
            Self::MediumDashDot => "mediumDashDot",
            Self::DashDotDot => "dashDotDot",
            Self::MediumDashDotDot => "mediumDashDotDot",
            Self::SlantDashDot => "slantDashDot",
        }
    }
}

/// One edge of a border. A missing color means automatic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorderLine {
    pub style: BorderLineStyle,
    pub color: Option<Color>,
}

impl BorderLine {
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A border record: four edges, the diagonal line and its directions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Border {
    pub left: BorderLine,
    pub right: BorderLine,
    pub top: BorderLine,
    pub bottom: BorderLine,
    pub diagonal: BorderLine,
    pub diagonal_up: bool,
    pub diagonal_down: bool,
}

/// Which edge a [`BorderSpec`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderEdge {
    Left,
    Right,
    Top,
    Bottom,
    DiagonalUp,
    DiagonalDown,
}

/// Caller-facing description of one border edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderSpec {
    pub edge: BorderEdge,
    pub style: BorderLineStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,
}

impl BorderSpec {
    #[inline]
    pub fn new(edge: BorderEdge, style: BorderLineStyle, color: Option<ColorSpec>) -> Self {
        Self { edge, style, color }
    }
}

impl Border {
    /// Merge a list of edge descriptions into one border record.
    ///
    /// Each edge may appear once. Both diagonal directions share the one
    /// diagonal line, so when both are given they must describe the same line.
    /// A left, right, top or bottom spec with no style and no color is
    /// rejected: it would be indistinguishable from leaving the edge out.
    pub fn from_specs(specs: &[BorderSpec]) -> Result<Self> {
        let mut border = Border::default();
        let mut seen: Vec<BorderEdge> = Vec::with_capacity(specs.len());

        for spec in specs {
            if seen.contains(&spec.edge) {
                return Err(StyleError::invalid(format!(
                    "border edge {:?} is specified more than once",
                    spec.edge
                )));
            }
            seen.push(spec.edge);

            let line = BorderLine {
                style: spec.style,
                color: to_optional_color(spec.color.as_ref())?,
            };
            match spec.edge {
                BorderEdge::Left | BorderEdge::Right | BorderEdge::Top | BorderEdge::Bottom
                    if line.is_empty() =>
                {
                    return Err(StyleError::invalid(format!(
                        "border edge {:?} has no style and no color",
                        spec.edge
                    )));
                },
                BorderEdge::Left => border.left = line,
                BorderEdge::Right => border.right = line,
                BorderEdge::Top => border.top = line,
                BorderEdge::Bottom => border.bottom = line,
                BorderEdge::DiagonalUp | BorderEdge::DiagonalDown => {
                    if (border.diagonal_up || border.diagonal_down) && border.diagonal != line {
                        return Err(StyleError::invalid(
                            "diagonal up and down borders must use the same line",
                        ));
                    }
                    border.diagonal = line;
                    if spec.edge == BorderEdge::DiagonalUp {
                        border.diagonal_up = true;
                    } else {
                        border.diagonal_down = true;
                    }
                },
            }
        }

        Ok(border)
    }

    /// Edge descriptions in canonical order, omitting empty edges.
    pub fn to_specs(&self) -> Vec<BorderSpec> {
        let mut specs = Vec::new();
        for (edge, line) in [
            (BorderEdge::Left, &self.left),
            (BorderEdge::Right, &self.right),
            (BorderEdge::Top, &self.top),
            (BorderEdge::Bottom, &self.bottom),
        ] {
            if !line.is_empty() {
                specs.push(line_spec(edge, line));
            }
        }
        if self.diagonal_up {
            specs.push(line_spec(BorderEdge::DiagonalUp, &self.diagonal));
        }
        if self.diagonal_down {
            specs.push(line_spec(BorderEdge::DiagonalDown, &self.diagonal));
        }
        specs
    }

    /// Check if this border has any visible lines.
    pub fn has_borders(&self) -> bool {
        !(self.left.is_empty()
            && self.right.is_empty()
            && self.top.is_empty()
            && self.bottom.is_empty()
            && (self.diagonal.is_empty() || !(self.diagonal_up || self.diagonal_down)))
    }
}

fn line_spec(edge: BorderEdge, line: &BorderLine) -> BorderSpec {
    BorderSpec::new(edge, line.style, line.color.as_ref().map(Color::to_spec))
}
