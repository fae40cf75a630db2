//! Display settings: diagram type, color palette and node style.
//!
//! These are the three user-selectable knobs that drive layout and
//! rendering. All of them parse from the kebab-case names used in settings
//! files and on the command line.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::palette::Palette;

/// Layout algorithm family.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramType {
    /// Radial mind-map around a central root.
    #[default]
    MindMap,
    /// Layered tree growing to the right.
    LogicalStructure,
    /// Layered tree growing to the left.
    LogicalStructureLeft,
    /// Layered tree with orthogonal elbow connectors.
    Fishbone,
    /// Two-sided tree with the root in the middle.
    Horizontal,
    /// Indented outline of headings.
    Markdown,
}

impl DiagramType {
    pub const ALL: [DiagramType; 6] = [
        DiagramType::MindMap,
        DiagramType::LogicalStructure,
        DiagramType::LogicalStructureLeft,
        DiagramType::Fishbone,
        DiagramType::Horizontal,
        DiagramType::Markdown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::MindMap => "mind-map",
            Self::LogicalStructure => "logical-structure",
            Self::LogicalStructureLeft => "logical-structure-left",
            Self::Fishbone => "fishbone",
            Self::Horizontal => "horizontal",
            Self::Markdown => "markdown",
        }
    }

    /// Zoom level the viewport resets to for this family.
    pub fn default_zoom(self) -> f32 {
        match self {
            Self::Horizontal => 0.8,
            _ => 1.0,
        }
    }

    /// Suggested file name for the outline export of this family.
    pub fn outline_file_name(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal-mind-map.md",
            _ => "mind-map.md",
        }
    }
}

impl FromStr for DiagramType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiagramType::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown diagram type `{s}`"))
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Node glyph style for the radial and layered tree families.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStyle {
    /// Small circle.
    #[default]
    Standard,
    /// Rounded rectangle with the label inside.
    Rect,
    /// Diamond.
    Diamond,
}

impl LayoutStyle {
    /// Resolves a style name; anything unrecognized draws the standard circle.
    pub fn resolve(name: &str) -> Self {
        match name {
            "rect" => Self::Rect,
            "diamond" => Self::Diamond,
            _ => Self::Standard,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Rect => "rect",
            Self::Diamond => "diamond",
        }
    }
}

impl FromStr for LayoutStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "rect" => Ok(Self::Rect),
            "diamond" => Ok(Self::Diamond),
            _ => Err(format!("unknown layout style `{s}`")),
        }
    }
}

impl fmt::Display for LayoutStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The complete display selection for one rendered diagram.
///
/// # Examples
///
/// ```
/// # use arbor_core::settings::{DiagramType, LayoutStyle, Settings};
/// # use arbor_core::palette::Palette;
/// let settings: Settings = serde_json::from_str(
///     r#"{"diagram_type": "fishbone", "color_palette": "earth"}"#,
/// ).unwrap();
/// assert_eq!(settings.diagram_type(), DiagramType::Fishbone);
/// assert_eq!(settings.color_palette(), Palette::Earth);
/// assert_eq!(settings.layout_style(), LayoutStyle::Standard);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    diagram_type: DiagramType,
    #[serde(default)]
    color_palette: Palette,
    #[serde(default)]
    layout_style: LayoutStyle,
}

impl Settings {
    pub fn new(
        diagram_type: DiagramType,
        color_palette: Palette,
        layout_style: LayoutStyle,
    ) -> Self {
        Self {
            diagram_type,
            color_palette,
            layout_style,
        }
    }

    pub fn diagram_type(&self) -> DiagramType {
        self.diagram_type
    }

    pub fn color_palette(&self) -> Palette {
        self.color_palette
    }

    pub fn layout_style(&self) -> LayoutStyle {
        self.layout_style
    }

    pub fn set_diagram_type(&mut self, diagram_type: DiagramType) -> &mut Self {
        self.diagram_type = diagram_type;
        self
    }

    pub fn set_color_palette(&mut self, color_palette: Palette) -> &mut Self {
        self.color_palette = color_palette;
        self
    }

    pub fn set_layout_style(&mut self, layout_style: LayoutStyle) -> &mut Self {
        self.layout_style = layout_style;
        self
    }
}
