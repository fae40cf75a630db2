//! The fixed palette catalog.
//!
//! A palette is an ordered list of colors indexed cyclically by node depth:
//! `color = palette[depth % palette.len()]`. The catalog is read-only and
//! holds nine named entries; unknown names resolve to [`Palette::Default`].

use std::{fmt, str::FromStr, sync::OnceLock};

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A named entry of the palette catalog.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Palette {
    #[default]
    Default,
    Blue,
    Green,
    Red,
    Purple,
    Orange,
    Rainbow,
    Pastel,
    Earth,
}

impl Palette {
    /// Every palette in catalog order.
    pub const ALL: [Palette; 9] = [
        Palette::Default,
        Palette::Blue,
        Palette::Green,
        Palette::Red,
        Palette::Purple,
        Palette::Orange,
        Palette::Rainbow,
        Palette::Pastel,
        Palette::Earth,
    ];

    /// Resolves a palette name, falling back to [`Palette::Default`] for unknown names.
    ///
    /// ```
    /// # use arbor_core::palette::Palette;
    /// assert_eq!(Palette::resolve("earth"), Palette::Earth);
    /// assert_eq!(Palette::resolve("neon"), Palette::Default);
    /// ```
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Catalog identifier, as used in settings.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Rainbow => "rainbow",
            Self::Pastel => "pastel",
            Self::Earth => "earth",
        }
    }

    /// Human-facing label shown by palette pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Padrão",
            Self::Blue => "Azul",
            Self::Green => "Verde",
            Self::Red => "Vermelho",
            Self::Purple => "Roxo",
            Self::Orange => "Laranja",
            Self::Rainbow => "Arco-íris",
            Self::Pastel => "Pastel",
            Self::Earth => "Terra",
        }
    }

    fn hex_codes(self) -> &'static [&'static str] {
        match self {
            Self::Default => &["#4f46e5", "#60a5fa", "#93c5fd", "#bfdbfe", "#dbeafe"],
            Self::Blue => &["#1e40af", "#3b82f6", "#93c5fd", "#dbeafe"],
            Self::Green => &["#166534", "#22c55e", "#86efac", "#dcfce7"],
            Self::Red => &["#991b1b", "#ef4444", "#fca5a5", "#fee2e2"],
            Self::Purple => &["#6b21a8", "#a855f7", "#d8b4fe", "#f3e8ff"],
            Self::Orange => &["#9a3412", "#f97316", "#fdba74", "#ffedd5"],
            Self::Rainbow => &[
                "#ef4444", "#f97316", "#eab308", "#22c55e", "#3b82f6", "#a855f7",
            ],
            Self::Pastel => &[
                "#f87171", "#fdba74", "#fde047", "#86efac", "#93c5fd", "#d8b4fe",
            ],
            Self::Earth => &["#78350f", "#a16207", "#15803d", "#166534", "#1e3a8a"],
        }
    }

    /// The ordered colors of this palette.
    pub fn colors(self) -> &'static [Color] {
        static CATALOG: OnceLock<Vec<Vec<Color>>> = OnceLock::new();
        let catalog = CATALOG.get_or_init(|| {
            Palette::ALL
                .iter()
                .map(|palette| {
                    palette
                        .hex_codes()
                        .iter()
                        .filter_map(|hex| Color::new(hex).ok())
                        .collect()
                })
                .collect()
        });
        &catalog[self as usize]
    }

    /// Returns the color for a node at `depth`, cycling through the palette.
    ///
    /// ```
    /// # use arbor_core::palette::Palette;
    /// let blue = Palette::Blue;
    /// assert_eq!(blue.color_for_depth(0), blue.color_for_depth(4));
    /// assert_ne!(blue.color_for_depth(0), blue.color_for_depth(1));
    /// ```
    pub fn color_for_depth(self, depth: usize) -> Color {
        let colors = self.colors();
        colors[depth % colors.len()]
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::ALL
            .into_iter()
            .find(|palette| palette.name() == s)
            .ok_or_else(|| format!("unknown palette `{s}`"))
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_nine_palettes() {
        assert_eq!(Palette::ALL.len(), 9);
        for palette in Palette::ALL {
            assert!(
                !palette.colors().is_empty(),
                "palette {palette} should have colors"
            );
            assert_eq!(palette.colors().len(), palette.hex_codes().len());
        }
    }

    #[test]
    fn test_palette_lengths() {
        assert_eq!(Palette::Default.colors().len(), 5);
        assert_eq!(Palette::Blue.colors().len(), 4);
        assert_eq!(Palette::Rainbow.colors().len(), 6);
        assert_eq!(Palette::Earth.colors().len(), 5);
    }

    #[test]
    fn test_color_for_depth_cycles() {
        let palette = Palette::Default;
        assert_eq!(palette.color_for_depth(0), Color::new("#4f46e5").unwrap());
        assert_eq!(palette.color_for_depth(1), Color::new("#60a5fa").unwrap());
        assert_eq!(palette.color_for_depth(5), palette.color_for_depth(0));
        assert_eq!(palette.color_for_depth(7), palette.color_for_depth(2));
    }

    #[test]
    fn test_from_str_round_trips_names() {
        for palette in Palette::ALL {
            assert_eq!(palette.name().parse::<Palette>(), Ok(palette));
        }
        assert!("Default".parse::<Palette>().is_err());
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        assert_eq!(Palette::resolve(""), Palette::Default);
        assert_eq!(Palette::resolve("rainbow"), Palette::Rainbow);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Palette::Default.label(), "Padrão");
        assert_eq!(Palette::Rainbow.label(), "Arco-íris");
    }

    #[test]
    fn test_serde_kebab_case() {
        let palette: Palette = serde_json::from_str("\"pastel\"").unwrap();
        assert_eq!(palette, Palette::Pastel);
        assert_eq!(serde_json::to_string(&Palette::Earth).unwrap(), "\"earth\"");
    }
}
