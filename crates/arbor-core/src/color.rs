//! Color handling for Arbor diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Palette entries, glyph fills, label colors and the
//! export background are all expressed as [`Color`] values.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// A CSS color.
///
/// # Examples
///
/// ```
/// # use arbor_core::color::Color;
/// let indigo = Color::new("#4f46e5").unwrap();
/// assert_eq!(indigo.alpha(), 1.0);
///
/// assert!(Color::new("not-a-color").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Parses any CSS color string (`#rgb`, `#rrggbb`, named colors, `rgb()`...).
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending input when it is not a valid CSS color.
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the color as 8-bit sRGB channels plus alpha.
    pub fn to_rgba8(self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<color::Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}
