// File: crates/annotation-core/src/theme.rs
// Summary: Light/Dark presets for annotation default colors and the render background.

use crate::color::Color;

/// Colors applied when an annotation leaves a style field unset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    /// Surface clear color used by renderers.
    pub background: Color,
    /// Default border color for boxes and lines.
    pub border: Color,
    /// Default box fill.
    pub fill: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::from_argb(255, 18, 18, 20),
            border: Color::from_argb(255, 180, 180, 190),
            fill: Color::from_argb(48, 64, 160, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::from_argb(255, 250, 250, 252),
            border: Color::from_argb(255, 102, 102, 102),
            fill: Color::from_argb(26, 0, 0, 0),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_default()
}
