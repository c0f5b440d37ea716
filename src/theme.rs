//! Themes: complete kind-to-icon assignments, styles, and colors.
//!
//! A [`Theme`] maps every [`Kind`] to an [`IconSpec`] (a source slug plus an
//! optional color). Themes are rendered once per [`Style`]; a theme that
//! omits a kind is a defect caught by [`Theme::validate`] before any file is
//! written for it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::kind::Kind;

// ============================================================================
// Style
// ============================================================================

/// Source-variant family for vector icons.
///
/// Each style maps to one subdirectory of the icon source root. When a slug
/// has no variant under the requested style, lookup falls back to
/// [`Style::FALLBACK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Style {
    Outline,
    Filled,
}

impl Style {
    /// All styles, in the order themes are swept.
    pub const ALL: [Style; 2] = [Style::Outline, Style::Filled];

    /// The style whose source directory backs any slug missing from another
    /// style's directory.
    pub const FALLBACK: Style = Style::Outline;

    /// The source subdirectory name for this style.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Outline => "outline",
            Style::Filled => "filled",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// HexColor
// ============================================================================

/// A validated `#rrggbb` color string.
///
/// Stored lowercased so that recolored output is byte-stable regardless of
/// how the color was spelled in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HexColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidColor(s.to_string()))?;
        if rest.len() != 6 || !rest.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        Ok(HexColor(s.to_ascii_lowercase()))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// IconSpec and Theme
// ============================================================================

/// One theme entry: which vector source to use for a kind, and in what color.
///
/// A `None` color resolves to the pipeline's configured fallback color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub slug: String,
    pub color: Option<HexColor>,
}

impl IconSpec {
    pub fn new(slug: impl Into<String>, color: HexColor) -> Self {
        Self {
            slug: slug.into(),
            color: Some(color),
        }
    }

    /// The concrete color for this entry, given the configured fallback.
    pub fn color_or<'a>(&'a self, fallback: &'a HexColor) -> &'a HexColor {
        self.color.as_ref().unwrap_or(fallback)
    }
}

/// A named, complete assignment of an [`IconSpec`] to every [`Kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    name: String,
    entries: BTreeMap<Kind, IconSpec>,
}

impl Theme {
    /// Creates a theme from explicit entries. Completeness is not enforced
    /// here; call [`validate`](Self::validate) before rendering.
    pub fn from_entries(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (Kind, IconSpec)>,
    ) -> Self {
        Self {
            name: name.into(),
            entries: entries.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, kind: Kind) -> Option<&IconSpec> {
        self.entries.get(&kind)
    }

    /// Checks that every kind has an entry.
    ///
    /// Runs before any rendering for the theme so a partial theme produces
    /// no output at all rather than a truncated atlas.
    pub fn validate(&self) -> Result<(), Error> {
        for kind in Kind::ALL {
            if !self.entries.contains_key(&kind) {
                return Err(Error::IncompleteTheme {
                    theme: self.name.clone(),
                    kind,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Built-in themes
// ============================================================================

fn theme(name: &str, entries: [(Kind, &str, &str); 11]) -> Theme {
    Theme::from_entries(
        name,
        entries.into_iter().map(|(kind, slug, color)| {
            let color: HexColor = color.parse().unwrap_or_else(|_| {
                panic!("built-in theme `{name}`: bad color `{color}` for {kind}")
            });
            (kind, IconSpec::new(slug, color))
        }),
    )
}

/// The built-in theme set shipped with the generator.
///
/// Each theme is a complete 11-kind mapping; completeness is asserted in
/// tests and re-checked by the pipeline before rendering.
pub fn builtin_themes() -> Vec<Theme> {
    use Kind::*;
    vec![
        theme("default", [
            (ClassMethod, "hexagon-letter-m", "#00b2e3"),
            (Parameter, "chevron-right", "#a855f7"),
            (SystemVariable, "settings", "#54565a"),
            (LocalVariable, "circle-letter-l", "#93d500"),
            (InstanceVariable, "cube", "#84d3e5"),
            (ComponentVariable, "components", "#ff6b00"),
            (GlobalVariable, "world", "#231f20"),
            (Property, "key", "#d3549f"),
            (ExternalFunction, "external-link", "#ef3c45"),
            (ConstantValue, "lock", "#ff9e18"),
            (Field, "circle-letter-f", "#0dcaf0"),
        ]),
        theme("geometric", [
            (ClassMethod, "braces", "#5b9bd5"),
            (Parameter, "arrow-right", "#9b59b6"),
            (SystemVariable, "square", "#6c757d"),
            (LocalVariable, "circle-dot", "#70ad47"),
            (InstanceVariable, "circle", "#44d4e8"),
            (ComponentVariable, "box", "#ff8c42"),
            (GlobalVariable, "world", "#2c3e50"),
            (Property, "diamond", "#e74c9c"),
            (ExternalFunction, "brackets", "#e74c3c"),
            (ConstantValue, "lock", "#f39c12"),
            (Field, "square-dot", "#17a2b8"),
        ]),
        theme("alphabet", [
            (ClassMethod, "square-letter-m", "#4472c4"),
            (Parameter, "square-letter-r", "#9c27b0"),
            (SystemVariable, "square-letter-s", "#7f8c8d"),
            (LocalVariable, "circle-letter-l", "#a2d729"),
            (InstanceVariable, "circle-letter-i", "#56c5d0"),
            (ComponentVariable, "square-letter-c", "#ff7733"),
            (GlobalVariable, "circle-letter-g", "#34495e"),
            (Property, "square-letter-p", "#d946a8"),
            (ExternalFunction, "square-letter-f", "#dc3545"),
            (ConstantValue, "square-letter-k", "#ffc107"),
            (Field, "square-letter-f", "#14b8a6"),
        ]),
        theme("devs", [
            (ClassMethod, "code", "#4a90e2"),
            (Parameter, "arrow-right", "#a855f7"),
            (SystemVariable, "settings", "#95a5a6"),
            (LocalVariable, "variable", "#7fba00"),
            (InstanceVariable, "circle-dot", "#00d4ff"),
            (ComponentVariable, "puzzle", "#ff6b35"),
            (GlobalVariable, "world-code", "#2d3436"),
            (Property, "key", "#e056fd"),
            (ExternalFunction, "external-link", "#ff3838"),
            (ConstantValue, "shield-lock", "#ffb142"),
            (Field, "file-text", "#0d9488"),
        ]),
        theme("Monogram", [
            (ClassMethod, "circle-letter-m", "#4a6fa5"),
            (Parameter, "circle-letter-r", "#9b59b6"),
            (SystemVariable, "circle-letter-s", "#6b7280"),
            (LocalVariable, "circle-letter-l", "#82c91e"),
            (InstanceVariable, "circle-letter-i", "#22d3ee"),
            (ComponentVariable, "circle-letter-c", "#fd7e14"),
            (GlobalVariable, "circle-letter-g", "#212529"),
            (Property, "circle-letter-p", "#e64980"),
            (ExternalFunction, "circle-letter-f", "#fa5252"),
            (ConstantValue, "circle-letter-k", "#fab005"),
            (Field, "circle-letter-f", "#20c997"),
        ]),
        theme("Semantic", [
            (ClassMethod, "braces", "#5b9bd5"),
            (Parameter, "arrow-right", "#9b59b6"),
            (SystemVariable, "settings", "#6c757d"),
            (LocalVariable, "variable", "#70ad47"),
            (InstanceVariable, "circle-dot", "#44d4e8"),
            (ComponentVariable, "box", "#ff8c42"),
            (GlobalVariable, "world", "#2c3e50"),
            (Property, "key", "#e74c9c"),
            (ExternalFunction, "world-code", "#e74c3c"),
            (ConstantValue, "lock", "#f39c12"),
            (Field, "square-dot", "#17a2b8"),
        ]),
        theme("Hierarchy", [
            (ClassMethod, "braces", "#5470c6"),
            (Parameter, "arrow-right", "#9c6ade"),
            (SystemVariable, "square", "#73808c"),
            (LocalVariable, "circle-dot", "#91cc75"),
            (InstanceVariable, "circle", "#5bc0de"),
            (ComponentVariable, "box", "#ff9f40"),
            (GlobalVariable, "globe", "#34495e"),
            (Property, "diamond", "#ee6fa8"),
            (ExternalFunction, "brackets-angle", "#ee6666"),
            (ConstantValue, "lock-square", "#fac858"),
            (Field, "square-dot", "#14b8a6"),
        ]),
        theme("Hybrid", [
            (ClassMethod, "braces", "#4169e1"),
            (Parameter, "circle-letter-r", "#9370db"),
            (SystemVariable, "settings", "#708090"),
            (LocalVariable, "circle-letter-l", "#32cd32"),
            (InstanceVariable, "circle-letter-i", "#00bfff"),
            (ComponentVariable, "box", "#ff8c00"),
            (GlobalVariable, "world", "#2f4f4f"),
            (Property, "key", "#da70d6"),
            (ExternalFunction, "brackets-angle", "#dc143c"),
            (ConstantValue, "lock", "#ffa500"),
            (Field, "circle-letter-f", "#0dcaf0"),
        ]),
        theme("Terminal", [
            (ClassMethod, "code", "#0ea5e9"),
            (Parameter, "chevron-right", "#a855f7"),
            (SystemVariable, "settings", "#64748b"),
            (LocalVariable, "variable", "#84cc16"),
            (InstanceVariable, "circle-dot", "#06b6d4"),
            (ComponentVariable, "box", "#f97316"),
            (GlobalVariable, "world-code", "#1e293b"),
            (Property, "brackets", "#ec4899"),
            (ExternalFunction, "external-link", "#ef4444"),
            (ConstantValue, "diamond", "#eab308"),
            (Field, "file-code", "#06b6d4"),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_parses_and_lowercases() {
        let c: HexColor = "#00B2E3".parse().unwrap();
        assert_eq!(c.as_str(), "#00b2e3");
    }

    #[test]
    fn hex_color_rejects_bad_input() {
        assert!("00b2e3".parse::<HexColor>().is_err());
        assert!("#00b2e".parse::<HexColor>().is_err());
        assert!("#00b2e3ff".parse::<HexColor>().is_err());
        assert!("#00b2ez".parse::<HexColor>().is_err());
    }

    #[test]
    fn builtin_themes_are_complete() {
        let themes = builtin_themes();
        assert_eq!(themes.len(), 9);
        for theme in &themes {
            theme.validate().unwrap();
        }
    }

    #[test]
    fn incomplete_theme_fails_validation() {
        let partial = Theme::from_entries(
            "partial",
            [(
                Kind::Field,
                IconSpec::new("circle-letter-f", "#0dcaf0".parse().unwrap()),
            )],
        );
        let err = partial.validate().unwrap_err();
        assert!(matches!(err, Error::IncompleteTheme { .. }));
    }

    #[test]
    fn icon_spec_color_fallback() {
        let fallback: HexColor = "#231f20".parse().unwrap();
        let spec = IconSpec {
            slug: "world".into(),
            color: None,
        };
        assert_eq!(spec.color_or(&fallback).as_str(), "#231f20");

        let explicit = IconSpec::new("world", "#ff0000".parse().unwrap());
        assert_eq!(explicit.color_or(&fallback).as_str(), "#ff0000");
    }
}
