//! Editor configuration.

use serde::{Deserialize, Serialize};

/// What a primary click on empty canvas does while connection mode is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyClickPolicy {
    /// Stay in connection mode until a node is clicked.
    #[default]
    KeepPending,
    /// Leave connection mode and clear the source highlight.
    Cancel,
}

/// A named color offered by the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    /// Display name.
    pub name: String,
    /// Hex color value.
    pub value: String,
}

impl PaletteColor {
    /// Create a palette entry.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Colors shown in the palette unless configured otherwise.
#[must_use]
pub fn default_palette() -> Vec<PaletteColor> {
    [
        ("Red", "#FF0000"),
        ("Green", "#00FF00"),
        ("Blue", "#0000FF"),
        ("Yellow", "#FFFF00"),
        ("Orange", "#FFA500"),
        ("Black", "#000000"),
        ("White", "#FFFFFF"),
    ]
    .into_iter()
    .map(|(name, value)| PaletteColor::new(name, value))
    .collect()
}

/// Behavior switches for an [`crate::EditorController`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Handling of empty-canvas clicks during connection mode.
    pub empty_click_while_connecting: EmptyClickPolicy,
    /// Palette shown while editing a node.
    pub palette: Vec<PaletteColor>,
}

impl EditorConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            empty_click_while_connecting: EmptyClickPolicy::default(),
            palette: default_palette(),
        }
    }

    /// Replace the palette offered while editing.
    #[must_use]
    pub fn with_palette(mut self, palette: Vec<PaletteColor>) -> Self {
        self.palette = palette;
        self
    }

    /// Set the empty-click policy.
    #[must_use]
    pub fn with_empty_click_policy(mut self, policy: EmptyClickPolicy) -> Self {
        self.empty_click_while_connecting = policy;
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.empty_click_while_connecting, EmptyClickPolicy::KeepPending);
        assert_eq!(config.palette.len(), 7);
        assert_eq!(config.palette[0], PaletteColor::new("Red", "#FF0000"));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"empty_click_while_connecting":"cancel"}"#)
                .expect("valid config");
        assert_eq!(config.empty_click_while_connecting, EmptyClickPolicy::Cancel);
        assert_eq!(config.palette, default_palette());
    }
}
