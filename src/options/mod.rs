//! Viewer options with TOML preset support.
//!
//! Camera, selection, display and keybinding settings live here. Options
//! serialize to/from TOML so a view can be tuned without recompiling.

mod camera;
mod display;
mod keybindings;
mod selection;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
use schemars::JsonSchema;
pub use selection::SelectionOptions;
use serde::{Deserialize, Serialize};

use crate::error::PartPickError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[selection]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Click/drag selection parameters.
    pub selection: SelectionOptions,
    /// Background and grid.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, PartPickError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| PartPickError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, PartPickError> {
        let content =
            std::fs::read_to_string(path).map_err(PartPickError::Io)?;
        let opts = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(opts)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), PartPickError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PartPickError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PartPickError::Io)?;
        }
        std::fs::write(path, content).map_err(PartPickError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[selection]
click_drag_threshold = 8.0
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.selection.click_drag_threshold, 8.0);
        assert_eq!(opts.selection.highlight_color, [1.0, 0.0, 0.0]);
        assert_eq!(opts.camera.fovy, 75.0);
        assert_eq!(opts.camera.eye, [0.0, 2.0, 5.0]);
        assert!(opts.display.show_grid);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml_str("[camera\nfovy = ").unwrap_err();
        assert!(matches!(err, PartPickError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyQ"),
            Some(KeyAction::RecenterCamera)
        );
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Cancel));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn keybindings_survive_loading() {
        let toml_str = r#"
[keybindings.bindings]
cancel = "Backspace"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("Backspace"), Some(KeyAction::Cancel));
        assert_eq!(opts.keybindings.lookup("Escape"), None);
    }

    #[test]
    fn rebinding_updates_lookup() {
        let mut opts = Options::default();
        opts.keybindings.bind(KeyAction::RecenterCamera, "KeyF");
        assert_eq!(
            opts.keybindings.lookup("KeyF"),
            Some(KeyAction::RecenterCamera)
        );
        assert_eq!(opts.keybindings.lookup("KeyQ"), None);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("selection"));
        assert!(props.contains_key("display"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("znear").is_none());
    }
}
