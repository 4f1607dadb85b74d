use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Selection", inline)]
#[serde(default)]
/// Click/drag selection parameters and highlight styling.
pub struct SelectionOptions {
    /// Emissive tint applied to selected parts (linear RGB).
    #[schemars(title = "Highlight Color", extend("format" = "color"))]
    pub highlight_color: [f32; 3],
    /// Pointer travel (pixels) beyond which a press no longer counts as a
    /// click.
    #[schemars(title = "Click/Drag Threshold", range(min = 0.0, max = 20.0), extend("step" = 1.0))]
    pub click_drag_threshold: f32,
    /// Selection rectangle outline color (RGBA).
    #[schemars(skip)]
    pub overlay_color: [f32; 4],
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            highlight_color: [1.0, 0.0, 0.0],
            click_drag_threshold: 4.0,
            overlay_color: [0.2, 0.45, 1.0, 1.0],
        }
    }
}
