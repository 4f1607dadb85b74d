use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Background and reference grid.
pub struct DisplayOptions {
    /// Clear color (linear RGB).
    #[schemars(title = "Background", extend("format" = "color"))]
    pub background_color: [f32; 3],
    /// Whether to draw the ground grid.
    #[schemars(title = "Show Grid")]
    pub show_grid: bool,
    /// Edge length of the grid in world units.
    #[schemars(title = "Grid Size", range(min = 1.0, max = 500.0))]
    pub grid_size: f32,
    /// Number of cells along each edge of the grid.
    #[schemars(title = "Grid Divisions", range(min = 1, max = 500))]
    pub grid_divisions: u32,
    /// Grid line color (linear RGB).
    #[schemars(skip)]
    pub grid_color: [f32; 3],
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background_color: [1.0, 1.0, 1.0],
            show_grid: true,
            grid_size: 50.0,
            grid_divisions: 50,
            grid_color: [0.75, 0.75, 0.75],
        }
    }
}
