use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub coverage: CoverageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default = "default_cols")]
    pub cols: u32,
    #[serde(default = "default_obstacle_fraction")]
    pub obstacle_fraction: f64,
    /// Fixed seed for reproducible obstacle layouts.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Load the grid from a layout file instead of generating one.
    #[serde(default)]
    pub layout_file: Option<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            obstacle_fraction: default_obstacle_fraction(),
            seed: None,
            layout_file: None,
        }
    }
}

/// What a relay footprint does to obstructed cells it overlaps.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ObstaclePolicy {
    /// Obstructed cells inside the footprint become `Covered`.
    #[default]
    Overwrite,
    /// Obstructed cells keep their state.
    Preserve,
}

#[derive(Debug, Deserialize)]
pub struct CoverageConfig {
    #[serde(default = "default_radius")]
    pub radius: u32,
    #[serde(default)]
    pub obstacle_policy: ObstaclePolicy,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            obstacle_policy: ObstaclePolicy::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_start")]
    pub start: [u32; 2],
    #[serde(default = "default_end")]
    pub end: [u32; 2],
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: String,
    #[serde(default = "default_png")]
    pub png: bool,
    #[serde(default = "default_cell_pixels")]
    pub cell_pixels: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            png: default_png(),
            cell_pixels: default_cell_pixels(),
        }
    }
}

fn default_rows() -> u32 {
    10
}

fn default_cols() -> u32 {
    10
}

fn default_obstacle_fraction() -> f64 {
    0.3
}

fn default_radius() -> u32 {
    2
}

fn default_start() -> [u32; 2] {
    [4, 4]
}

fn default_end() -> [u32; 2] {
    [7, 7]
}

fn default_output_directory() -> String {
    "output".to_string()
}

fn default_png() -> bool {
    true
}

fn default_cell_pixels() -> u32 {
    32
}
