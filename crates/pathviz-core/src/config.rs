//! Grid construction settings.

/// Default number of rows.
pub const DEFAULT_ROWS: i32 = 25;
/// Default number of columns.
pub const DEFAULT_COLS: i32 = 40;
/// Default probability that a cell becomes a wall in a random fill.
pub const DEFAULT_WALL_DENSITY: f64 = 0.25;

/// Dimensions and random wall fill for [`Grid::from_config`](crate::Grid::from_config).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub rows: i32,
    pub cols: i32,
    /// Probability in 0..=1 that each cell starts as a wall.
    pub wall_density: f64,
    /// Seed for the wall fill. `None` uses the thread-local generator.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            wall_density: DEFAULT_WALL_DENSITY,
            seed: None,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::{Grid, GridError};

    #[test]
    fn config_round_trip() {
        let cfg = GridConfig {
            rows: 5,
            cols: 8,
            wall_density: 0.1,
            seed: Some(3),
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: GridConfig = serde_json::from_str(r#"{"rows": 10}"#).unwrap();
        assert_eq!(cfg.rows, 10);
        assert_eq!(cfg.cols, DEFAULT_COLS);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn deserialized_config_builds_a_consistent_grid() {
        let cfg: GridConfig =
            serde_json::from_str(r#"{"rows": 2, "cols": 3, "wall_density": 0.0}"#).unwrap();
        let grid = Grid::from_config(&cfg).unwrap();
        assert_eq!(grid.len(), 6);
        for (i, cell) in grid.iter().enumerate() {
            assert_eq!(grid.idx(cell.pos()), Some(i));
        }
        assert_eq!(grid.start(), None);

        let huge: GridConfig =
            serde_json::from_str(r#"{"rows": 50000, "cols": 50000}"#).unwrap();
        assert!(matches!(
            Grid::from_config(&huge),
            Err(GridError::TooLarge { .. })
        ));
    }
}
