//! Tile coordinates in the device fabric.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate-addressed tile location in the device fabric.
///
/// `x` is the column and `y` the row, both 0-based from the top-left corner
/// of the device layout.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl TilePos {
    /// Creates a tile position from column and row.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Debug for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TilePos({}, {})", self.x, self.y)
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
