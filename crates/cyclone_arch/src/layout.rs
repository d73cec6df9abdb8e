//! The device layout grid and its text loader.
//!
//! Text format: every line that is not blank and does not start with `#` is
//! one row of the grid, top to bottom. Each character of a row is one tile,
//! left to right, classified by [`BlockType::from_tag`]. Rows may differ in
//! length; tiles past the end of a row are empty.

use crate::types::BlockType;
use cyclone_common::TilePos;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Errors produced while loading a device layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The layout file could not be read.
    #[error("failed to read layout: {0}")]
    Io(#[from] std::io::Error),

    /// The layout contains no rows.
    #[error("layout contains no tiles")]
    Empty,
}

/// A read-only mapping from tile coordinates to block types.
///
/// The default layout has no tiles: every coordinate is [`BlockType::Empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    rows: Vec<Vec<BlockType>>,
}

impl Layout {
    /// Creates a layout from rows of block types (`rows[y][x]`).
    pub fn from_rows(rows: Vec<Vec<BlockType>>) -> Self {
        Self { rows }
    }

    /// Returns the block type at `(x, y)`, or [`BlockType::Empty`] outside the grid.
    pub fn blk_type(&self, x: u32, y: u32) -> BlockType {
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(BlockType::Empty)
    }

    /// Returns the block type at the given tile position.
    pub fn blk_type_at(&self, pos: TilePos) -> BlockType {
        self.blk_type(pos.x, pos.y)
    }

    /// Returns the number of rows in the grid.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns the length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<BlockType>> = s
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .map(|line| line.chars().map(BlockType::from_tag).collect())
            .collect();
        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }
        Ok(Layout { rows })
    }
}

/// Loads a device layout description from a file.
pub fn load_layout(path: &Path) -> Result<Layout, LayoutError> {
    let content = std::fs::read_to_string(path)?;
    content.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_grid() {
        let layout: Layout = "# 3x2 device\nipi\nmpm\n".parse().unwrap();
        assert_eq!(layout.height(), 2);
        assert_eq!(layout.width(), 3);
        assert_eq!(layout.blk_type(0, 0), BlockType::Io);
        assert_eq!(layout.blk_type(1, 0), BlockType::Logic);
        assert_eq!(layout.blk_type(0, 1), BlockType::Memory);
        assert_eq!(layout.blk_type_at(TilePos::new(1, 1)), BlockType::Logic);
    }

    #[test]
    fn out_of_grid_is_empty() {
        let layout: Layout = "pp\np\n".parse().unwrap();
        assert_eq!(layout.blk_type(1, 1), BlockType::Empty);
        assert_eq!(layout.blk_type(0, 7), BlockType::Empty);
    }

    #[test]
    fn blank_and_comment_lines_skipped() {
        let layout: Layout = "\n# header\n\npm\r\n\n".parse().unwrap();
        assert_eq!(layout.height(), 1);
        assert_eq!(layout.blk_type(1, 0), BlockType::Memory);
    }

    #[test]
    fn empty_layout_rejected() {
        assert!(matches!("# nothing\n".parse::<Layout>(), Err(LayoutError::Empty)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.txt");
        std::fs::write(&path, "iii\npmp\n").unwrap();
        let layout = load_layout(&path).unwrap();
        assert_eq!(layout.blk_type(2, 1), BlockType::Logic);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_layout(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, LayoutError::Io(_)));
    }

    #[test]
    fn serde_roundtrip() {
        let layout: Layout = "pm\n".parse().unwrap();
        let json = serde_json::to_string(&layout).unwrap();
        let back: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(layout, back);
    }
}
