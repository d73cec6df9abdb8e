//! Block types occupying device tiles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of block occupying one tile of the device grid.
///
/// Layout files tag each tile with a single character; the recognised tags
/// are listed on each variant. Unrecognised tags are preserved in
/// [`BlockType::Other`] so that consumers can decide whether they matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    /// A logic block (processing element). Tag `p`.
    Logic,
    /// A memory block. Tag `m`.
    Memory,
    /// An I/O block. Tags `i` and `I`.
    Io,
    /// No block. Tags `.` and space, and any coordinate outside the grid.
    Empty,
    /// Any other tag.
    Other(char),
}

impl BlockType {
    /// Classifies a layout tag character.
    pub fn from_tag(tag: char) -> Self {
        match tag {
            'p' => BlockType::Logic,
            'm' => BlockType::Memory,
            'i' | 'I' => BlockType::Io,
            '.' | ' ' => BlockType::Empty,
            other => BlockType::Other(other),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Logic => write!(f, "logic"),
            BlockType::Memory => write!(f, "memory"),
            BlockType::Io => write!(f, "io"),
            BlockType::Empty => write!(f, "empty"),
            BlockType::Other(c) => write!(f, "'{c}'"),
        }
    }
}
