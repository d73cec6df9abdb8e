//! Device layout model for the cyclone toolchain.
//!
//! The layout maps tile coordinates to the type of block occupying each tile.
//! Timing analysis consults it to cost output switchboxes, whose delay depends
//! on the block they sit next to.
//!
//! ```
//! use cyclone_arch::{BlockType, Layout};
//!
//! let layout: Layout = "ipp\nimm\n".parse().unwrap();
//! assert_eq!(layout.blk_type(1, 0), BlockType::Logic);
//! assert_eq!(layout.blk_type(2, 1), BlockType::Memory);
//! assert_eq!(layout.blk_type(9, 9), BlockType::Empty);
//! ```

#![warn(missing_docs)]

pub mod layout;
pub mod types;

pub use layout::{load_layout, Layout, LayoutError};
pub use types::BlockType;
