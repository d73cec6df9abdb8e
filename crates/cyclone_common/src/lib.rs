//! Shared foundational types used across the cyclone timing-closure toolchain.
//!
//! This crate provides tile coordinates and the target clock frequency together
//! with the clock budget it implies.

#![warn(missing_docs)]

pub mod frequency;
pub mod pos;

pub use frequency::{Frequency, ParseFrequencyError};
pub use pos::TilePos;
