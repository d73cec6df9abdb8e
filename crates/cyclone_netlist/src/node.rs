//! Physical routing nodes.
//!
//! A [`PhysicalNode`] is one unit of physical routing: a block port, a
//! register, a switchbox track, or a generic routing multiplexer. Kind-specific
//! data (the switchbox side) lives on the [`NodeKind`] variant itself.

use cyclone_common::TilePos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a switchbox a node sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwitchBoxIo {
    /// Input side: the signal enters the switchbox here.
    In,
    /// Output side: the signal leaves the switchbox toward the next tile.
    Out,
}

/// The kind of a physical routing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A block port. The first character of the node name gives the block role.
    Port,
    /// A routing-fabric register.
    Register,
    /// A switchbox track on the given side.
    SwitchBox(SwitchBoxIo),
    /// A generic routing multiplexer. The name encodes the role like a port.
    Generic,
}

/// A node of the device routing graph.
///
/// Nodes are compared by value: two nodes with the same name, tile, and kind
/// are the same routing resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysicalNode {
    /// Resource name (e.g., "p3", "SB_OUT_T2_E").
    pub name: String,
    /// Tile the resource belongs to.
    pub pos: TilePos,
    /// Kind of resource.
    pub kind: NodeKind,
}

impl PhysicalNode {
    /// Creates a node of any kind.
    pub fn new(name: impl Into<String>, pos: TilePos, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            pos,
            kind,
        }
    }

    /// Creates a block port node.
    pub fn port(name: impl Into<String>, pos: TilePos) -> Self {
        Self::new(name, pos, NodeKind::Port)
    }

    /// Creates a register node.
    pub fn register(name: impl Into<String>, pos: TilePos) -> Self {
        Self::new(name, pos, NodeKind::Register)
    }

    /// Creates a switchbox node on the given side.
    pub fn switchbox(name: impl Into<String>, pos: TilePos, io: SwitchBoxIo) -> Self {
        Self::new(name, pos, NodeKind::SwitchBox(io))
    }

    /// Creates a generic routing-multiplexer node.
    pub fn generic(name: impl Into<String>, pos: TilePos) -> Self {
        Self::new(name, pos, NodeKind::Generic)
    }

    /// Returns the role character encoded in the name (`p`, `m`, `i`, ...).
    pub fn role(&self) -> Option<char> {
        self.name.chars().next()
    }
}

impl fmt::Display for PhysicalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        let pos = TilePos::new(1, 2);
        assert_eq!(PhysicalNode::port("p0", pos).kind, NodeKind::Port);
        assert_eq!(PhysicalNode::register("r0", pos).kind, NodeKind::Register);
        assert_eq!(
            PhysicalNode::switchbox("sb", pos, SwitchBoxIo::Out).kind,
            NodeKind::SwitchBox(SwitchBoxIo::Out)
        );
        assert_eq!(PhysicalNode::generic("g", pos).kind, NodeKind::Generic);
    }

    #[test]
    fn role_is_first_char() {
        let pos = TilePos::new(0, 0);
        assert_eq!(PhysicalNode::port("mem_0", pos).role(), Some('m'));
        assert_eq!(PhysicalNode::port("", pos).role(), None);
    }

    #[test]
    fn identity_is_by_value() {
        let a = PhysicalNode::generic("rmux", TilePos::new(2, 2));
        let b = PhysicalNode::generic("rmux", TilePos::new(2, 2));
        let c = PhysicalNode::generic("rmux", TilePos::new(2, 3));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_format() {
        let n = PhysicalNode::port("p4", TilePos::new(3, 1));
        assert_eq!(n.to_string(), "p4@(3, 1)");
    }

    #[test]
    fn serde_roundtrip() {
        let n = PhysicalNode::switchbox("sb_in", TilePos::new(1, 1), SwitchBoxIo::In);
        let json = serde_json::to_string(&n).unwrap();
        let back: PhysicalNode = serde_json::from_str(&json).unwrap();
        assert_eq!(n, back);
    }
}
