//! Routed paths of a net through the device.

use crate::ids::NetId;
use crate::node::PhysicalNode;
use serde::{Deserialize, Serialize};

/// An ordered chain of physical nodes from the driver to one sink.
pub type Segment = Vec<PhysicalNode>;

/// All segments of a net's routing, one per sink branch.
pub type Route = Vec<Segment>;

/// The routing solution of one net as produced by the router.
///
/// Segments share prefixes where the routing tree branches: every segment
/// starts at the driver's node and ends at one sink's node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutedGraph {
    /// The net this routing belongs to.
    pub net: NetId,
    segments: Route,
}

impl RoutedGraph {
    /// Creates a routed graph from its segments.
    pub fn new(net: NetId, segments: Route) -> Self {
        Self { net, segments }
    }

    /// Returns the ordered path segments.
    pub fn route(&self) -> &[Segment] {
        &self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SwitchBoxIo;
    use cyclone_common::TilePos;

    fn two_branch() -> RoutedGraph {
        let drv = PhysicalNode::port("p0", TilePos::new(0, 0));
        let sb = PhysicalNode::switchbox("sb", TilePos::new(0, 0), SwitchBoxIo::Out);
        let a = PhysicalNode::port("p1", TilePos::new(1, 0));
        let b = PhysicalNode::port("p2", TilePos::new(0, 1));
        RoutedGraph::new(
            NetId::from_raw(3),
            vec![vec![drv.clone(), sb.clone(), a], vec![drv, sb, b]],
        )
    }

    #[test]
    fn segments_keep_their_order() {
        let g = two_branch();
        assert_eq!(g.net, NetId::from_raw(3));
        assert_eq!(g.route().len(), 2);
        let ends: Vec<&str> = g
            .route()
            .iter()
            .filter_map(|s| s.last())
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(ends, vec!["p1", "p2"]);
    }

    #[test]
    fn empty_graph() {
        let g = RoutedGraph::new(NetId::from_raw(0), Vec::new());
        assert!(g.route().is_empty());
    }

    #[test]
    fn serde_roundtrip() {
        let g = two_branch();
        let json = serde_json::to_string(&g).unwrap();
        let back: RoutedGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back.route(), g.route());
    }
}
