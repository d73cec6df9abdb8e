//! The router boundary through which timing analysis reads its inputs.

use crate::data::Netlist;
use crate::ids::NetId;
use crate::route::{Route, RoutedGraph};
use std::collections::HashMap;

/// Supplies a routed netlist to timing analysis.
///
/// Implemented by whatever owns placement and routing results. The returned
/// data must stay unchanged for the duration of an analysis call.
pub trait Router {
    /// Returns the routed netlist.
    fn netlist(&self) -> &Netlist;

    /// Returns the routing of each net, keyed by net id.
    fn routed_graphs(&self) -> &HashMap<NetId, RoutedGraph>;
}

/// A netlist together with its routing, held in memory.
#[derive(Debug, Clone, Default)]
pub struct RoutedDesign {
    netlist: Netlist,
    routes: HashMap<NetId, RoutedGraph>,
}

impl RoutedDesign {
    /// Creates a design with no routing yet.
    pub fn new(netlist: Netlist) -> Self {
        Self {
            netlist,
            routes: HashMap::new(),
        }
    }

    /// Records the routing of a net, replacing any previous routing.
    pub fn set_route(&mut self, net: NetId, segments: Route) {
        self.routes.insert(net, RoutedGraph::new(net, segments));
    }
}

impl Router for RoutedDesign {
    fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    fn routed_graphs(&self) -> &HashMap<NetId, RoutedGraph> {
        &self.routes
    }
}
