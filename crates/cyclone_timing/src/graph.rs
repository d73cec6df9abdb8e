//! Timing graph built from net connectivity.
//!
//! Every logical element name in the netlist becomes one vertex
//! ([`TimingNode`]); each net contributes an edge from its driver's vertex to
//! each sink's vertex. Vertices live in an arena addressed by
//! [`TimingNodeId`], with a name → id table for resolution.

use crate::error::TimingError;
use crate::ids::TimingNodeId;
use cyclone_netlist::{NetId, Netlist, PinId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A vertex of the timing graph: every pin sharing one logical name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingNode {
    /// The unique ID of this vertex.
    pub id: TimingNodeId,
    /// The logical element name shared by all of this vertex's pins.
    pub name: String,
    /// Pins through which this element drives a net (net index 0).
    pub outgoing_pins: Vec<PinId>,
    /// Pins through which this element is driven (net sinks).
    pub incoming_pins: Vec<PinId>,
    /// Vertices driven through one of this element's nets, first-seen order.
    pub successors: Vec<TimingNodeId>,
    /// Nets this element drives, in netlist order.
    pub driven_nets: Vec<NetId>,
}

impl TimingNode {
    /// Returns `true` for pipeline-register elements (name starting with `r`).
    pub fn is_register(&self) -> bool {
        self.name.starts_with('r')
    }
}

/// The timing graph of one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingGraph {
    nodes: Vec<TimingNode>,
    by_name: HashMap<String, TimingNodeId>,
    edge_count: usize,
}

impl TimingGraph {
    /// Creates an empty timing graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the timing graph of a netlist.
    ///
    /// Fails if a net has no pins or if two nets share a name; results are
    /// keyed by net name, so names must be unique.
    pub fn build(netlist: &Netlist) -> Result<Self, TimingError> {
        let mut graph = Self::new();
        let mut edges: HashSet<(TimingNodeId, TimingNodeId)> = HashSet::new();
        let mut net_names: HashSet<&str> = HashSet::new();

        for net in &netlist.nets {
            if !net_names.insert(net.name.as_str()) {
                return Err(TimingError::DuplicateNet {
                    net: net.name.clone(),
                });
            }
            let driver_id = *net.pins.first().ok_or_else(|| TimingError::EmptyNet {
                net: net.name.clone(),
            })?;
            let driver = netlist.pin(driver_id);
            let src = graph.resolve(&driver.name);
            {
                let src_node = graph.node_mut(src);
                src_node.outgoing_pins.push(driver.id);
                src_node.driven_nets.push(net.id);
            }

            for &sink_id in net.sinks() {
                let sink = netlist.pin(sink_id);
                let dst = graph.resolve(&sink.name);
                graph.node_mut(dst).incoming_pins.push(sink_id);
                if edges.insert((src, dst)) {
                    graph.node_mut(src).successors.push(dst);
                    graph.edge_count += 1;
                }
            }
        }

        Ok(graph)
    }

    /// Returns the vertex for `name`, creating it if absent.
    fn resolve(&mut self, name: &str) -> TimingNodeId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = TimingNodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(TimingNode {
            id,
            name: name.to_string(),
            outgoing_pins: Vec::new(),
            incoming_pins: Vec::new(),
            successors: Vec::new(),
            driven_nets: Vec::new(),
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    fn node_mut(&mut self, id: TimingNodeId) -> &mut TimingNode {
        &mut self.nodes[id.index()]
    }

    /// Returns the vertex with the given ID.
    pub fn node(&self, id: TimingNodeId) -> &TimingNode {
        &self.nodes[id.index()]
    }

    /// Returns the vertex with the given name, if any.
    pub fn node_by_name(&self, name: &str) -> Option<&TimingNode> {
        self.by_name.get(name).map(|&id| self.node(id))
    }

    /// Returns all vertices in creation order.
    pub fn nodes(&self) -> &[TimingNode] {
        &self.nodes
    }

    /// Returns the vertices driven by `id`.
    pub fn successors(&self, id: TimingNodeId) -> &[TimingNodeId] {
        &self.node(id).successors
    }

    /// Returns every edge as `(from, to)`.
    pub fn edges(&self) -> impl Iterator<Item = (TimingNodeId, TimingNodeId)> + '_ {
        self.nodes
            .iter()
            .flat_map(|n| n.successors.iter().map(move |&s| (n.id, s)))
    }

    /// Returns the ids of the nets driven by `id`, in netlist order.
    ///
    /// These are exactly the nets whose driver pin carries the vertex's name;
    /// the result does not depend on how many edges leave the vertex.
    pub fn downstream_net_ids(&self, id: TimingNodeId) -> &[NetId] {
        &self.node(id).driven_nets
    }

    /// Returns the total number of vertices.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
