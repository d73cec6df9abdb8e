//! Core netlist data structures.
//!
//! Defines the routed netlist handed over by the router: nets (driver plus
//! sinks) and pins (named connection points sitting on a physical node). The
//! [`Netlist`] owns every pin in an arena; nets refer to pins by [`PinId`].

use crate::ids::{NetId, PinId};
use crate::node::PhysicalNode;
use cyclone_common::TilePos;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The routed netlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Netlist {
    /// All nets, indexed by [`NetId`].
    pub nets: Vec<Net>,
    /// All pins, indexed by [`PinId`].
    pub pins: Vec<Pin>,
    /// Auxiliary index: net name to ID (rebuilt on deserialization).
    #[serde(skip)]
    pub net_by_name: HashMap<String, NetId>,
}

impl Netlist {
    /// Creates an empty netlist.
    pub fn new() -> Self {
        Self {
            nets: Vec::new(),
            pins: Vec::new(),
            net_by_name: HashMap::new(),
        }
    }

    /// Adds a net with its driver and sinks and returns its ID.
    ///
    /// The pins' `id` and `net` fields are assigned here. The driver is taken
    /// separately so that a net always has exactly one driver at index 0.
    pub fn add_net(
        &mut self,
        name: impl Into<String>,
        driver: Pin,
        sinks: impl IntoIterator<Item = Pin>,
    ) -> NetId {
        let net_id = NetId::from_raw(self.nets.len() as u32);
        let pins = std::iter::once(driver)
            .chain(sinks)
            .map(|mut pin| {
                let pin_id = PinId::from_raw(self.pins.len() as u32);
                pin.id = pin_id;
                pin.net = net_id;
                self.pins.push(pin);
                pin_id
            })
            .collect();
        let name = name.into();
        self.net_by_name.insert(name.clone(), net_id);
        self.nets.push(Net {
            id: net_id,
            name,
            pins,
        });
        net_id
    }

    /// Returns the net with the given ID.
    pub fn net(&self, id: NetId) -> &Net {
        &self.nets[id.as_raw() as usize]
    }

    /// Returns the pin with the given ID.
    pub fn pin(&self, id: PinId) -> &Pin {
        &self.pins[id.as_raw() as usize]
    }

    /// Returns the net with the given name, if any.
    pub fn find_net(&self, name: &str) -> Option<NetId> {
        self.net_by_name.get(name).copied()
    }

    /// Returns the driver pin of a net.
    pub fn driver(&self, id: NetId) -> &Pin {
        self.pin(self.net(id).driver())
    }

    /// Returns the sink pins of a net, in order.
    pub fn sinks(&self, id: NetId) -> impl Iterator<Item = &Pin> + '_ {
        self.net(id).sinks().iter().map(move |&p| self.pin(p))
    }

    /// Returns the number of nets.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    /// Returns the number of pins.
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Returns the driver pins placed on the same tile as `pin` that do not
    /// belong to pipeline registers (names starting with `r`).
    ///
    /// `pin` itself is included when it is such a driver.
    pub fn colocated_drivers(&self, pin: PinId) -> Vec<PinId> {
        let pos = self.pin(pin).pos;
        self.nets
            .iter()
            .filter_map(|net| net.pins.first().map(|&d| self.pin(d)))
            .filter(|d| d.pos == pos && !d.is_register())
            .map(|d| d.id)
            .collect()
    }

    /// Rebuilds auxiliary indices after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.net_by_name.clear();
        for (i, net) in self.nets.iter().enumerate() {
            self.net_by_name
                .insert(net.name.clone(), NetId::from_raw(i as u32));
        }
    }
}

impl Default for Netlist {
    fn default() -> Self {
        Self::new()
    }
}

/// One driver pin plus its sink pins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    /// The unique ID of this net.
    pub id: NetId,
    /// Net name.
    pub name: String,
    /// Pins of the net; index 0 is the driver. Nets built by
    /// [`Netlist::add_net`] always have one.
    pub pins: Vec<PinId>,
}

impl Net {
    /// Returns the driver pin.
    ///
    /// Panics if the net has no pins, which only a hand-built or
    /// deserialized net can have.
    pub fn driver(&self) -> PinId {
        self.pins[0]
    }

    /// Returns the sink pins.
    pub fn sinks(&self) -> &[PinId] {
        self.pins.get(1..).unwrap_or_default()
    }
}

/// A named connection point participating in a net.
///
/// The name identifies the logical element (block) the pin belongs to; pins
/// with the same name in different nets refer to the same element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    /// The unique ID of this pin (assigned by [`Netlist::add_net`]).
    pub id: PinId,
    /// The net this pin belongs to (assigned by [`Netlist::add_net`]).
    pub net: NetId,
    /// Logical element name (e.g., "I0", "p12", "r3").
    pub name: String,
    /// Tile the element is placed on.
    pub pos: TilePos,
    /// The physical node the pin sits on.
    pub node: PhysicalNode,
}

impl Pin {
    /// Creates a pin placed on the tile of its physical node.
    pub fn new(name: impl Into<String>, node: PhysicalNode) -> Self {
        Self {
            id: PinId::from_raw(0),
            net: NetId::from_raw(0),
            name: name.into(),
            pos: node.pos,
            node,
        }
    }

    /// Returns `true` for primary-input pins (name starting with `i` or `I`).
    pub fn is_primary_input(&self) -> bool {
        matches!(self.name.chars().next(), Some('i' | 'I'))
    }

    /// Returns `true` for pipeline-register pins (name starting with `r`).
    pub fn is_register(&self) -> bool {
        self.name.starts_with('r')
    }
}
