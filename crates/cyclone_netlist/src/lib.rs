//! Routed netlist model consumed by timing analysis.
//!
//! The placer and router produce a [`Netlist`] (nets of named pins, the first
//! pin of each net being its driver) and, per net, a [`RoutedGraph`]: the
//! chains of [`PhysicalNode`]s the signal travels through from the driver to
//! each sink. The [`Router`] trait is the boundary through which timing
//! analysis reads both.
//!
//! ```
//! use cyclone_common::TilePos;
//! use cyclone_netlist::{Netlist, PhysicalNode, Pin};
//!
//! let mut netlist = Netlist::new();
//! let io = PhysicalNode::port("i0", TilePos::new(0, 0));
//! let pe = PhysicalNode::port("p1", TilePos::new(1, 0));
//! let net = netlist.add_net("n0", Pin::new("I0", io), [Pin::new("p1", pe)]);
//! assert_eq!(netlist.driver(net).name, "I0");
//! assert_eq!(netlist.sinks(net).count(), 1);
//! ```

#![warn(missing_docs)]

pub mod data;
pub mod ids;
pub mod node;
pub mod route;
pub mod router;

pub use data::{Net, Netlist, Pin};
pub use ids::{NetId, PinId};
pub use node::{NodeKind, PhysicalNode, SwitchBoxIo};
pub use route::{Route, RoutedGraph, Segment};
pub use router::{RoutedDesign, Router};
