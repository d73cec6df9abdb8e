//! Output of a retiming run.

use cyclone_netlist::Route;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated delay and pipeline wave of a signal at one point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrival {
    /// Delay accumulated since the last register stage.
    pub delay: u64,
    /// Number of register stages the signal has passed since a primary input.
    pub wave: u32,
}

impl Arrival {
    /// The arrival seeded at a primary input.
    pub const SOURCE: Arrival = Arrival { delay: 0, wave: 0 };
}

/// The corrected routing produced by one successful retiming run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetimeResult {
    /// Corrected route of every analysed net, keyed by net name.
    pub routes: BTreeMap<String, Route>,
    /// Resolved arrival of every timing node, keyed by node name.
    ///
    /// This is the value written to the node's outgoing pins, so register
    /// blocks show their restarted delay.
    pub arrivals: BTreeMap<String, Arrival>,
    /// Total number of pipeline registers inserted.
    pub inserted_registers: usize,
    /// Names of nets that received at least one register, in netlist order.
    pub pipelined_nets: Vec<String>,
    /// Largest accumulated delay seen at any sink pin.
    pub critical_delay: u64,
    /// The clock budget the run enforced.
    pub budget: u64,
}

impl RetimeResult {
    /// Returns the corrected route of a net.
    pub fn route(&self, net: &str) -> Option<&Route> {
        self.routes.get(net)
    }

    /// Returns `true` if the net received a pipeline register.
    pub fn is_pipelined(&self, net: &str) -> bool {
        self.pipelined_nets.iter().any(|n| n == net)
    }

    /// Returns `true` if no sink arrival exceeds the budget.
    pub fn met(&self) -> bool {
        self.critical_delay <= self.budget
    }
}
