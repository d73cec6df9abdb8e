//! Per-node delay model.
//!
//! Every physical routing node costs an integer delay determined by its kind,
//! its name's role character, and (for output switchboxes) the type of block
//! on its tile. Costs come from a [`DelayTable`] supplied as configuration.

use crate::error::TimingError;
use cyclone_arch::{BlockType, Layout};
use cyclone_config::CostConfig;
use cyclone_netlist::{NodeKind, PhysicalNode, SwitchBoxIo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A delay cost category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimingCost {
    /// Logic-block operand.
    ClbOp,
    /// Memory. Memory outputs are registered.
    Mem,
    /// Register.
    Reg,
    /// Output switchbox on a logic-block tile.
    ClbSb,
    /// Output switchbox on a memory tile.
    MemSb,
    /// Routing multiplexer.
    Rmux,
}

impl TimingCost {
    /// All categories, in declaration order.
    pub const ALL: [TimingCost; 6] = [
        TimingCost::ClbOp,
        TimingCost::Mem,
        TimingCost::Reg,
        TimingCost::ClbSb,
        TimingCost::MemSb,
        TimingCost::Rmux,
    ];
}

/// Mapping from cost category to delay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayTable {
    costs: BTreeMap<TimingCost, u64>,
}

impl DelayTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table with `cost` set to `delay`.
    pub fn with(mut self, cost: TimingCost, delay: u64) -> Self {
        self.set(cost, delay);
        self
    }

    /// Sets the delay of a category.
    pub fn set(&mut self, cost: TimingCost, delay: u64) {
        self.costs.insert(cost, delay);
    }

    /// Returns the delay of a category, if configured.
    pub fn get(&self, cost: TimingCost) -> Option<u64> {
        self.costs.get(&cost).copied()
    }

    /// Returns the delay of a category or [`TimingError::MissingCost`].
    pub fn cost(&self, cost: TimingCost) -> Result<u64, TimingError> {
        self.get(cost).ok_or(TimingError::MissingCost(cost))
    }

    /// Checks that every category has a delay, failing with
    /// [`TimingError::MissingCost`] for the first one that does not.
    pub fn ensure_complete(&self) -> Result<(), TimingError> {
        match TimingCost::ALL.into_iter().find(|c| !self.costs.contains_key(c)) {
            Some(missing) => Err(TimingError::MissingCost(missing)),
            None => Ok(()),
        }
    }
}

impl From<&CostConfig> for DelayTable {
    fn from(config: &CostConfig) -> Self {
        DelayTable::new()
            .with(TimingCost::ClbOp, config.clb_op)
            .with(TimingCost::Mem, config.mem)
            .with(TimingCost::Reg, config.reg)
            .with(TimingCost::ClbSb, config.clb_sb)
            .with(TimingCost::MemSb, config.mem_sb)
            .with(TimingCost::Rmux, config.rmux)
    }
}

/// The delay model: a delay table applied against a device layout.
#[derive(Debug, Clone, Copy)]
pub struct DelayModel<'a> {
    table: &'a DelayTable,
    layout: &'a Layout,
}

impl<'a> DelayModel<'a> {
    /// Creates a delay model over borrowed configuration.
    pub fn new(table: &'a DelayTable, layout: &'a Layout) -> Self {
        Self { table, layout }
    }

    /// Returns the delay table.
    pub fn table(&self) -> &'a DelayTable {
        self.table
    }

    /// Returns the delay of passing through `node`.
    pub fn delay(&self, node: &PhysicalNode) -> Result<u64, TimingError> {
        match node.kind {
            NodeKind::Port => match node.role() {
                Some('p') => self.table.cost(TimingCost::ClbOp),
                Some('m') => self.table.cost(TimingCost::Mem),
                _ => Err(TimingError::UnknownPort {
                    node: node.name.clone(),
                }),
            },
            NodeKind::Register => self.table.cost(TimingCost::Reg),
            NodeKind::SwitchBox(SwitchBoxIo::In) => Ok(0),
            NodeKind::SwitchBox(SwitchBoxIo::Out) => match self.layout.blk_type_at(node.pos) {
                BlockType::Logic => self.table.cost(TimingCost::ClbSb),
                BlockType::Memory => self.table.cost(TimingCost::MemSb),
                BlockType::Io => Ok(0),
                tile => Err(TimingError::UnknownTile {
                    node: node.name.clone(),
                    pos: node.pos,
                    tile,
                }),
            },
            NodeKind::Generic => self.table.cost(TimingCost::Rmux),
        }
    }
}
