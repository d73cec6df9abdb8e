//! Fatal errors of timing analysis.
//!
//! Every variant aborts the analysis call that produced it. [`ErrorKind`]
//! groups the variants into the failure classes callers usually branch on.

use crate::delay::TimingCost;
use cyclone_arch::BlockType;
use cyclone_common::TilePos;

/// The class of a [`TimingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value was requested before it was computed: a predecessor was
    /// skipped, the topological order was violated, or the router's output
    /// is incomplete.
    Lookup,
    /// Converging data arrived from pipeline stages of different depth.
    Consistency,
    /// The delay model met a node naming or tile type it does not recognise.
    Classification,
    /// The netlist's structure cannot be analysed or corrected.
    Structural,
}

/// A fatal timing-analysis error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimingError {
    /// A pin's wave number was needed before it was computed.
    #[error("unable to find wave number for pin `{pin}`")]
    MissingWave {
        /// Pin name.
        pin: String,
    },

    /// A pin's arrival delay was needed before it was computed.
    #[error("unable to find pin delay for pin `{pin}`")]
    MissingPinDelay {
        /// Pin name.
        pin: String,
    },

    /// A route segment continues from a node with no known delay.
    #[error("unable to find delay for node `{node}` on net `{net}`")]
    MissingNodeDelay {
        /// Net name.
        net: String,
        /// Node display name (`name@(x, y)`).
        node: String,
    },

    /// The router supplied no routing for a net.
    #[error("no routed graph for net `{net}`")]
    MissingRoute {
        /// Net name.
        net: String,
    },

    /// None of a net's segments ends at one of its sink pins.
    #[error("sink pin `{pin}` of net `{net}` is not reached by its route")]
    UnroutedSink {
        /// Net name.
        net: String,
        /// Pin name.
        pin: String,
    },

    /// The pins converging on a timing node carry different wave numbers.
    #[error("node pins data wave does not match at `{node}`: waves {waves:?}")]
    WaveMismatch {
        /// Timing node name.
        node: String,
        /// The distinct waves seen, ascending.
        waves: Vec<u32>,
    },

    /// A port node whose name does not encode a known role.
    #[error("unable to identify delay for port node `{node}`")]
    UnknownPort {
        /// Node name.
        node: String,
    },

    /// An output switchbox on a tile type with no switchbox cost.
    #[error("unable to identify timing for switchbox `{node}` at {pos}: tile is {tile}")]
    UnknownTile {
        /// Node name.
        node: String,
        /// Tile of the node.
        pos: TilePos,
        /// Block type found in the layout.
        tile: BlockType,
    },

    /// The delay table has no entry for a cost category.
    #[error("no delay configured for cost category {0:?}")]
    MissingCost(TimingCost),

    /// Two nets share a name.
    #[error("net name `{net}` is used more than once")]
    DuplicateNet {
        /// Net name.
        net: String,
    },

    /// A net has no pins, so no driver.
    #[error("net `{net}` has no driver pin")]
    EmptyNet {
        /// Net name.
        net: String,
    },

    /// The timing graph contains a cycle.
    #[error("timing graph has a cycle through `{node}`")]
    Cycle {
        /// Name of a vertex on the cycle.
        node: String,
    },

    /// A single hop costs more than the budget even right after a register.
    #[error(
        "hop into `{node}` on net `{net}` reaches delay {delay} after a pipeline register, \
         exceeding the budget of {budget}"
    )]
    Unpipelineable {
        /// Net name.
        net: String,
        /// Node display name.
        node: String,
        /// Delay of the register plus the hop.
        delay: u64,
        /// The clock budget.
        budget: u64,
    },
}

impl TimingError {
    /// Returns the class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TimingError::MissingWave { .. }
            | TimingError::MissingPinDelay { .. }
            | TimingError::MissingNodeDelay { .. }
            | TimingError::MissingRoute { .. }
            | TimingError::UnroutedSink { .. } => ErrorKind::Lookup,
            TimingError::WaveMismatch { .. } => ErrorKind::Consistency,
            TimingError::UnknownPort { .. }
            | TimingError::UnknownTile { .. }
            | TimingError::MissingCost(_) => ErrorKind::Classification,
            TimingError::DuplicateNet { .. }
            | TimingError::EmptyNet { .. }
            | TimingError::Cycle { .. }
            | TimingError::Unpipelineable { .. } => ErrorKind::Structural,
        }
    }
}
