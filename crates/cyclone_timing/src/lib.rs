//! Timing closure for routed cyclone designs.
//!
//! This crate builds a timing graph from a routed netlist, schedules it in
//! topological order, and propagates signal delay along every routed segment.
//! Wherever a hop would push the accumulated delay past the clock budget, a
//! pipeline register is inserted in front of it; converging signals must come
//! from the same pipeline stage.
//!
//! # Usage
//!
//! ```ignore
//! use cyclone_timing::{DelayTable, TimingAnalysis};
//!
//! let config = cyclone_config::load_config(project_dir)?;
//! let mut analysis = TimingAnalysis::from_config(&design, &config.timing)?;
//! analysis.set_layout(&project_dir.join("layout.txt"))?;
//!
//! let result = analysis.retime(&sink)?;
//! println!("{} registers inserted", result.inserted_registers);
//! ```
//!
//! # Architecture
//!
//! - [`graph`] — timing graph: one vertex per logical element name
//! - [`schedule`] — topological order with cycle detection
//! - [`delay`] — per-node delay model over a cost table and device layout
//! - [`sta`] — arrival propagation and pipeline-register insertion
//! - [`report`] — corrected routes and per-node arrivals

#![warn(missing_docs)]

pub mod delay;
pub mod error;
pub mod graph;
pub mod ids;
pub mod report;
pub mod schedule;
pub mod sta;

pub use delay::{DelayModel, DelayTable, TimingCost};
pub use error::{ErrorKind, TimingError};
pub use graph::{TimingGraph, TimingNode};
pub use ids::TimingNodeId;
pub use report::{Arrival, RetimeResult};
pub use sta::{retime, source_pins};

use cyclone_arch::{load_layout, Layout, LayoutError};
use cyclone_common::Frequency;
use cyclone_config::{ConfigError, TimingSection};
use cyclone_diagnostics::DiagnosticSink;
use cyclone_netlist::{PhysicalNode, Router};
use std::path::Path;

/// A timing-closure session over one routed design.
///
/// Holds the delay costs, target frequency, and device layout explicitly, so
/// independent sessions never share state.
pub struct TimingAnalysis<'a, R: Router + ?Sized> {
    router: &'a R,
    costs: DelayTable,
    frequency: Frequency,
    layout: Layout,
}

impl<'a, R: Router + ?Sized> TimingAnalysis<'a, R> {
    /// Creates a session with an empty layout.
    pub fn new(router: &'a R, costs: DelayTable, frequency: Frequency) -> Self {
        Self {
            router,
            costs,
            frequency,
            layout: Layout::default(),
        }
    }

    /// Creates a session from the `[timing]` section of `cyclone.toml`.
    ///
    /// The layout file named by the section is not read here; its path is
    /// relative to the project directory, so callers pass it to
    /// [`set_layout`](Self::set_layout).
    pub fn from_config(router: &'a R, section: &TimingSection) -> Result<Self, ConfigError> {
        let frequency = section.frequency()?;
        Ok(Self::new(router, DelayTable::from(&section.costs), frequency))
    }

    /// Replaces the layout with one loaded from a file.
    pub fn set_layout(&mut self, path: &Path) -> Result<(), LayoutError> {
        self.layout = load_layout(path)?;
        log::debug!(
            "loaded {}x{} layout from {}",
            self.layout.width(),
            self.layout.height(),
            path.display()
        );
        Ok(())
    }

    /// Replaces the layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns the device layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the target frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the clock budget: the largest delay allowed between registers.
    pub fn maximum_delay(&self) -> u64 {
        self.frequency.clock_budget()
    }

    /// Returns the delay model for this session.
    pub fn delay_model(&self) -> DelayModel<'_> {
        DelayModel::new(&self.costs, &self.layout)
    }

    /// Returns the delay of passing through `node`.
    pub fn get_delay(&self, node: &PhysicalNode) -> Result<u64, TimingError> {
        self.delay_model().delay(node)
    }

    /// Runs timing analysis and pipeline-register insertion over the design.
    pub fn retime(&self, sink: &DiagnosticSink) -> Result<RetimeResult, TimingError> {
        sta::retime(
            self.router.netlist(),
            self.router.routed_graphs(),
            &self.delay_model(),
            self.maximum_delay(),
            sink,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyclone_common::TilePos;
    use cyclone_netlist::{NodeKind, Netlist, Pin, RoutedDesign, SwitchBoxIo};

    const CONFIG: &str = r#"
[timing]
frequency = "100MHz"
layout = "layout.txt"

[timing.costs]
clb_op = 2000
mem = 3000
reg = 500
clb_sb = 4000
mem_sb = 600
rmux = 150
"#;

    fn table() -> DelayTable {
        DelayTable::new()
            .with(TimingCost::ClbOp, 2000)
            .with(TimingCost::Mem, 3000)
            .with(TimingCost::Reg, 500)
            .with(TimingCost::ClbSb, 4000)
            .with(TimingCost::MemSb, 600)
            .with(TimingCost::Rmux, 150)
    }

    fn mhz(n: u64) -> Frequency {
        Frequency::from_mhz(n).unwrap()
    }

    /// `I0` on the IO column driving `p3` across three logic tiles, leaving
    /// each tile through its output switchbox.
    fn design() -> RoutedDesign {
        let at = |x| TilePos::new(x, 0);
        let i0 = PhysicalNode::port("I0", at(0));
        let p3 = PhysicalNode::port("p3", at(3));

        let mut nl = Netlist::new();
        let n = nl.add_net("data", Pin::new("I0", i0.clone()), [Pin::new("p3", p3.clone())]);
        let mut seg = vec![i0];
        for x in 0..3 {
            seg.push(PhysicalNode::switchbox("SB_IN", at(x), SwitchBoxIo::In));
            seg.push(PhysicalNode::switchbox("SB_OUT", at(x), SwitchBoxIo::Out));
        }
        seg.push(p3);

        let mut design = RoutedDesign::new(nl);
        design.set_route(n, vec![seg]);
        design
    }

    fn layout() -> Layout {
        "Ippp".parse().unwrap()
    }

    #[test]
    fn maximum_delay_truncates() {
        let design = RoutedDesign::default();
        assert_eq!(TimingAnalysis::new(&design, table(), mhz(100)).maximum_delay(), 10_000);
        assert_eq!(TimingAnalysis::new(&design, table(), mhz(3)).maximum_delay(), 333_333);
    }

    #[test]
    fn get_delay_uses_session_layout() {
        let design = RoutedDesign::default();
        let analysis = TimingAnalysis::new(&design, table(), mhz(100)).with_layout(layout());
        let sb = |x| PhysicalNode::switchbox("SB_OUT", TilePos::new(x, 0), SwitchBoxIo::Out);
        assert_eq!(analysis.get_delay(&sb(0)).unwrap(), 0);
        assert_eq!(analysis.get_delay(&sb(1)).unwrap(), 4000);
        assert!(matches!(
            analysis.get_delay(&sb(9)),
            Err(TimingError::UnknownTile { .. })
        ));
        let reg = PhysicalNode::register("r", TilePos::new(50, 50));
        assert_eq!(analysis.get_delay(&reg).unwrap(), 500);
        let sb_in = PhysicalNode::switchbox("SB_IN", TilePos::new(50, 50), SwitchBoxIo::In);
        assert_eq!(analysis.get_delay(&sb_in).unwrap(), 0);
    }

    #[test]
    fn retime_meets_timing_at_low_frequency() {
        let design = design();
        let analysis = TimingAnalysis::new(&design, table(), mhz(50)).with_layout(layout());
        let sink = DiagnosticSink::new();
        let result = analysis.retime(&sink).unwrap();
        // 0 + 4000 + 4000 + 2000
        assert_eq!(result.critical_delay, 10_000);
        assert_eq!(result.budget, 20_000);
        assert_eq!(result.inserted_registers, 0);
        assert_eq!(sink.warning_count(), 0);
    }

    #[test]
    fn retime_pipelines_at_high_frequency() {
        let design = design();
        let analysis = TimingAnalysis::new(&design, table(), mhz(125)).with_layout(layout());
        let sink = DiagnosticSink::new();
        let result = analysis.retime(&sink).unwrap();

        // Budget 8000: the hop into p3 (8000 + 2000) crosses it.
        assert_eq!(result.budget, 8_000);
        assert_eq!(result.inserted_registers, 1);
        assert_eq!(result.arrivals["p3"], Arrival { delay: 2_500, wave: 1 });
        let seg = &result.route("data").unwrap()[0];
        let reg = &seg[seg.len() - 2];
        assert_eq!(reg.kind, NodeKind::Register);
        assert_eq!(reg.name, "data$pipe0");
        assert_eq!(reg.pos, TilePos::new(2, 0));
        assert_eq!(sink.warning_count(), 2);
    }

    #[test]
    fn from_config_with_layout_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(cyclone_config::CONFIG_FILE_NAME), CONFIG).unwrap();
        std::fs::write(dir.path().join("layout.txt"), "# io column then logic\nIppp\n").unwrap();

        let config = cyclone_config::load_config(dir.path()).unwrap();
        let design = design();
        let mut analysis = TimingAnalysis::from_config(&design, &config.timing).unwrap();
        let layout_path = dir.path().join(config.timing.layout.as_deref().unwrap());
        analysis.set_layout(&layout_path).unwrap();

        assert_eq!(analysis.frequency(), mhz(100));
        assert_eq!(analysis.maximum_delay(), 10_000);
        assert_eq!(analysis.layout().width(), 4);
        let result = analysis.retime(&DiagnosticSink::new()).unwrap();
        assert_eq!(result.critical_delay, 10_000);
        assert!(result.met());
    }

    #[test]
    fn set_layout_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let design = RoutedDesign::default();
        let mut analysis = TimingAnalysis::new(&design, table(), mhz(100));
        let err = analysis.set_layout(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, LayoutError::Io(_)));
    }

    #[test]
    fn sessions_are_independent() {
        let design = design();
        let slow = TimingAnalysis::new(&design, table(), mhz(50)).with_layout(layout());
        let fast = TimingAnalysis::new(&design, table(), mhz(125)).with_layout(layout());
        let sink = DiagnosticSink::new();
        assert_eq!(fast.retime(&sink).unwrap().inserted_registers, 1);
        assert_eq!(slow.retime(&sink).unwrap().inserted_registers, 0);
    }

    #[test]
    fn works_through_trait_object() {
        let design = design();
        let router: &dyn Router = &design;
        let analysis = TimingAnalysis::new(router, table(), mhz(50)).with_layout(layout());
        assert!(analysis.retime(&DiagnosticSink::new()).is_ok());
    }

    #[test]
    fn result_serializes() {
        let design = design();
        let analysis = TimingAnalysis::new(&design, table(), mhz(125)).with_layout(layout());
        let result = analysis.retime(&DiagnosticSink::new()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: RetimeResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn reexports_available() {
        let _ = TimingGraph::new();
        let _ = TimingNodeId::from_raw(0);
        let _ = RetimeResult::default();
        let _ = DelayTable::new();
        assert_eq!(TimingCost::ALL.len(), 6);
        assert_eq!(
            source_pins(&Netlist::new()),
            Vec::<(cyclone_netlist::NetId, cyclone_netlist::PinId)>::new()
        );
    }
}
