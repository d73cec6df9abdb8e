//! Static timing analysis with pipeline-register insertion.
//!
//! Walks the timing graph in topological order. Each vertex resolves the
//! arrival (delay, wave) of its incoming pins, checks that all of them come
//! from the same pipeline stage, and then propagates along the routed
//! segments of every net it drives. Wherever the accumulated delay of a hop
//! would exceed the clock budget, a register is placed in front of that hop
//! and the accumulation restarts.

use crate::delay::{DelayModel, TimingCost};
use crate::error::TimingError;
use crate::graph::{TimingGraph, TimingNode};
use crate::report::{Arrival, RetimeResult};
use cyclone_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use cyclone_netlist::{Net, NetId, Netlist, PhysicalNode, PinId, RoutedGraph};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Per-net notice that pipeline registers were inserted.
const PIPELINED_NET: u16 = 1;
/// Run summary emitted when anything was pipelined.
const PIPELINE_SUMMARY: u16 = 2;

/// Returns `(net, driver pin)` for every net driven by a primary input.
///
/// A primary input is a driver pin whose name starts with `i` or `I`.
pub fn source_pins(netlist: &Netlist) -> Vec<(NetId, PinId)> {
    netlist
        .nets
        .iter()
        .filter_map(|net| net.pins.first().map(|&driver| (net.id, driver)))
        .filter(|&(_, driver)| netlist.pin(driver).is_primary_input())
        .collect()
}

/// Per-pin delay and wave tables.
#[derive(Default)]
struct PinArrivals {
    delay: HashMap<PinId, u64>,
    wave: HashMap<PinId, u32>,
}

impl PinArrivals {
    fn set(&mut self, pin: PinId, arrival: Arrival) {
        self.delay.insert(pin, arrival.delay);
        self.wave.insert(pin, arrival.wave);
    }

    fn get(&self, netlist: &Netlist, pin: PinId) -> Result<Arrival, TimingError> {
        let wave = *self
            .wave
            .get(&pin)
            .ok_or_else(|| TimingError::MissingWave {
                pin: netlist.pin(pin).name.clone(),
            })?;
        let delay = *self
            .delay
            .get(&pin)
            .ok_or_else(|| TimingError::MissingPinDelay {
                pin: netlist.pin(pin).name.clone(),
            })?;
        Ok(Arrival { delay, wave })
    }
}

/// Runs timing analysis over a routed netlist and pipelines every hop that
/// would exceed `budget`.
///
/// Primary-input driver pins are seeded with [`Arrival::SOURCE`]. The delay
/// table must cover every cost category. Nothing is returned unless the whole
/// netlist was analysed.
pub fn retime(
    netlist: &Netlist,
    routed_graphs: &HashMap<NetId, RoutedGraph>,
    model: &DelayModel<'_>,
    budget: u64,
    sink: &DiagnosticSink,
) -> Result<RetimeResult, TimingError> {
    model.table().ensure_complete()?;
    let graph = TimingGraph::build(netlist)?;
    let order = graph.topological_order()?;
    log::debug!(
        "retiming {} nodes, {} edges, budget {budget}",
        graph.node_count(),
        graph.edge_count()
    );

    let mut pins = PinArrivals::default();
    for (_, pin) in source_pins(netlist) {
        pins.set(pin, Arrival::SOURCE);
    }

    let mut routes = BTreeMap::new();
    let mut arrivals = BTreeMap::new();
    let mut pipelined: Vec<(NetId, usize)> = Vec::new();
    let mut critical_delay = 0;

    for id in order {
        let node = graph.node(id);

        let arrival = resolve_arrival(netlist, node, &pins)?;
        for &pin in &node.outgoing_pins {
            pins.set(pin, arrival);
        }
        arrivals.insert(node.name.clone(), arrival);
        log::debug!(
            "`{}` resolved: delay {} wave {}",
            node.name,
            arrival.delay,
            arrival.wave
        );

        for &net_id in graph.downstream_net_ids(id) {
            let net = netlist.net(net_id);
            let routed = routed_graphs
                .get(&net_id)
                .ok_or_else(|| TimingError::MissingRoute {
                    net: net.name.clone(),
                })?;
            let walked = walk_net(netlist, net, routed, arrival, model, budget)?;

            for (pin, sink_arrival) in walked.sinks {
                pins.set(pin, sink_arrival);
                critical_delay = critical_delay.max(sink_arrival.delay);
            }
            if walked.registers > 0 {
                pipelined.push((net_id, walked.registers));
            }
            routes.insert(net.name.clone(), walked.route);
        }
    }

    pipelined.sort_by_key(|&(net, _)| net);
    let inserted_registers = pipelined.iter().map(|&(_, n)| n).sum();
    report_pipelining(netlist, &pipelined, inserted_registers, budget, sink);

    Ok(RetimeResult {
        routes,
        arrivals,
        inserted_registers,
        pipelined_nets: pipelined
            .iter()
            .map(|&(net, _)| netlist.net(net).name.clone())
            .collect(),
        critical_delay,
        budget,
    })
}

/// Resolves the arrival of a vertex from its incoming pins, or from its
/// seeded outgoing pins when it has none.
///
/// A register block (non-source, name starting with `r`) starts a new wave
/// at delay 0. Its `Reg` cost was already paid by the hop into its register
/// node on the upstream net. A register inserted by `walk_net` has no such
/// upstream hop, so the walk charges `Reg` after it instead.
fn resolve_arrival(
    netlist: &Netlist,
    node: &TimingNode,
    pins: &PinArrivals,
) -> Result<Arrival, TimingError> {
    let is_source = node.incoming_pins.is_empty();
    let inputs = if is_source {
        &node.outgoing_pins
    } else {
        &node.incoming_pins
    };

    let mut delay = 0;
    let mut waves = BTreeSet::new();
    for &pin in inputs {
        let arrival = pins.get(netlist, pin)?;
        delay = delay.max(arrival.delay);
        waves.insert(arrival.wave);
    }
    if waves.len() > 1 {
        return Err(TimingError::WaveMismatch {
            node: node.name.clone(),
            waves: waves.into_iter().collect(),
        });
    }
    let wave = waves.into_iter().next().unwrap_or(0);

    if !is_source && node.is_register() {
        Ok(Arrival {
            delay: 0,
            wave: wave + 1,
        })
    } else {
        Ok(Arrival { delay, wave })
    }
}

/// One net after propagation.
struct WalkedNet {
    route: Vec<Vec<PhysicalNode>>,
    sinks: Vec<(PinId, Arrival)>,
    registers: usize,
}

/// Propagates `start` along every segment of a net, inserting registers at
/// budget crossings.
fn walk_net(
    netlist: &Netlist,
    net: &Net,
    routed: &RoutedGraph,
    start: Arrival,
    model: &DelayModel<'_>,
    budget: u64,
) -> Result<WalkedNet, TimingError> {
    let driver = netlist.pin(net.driver());
    let mut at: HashMap<&PhysicalNode, Arrival> = HashMap::new();
    at.insert(&driver.node, start);
    // Keyed by the hop a register was placed in front of.
    let mut inserted: HashMap<(&PhysicalNode, &PhysicalNode), PhysicalNode> = HashMap::new();
    let mut route = Vec::with_capacity(routed.route().len());

    for segment in routed.route() {
        let mut corrected = Vec::with_capacity(segment.len() + 1);
        if let Some(first) = segment.first() {
            corrected.push(first.clone());
        }

        for hop in segment.windows(2) {
            let (pred, node) = (&hop[0], &hop[1]);
            let before = *at.get(pred).ok_or_else(|| TimingError::MissingNodeDelay {
                net: net.name.clone(),
                node: pred.to_string(),
            })?;
            let cost = model.delay(node)?;
            let mut arrival = Arrival {
                delay: before.delay + cost,
                wave: before.wave,
            };

            if arrival.delay > budget {
                let restarted = model.table().cost(TimingCost::Reg)? + cost;
                if restarted > budget {
                    return Err(TimingError::Unpipelineable {
                        net: net.name.clone(),
                        node: node.to_string(),
                        delay: restarted,
                        budget,
                    });
                }
                let next = inserted.len();
                let register = inserted.entry((pred, node)).or_insert_with(|| {
                    let name = format!("{}$pipe{next}", net.name);
                    let reg = PhysicalNode::register(name, pred.pos);
                    log::debug!(
                        "net `{}`: {} reaches {} > {budget}, inserting `{reg}`",
                        net.name,
                        node,
                        arrival.delay
                    );
                    reg
                });
                corrected.push(register.clone());
                arrival = Arrival {
                    delay: restarted,
                    wave: before.wave + 1,
                };
            }

            at.insert(node, arrival);
            corrected.push(node.clone());
        }
        route.push(corrected);
    }

    let sinks = net
        .sinks()
        .iter()
        .map(|&pin_id| {
            let pin = netlist.pin(pin_id);
            at.get(&pin.node)
                .map(|&arrival| (pin_id, arrival))
                .ok_or_else(|| TimingError::UnroutedSink {
                    net: net.name.clone(),
                    pin: pin.name.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WalkedNet {
        route,
        sinks,
        registers: inserted.len(),
    })
}

fn report_pipelining(
    netlist: &Netlist,
    pipelined: &[(NetId, usize)],
    inserted_registers: usize,
    budget: u64,
    sink: &DiagnosticSink,
) {
    for &(net, count) in pipelined {
        let name = &netlist.net(net).name;
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::new(Category::Timing, PIPELINED_NET),
                format!("inserted {count} pipeline register(s) to meet timing"),
            )
            .with_subject(format!("net `{name}`")),
        );
    }
    if inserted_registers > 0 {
        log::info!(
            "pipelined {} net(s) with {inserted_registers} register(s)",
            pipelined.len()
        );
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::new(Category::Timing, PIPELINE_SUMMARY),
                format!(
                    "design needed {inserted_registers} pipeline register(s) across {} net(s)",
                    pipelined.len()
                ),
            )
            .with_note(format!("clock budget is {budget}"))
            .with_help("lower the target frequency to avoid added latency"),
        );
    } else {
        log::info!("timing met without pipelining");
    }
}
