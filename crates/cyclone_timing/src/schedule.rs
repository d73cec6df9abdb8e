//! Topological scheduling of the timing graph.
//!
//! Depth-first post-order, reversed. Roots are visited in vertex-id order and
//! successors in edge-insertion order, so the schedule is deterministic for a
//! given netlist. The walk keeps an explicit stack and never recurses, so
//! graph depth is bounded only by memory.

use crate::error::TimingError;
use crate::graph::TimingGraph;
use crate::ids::TimingNodeId;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

impl TimingGraph {
    /// Returns every vertex ordered so that each edge `u -> v` has `u`
    /// before `v`.
    ///
    /// Fails with [`TimingError::Cycle`] if the graph is not acyclic; a
    /// self-loop counts as a cycle.
    pub fn topological_order(&self) -> Result<Vec<TimingNodeId>, TimingError> {
        let n = self.node_count();
        let mut marks = vec![Mark::Unvisited; n];
        let mut post_order = Vec::with_capacity(n);
        // (vertex, index of the next successor to visit)
        let mut stack: Vec<(TimingNodeId, usize)> = Vec::new();

        for root in self.nodes().iter().map(|node| node.id) {
            if marks[root.index()] != Mark::Unvisited {
                continue;
            }
            marks[root.index()] = Mark::OnStack;
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                match self.successors(node).get(next) {
                    Some(&succ) => {
                        frame.1 += 1;
                        match marks[succ.index()] {
                            Mark::Unvisited => {
                                marks[succ.index()] = Mark::OnStack;
                                stack.push((succ, 0));
                            }
                            Mark::OnStack => {
                                return Err(TimingError::Cycle {
                                    node: self.node(succ).name.clone(),
                                });
                            }
                            Mark::Done => {}
                        }
                    }
                    None => {
                        marks[node.index()] = Mark::Done;
                        post_order.push(node);
                        stack.pop();
                    }
                }
            }
        }

        post_order.reverse();
        Ok(post_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyclone_common::TilePos;
    use cyclone_netlist::{Netlist, PhysicalNode, Pin};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn pin(name: &str) -> Pin {
        Pin::new(name, PhysicalNode::port(name, TilePos::new(0, 0)))
    }

    fn names(g: &TimingGraph, order: &[TimingNodeId]) -> Vec<String> {
        order.iter().map(|&id| g.node(id).name.clone()).collect()
    }

    fn assert_respects_edges(g: &TimingGraph, order: &[TimingNodeId]) {
        let mut position = vec![usize::MAX; g.node_count()];
        for (i, id) in order.iter().enumerate() {
            position[id.as_raw() as usize] = i;
        }
        for (u, v) in g.edges() {
            assert!(
                position[u.as_raw() as usize] < position[v.as_raw() as usize],
                "{} scheduled after {}",
                g.node(u).name,
                g.node(v).name
            );
        }
    }

    #[test]
    fn empty_graph() {
        let g = TimingGraph::new();
        assert!(g.topological_order().unwrap().is_empty());
    }

    #[test]
    fn chain() {
        let mut nl = Netlist::new();
        nl.add_net("ab", pin("A"), [pin("B")]);
        nl.add_net("bc", pin("B"), [pin("C")]);
        let g = TimingGraph::build(&nl).unwrap();
        let order = g.topological_order().unwrap();
        assert_eq!(names(&g, &order), vec!["A", "B", "C"]);
    }

    #[test]
    fn chain_declared_backwards() {
        let mut nl = Netlist::new();
        nl.add_net("bc", pin("B"), [pin("C")]);
        nl.add_net("ab", pin("A"), [pin("B")]);
        let g = TimingGraph::build(&nl).unwrap();
        let order = g.topological_order().unwrap();
        assert_eq!(names(&g, &order), vec!["A", "B", "C"]);
    }

    #[test]
    fn deterministic_fanout_order() {
        let mut nl = Netlist::new();
        nl.add_net("a", pin("I0"), [pin("x"), pin("y")]);
        let g = TimingGraph::build(&nl).unwrap();
        let first = g.topological_order().unwrap();
        assert_eq!(names(&g, &first), vec!["I0", "y", "x"]);
        assert_eq!(g.topological_order().unwrap(), first);
    }

    #[test]
    fn diamond() {
        let mut nl = Netlist::new();
        nl.add_net("a", pin("a"), [pin("b"), pin("c")]);
        nl.add_net("b", pin("b"), [pin("d")]);
        nl.add_net("c", pin("c"), [pin("d")]);
        let g = TimingGraph::build(&nl).unwrap();
        let order = g.topological_order().unwrap();
        assert_eq!(order.len(), 4);
        assert_eq!(g.node(order[0]).name, "a");
        assert_eq!(g.node(order[3]).name, "d");
        assert_respects_edges(&g, &order);
    }

    #[test]
    fn disconnected_components_all_scheduled() {
        let mut nl = Netlist::new();
        nl.add_net("a", pin("a"), [pin("b")]);
        nl.add_net("c", pin("c"), [pin("d")]);
        let g = TimingGraph::build(&nl).unwrap();
        let order = g.topological_order().unwrap();
        assert_eq!(order.len(), 4);
        assert_respects_edges(&g, &order);
    }

    #[test]
    fn cycle_is_an_error() {
        let mut nl = Netlist::new();
        nl.add_net("ab", pin("a"), [pin("b")]);
        nl.add_net("bc", pin("b"), [pin("c")]);
        nl.add_net("ca", pin("c"), [pin("a")]);
        let g = TimingGraph::build(&nl).unwrap();
        let err = g.topological_order().unwrap_err();
        assert_eq!(err, TimingError::Cycle { node: "a".into() });
        assert_eq!(err.kind(), crate::error::ErrorKind::Structural);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let mut nl = Netlist::new();
        nl.add_net("fb", pin("p0"), [pin("p0")]);
        let g = TimingGraph::build(&nl).unwrap();
        assert!(matches!(
            g.topological_order(),
            Err(TimingError::Cycle { node }) if node == "p0"
        ));
    }

    #[test]
    fn random_dags_respect_every_edge() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..20 {
            let count = rng.gen_range(2..60usize);
            let mut edges = Vec::new();
            for u in 0..count {
                for v in (u + 1)..count {
                    if rng.gen_bool(0.1) {
                        edges.push((u, v));
                    }
                }
            }
            edges.shuffle(&mut rng);

            let mut nl = Netlist::new();
            for (i, (u, v)) in edges.iter().enumerate() {
                nl.add_net(format!("n{i}"), pin(&format!("p{u}")), [pin(&format!("p{v}"))]);
            }
            let g = TimingGraph::build(&nl).unwrap();
            let order = g.topological_order().unwrap();
            assert_eq!(order.len(), g.node_count());
            assert_respects_edges(&g, &order);
        }
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let depth = 10_000;
        let mut nl = Netlist::new();
        for i in 0..depth {
            nl.add_net(
                format!("n{i}"),
                pin(&format!("p{i}")),
                [pin(&format!("p{}", i + 1))],
            );
        }
        let g = TimingGraph::build(&nl).unwrap();
        let order = g.topological_order().unwrap();
        assert_eq!(order.len(), depth + 1);
        assert_eq!(g.node(order[0]).name, "p0");
        assert_eq!(g.node(order[depth]).name, format!("p{depth}"));
    }
}
