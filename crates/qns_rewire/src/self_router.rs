//! Independently re-verifies a built chain's known-by-construction cost by
//! replaying the assembled circuit against the chain's own glinks.
//!
//! Grounded on `original_source/lib/quekno.py`'s `route`: walk the circuit
//! gate by gate, tracking the current qubit layout; whenever a two-qubit
//! gate's operands are not adjacent in the architecture graph, consume the
//! next glink's stored permutation as the SWAPs that make it adjacent.
//! `router::basic::BasicRouter`'s "replay gate by gate, track the running
//! mapping" shape is the structural precedent.

use qns_core::error::{QnsError, Result};
use qns_core::types::{Circuit, Gate, Node};

use crate::assembler::position_of;
use crate::glink::GlinkChain;

/// Verifies a chain's structural invariants ahead of assembly: every
/// subgraph edge is a genuine architecture edge, every non-head glink's
/// permutation swaps are drawn from the architecture graph's own edges, and
/// the sum of stored glink costs matches the chain's reported total. The
/// head glink is exempt from the permutation check: its permutation is an
/// arbitrary bijection over the whole architecture graph, not a sequence of
/// adjacent swaps. Returns the total cost on success.
pub fn verify(chain: &GlinkChain) -> Result<usize> {
    let mut true_cost = 0usize;
    for (index, glink) in chain.links().iter().enumerate() {
        for edge in glink.subgraph().edges() {
            let (u, v) = edge.endpoints();
            if !chain.archgraph().has_edge(u, v) {
                return Err(QnsError::router_mismatch(format!(
                    "glink {index} draws edge {u}-{v}, which is not an edge of the architecture graph"
                )));
            }
        }
        if index > 0 {
            for edge in glink.permutation().sequence() {
                let (u, v) = edge.endpoints();
                if !chain.archgraph().has_edge(u, v) {
                    return Err(QnsError::router_mismatch(format!(
                        "glink {index}'s permutation swap {u}-{v} is not an edge of the architecture graph"
                    )));
                }
            }
        }
        true_cost += glink.cost();
    }

    if true_cost != chain.total_cost() {
        return Err(QnsError::router_mismatch(format!(
            "chain total cost {} disagrees with the replayed cost {true_cost}",
            chain.total_cost()
        )));
    }

    Ok(true_cost)
}

/// Routes `circuit` (as produced by [`crate::assembler::CircuitAssembler`])
/// onto `chain`'s architecture graph: replays every gate against the
/// evolving layout the chain's own glinks induce, inserting each
/// non-head glink's permutation as SWAPs exactly when a two-qubit gate
/// is found not to be architecture-adjacent. Returns the routed circuit;
/// errors if the chain runs out of glinks before the circuit does, has
/// glinks left over once the circuit ends, or the true cost this replay
/// measures disagrees with the chain's predicted cost.
pub fn route(circuit: &Circuit, chain: &GlinkChain) -> Result<Circuit> {
    let archgraph = chain.archgraph();
    let links = chain.links();
    let head = links.first().ok_or_else(|| QnsError::invariant("chain has no head glink"))?;
    let mut layout = head.permutation().apply(&archgraph.nodes());

    let mut routed = Circuit::new(circuit.num_qubits());
    let mut glink_index = 0usize;
    let mut true_cost = 0usize;

    for gate in circuit.gates() {
        match gate {
            Gate::Barrier => routed.push(Gate::Barrier),
            Gate::OneQubit(q) => routed.push(Gate::OneQubit(*q)),
            Gate::TwoQubit(a, b) => {
                if is_adjacent(archgraph, &layout, *a, *b) {
                    routed.push(Gate::TwoQubit(*a, *b));
                    continue;
                }

                while !is_adjacent(archgraph, &layout, *a, *b) {
                    glink_index += 1;
                    let glink = links
                        .get(glink_index)
                        .ok_or_else(|| QnsError::router_mismatch("ran out of glinks while routing"))?;

                    for edge in glink.permutation().sequence() {
                        let (u, v) = edge.endpoints();
                        let (Some(iu), Some(iv)) = (position_of(&layout, u), position_of(&layout, v)) else {
                            return Err(QnsError::router_mismatch("glink swap touches a node outside the current layout"));
                        };
                        routed.push(Gate::TwoQubit(iu, iv));
                    }
                    layout = glink.permutation().apply(&layout);
                    true_cost += glink.cost();
                }
                routed.push(Gate::TwoQubit(*a, *b));
            },
        }
    }

    if glink_index + 1 != links.len() {
        return Err(QnsError::router_mismatch(format!(
            "chain has {} glinks but routing only consumed {}",
            links.len(),
            glink_index + 1
        )));
    }
    if true_cost != chain.total_cost() {
        return Err(QnsError::router_mismatch(format!(
            "predicted cost {} disagrees with the true routed cost {true_cost}",
            chain.total_cost()
        )));
    }

    Ok(routed)
}

fn is_adjacent(archgraph: &qns_core::types::Graph, layout: &[Node], a: usize, b: usize) -> bool {
    match (layout.get(a), layout.get(b)) {
        (Some(&pa), Some(&pb)) => archgraph.has_edge(pa, pb),
        _ => false,
    }
}

/// Replays every glink's permutation in order against an identity
/// assignment over the architecture graph's qubits, returning the final
/// assignment. Used to confirm the chain composes into a well-formed
/// permutation rather than, say, dropping a qubit.
pub fn replay_mapping(chain: &GlinkChain) -> Vec<Node> {
    let mut assignment = chain.archgraph().nodes();
    for glink in chain.links() {
        assignment = glink.permutation().apply(&assignment);
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use qns_core::archgraphs;
    use qns_core::config::{subgraph_size, BuilderConfig, OptType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::assembler::CircuitAssembler;
    use crate::chain_builder::ChainBuilder;
    use crate::glink::Glink;
    use qns_core::types::{Edge, Graph, Permutation, PermutationMode};

    #[test]
    fn test_verify_accepts_a_freshly_built_chain() {
        let cfg = BuilderConfig::new(OptType::Opt1, 3, archgraphs::grid(3, 3), subgraph_size::SMALL.min(4), 1.5);
        let mut rng = StdRng::seed_from_u64(5);
        let chain = ChainBuilder::new(&cfg).build(&mut rng).unwrap();
        let replayed = verify(&chain).unwrap();
        assert_eq!(replayed, chain.total_cost());
    }

    #[test]
    fn test_verify_accepts_a_head_permutation_spanning_the_whole_archgraph() {
        let archgraph = archgraphs::grid(3, 3);
        let mut rng = StdRng::seed_from_u64(20);
        let mut chain = GlinkChain::new(archgraph.clone());
        let head_subgraph = archgraph.random_subgraph(2, &mut rng).unwrap();
        let head_permutation = Permutation::random(&archgraph.nodes(), &mut rng).unwrap();
        chain.push(Glink::new(head_subgraph, head_permutation, 0));
        assert_eq!(verify(&chain).unwrap(), 0);
    }

    #[test]
    fn test_verify_rejects_a_non_head_permutation_edge_outside_archgraph() {
        let archgraph = Graph::from_edges(&[(0, 1), (1, 2)]).unwrap();
        let mut chain = GlinkChain::new(archgraph.clone());
        chain.push(Glink::new(archgraph.clone(), Permutation::identity(PermutationMode::Map), 0));
        let rogue = Permutation::new(PermutationMode::Swap, vec![Edge::new(Node::new(0), Node::new(2))]);
        chain.push(Glink::new(archgraph, rogue, 1));
        assert!(verify(&chain).is_err());
    }

    #[test]
    fn test_verify_rejects_edge_outside_archgraph() {
        let archgraph = Graph::from_edges(&[(0, 1)]).unwrap();
        let mut chain = GlinkChain::new(archgraph);
        let mut rogue_subgraph = Graph::new("rogue");
        rogue_subgraph.add_edge(Edge::new(Node::new(5), Node::new(6)));
        chain.push(Glink::new(rogue_subgraph, Permutation::identity(PermutationMode::Swap), 0));
        assert!(verify(&chain).is_err());
    }

    #[test]
    fn test_route_reproduces_target_cost_as_gate_count_delta() {
        let cfg = BuilderConfig::new(OptType::Opt1, 3, archgraphs::grid(3, 3), subgraph_size::SMALL.min(4), 1.5);
        let mut rng = StdRng::seed_from_u64(5);
        let chain = ChainBuilder::new(&cfg).build(&mut rng).unwrap();
        verify(&chain).unwrap();
        let circuit = CircuitAssembler::new(&cfg).assemble(&chain, &mut rng).unwrap();
        let routed = route(&circuit, &chain).unwrap();
        assert_eq!(routed.two_qubit_gate_count() - circuit.two_qubit_gate_count(), chain.total_cost());
    }

    #[test]
    fn test_route_reproduces_target_cost_as_depth_delta_in_depth_regime() {
        let cfg = BuilderConfig::new(OptType::Depth, 2, archgraphs::grid(3, 3), subgraph_size::SMALL.min(4), 1.5);
        let mut rng = StdRng::seed_from_u64(8);
        let chain = ChainBuilder::new(&cfg).build(&mut rng).unwrap();
        verify(&chain).unwrap();
        let circuit = CircuitAssembler::new(&cfg).assemble(&chain, &mut rng).unwrap();
        let routed = route(&circuit, &chain).unwrap();
        assert_eq!(routed.depth() - circuit.depth(), chain.total_cost());
    }

    #[test]
    fn test_route_zero_target_cost_adds_no_swaps() {
        let cfg = BuilderConfig::new(OptType::Opt1, 0, archgraphs::grid(3, 3), subgraph_size::SMALL.min(4), 1.5);
        let mut rng = StdRng::seed_from_u64(4);
        let chain = ChainBuilder::new(&cfg).build(&mut rng).unwrap();
        assert_eq!(chain.len(), 1);
        let circuit = CircuitAssembler::new(&cfg).assemble(&chain, &mut rng).unwrap();
        let routed = route(&circuit, &chain).unwrap();
        assert_eq!(routed.two_qubit_gate_count(), circuit.two_qubit_gate_count());
        assert_eq!(routed.depth(), circuit.depth());
    }

    #[test]
    fn test_replay_mapping_is_a_permutation_of_the_qubits() {
        let cfg = BuilderConfig::new(OptType::Opt2, 3, archgraphs::grid(3, 3), subgraph_size::SMALL.min(4), 1.5);
        let mut rng = StdRng::seed_from_u64(6);
        let chain = ChainBuilder::new(&cfg).build(&mut rng).unwrap();
        let mut replayed = replay_mapping(&chain);
        let mut original = chain.archgraph().nodes();
        replayed.sort_by_key(|n| n.label());
        original.sort_by_key(|n| n.label());
        assert_eq!(replayed, original);
    }
}
