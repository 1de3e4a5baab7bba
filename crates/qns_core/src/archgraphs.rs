//! Fixed and parameterised architecture graphs.
//!
//! Grounded on `original_source/lib/graph_utils.py`'s `graph_from_name`
//! dispatcher and its hardcoded coupling maps (Tokyo, Rochester, Sycamore54,
//! Sycamore derived from Sycamore54 by removing a bad qubit). Per the Open
//! Question decision in DESIGN.md, these are built fresh on every call
//! rather than cached behind a singleton.

use crate::types::{Graph, Node};

/// IBM Q Tokyo (20 qubits).
pub fn tokyo() -> Graph {
    let edges = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 4),
        (0, 5),
        (1, 6),
        (1, 7),
        (2, 6),
        (2, 7),
        (3, 8),
        (3, 9),
        (4, 8),
        (4, 9),
        (5, 6),
        (6, 7),
        (7, 8),
        (8, 9),
        (5, 10),
        (5, 11),
        (6, 10),
        (6, 11),
        (7, 12),
        (7, 13),
        (8, 12),
        (8, 13),
        (9, 14),
        (10, 11),
        (11, 12),
        (12, 13),
        (13, 14),
        (10, 15),
        (11, 16),
        (11, 17),
        (12, 16),
        (12, 17),
        (13, 18),
        (13, 19),
        (14, 18),
        (14, 19),
        (15, 16),
        (16, 17),
        (17, 18),
        (18, 19),
    ];
    Graph::from_edges(&edges).expect("tokyo() edge list is internally consistent").with_name("tokyo")
}

/// IBM Q Rochester (53 qubits).
pub fn rochester() -> Graph {
    let edges = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 4),
        (0, 5),
        (4, 6),
        (5, 9),
        (6, 13),
        (7, 8),
        (8, 9),
        (9, 10),
        (10, 11),
        (11, 12),
        (12, 13),
        (13, 14),
        (14, 15),
        (7, 16),
        (11, 17),
        (15, 18),
        (16, 19),
        (17, 23),
        (18, 27),
        (19, 20),
        (20, 21),
        (21, 22),
        (22, 23),
        (23, 24),
        (24, 25),
        (25, 26),
        (26, 27),
        (21, 28),
        (25, 29),
        (28, 32),
        (29, 36),
        (30, 31),
        (31, 32),
        (32, 33),
        (33, 34),
        (34, 35),
        (35, 36),
        (36, 37),
        (37, 38),
        (30, 39),
        (34, 40),
        (38, 41),
        (39, 42),
        (40, 46),
        (41, 50),
        (42, 43),
        (43, 44),
        (44, 45),
        (45, 46),
        (46, 47),
        (47, 48),
        (48, 49),
        (49, 50),
        (44, 51),
        (48, 52),
    ];
    Graph::from_edges(&edges).expect("rochester() edge list is internally consistent").with_name("rochester")
}

/// Google Sycamore (54 qubits).
pub fn sycamore54() -> Graph {
    let edges = [
        (0, 6),
        (1, 6),
        (1, 7),
        (2, 7),
        (2, 8),
        (3, 8),
        (3, 9),
        (4, 9),
        (4, 10),
        (5, 10),
        (5, 11),
        (6, 12),
        (6, 13),
        (7, 13),
        (7, 14),
        (8, 14),
        (8, 15),
        (9, 15),
        (9, 16),
        (10, 16),
        (10, 17),
        (11, 17),
        (12, 18),
        (13, 18),
        (13, 19),
        (14, 19),
        (14, 20),
        (15, 20),
        (15, 21),
        (16, 21),
        (16, 22),
        (17, 22),
        (17, 23),
        (18, 24),
        (18, 25),
        (19, 25),
        (19, 26),
        (20, 26),
        (20, 27),
        (21, 27),
        (21, 28),
        (22, 28),
        (22, 29),
        (23, 29),
        (24, 30),
        (25, 30),
        (25, 31),
        (26, 31),
        (26, 32),
        (27, 32),
        (27, 33),
        (28, 33),
        (28, 34),
        (29, 34),
        (29, 35),
        (30, 36),
        (30, 37),
        (31, 37),
        (31, 38),
        (32, 38),
        (32, 39),
        (33, 39),
        (33, 40),
        (34, 40),
        (34, 41),
        (35, 41),
        (36, 42),
        (37, 42),
        (37, 43),
        (38, 44),
        (39, 44),
        (39, 45),
        (40, 45),
        (40, 46),
        (41, 46),
        (41, 47),
        (42, 48),
        (42, 49),
        (43, 49),
        (43, 50),
        (44, 50),
        (44, 51),
        (45, 51),
        (45, 52),
        (46, 52),
        (46, 53),
        (47, 53),
    ];
    Graph::from_edges(&edges).expect("sycamore54() edge list is internally consistent").with_name("sycamore54")
}

/// Google Sycamore (53 qubits): `sycamore54()` with its known bad qubit,
/// node 3, removed.
pub fn sycamore() -> Graph {
    let mut g = sycamore54();
    g.remove_node(Node::new(3));
    g.with_name("sycamore")
}

/// A `rows` x `cols` nearest-neighbour grid graph, row-major node
/// numbering.
pub fn grid(rows: usize, cols: usize) -> Graph {
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let id = r * cols + c;
            if c + 1 < cols {
                edges.push((id, id + 1));
            }
            if r + 1 < rows {
                edges.push((id, id + cols));
            }
        }
    }
    if edges.is_empty() {
        return single_node_graph("grid");
    }
    Graph::from_edges(&edges).expect("grid edge list is internally consistent").with_name("grid")
}

/// A path graph over `n` nodes: `0 - 1 - ... - (n - 1)`.
pub fn line(n: usize) -> Graph {
    if n <= 1 {
        return single_node_graph("line");
    }
    let edges: Vec<(usize, usize)> = (0..n - 1).map(|i| (i, i + 1)).collect();
    Graph::from_edges(&edges).expect("line edge list is internally consistent").with_name("line")
}

/// A cycle graph over `n` nodes (`n >= 3`).
pub fn ring(n: usize) -> Graph {
    if n < 3 {
        return line(n);
    }
    let mut edges: Vec<(usize, usize)> = (0..n - 1).map(|i| (i, i + 1)).collect();
    edges.push((n - 1, 0));
    Graph::from_edges(&edges).expect("ring edge list is internally consistent").with_name("ring")
}

/// A star graph: node `0` connected to every other node among `n` total
/// nodes.
pub fn star(n: usize) -> Graph {
    if n <= 1 {
        return single_node_graph("star");
    }
    let edges: Vec<(usize, usize)> = (1..n).map(|i| (0, i)).collect();
    Graph::from_edges(&edges).expect("star edge list is internally consistent").with_name("star")
}

fn single_node_graph(name: &str) -> Graph {
    let mut g = Graph::new(name);
    g.add_node(Node::new(0));
    g
}

/// Looks up a named or parameterised architecture graph by name, mirroring
/// `graph_from_name`'s dispatch table. Supported names: `tokyo`,
/// `rochester`, `sycamore54`, `sycamore`, `grid:ROWSxCOLS`, `line:N`,
/// `ring:N`, `star:N`.
pub fn graph_from_name(name: &str) -> crate::Result<Graph> {
    use crate::error::QnsError;

    if let Some(rest) = name.strip_prefix("grid:") {
        let (rows, cols) = rest
            .split_once('x')
            .and_then(|(r, c)| Some((r.parse().ok()?, c.parse().ok()?)))
            .ok_or_else(|| QnsError::construction(format!("invalid grid spec: {name}")))?;
        return Ok(grid(rows, cols));
    }
    if let Some(rest) = name.strip_prefix("line:") {
        let n = rest
            .parse()
            .map_err(|_| QnsError::construction(format!("invalid line spec: {name}")))?;
        return Ok(line(n));
    }
    if let Some(rest) = name.strip_prefix("ring:") {
        let n = rest
            .parse()
            .map_err(|_| QnsError::construction(format!("invalid ring spec: {name}")))?;
        return Ok(ring(n));
    }
    if let Some(rest) = name.strip_prefix("star:") {
        let n = rest
            .parse()
            .map_err(|_| QnsError::construction(format!("invalid star spec: {name}")))?;
        return Ok(star(n));
    }
    match name {
        "tokyo" => Ok(tokyo()),
        "rochester" => Ok(rochester()),
        "sycamore54" => Ok(sycamore54()),
        "sycamore" => Ok(sycamore()),
        other => Err(QnsError::construction(format!("unknown architecture graph: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokyo_has_20_qubits() {
        let g = tokyo();
        assert_eq!(g.num_nodes(), 20);
        assert_eq!(g.num_edges(), 43);
    }

    #[test]
    fn test_rochester_has_53_qubits() {
        let g = rochester();
        assert_eq!(g.num_nodes(), 53);
        assert_eq!(g.num_edges(), 58);
    }

    #[test]
    fn test_sycamore_removes_bad_qubit() {
        assert_eq!(sycamore54().num_nodes(), 54);
        assert_eq!(sycamore().num_nodes(), 53);
    }

    #[test]
    fn test_grid_edge_count() {
        let g = grid(2, 3);
        assert_eq!(g.num_nodes(), 6);
        assert_eq!(g.num_edges(), 7);
    }

    #[test]
    fn test_line_and_ring() {
        assert_eq!(line(5).num_edges(), 4);
        assert_eq!(ring(5).num_edges(), 5);
    }

    #[test]
    fn test_star() {
        let g = star(4);
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_edges(), 3);
    }

    #[test]
    fn test_graph_from_name_dispatch() {
        assert_eq!(graph_from_name("tokyo").unwrap().num_nodes(), 20);
        assert_eq!(graph_from_name("grid:2x2").unwrap().num_nodes(), 4);
        assert_eq!(graph_from_name("line:3").unwrap().num_nodes(), 3);
        assert!(graph_from_name("nonsense").is_err());
    }
}
