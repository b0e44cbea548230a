use crate::graph::SubGraph;
use std::cmp::max;
use std::sync::OnceLock;

/// Orders strictly below this are answered by the precomputed table.
pub const SMALL_GRAPH_LIMIT: usize = 7;

/// Bit position of the edge {i, j} (i < j) in a local edge mask.
fn edge_bit(i: usize, j: usize) -> usize {
    j * (j - 1) / 2 + i
}

fn adjacency(n: usize, mask: usize) -> Vec<u8> {
    let mut adj = vec![0u8; n];
    for j in 1..n {
        for i in 0..j {
            if mask & (1 << edge_bit(i, j)) != 0 {
                adj[i] |= 1 << j;
                adj[j] |= 1 << i;
            }
        }
    }
    adj
}

fn reachable_from(seed: usize, allowed: u8, adj: &[u8]) -> u8 {
    let mut seen = 1u8 << seed;
    let mut frontier = seen;
    while frontier != 0 {
        let v = frontier.trailing_zeros() as usize;
        frontier &= frontier - 1;
        let fresh = adj[v] & allowed & !seen;
        seen |= fresh;
        frontier |= fresh;
    }
    seen
}

fn renumber(comp: u8, adj: &[u8]) -> (usize, usize) {
    let mut vertices = Vec::new();
    let mut bits = comp;
    while bits != 0 {
        vertices.push(bits.trailing_zeros() as usize);
        bits &= bits - 1;
    }
    let mut mask = 0usize;
    for (j_new, &j) in vertices.iter().enumerate() {
        for (i_new, &i) in vertices.iter().enumerate().take(j_new) {
            if adj[j] & (1 << i) != 0 {
                mask |= 1 << edge_bit(i_new, j_new);
            }
        }
    }
    (vertices.len(), mask)
}

/// Exact `(treedepth, root)` for every connected graph on fewer than
/// [`SMALL_GRAPH_LIMIT`] vertices. Tables are indexed per order by the local
/// edge bitmask directly, so every labeled graph is enumerated and lookups
/// need no canonical relabeling. Disconnected masks hold a zero sentinel and
/// are never queried.
pub struct SmallGraphTable {
    tables: Vec<Vec<(u8, u8)>>,
}

impl SmallGraphTable {
    fn build() -> Self {
        let mut tables: Vec<Vec<(u8, u8)>> = vec![Vec::new()];
        for n in 1..SMALL_GRAPH_LIMIT {
            let bits = n * (n - 1) / 2;
            let mut table = vec![(0u8, 0u8); 1usize << bits];
            for mask in 0..(1usize << bits) {
                let adj = adjacency(n, mask);
                let everyone = (1u8 << n) - 1;
                if reachable_from(0, everyone, &adj) != everyone {
                    continue;
                }
                let mut best_td = u8::MAX;
                let mut best_root = 0u8;
                for v in 0..n {
                    let mut worst = 0u8;
                    let mut remaining = everyone & !(1u8 << v);
                    while remaining != 0 {
                        let seed = remaining.trailing_zeros() as usize;
                        let comp = reachable_from(seed, remaining, &adj);
                        remaining &= !comp;
                        let (cn, cmask) = renumber(comp, &adj);
                        worst = max(worst, tables[cn][cmask].0);
                    }
                    if worst + 1 < best_td {
                        best_td = worst + 1;
                        best_root = v as u8;
                    }
                }
                table[mask] = (best_td, best_root);
            }
            tables.push(table);
        }
        Self { tables }
    }

    /// Table answer for a connected subgraph of order < [`SMALL_GRAPH_LIMIT`];
    /// the returned root is a global index.
    pub fn lookup(&self, h: &SubGraph) -> Option<(usize, usize)> {
        let n = h.order();
        if n == 0 || n >= SMALL_GRAPH_LIMIT {
            return None;
        }
        let mut mask = 0usize;
        for i in 0..n {
            for &j in h.adj(i).iter().filter(|&&j| j > i) {
                mask |= 1 << edge_bit(i, j);
            }
        }
        let (td, root) = self.tables[n][mask];
        if td == 0 {
            return None;
        }
        Some((td as usize, h.vertex(root as usize)))
    }
}

pub fn small_graph_table() -> &'static SmallGraphTable {
    static TABLE: OnceLock<SmallGraphTable> = OnceLock::new();
    TABLE.get_or_init(SmallGraphTable::build)
}

#[cfg(test)]
mod tests {
    use crate::graph::{Graph, SubGraph};
    use crate::small_graphs::{small_graph_table, SMALL_GRAPH_LIMIT};

    fn full(edges: &[(usize, usize)], n: usize) -> SubGraph {
        let mut graph = Graph::with_order(n);
        for &(u, v) in edges {
            graph.add_edge(u, v);
        }
        SubGraph::full(&graph)
    }

    #[test]
    fn known_values() {
        let table = small_graph_table();

        let single = full(&[], 1);
        assert_eq!(table.lookup(&single), Some((1, 0)));

        let p4 = full(&[(0, 1), (1, 2), (2, 3)], 4);
        assert_eq!(table.lookup(&p4).unwrap().0, 3);

        let c4 = full(&[(0, 1), (1, 2), (2, 3), (3, 0)], 4);
        assert_eq!(table.lookup(&c4).unwrap().0, 3);

        let k4 = full(
            &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)],
            4,
        );
        assert_eq!(table.lookup(&k4).unwrap().0, 4);

        let star = full(&[(0, 1), (0, 2), (0, 3)], 4);
        assert_eq!(table.lookup(&star), Some((2, 0)));

        let k23 = full(&[(0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4)], 5);
        assert_eq!(table.lookup(&k23).unwrap().0, 3);
    }

    #[test]
    fn too_large_is_refused() {
        let n = SMALL_GRAPH_LIMIT;
        let edges: Vec<_> = (1..n).map(|v| (v - 1, v)).collect();
        let path = full(&edges, n);
        assert!(small_graph_table().lookup(&path).is_none());
    }

    #[test]
    fn roots_witness_the_depth() {
        // For every connected graph on 4 vertices, removing the stored root
        // must leave components of strictly smaller treedepth.
        let table = small_graph_table();
        for mask in 0usize..64 {
            let mut graph = Graph::with_order(4);
            let mut bit = 0;
            for j in 1..4 {
                for i in 0..j {
                    if mask & (1 << bit) != 0 {
                        graph.add_edge(i, j);
                    }
                    bit += 1;
                }
            }
            if !graph.is_connected() {
                continue;
            }
            let sub = SubGraph::full(&graph);
            let (td, root) = table.lookup(&sub).unwrap();
            if sub.order() == 1 {
                continue;
            }
            let local = sub.local_index_of(root).unwrap();
            for component in sub.without_vertex(local) {
                let (ctd, _) = table.lookup(&component).unwrap();
                assert!(ctd < td);
            }
        }
    }
}
