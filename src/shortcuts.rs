use crate::graph::SubGraph;
use crate::small_graphs::{small_graph_table, SMALL_GRAPH_LIMIT};
use std::cmp::max;

fn floor_log2(n: usize) -> usize {
    (usize::BITS - 1 - n.leading_zeros()) as usize
}

fn ceil_log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        floor_log2(n - 1) + 1
    }
}

/// Constant or near-constant answers for special graph classes, or `None`.
/// The returned root is a global index. The input is assumed connected.
pub fn treedepth_exact(h: &SubGraph) -> Option<(usize, usize)> {
    let n = h.order();
    if h.is_complete() {
        return Some((n, h.vertex(0)));
    }
    if let Some(center) = h.star_center() {
        return Some((2, h.vertex(center)));
    }
    if h.is_cycle() {
        return Some((1 + ceil_log2(n), h.vertex(0)));
    }
    if h.is_path() {
        return Some((floor_log2(n) + 1, h.vertex(path_middle(h))));
    }
    if n < SMALL_GRAPH_LIMIT {
        if let Some(hit) = small_graph_table().lookup(h) {
            return Some(hit);
        }
    }
    if h.is_tree() {
        return Some(treedepth_tree(h));
    }
    None
}

/// Middle vertex of a path, reached by walking n/2 steps from a leaf.
fn path_middle(h: &SubGraph) -> usize {
    let n = h.order();
    let leaf = (0..n).find(|&v| h.degree(v) == 1).unwrap();
    let mut prev = leaf;
    let mut current = h.adj(leaf)[0];
    for _ in 1..n / 2 {
        let next = if h.adj(current)[0] == prev {
            h.adj(current)[1]
        } else {
            h.adj(current)[0]
        };
        prev = current;
        current = next;
    }
    current
}

/// Exact treedepth of a tree by the optimal ranking algorithm: every vertex
/// combines the critical level sets of its children (bit ℓ-1 stands for
/// level ℓ), takes the smallest level that is neither present nor below a
/// level contributed twice, and keeps the levels above it. The treedepth is
/// the maximum level assigned anywhere; the vertex holding it is unique and
/// serves as the root.
pub fn treedepth_tree(t: &SubGraph) -> (usize, usize) {
    let n = t.order();
    assert!(t.is_tree());
    if n == 1 {
        return (1, t.vertex(0));
    }

    let mut parent = vec![usize::MAX; n];
    let mut preorder = Vec::with_capacity(n);
    let mut visited = vec![false; n];
    let mut stack = vec![0usize];
    visited[0] = true;
    while let Some(v) = stack.pop() {
        preorder.push(v);
        for &u in t.adj(v) {
            if !visited[u] {
                visited[u] = true;
                parent[u] = v;
                stack.push(u);
            }
        }
    }
    assert_eq!(preorder.len(), n);

    let mut levels = vec![0u64; n];
    let mut conflicts = vec![0u64; n];
    let mut ranks = vec![0usize; n];
    for &v in preorder.iter().rev() {
        let union = levels[v];
        let conflict = conflicts[v];
        let start = (64 - conflict.leading_zeros()) as usize;
        let free = (!(union >> start)).trailing_zeros() as usize;
        let bit = start + free;
        assert!(bit < 63);
        let below = (1u64 << (bit + 1)) - 1;
        levels[v] = (union & !below) | (1u64 << bit);
        ranks[v] = bit + 1;
        if parent[v] != usize::MAX {
            let p = parent[v];
            conflicts[p] |= levels[p] & levels[v];
            levels[p] |= levels[v];
        }
    }

    let td = (64 - levels[0].leading_zeros()) as usize;
    let root = (0..n).find(|&v| ranks[v] == td).unwrap();
    (td, t.vertex(root))
}

/// Height of the DFS tree grown from the max-degree vertex; since DFS trees
/// are elimination trees, this is a quick upper bound. Returns the bound and
/// the local root.
pub fn dfs_elimination_upper(h: &SubGraph) -> (usize, usize) {
    let root = h.max_degree_vertex();
    (h.dfs_depth(root), root)
}

/// Universal starting bounds for any connected graph.
pub fn trivial_lower_bound(h: &SubGraph) -> usize {
    max(
        max(h.size() / h.order() + 1, h.min_degree() + 1),
        1,
    )
}

#[cfg(test)]
mod tests {
    use crate::graph::{Graph, SubGraph};
    use crate::shortcuts::{dfs_elimination_upper, treedepth_exact, treedepth_tree};

    fn full(edges: &[(usize, usize)], n: usize) -> SubGraph {
        let mut graph = Graph::with_order(n);
        for &(u, v) in edges {
            graph.add_edge(u, v);
        }
        SubGraph::full(&graph)
    }

    fn path_edges(n: usize) -> Vec<(usize, usize)> {
        (1..n).map(|v| (v - 1, v)).collect()
    }

    #[test]
    fn cliques() {
        for n in 1..=8 {
            let mut edges = Vec::new();
            for u in 0..n {
                for v in u + 1..n {
                    edges.push((u, v));
                }
            }
            assert_eq!(treedepth_exact(&full(&edges, n)), Some((n, 0)));
        }
    }

    #[test]
    fn stars() {
        let star = full(&[(2, 0), (2, 1), (2, 3), (2, 4)], 5);
        assert_eq!(treedepth_exact(&star), Some((2, 2)));
    }

    #[test]
    fn cycles() {
        let expected = [3usize, 3, 4, 4, 4, 4, 5];
        for (i, &td) in expected.iter().enumerate() {
            let n = i + 3;
            let mut edges = path_edges(n);
            edges.push((n - 1, 0));
            assert_eq!(treedepth_exact(&full(&edges, n)).unwrap().0, td);
        }
    }

    #[test]
    fn paths() {
        let expected = [1usize, 2, 2, 3, 3, 3, 3, 4];
        for (i, &td) in expected.iter().enumerate() {
            let n = i + 1;
            let (got, root) = treedepth_exact(&full(&path_edges(n), n)).unwrap();
            assert_eq!(got, td);
            if n >= 3 {
                assert_eq!(root, n / 2);
            }
        }
    }

    #[test]
    fn tree_algorithm() {
        let p8 = full(&path_edges(8), 8);
        assert_eq!(treedepth_tree(&p8).0, 4);

        // Spider with three legs of length two.
        let spider = full(&[(0, 1), (1, 2), (0, 3), (3, 4), (0, 5), (5, 6)], 7);
        assert_eq!(treedepth_tree(&spider), (3, 0));

        // Caterpillar: a five-path with an extra leaf on its middle.
        let caterpillar = full(&[(0, 1), (1, 2), (2, 3), (3, 4), (2, 5)], 6);
        assert_eq!(treedepth_tree(&caterpillar).0, 3);
    }

    #[test]
    fn tree_shortcut_on_large_trees() {
        // Ten vertices, so neither the table nor the path case applies.
        let edges = [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 6),
            (3, 7),
            (7, 8),
            (8, 9),
        ];
        let tree = full(&edges, 10);
        let (td, root) = treedepth_exact(&tree).unwrap();
        assert_eq!(td, treedepth_tree(&tree).0);
        assert!(tree.contains_global(root));
    }

    #[test]
    fn dfs_upper_is_a_bound() {
        let mut edges = path_edges(6);
        edges.push((5, 0));
        let cycle = full(&edges, 6);
        let (upper, root) = dfs_elimination_upper(&cycle);
        assert_eq!(root, 0);
        assert!(upper >= 4 && upper <= 6);
    }
}
