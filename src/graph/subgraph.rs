use crate::graph::graph::Graph;
use crate::BitSet;
use std::cmp::max;

/// An induced subgraph of the input graph. Vertices carry two identities: the
/// global index in the input graph and the local index `0..order()`. The
/// global vertex list is strictly ascending, which makes it directly usable
/// as a cache key, and local adjacency lists are ascending as well.
#[derive(Clone, Debug)]
pub struct SubGraph {
    vertices: Vec<usize>,
    mask: BitSet,
    adj: Vec<Vec<usize>>,
    m: usize,
    max_degree: usize,
    min_degree: usize,
}

impl SubGraph {
    /// The whole input graph as a subgraph of itself.
    pub fn full(graph: &Graph) -> Self {
        let n = graph.order();
        assert!(n > 0);
        let vertices: Vec<usize> = (0..n).collect();
        let adj: Vec<Vec<usize>> = (0..n).map(|v| graph.sorted_neighborhood(v)).collect();
        Self::from_parts(vertices, BitSet::from_slice(n, &(0..n).collect::<Vec<_>>()), adj)
    }

    fn from_parts(vertices: Vec<usize>, mask: BitSet, adj: Vec<Vec<usize>>) -> Self {
        let mut m = 0;
        let mut max_degree = 0;
        let mut min_degree = usize::MAX;
        for nb in &adj {
            m += nb.len();
            max_degree = max(max_degree, nb.len());
            min_degree = min_degree.min(nb.len());
        }
        assert!(m % 2 == 0);
        Self {
            vertices,
            mask,
            adj,
            m: m / 2,
            max_degree,
            min_degree,
        }
    }

    pub fn order(&self) -> usize {
        self.vertices.len()
    }

    pub fn size(&self) -> usize {
        self.m
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Global index of the local vertex `v`.
    pub fn vertex(&self, v: usize) -> usize {
        self.vertices[v]
    }

    /// The ascending global vertex list, i.e. the cache key.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn adj(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    pub fn contains_global(&self, v: usize) -> bool {
        v < self.mask.len() && self.mask.at(v)
    }

    pub fn local_index_of(&self, global: usize) -> Option<usize> {
        self.vertices.binary_search(&global).ok()
    }

    /// Maps an ascending list of global indices to local indices, or `None`
    /// if any of them is not part of this subgraph.
    pub fn localize(&self, global: &[usize]) -> Option<Vec<usize>> {
        let mut local = Vec::with_capacity(global.len());
        for &v in global {
            local.push(self.local_index_of(v)?);
        }
        Some(local)
    }

    /// Smallest-degree vertex, ties broken by the smaller (global) index.
    pub fn min_degree_vertex(&self) -> usize {
        (0..self.order())
            .find(|&v| self.adj[v].len() == self.min_degree)
            .unwrap()
    }

    pub fn max_degree_vertex(&self) -> usize {
        (0..self.order())
            .find(|&v| self.adj[v].len() == self.max_degree)
            .unwrap()
    }

    /// The subgraph induced on the given ascending local vertex list.
    pub fn induced(&self, locals: &[usize]) -> SubGraph {
        assert!(!locals.is_empty());
        let mut new_index = vec![usize::MAX; self.order()];
        for (i, &v) in locals.iter().enumerate() {
            new_index[v] = i;
        }
        let vertices: Vec<usize> = locals.iter().map(|&v| self.vertices[v]).collect();
        let mask = BitSet::from_slice(self.mask.len(), &vertices);
        let adj: Vec<Vec<usize>> = locals
            .iter()
            .map(|&v| {
                self.adj[v]
                    .iter()
                    .filter(|&&u| new_index[u] != usize::MAX)
                    .map(|&u| new_index[u])
                    .collect()
            })
            .collect();
        Self::from_parts(vertices, mask, adj)
    }

    /// Connected components among the vertices with `alive[v]`, each as an
    /// ascending local vertex list, ordered by their smallest member.
    pub(crate) fn component_lists(&self, alive: &[bool]) -> Vec<Vec<usize>> {
        let mut components = Vec::new();
        let mut visited = vec![false; self.order()];
        let mut stack = Vec::new();
        for root in 0..self.order() {
            if !alive[root] || visited[root] {
                continue;
            }
            let mut component = Vec::new();
            stack.push(root);
            visited[root] = true;
            while let Some(v) = stack.pop() {
                component.push(v);
                for &u in &self.adj[v] {
                    if alive[u] && !visited[u] {
                        visited[u] = true;
                        stack.push(u);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }

    /// Like [`Self::without_vertices`], but yields the ascending local
    /// vertex lists instead of materializing subgraphs.
    pub(crate) fn components_without(&self, removed: &[usize]) -> Vec<Vec<usize>> {
        let mut alive = vec![true; self.order()];
        for &v in removed {
            alive[v] = false;
        }
        self.component_lists(&alive)
    }

    /// Connected components of this subgraph with `v` removed.
    pub fn without_vertex(&self, v: usize) -> Vec<SubGraph> {
        self.without_vertices(std::slice::from_ref(&v))
    }

    /// Connected components of this subgraph with the given local vertex set
    /// removed, ordered by their smallest global index.
    pub fn without_vertices(&self, removed: &[usize]) -> Vec<SubGraph> {
        let mut alive = vec![true; self.order()];
        for &v in removed {
            alive[v] = false;
        }
        self.component_lists(&alive)
            .into_iter()
            .map(|c| self.induced(&c))
            .collect()
    }

    /// Connected components of the largest induced subgraph in which every
    /// vertex has degree at least `k`. May be empty.
    pub fn k_core(&self, k: usize) -> Vec<SubGraph> {
        let n = self.order();
        let mut degrees: Vec<usize> = (0..n).map(|v| self.adj[v].len()).collect();
        let mut alive = vec![true; n];
        let mut stack = Vec::new();
        for v in 0..n {
            if alive[v] && degrees[v] < k {
                alive[v] = false;
                stack.push(v);
                while let Some(v) = stack.pop() {
                    for &u in &self.adj[v] {
                        if alive[u] {
                            degrees[u] -= 1;
                            if degrees[u] < k {
                                alive[u] = false;
                                stack.push(u);
                            }
                        }
                    }
                }
            }
        }
        self.component_lists(&alive)
            .into_iter()
            .map(|c| self.induced(&c))
            .collect()
    }

    fn dfs_parents(&self, root: usize) -> (Vec<usize>, usize) {
        let n = self.order();
        let mut parent = vec![usize::MAX; n];
        let mut depth = vec![0usize; n];
        let mut visited = vec![false; n];
        let mut height = 1;
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        visited[root] = true;
        depth[root] = 1;
        while let Some(&(v, next)) = stack.last() {
            if next < self.adj[v].len() {
                stack.last_mut().unwrap().1 += 1;
                let u = self.adj[v][next];
                if !visited[u] {
                    visited[u] = true;
                    parent[u] = v;
                    depth[u] = depth[v] + 1;
                    height = max(height, depth[u]);
                    stack.push((u, 0));
                }
            } else {
                stack.pop();
            }
        }
        assert!(visited.iter().all(|&b| b));
        (parent, height)
    }

    /// The spanning tree obtained by depth-first search from `root`, on the
    /// same vertex set and with the same local indices.
    pub fn dfs_tree(&self, root: usize) -> SubGraph {
        let (parent, _) = self.dfs_parents(root);
        let n = self.order();
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
        for v in 0..n {
            if parent[v] != usize::MAX {
                adj[v].push(parent[v]);
                adj[parent[v]].push(v);
            }
        }
        for nb in adj.iter_mut() {
            nb.sort_unstable();
        }
        let tree = Self::from_parts(self.vertices.clone(), self.mask.clone(), adj);
        assert_eq!(tree.size(), n - 1);
        tree
    }

    /// Height (in vertices) of the DFS tree rooted at `root`. Every non-tree
    /// edge of a DFS run connects an ancestor-descendant pair, so the DFS
    /// tree is an elimination tree of this subgraph and its height an upper
    /// bound on the treedepth.
    pub fn dfs_depth(&self, root: usize) -> usize {
        self.dfs_parents(root).1
    }

    pub fn is_complete(&self) -> bool {
        let n = self.order();
        self.m == n * (n - 1) / 2
    }

    /// Center of a star on at least 3 vertices, assuming connectivity.
    pub fn star_center(&self) -> Option<usize> {
        let n = self.order();
        if n >= 3 && self.m == n - 1 && self.max_degree == n - 1 {
            Some(self.max_degree_vertex())
        } else {
            None
        }
    }

    pub fn is_cycle(&self) -> bool {
        self.order() >= 3 && self.m == self.order() && self.min_degree == 2 && self.max_degree == 2
    }

    pub fn is_path(&self) -> bool {
        self.m == self.order() - 1 && self.max_degree <= 2
    }

    pub fn is_tree(&self) -> bool {
        self.m == self.order() - 1
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::graph::Graph;
    use crate::graph::subgraph::SubGraph;

    fn path(n: usize) -> Graph {
        let mut graph = Graph::with_order(n);
        for v in 1..n {
            graph.add_edge(v - 1, v);
        }
        graph
    }

    #[test]
    fn full_view() {
        let graph = path(4);
        let sub = SubGraph::full(&graph);
        assert_eq!(sub.order(), 4);
        assert_eq!(sub.size(), 3);
        assert_eq!(sub.min_degree(), 1);
        assert_eq!(sub.max_degree(), 2);
        assert_eq!(sub.vertices(), &[0, 1, 2, 3]);
        assert_eq!(sub.adj(1), &[0, 2]);
    }

    #[test]
    fn without_vertex_components() {
        let sub = SubGraph::full(&path(5));
        let components = sub.without_vertex(2);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].vertices(), &[0, 1]);
        assert_eq!(components[1].vertices(), &[3, 4]);
        assert_eq!(components[0].size(), 1);
    }

    #[test]
    fn without_vertices_keeps_global_ids() {
        let mut graph = Graph::with_order(6);
        for &(u, v) in &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)] {
            graph.add_edge(u, v);
        }
        let sub = SubGraph::full(&graph);
        let components = sub.without_vertices(&[0, 3]);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].vertices(), &[1, 2]);
        assert_eq!(components[1].vertices(), &[4, 5]);

        let inner = components[1].without_vertex(0);
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0].vertices(), &[5]);
    }

    #[test]
    fn k_core_peels_pendants() {
        // Triangle with a pendant path attached.
        let mut graph = Graph::with_order(5);
        for &(u, v) in &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)] {
            graph.add_edge(u, v);
        }
        let sub = SubGraph::full(&graph);
        let cores = sub.k_core(2);
        assert_eq!(cores.len(), 1);
        assert_eq!(cores[0].vertices(), &[0, 1, 2]);
        assert!(sub.k_core(3).is_empty());
    }

    #[test]
    fn dfs_tree_spans() {
        let mut graph = Graph::with_order(4);
        for &(u, v) in &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)] {
            graph.add_edge(u, v);
        }
        let sub = SubGraph::full(&graph);
        let tree = sub.dfs_tree(0);
        assert_eq!(tree.order(), 4);
        assert_eq!(tree.size(), 3);
        assert!(tree.is_tree());
        assert!(sub.dfs_depth(0) >= 3);
    }

    #[test]
    fn class_predicates() {
        assert!(SubGraph::full(&path(4)).is_path());
        assert!(SubGraph::full(&path(4)).is_tree());
        assert!(!SubGraph::full(&path(4)).is_cycle());

        let mut cycle = path(4);
        cycle.add_edge(3, 0);
        assert!(SubGraph::full(&cycle).is_cycle());

        let mut star = Graph::with_order(4);
        star.add_edge(0, 1);
        star.add_edge(0, 2);
        star.add_edge(0, 3);
        assert_eq!(SubGraph::full(&star).star_center(), Some(0));

        let mut clique = Graph::with_order(3);
        clique.add_edge(0, 1);
        clique.add_edge(0, 2);
        clique.add_edge(1, 2);
        assert!(SubGraph::full(&clique).is_complete());
    }

    #[test]
    fn localize_round_trip() {
        let sub = SubGraph::full(&path(5));
        let component = &sub.without_vertex(1)[1];
        assert_eq!(component.vertices(), &[2, 3, 4]);
        assert_eq!(component.localize(&[2, 4]), Some(vec![0, 2]));
        assert_eq!(component.localize(&[1, 4]), None);
        assert!(component.contains_global(3));
        assert!(!component.contains_global(0));
    }
}
