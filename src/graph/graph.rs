use crate::BitSet;
use fnv::FnvHashSet;

/// The input graph. Vertices are `0..order()`; the structure is fixed for the
/// whole solve, the induced-subgraph cache keys rely on that.
#[derive(Clone, Debug)]
pub struct Graph {
    data: Vec<FnvHashSet<usize>>,
}

impl Graph {
    pub fn with_order(order: usize) -> Self {
        Self {
            data: vec![FnvHashSet::default(); order],
        }
    }

    pub fn order(&self) -> usize {
        self.data.len()
    }

    pub fn size(&self) -> usize {
        self.data.iter().map(|nb| nb.len()).sum::<usize>() / 2
    }

    pub fn degree(&self, u: usize) -> usize {
        self.data[u].len()
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.data[u].contains(&v)
    }

    pub fn add_edge(&mut self, u: usize, v: usize) {
        assert_ne!(u, v);
        self.data[u].insert(v);
        self.data[v].insert(u);
    }

    pub fn neighborhood_set(&self, u: usize) -> &FnvHashSet<usize> {
        &self.data[u]
    }

    /// Neighborhood of `u` in ascending order.
    pub fn sorted_neighborhood(&self, u: usize) -> Vec<usize> {
        let mut nb: Vec<usize> = self.data[u].iter().copied().collect();
        nb.sort_unstable();
        nb
    }

    pub fn is_connected(&self) -> bool {
        if self.data.is_empty() {
            return false;
        }
        let mut visited = BitSet::new(self.order());
        let mut stack = vec![0];
        visited.set_bit(0);
        while let Some(v) = stack.pop() {
            for &u in self.data[v].iter() {
                if !visited.set_bit(u) {
                    stack.push(u);
                }
            }
        }
        visited.full()
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::graph::Graph;

    #[test]
    fn edges_and_degrees() {
        let mut graph = Graph::with_order(3);
        graph.add_edge(0, 1);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);

        assert_eq!(graph.order(), 3);
        assert_eq!(graph.size(), 2);
        assert_eq!(graph.degree(1), 2);
        assert!(graph.has_edge(0, 1));
        assert!(!graph.has_edge(0, 2));
        assert_eq!(graph.sorted_neighborhood(1), vec![0, 2]);
    }

    #[test]
    fn connectivity() {
        let mut graph = Graph::with_order(4);
        graph.add_edge(0, 1);
        graph.add_edge(2, 3);
        assert!(!graph.is_connected());
        graph.add_edge(1, 2);
        assert!(graph.is_connected());
        assert!(!Graph::with_order(0).is_connected());
    }
}
