use crate::graph::SubGraph;
use fxhash::FxHashSet;
use std::collections::VecDeque;

/// A minimal vertex separator of some subgraph, in that subgraph's local
/// indices, together with the size of the largest component it leaves
/// behind (the ordering metric of the search).
#[derive(Clone, Debug)]
pub struct Separator {
    pub vertices: Vec<usize>,
    pub largest_component: (usize, usize),
}

impl Separator {
    /// Builds the separator value for an ascending local vertex set, or
    /// `None` if the set is not a minimal separator of `h`, i.e. if some
    /// component of `h ∖ S` does not see all of S.
    pub fn in_graph(h: &SubGraph, vertices: Vec<usize>) -> Option<Separator> {
        let components = h.components_without(&vertices);
        if components.len() < 2 {
            return None;
        }
        let n = h.order();
        let mut in_separator = vec![false; n];
        for &v in &vertices {
            in_separator[v] = true;
        }
        let mut counted = vec![false; n];
        for component in &components {
            let mut touched = 0;
            for &v in component {
                for &u in h.adj(v) {
                    if in_separator[u] && !counted[u] {
                        counted[u] = true;
                        touched += 1;
                    }
                }
            }
            for &v in component {
                for &u in h.adj(v) {
                    counted[u] = false;
                }
            }
            if touched != vertices.len() {
                return None;
            }
        }

        let mut largest = 0;
        for (i, component) in components.iter().enumerate() {
            if component.len() > components[largest].len() {
                largest = i;
            }
        }
        let component = &components[largest];
        let mut in_component = vec![false; n];
        for &v in component {
            in_component[v] = true;
        }
        let edges: usize = component
            .iter()
            .map(|&v| h.adj(v).iter().filter(|&&u| in_component[u]).count())
            .sum::<usize>()
            / 2;
        Some(Separator {
            vertices,
            largest_component: (component.len(), edges),
        })
    }
}

/// Enumerates every minimal separator of a subgraph, in batches. Seeded with
/// the component neighborhoods of `G − N[v]` for every vertex, the frontier
/// is then closed under the expansion that removes `S ∪ N(x)` for each
/// `x ∈ S` and collects the component neighborhoods again. Separators with a
/// component that does not see all of S still feed the closure but are not
/// handed out.
pub struct SeparatorGenerator<'a> {
    graph: &'a SubGraph,
    queue: VecDeque<Vec<usize>>,
    seen: FxHashSet<Vec<usize>>,
}

impl<'a> SeparatorGenerator<'a> {
    pub fn new(graph: &'a SubGraph) -> Self {
        let mut generator = Self {
            graph,
            queue: VecDeque::new(),
            seen: FxHashSet::default(),
        };
        let n = graph.order();
        let mut removed = Vec::with_capacity(n);
        for v in 0..n {
            removed.clear();
            removed.push(v);
            removed.extend_from_slice(graph.adj(v));
            for component in graph.components_without(&removed) {
                let separator = generator.neighborhood_of(&component);
                generator.offer(separator);
            }
        }
        generator
    }

    fn neighborhood_of(&self, component: &[usize]) -> Vec<usize> {
        let n = self.graph.order();
        let mut in_component = vec![false; n];
        for &v in component {
            in_component[v] = true;
        }
        let mut marked = vec![false; n];
        let mut neighborhood = Vec::new();
        for &v in component {
            for &u in self.graph.adj(v) {
                if !in_component[u] && !marked[u] {
                    marked[u] = true;
                    neighborhood.push(u);
                }
            }
        }
        neighborhood.sort_unstable();
        neighborhood
    }

    fn offer(&mut self, separator: Vec<usize>) {
        if !separator.is_empty() && !self.seen.contains(&separator) {
            self.seen.insert(separator.clone());
            self.queue.push_back(separator);
        }
    }

    pub fn has_next(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Generates up to `batch_cap` fresh separators. The batch may come back
    /// smaller, or even empty while `has_next()` still holds, when the
    /// frontier mostly contains separators that are not handed out.
    pub fn next(&mut self, batch_cap: usize) -> Vec<Separator> {
        let mut batch = Vec::new();
        let mut removed = Vec::new();
        while batch.len() < batch_cap {
            let separator = match self.queue.pop_front() {
                Some(separator) => separator,
                None => break,
            };
            for i in 0..separator.len() {
                removed.clear();
                removed.extend_from_slice(&separator);
                for &u in self.graph.adj(separator[i]) {
                    removed.push(u);
                }
                removed.sort_unstable();
                removed.dedup();
                for component in self.graph.components_without(&removed) {
                    let candidate = self.neighborhood_of(&component);
                    self.offer(candidate);
                }
            }
            if let Some(separator) = Separator::in_graph(self.graph, separator) {
                batch.push(separator);
            }
        }
        batch
    }
}
