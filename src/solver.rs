use crate::elimination_tree::EliminationTree;
use crate::graph::{Graph, SubGraph};
use crate::separator::{Separator, SeparatorGenerator};
use crate::set_trie::SetTrie;
use crate::shortcuts;
use crate::signals;
use crate::timeout::Deadline;
use fnv::FnvHashSet;
use log::{debug, info};
use std::cmp::{max, min, Reverse};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveError {
    Timeout,
    Interrupted,
    NotConnected,
    EmptyGraph,
}

impl Display for SolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolveError::Timeout => write!(f, "Wall clock limit exceeded"),
            SolveError::Interrupted => write!(f, "Interrupted"),
            SolveError::NotConnected => write!(f, "Input graph is not connected"),
            SolveError::EmptyGraph => write!(f, "Input graph is empty"),
        }
    }
}

pub struct SolverBuilder {
    subset_gap: usize,
    timeout: Option<Duration>,
    separator_batch: usize,
}

impl SolverBuilder {
    pub fn new() -> Self {
        Self {
            subset_gap: 1,
            timeout: None,
            separator_batch: 100_000,
        }
    }

    /// How much smaller a cached subset may be to still feed bounds into a
    /// first touch; `usize::MAX` pulls every strict subset.
    pub fn subset_gap(mut self, subset_gap: usize) -> Self {
        self.subset_gap = subset_gap;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn separator_batch(mut self, separator_batch: usize) -> Self {
        assert!(separator_batch > 0);
        self.separator_batch = separator_batch;
        self
    }

    pub fn build(self) -> Solver {
        Solver {
            subset_gap: self.subset_gap,
            timeout: self.timeout,
            separator_batch: self.separator_batch,
        }
    }
}

impl Default for SolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Solver {
    subset_gap: usize,
    timeout: Option<Duration>,
    separator_batch: usize,
}

impl Solver {
    /// Computes the exact treedepth of a connected graph together with an
    /// elimination tree witnessing it.
    pub fn solve(&self, graph: &Graph) -> Result<EliminationTree, SolveError> {
        if graph.order() == 0 {
            return Err(SolveError::EmptyGraph);
        }
        if !graph.is_connected() {
            return Err(SolveError::NotConnected);
        }
        let view = SubGraph::full(graph);
        let mut search = Search {
            cache: SetTrie::new(),
            deadline: Deadline::start(self.timeout),
            subset_gap: self.subset_gap,
            separator_batch: self.separator_batch,
        };
        info!(
            "solving graph with n = {} m = {}",
            graph.order(),
            graph.size()
        );
        let outcome = search.calculate(&view, 1, view.order(), false)?;
        debug_assert_eq!(outcome.lower, outcome.upper);
        let td = outcome.upper;
        debug!(
            "bounds settled at {} with {} cached subgraphs",
            td,
            search.cache.len()
        );

        let mut parents = vec![0usize; graph.order()];
        search.reconstruct(&view, 0, &mut parents)?;
        info!(
            "treedepth {} found in {:.1}s",
            td,
            search.deadline.elapsed().as_secs_f64()
        );
        Ok(EliminationTree::new(td, parents))
    }
}

struct Outcome {
    lower: usize,
    upper: usize,
    root: usize,
    best_separators: Vec<Vec<usize>>,
}

impl Outcome {
    fn bounds(lower: usize, upper: usize, root: usize) -> Self {
        Self {
            lower,
            upper,
            root,
            best_separators: Vec::new(),
        }
    }
}

struct Bounds {
    lower: usize,
    upper: usize,
    root: usize,
    new_lower: usize,
}

fn window_closed(search_lbnd: usize, search_ubnd: usize, lower: usize, upper: usize) -> bool {
    search_ubnd <= lower || search_lbnd >= upper || lower == upper || search_lbnd > search_ubnd
}

struct Search {
    cache: SetTrie,
    deadline: Deadline,
    subset_gap: usize,
    separator_batch: usize,
}

impl Search {
    fn check_time(&self) -> Result<(), SolveError> {
        if self.deadline.expired() {
            return Err(SolveError::Timeout);
        }
        if signals::interrupted() {
            return Err(SolveError::Interrupted);
        }
        Ok(())
    }

    /// The recursive two-sided bounded search. Returns proven bounds on the
    /// treedepth of `h` plus a root witnessing the upper bound; the search
    /// stops early once `upper ≤ search_lbnd` (a sibling dominates) or
    /// `lower ≥ search_ubnd` (nothing here can beat the ancestors' best).
    /// When `collect` is set, separators matching the final upper bound are
    /// reported back as hints for the caller.
    fn calculate(
        &mut self,
        h: &SubGraph,
        search_lbnd: usize,
        search_ubnd: usize,
        collect: bool,
    ) -> Result<Outcome, SolveError> {
        let n = h.order();
        assert!(n >= 1);
        let mut lower = shortcuts::trivial_lower_bound(h);
        let mut upper = n;
        let mut root = h.vertex(0);

        if window_closed(search_lbnd, search_ubnd, lower, upper) {
            return Ok(Outcome::bounds(lower, upper, root));
        }

        if let Some((td, exact_root)) = shortcuts::treedepth_exact(h) {
            return Ok(Outcome::bounds(td, td, exact_root));
        }

        let cached = self.cache.search(h.vertices());
        if let Some(id) = cached {
            let entry = *self.cache.entry(id);
            lower = max(lower, entry.lower);
            if entry.upper < upper {
                upper = entry.upper;
                root = entry.root;
            }
            if window_closed(search_lbnd, search_ubnd, lower, upper) {
                return Ok(Outcome::bounds(lower, upper, root));
            }
        }

        // Peel to the next core for component-wise lower bounds; the peeled
        // vertices also witness an upper bound through any one component.
        let mut inherited: Vec<Vec<usize>> = Vec::new();
        let v_min = h.min_degree_vertex();
        let cores = h.k_core(h.min_degree() + 1);
        let core_nonempty = !cores.is_empty();
        let components = if core_nonempty {
            cores
        } else {
            h.without_vertex(v_min)
        };
        for component in &components {
            let outcome = self.calculate(
                component,
                max(lower, search_lbnd),
                min(upper, search_ubnd),
                true,
            )?;
            lower = max(lower, outcome.lower);
            if core_nonempty {
                let candidate = outcome.upper + (n - component.order());
                if candidate < upper {
                    upper = candidate;
                    root = h.vertex(v_min);
                }
            }
            inherited.extend(outcome.best_separators);
            if window_closed(search_lbnd, search_ubnd, lower, upper) {
                return Ok(Outcome::bounds(lower, upper, root));
            }
        }

        let entry_id = match cached {
            Some(id) => id,
            None => {
                let (dfs_upper, dfs_root) = shortcuts::dfs_elimination_upper(h);
                if dfs_upper < upper {
                    upper = dfs_upper;
                    root = h.vertex(dfs_root);
                }
                for hit in self.cache.big_subsets(h.vertices(), self.subset_gap) {
                    let entry = *self.cache.entry(hit.entry);
                    lower = max(lower, entry.lower);
                    let candidate = hit.gap + entry.upper;
                    if candidate < upper {
                        upper = candidate;
                        root = hit.first_missing;
                    }
                }
                let tree = h.dfs_tree(h.max_degree_vertex());
                lower = max(lower, shortcuts::treedepth_tree(&tree).0);
                let (id, _) = self.cache.insert(h.vertices());
                self.cache.entry_mut(id).tighten(lower, upper, root);
                id
            }
        };
        if window_closed(search_lbnd, search_ubnd, lower, upper) {
            return Ok(Outcome::bounds(lower, upper, root));
        }

        let mut bounds = Bounds {
            lower,
            upper,
            root,
            new_lower: n,
        };
        let mut best_separators: Vec<Vec<usize>> = Vec::new();
        let mut processed: FnvHashSet<Vec<usize>> = FnvHashSet::default();

        for hint in inherited {
            let local = match h.localize(&hint) {
                Some(local) => local,
                None => continue,
            };
            if !processed.insert(local.clone()) {
                continue;
            }
            let separator = match Separator::in_graph(h, local) {
                Some(separator) => separator,
                None => continue,
            };
            self.check_time()?;
            self.separator_iteration(
                h,
                &separator,
                entry_id,
                search_lbnd,
                search_ubnd,
                &mut bounds,
                collect,
                &mut best_separators,
            )?;
            if window_closed(search_lbnd, search_ubnd, bounds.lower, bounds.upper) {
                return Ok(Outcome {
                    lower: bounds.lower,
                    upper: bounds.upper,
                    root: bounds.root,
                    best_separators,
                });
            }
        }

        let mut generator = SeparatorGenerator::new(h);
        while generator.has_next() {
            self.check_time()?;
            let mut batch = generator.next(self.separator_batch);
            batch.sort_by_key(|separator| separator.largest_component);
            for separator in batch {
                if !processed.insert(separator.vertices.clone()) {
                    continue;
                }
                self.check_time()?;
                self.separator_iteration(
                    h,
                    &separator,
                    entry_id,
                    search_lbnd,
                    search_ubnd,
                    &mut bounds,
                    collect,
                    &mut best_separators,
                )?;
                if window_closed(search_lbnd, search_ubnd, bounds.lower, bounds.upper) {
                    return Ok(Outcome {
                        lower: bounds.lower,
                        upper: bounds.upper,
                        root: bounds.root,
                        best_separators,
                    });
                }
            }
        }

        bounds.lower = max(bounds.lower, bounds.new_lower);
        self.cache
            .entry_mut(entry_id)
            .tighten(bounds.lower, bounds.upper, bounds.root);
        Ok(Outcome {
            lower: bounds.lower,
            upper: bounds.upper,
            root: bounds.root,
            best_separators,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn separator_iteration(
        &mut self,
        h: &SubGraph,
        separator: &Separator,
        entry_id: usize,
        search_lbnd: usize,
        search_ubnd: usize,
        bounds: &mut Bounds,
        collect: bool,
        best_separators: &mut Vec<Vec<usize>>,
    ) -> Result<(), SolveError> {
        let s = separator.vertices.len();
        let (cn, cm) = separator.largest_component;
        let lower_trivial = cm / cn + 1;
        if lower_trivial + s >= bounds.new_lower {
            return Ok(());
        }

        let ubnd = max(1, min(search_ubnd, bounds.upper).saturating_sub(s));
        let mut lbnd = max(1, max(search_lbnd, bounds.lower).saturating_sub(s));

        let mut components = h.without_vertices(&separator.vertices);
        components.sort_by_key(|component| Reverse(component.size() / component.order()));

        let mut upper_sep = 0;
        let mut lower_sep = 0;
        let mut early_break = false;
        for (i, component) in components.iter().enumerate() {
            let outcome = self.calculate(component, lbnd, ubnd, false)?;
            upper_sep = max(upper_sep, outcome.upper);
            lower_sep = max(lower_sep, outcome.lower);
            lbnd = max(lbnd, outcome.lower);
            if upper_sep + s >= bounds.upper && lower_sep + s >= bounds.new_lower {
                early_break = i + 1 < components.len();
                break;
            }
        }

        bounds.new_lower = min(bounds.new_lower, lower_sep + s);
        if lower_sep > bounds.lower {
            bounds.lower = lower_sep;
            self.cache
                .entry_mut(entry_id)
                .tighten(bounds.lower, bounds.upper, bounds.root);
        }
        if !early_break {
            if upper_sep + s < bounds.upper {
                bounds.upper = upper_sep + s;
                bounds.root = h.vertex(separator.vertices[0]);
                self.cache
                    .entry_mut(entry_id)
                    .tighten(bounds.lower, bounds.upper, bounds.root);
                self.write_spine(h, separator, bounds.upper, bounds.lower);
            }
            if collect && upper_sep + s == bounds.upper {
                best_separators.push(
                    separator
                        .vertices
                        .iter()
                        .map(|&v| h.vertex(v))
                        .collect(),
                );
            }
        }
        Ok(())
    }

    /// A separator proving `upper` for `h` proves `upper - i` for `h` minus
    /// every proper prefix of it; those graphs stay connected because each
    /// component of `h ∖ S` sees all of S. Writing them down lets the
    /// reconstruction walk the spine and feeds later subset lookups.
    fn write_spine(&mut self, h: &SubGraph, separator: &Separator, upper: usize, lower: usize) {
        let s = separator.vertices.len();
        let mut key: Vec<usize> = h.vertices().to_vec();
        for i in 1..s {
            let removed = h.vertex(separator.vertices[i - 1]);
            let position = key.binary_search(&removed).unwrap();
            key.remove(position);
            let (id, _) = self.cache.insert(&key);
            let entry = self.cache.entry_mut(id);
            let implied_upper = upper - i;
            if implied_upper < entry.upper {
                entry.upper = implied_upper;
                entry.lower = max(entry.lower, max(1, lower.saturating_sub(i)));
                entry.root = h.vertex(separator.vertices[i]);
                assert!(entry.lower <= entry.upper);
            }
        }
    }

    /// Places the pinned root of `h`, then recurses into the components it
    /// leaves behind. `parent` is 1-based, 0 meaning "no parent".
    fn reconstruct(
        &mut self,
        h: &SubGraph,
        parent: usize,
        parents: &mut [usize],
    ) -> Result<(), SolveError> {
        let outcome = self.calculate(h, 1, h.order(), false)?;
        let root = outcome.root;
        parents[root] = parent;
        if h.order() == 1 {
            return Ok(());
        }
        let local = h.local_index_of(root).unwrap();
        for component in h.without_vertex(local) {
            self.reconstruct(&component, root + 1, parents)?;
        }
        Ok(())
    }
}
