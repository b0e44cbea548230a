use crate::graph::Graph;
use std::fmt;
use std::fmt::{Display, Formatter};

pub enum EliminationTreeValidationError {
    WrongLength,
    NoRoot,
    MultipleRoots,
    InvalidParent(usize),
    HasCycle,
    EdgeNotCovered((usize, usize)),
    WrongDepth(usize, usize),
}

impl Display for EliminationTreeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            EliminationTreeValidationError::WrongLength => write!(f, "Wrong parent array length"),
            EliminationTreeValidationError::NoRoot => write!(f, "No root"),
            EliminationTreeValidationError::MultipleRoots => write!(f, "Multiple roots"),
            EliminationTreeValidationError::InvalidParent(v) => {
                write!(f, "Invalid parent of vertex: {}", v + 1)
            }
            EliminationTreeValidationError::HasCycle => write!(f, "Has cycle"),
            EliminationTreeValidationError::EdgeNotCovered((u, v)) => {
                write!(f, "Edge not covered: ({}, {})", u + 1, v + 1)
            }
            EliminationTreeValidationError::WrongDepth(expected, actual) => {
                write!(f, "Wrong depth: claimed {}, tree has {}", expected, actual)
            }
        }
    }
}

/// A rooted elimination tree over the vertices of the input graph, encoded as
/// the claimed depth plus a 1-based parent array in which 0 marks the root.
#[derive(Debug, Clone)]
pub struct EliminationTree {
    depth: usize,
    parents: Vec<usize>,
}

impl EliminationTree {
    pub fn new(depth: usize, parents: Vec<usize>) -> Self {
        Self { depth, parents }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parents(&self) -> &[usize] {
        &self.parents
    }

    /// 0-based parent of `v`, or `None` for the root.
    pub fn parent(&self, v: usize) -> Option<usize> {
        match self.parents[v] {
            0 => None,
            p => Some(p - 1),
        }
    }

    /// Checks that the parent array encodes a rooted tree of the claimed
    /// depth in which every edge of `graph` connects an ancestor-descendant
    /// pair.
    pub fn verify(&self, graph: &Graph) -> Result<(), EliminationTreeValidationError> {
        let n = graph.order();
        if self.parents.len() != n {
            return Err(EliminationTreeValidationError::WrongLength);
        }
        let roots = self.parents.iter().filter(|&&p| p == 0).count();
        if roots == 0 {
            return Err(EliminationTreeValidationError::NoRoot);
        }
        if roots > 1 {
            return Err(EliminationTreeValidationError::MultipleRoots);
        }
        if let Some(v) = (0..n).find(|&v| self.parents[v] > n) {
            return Err(EliminationTreeValidationError::InvalidParent(v));
        }

        let mut level = vec![0usize; n];
        for v in 0..n {
            let mut current = v;
            let mut steps = 0;
            while let Some(p) = self.parent(current) {
                current = p;
                steps += 1;
                if steps > n {
                    return Err(EliminationTreeValidationError::HasCycle);
                }
            }
            level[v] = steps + 1;
        }
        let actual = level.iter().copied().max().unwrap_or(0);
        if actual != self.depth {
            return Err(EliminationTreeValidationError::WrongDepth(
                self.depth,
                actual,
            ));
        }

        for u in 0..n {
            for &v in graph.neighborhood_set(u) {
                if u < v && !self.related(u, v, &level) {
                    return Err(EliminationTreeValidationError::EdgeNotCovered((u, v)));
                }
            }
        }
        Ok(())
    }

    fn related(&self, u: usize, v: usize, level: &[usize]) -> bool {
        let (mut deep, shallow) = if level[u] >= level[v] { (u, v) } else { (v, u) };
        while level[deep] > level[shallow] {
            deep = match self.parent(deep) {
                Some(p) => p,
                None => return false,
            };
        }
        deep == shallow
    }
}
