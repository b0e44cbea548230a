use crate::elimination_tree::EliminationTree;
use crate::graph::Graph;
use std::convert::TryFrom;
use std::io::{BufRead, ErrorKind, Write};

/// Reader for the PACE `.gr` treedepth format: a header `p tdp N M` followed
/// by M lines of 1-based edges; `c` lines are ignored. Parallel edges are
/// normalised away, self-loops are refused.
pub struct PaceReader<T: BufRead>(pub T);

/// Writer for the PACE `.tree` format: the treedepth on the first line, then
/// one 1-based parent per vertex, 0 marking the root.
pub struct PaceWriter<'a, T: Write> {
    tree: &'a EliminationTree,
    writer: T,
}

impl<'a, T: Write> PaceWriter<'a, T> {
    pub fn new(tree: &'a EliminationTree, writer: T) -> Self {
        Self { tree, writer }
    }

    pub fn output(mut self) -> Result<(), std::io::Error> {
        writeln!(self.writer, "{}", self.tree.depth())?;
        for parent in self.tree.parents() {
            writeln!(self.writer, "{}", parent)?;
        }
        Ok(())
    }
}

impl<T: BufRead> TryFrom<PaceReader<T>> for Graph {
    type Error = std::io::Error;

    fn try_from(reader: PaceReader<T>) -> Result<Self, Self::Error> {
        let reader = reader.0;
        let mut graph: Option<Graph> = None;
        let mut order: Option<usize> = None;
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let elements: Vec<_> = line.split(' ').collect();
            match elements[0] {
                "c" => {
                    // who cares about comments..
                }
                "p" => {
                    order = Some(parse_order(&elements)?);
                    graph = Some(Graph::with_order(order.unwrap()));
                }
                _ => match graph.as_mut() {
                    Some(graph) => {
                        if elements.len() < 2 {
                            return Err(std::io::Error::new(
                                ErrorKind::InvalidInput,
                                "Edge line with less than two endpoints",
                            ));
                        }
                        let u = parse_vertex(elements[0], order.unwrap())?;
                        let v = parse_vertex(elements[1], order.unwrap())?;
                        if u == v {
                            return Err(std::io::Error::new(
                                ErrorKind::InvalidInput,
                                "Self-loops are not allowed",
                            ));
                        }
                        graph.add_edge(u, v);
                    }
                    None => {
                        return Err(std::io::Error::new(
                            ErrorKind::Other,
                            "Edges encountered before graph creation",
                        ));
                    }
                },
            };
        }
        match graph {
            Some(graph) => Ok(graph),
            None => Err(std::io::Error::new(
                ErrorKind::Other,
                "No graph created during parsing",
            )),
        }
    }
}

fn parse_vertex(v: &str, order: usize) -> Result<usize, std::io::Error> {
    match v.parse::<usize>() {
        Ok(u) => {
            if u == 0 || u > order {
                Err(std::io::Error::new(
                    ErrorKind::InvalidInput,
                    "Invalid vertex label",
                ))
            } else {
                Ok(u - 1)
            }
        }
        Err(_) => Err(std::io::Error::new(
            ErrorKind::InvalidInput,
            "Invalid vertex label",
        )),
    }
}

fn parse_order(elements: &[&str]) -> Result<usize, std::io::Error> {
    if elements.len() < 4 {
        return Err(std::io::Error::new(
            ErrorKind::InvalidInput,
            "Invalid line received starting with p",
        ));
    }
    match elements[2].parse::<usize>() {
        Ok(order) => Ok(order),
        Err(_) => Err(std::io::Error::new(
            ErrorKind::InvalidInput,
            "Invalid order of graph",
        )),
    }
}
