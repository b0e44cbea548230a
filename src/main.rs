use canopy::graph::Graph;
use canopy::io::{PaceReader, PaceWriter};
use canopy::solver::SolverBuilder;
use log::{error, info};
use std::convert::TryFrom;
use std::env;
use std::io;
use std::io::stdin;
use std::process::exit;
use std::time::Duration;

fn main() -> io::Result<()> {
    canopy::log::build_pace_logger();
    canopy::signals::install_handler();

    let graph: Graph = {
        let buffer = stdin();
        let reader = PaceReader(buffer.lock());
        Graph::try_from(reader)?
    };
    info!(
        "loaded graph with n = {} m = {}",
        graph.order(),
        graph.size()
    );

    let mut builder = SolverBuilder::new();
    if let Some(seconds) = env::args().nth(1) {
        match seconds.parse::<u64>() {
            Ok(seconds) => builder = builder.timeout(Duration::from_secs(seconds)),
            Err(_) => {
                error!("expected a wall clock limit in seconds, got '{}'", seconds);
                exit(2);
            }
        }
    }

    match builder.build().solve(&graph) {
        Ok(tree) => {
            let stdout = io::stdout();
            PaceWriter::new(&tree, stdout.lock()).output()
        }
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    }
}
