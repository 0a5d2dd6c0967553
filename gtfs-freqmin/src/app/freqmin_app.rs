use super::{AppError, FreqminOperation};
use clap::Parser;

/// command line tool for minimizing the trips of GTFS feeds
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct FreqminApp {
    #[command(subcommand)]
    pub op: FreqminOperation,
    /// worker threads for the parallel passes, defaults to one per logical core
    #[arg(long)]
    pub parallelism: Option<usize>,
}

impl FreqminApp {
    pub fn run(&self) -> Result<(), AppError> {
        if let Some(n) = self.parallelism {
            rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build_global()?;
        }
        log::debug!("running with {} threads", rayon::current_num_threads());
        self.op.run()
    }
}
