//! minimizes the trips of a GTFS feed by folding time-shifted duplicates into
//! frequency-based trips, and writes the result to a new feed directory.
use clap::Parser;
use gtfs_freqmin::app::FreqminApp;

fn main() {
    env_logger::init();
    let args = FreqminApp::parse();
    if let Err(e) = args.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
