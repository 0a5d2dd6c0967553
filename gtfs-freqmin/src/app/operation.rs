use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use clap::Subcommand;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{AppError, MinimizeConfiguration};
use crate::minimize::{CoverModePolicy, MinimizeSummary};
use crate::model::Feed;
use crate::output::FeedWriter;
use crate::remeasure;

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum FreqminOperation {
    /// replace time-shifted duplicate trips with frequency-based trips
    Minimize {
        /// a GTFS directory or zip archive
        #[arg(long)]
        input: String,
        /// directory receiving the minimized feed
        #[arg(long)]
        output_directory: String,
        /// optional TOML or JSON file with minimize settings
        #[arg(long)]
        configuration_file: Option<String>,
        #[arg(long, value_enum)]
        cover_mode: Option<CoverModePolicy>,
        #[arg(long)]
        id_separator: Option<String>,
        /// also fill in shape_dist_traveled of every shape point
        #[arg(long, default_value_t = false)]
        remeasure_shapes: bool,
        /// write the minimize summary as JSON to this file
        #[arg(long)]
        summary_file: Option<String>,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// fill in shape_dist_traveled of every shape point
    Remeasure {
        #[arg(long)]
        input: String,
        #[arg(long)]
        output_directory: String,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// print trip, frequency, stop time and shape counts of a feed
    Summary {
        #[arg(long)]
        input: String,
    },
}

impl FreqminOperation {
    pub fn run(&self) -> Result<(), AppError> {
        match self {
            FreqminOperation::Minimize {
                input,
                output_directory,
                configuration_file,
                cover_mode,
                id_separator,
                remeasure_shapes,
                summary_file,
                overwrite,
            } => {
                let conf = MinimizeConfiguration::try_new(configuration_file.as_deref())?
                    .with_overrides(*cover_mode, id_separator.as_deref(), *remeasure_shapes);
                log::info!(
                    "starting minimize at {} with {conf:?}",
                    chrono::Local::now().to_rfc3339()
                );
                let mut feed = Feed::try_from_path(input)?;
                let summary = conf.build_minimizer().run(&mut feed)?;
                if conf.remeasure_shapes {
                    remeasure::remeasure_feed(&mut feed);
                }
                FeedWriter::new(Path::new(output_directory), *overwrite)
                    .write(&feed, Path::new(input))?;
                if let Some(filename) = summary_file {
                    write_summary(&summary, filename, *overwrite)?;
                }
                log::info!("finished minimize at {}", chrono::Local::now().to_rfc3339());
                Ok(())
            }
            FreqminOperation::Remeasure {
                input,
                output_directory,
                overwrite,
            } => {
                let mut feed = Feed::try_from_path(input)?;
                let n_shapes = remeasure::remeasure_feed(&mut feed);
                FeedWriter::new(Path::new(output_directory), *overwrite)
                    .write(&feed, Path::new(input))?;
                log::info!("remeasured {n_shapes} shapes");
                Ok(())
            }
            FreqminOperation::Summary { input } => {
                let feed = Feed::try_from_path(input)?;
                println!("{}", feed_counts(input, &feed)?);
                Ok(())
            }
        }
    }
}

/// trip, frequency, stop time and shape counts as pretty-printed JSON
fn feed_counts(input: &str, feed: &Feed) -> Result<String, AppError> {
    let counts = json!({
        "input": input,
        "trips": feed.trip_count(),
        "frequencies": feed.frequency_count(),
        "stop_times": feed.stop_time_count(),
        "shapes": feed.shapes.len(),
    });
    Ok(serde_json::to_string_pretty(&counts)?)
}

fn write_summary(summary: &MinimizeSummary, filename: &str, overwrite: bool) -> Result<(), AppError> {
    let summary_error = |msg: String| AppError::SummaryWriteError {
        filename: filename.to_string(),
        msg,
    };
    let path = Path::new(filename);
    if path.exists() && !overwrite {
        return Err(summary_error(String::from(
            "file exists, use --overwrite to replace it",
        )));
    }
    let file = File::create(path).map_err(|e| summary_error(e.to_string()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .map_err(|e| summary_error(e.to_string()))
}
