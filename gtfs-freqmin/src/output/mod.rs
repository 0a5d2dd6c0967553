mod feed_rows;
mod feed_writer;
mod output_error;

pub use feed_writer::FeedWriter;
pub use output_error::OutputError;
