use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    #[error("output file {0} already exists, use --overwrite to replace it")]
    FileExists(PathBuf),
    #[error("failure writing {filename}: {source}")]
    IoError {
        filename: String,
        source: std::io::Error,
    },
    #[error("failure writing csv rows to {filename}: {source}")]
    CsvError {
        filename: String,
        source: csv::Error,
    },
    #[error("failure reading input archive {filename}: {source}")]
    ZipError {
        filename: String,
        source: zip::result::ZipError,
    },
}
