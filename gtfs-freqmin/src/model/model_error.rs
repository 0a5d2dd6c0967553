#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("Failed to parse gtfs bundle file into `Gtfs` struct: {0}")]
    BundleReadError(#[from] gtfs_structures::Error),
}
