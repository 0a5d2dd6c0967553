#[derive(thiserror::Error, Debug)]
pub enum MinimizeError {
    #[error("trip '{0}' expected in the feed was not found")]
    MissingTrip(String),
    #[error("equivalence class of trip '{0}' is empty, cannot rewrite")]
    EmptyClass(String),
}
