mod app_config;
mod app_error;
mod freqmin_app;
mod operation;

pub use app_config::{MinimizeConfiguration, ENV_PREFIX};
pub use app_error::AppError;
pub use freqmin_app::FreqminApp;
pub use operation::FreqminOperation;
