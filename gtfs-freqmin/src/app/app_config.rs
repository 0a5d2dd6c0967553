use std::path::Path;

use config::{Config, Environment, FileFormat};
use serde::{Deserialize, Serialize};

use super::AppError;
use crate::minimize::{CoverModePolicy, FrequencyMinimizer, DEFAULT_ID_SEPARATOR};

/// environment variables starting with `FREQMIN_` override configuration
/// file values, for example `FREQMIN_COVER_MODE=disjoint`.
pub const ENV_PREFIX: &str = "FREQMIN";

/// settings of the `minimize` operation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MinimizeConfiguration {
    #[serde(default)]
    pub cover_mode: CoverModePolicy,
    /// joins the seed trip id and the numeric suffix of trips created for
    /// additional packs
    #[serde(default = "default_id_separator")]
    pub id_separator: String,
    /// fill in shape_dist_traveled of every shape point after minimizing
    #[serde(default)]
    pub remeasure_shapes: bool,
}

fn default_id_separator() -> String {
    String::from(DEFAULT_ID_SEPARATOR)
}

impl Default for MinimizeConfiguration {
    fn default() -> Self {
        Self {
            cover_mode: CoverModePolicy::default(),
            id_separator: default_id_separator(),
            remeasure_shapes: false,
        }
    }
}

impl MinimizeConfiguration {
    /// reads the optional TOML or JSON configuration file, then applies
    /// `FREQMIN_*` environment overrides.
    pub fn try_new(configuration_file: Option<&str>) -> Result<Self, AppError> {
        Self::try_from_sources(configuration_file, Environment::with_prefix(ENV_PREFIX))
    }

    fn try_from_sources(
        configuration_file: Option<&str>,
        environment: Environment,
    ) -> Result<Self, AppError> {
        let mut builder = Config::builder();
        if let Some(filepath) = configuration_file {
            let format = match Path::new(filepath).extension().and_then(|e| e.to_str()) {
                Some("json") => FileFormat::Json,
                _ => FileFormat::Toml,
            };
            builder = builder.add_source(config::File::new(filepath, format));
        }
        let source_name = configuration_file.unwrap_or("environment");
        let config = builder
            .add_source(environment)
            .build()
            .map_err(|e| AppError::ConfigReadError {
                msg: format!("failed reading '{source_name}'"),
                source: e,
            })?;
        config
            .try_deserialize::<MinimizeConfiguration>()
            .map_err(|e| AppError::ConfigReadError {
                msg: format!("failed deserializing minimize configuration from '{source_name}'"),
                source: e,
            })
    }

    /// command line arguments take precedence over file and environment values.
    pub fn with_overrides(
        mut self,
        cover_mode: Option<CoverModePolicy>,
        id_separator: Option<&str>,
        remeasure_shapes: bool,
    ) -> Self {
        if let Some(mode) = cover_mode {
            self.cover_mode = mode;
        }
        if let Some(separator) = id_separator {
            self.id_separator = separator.to_string();
        }
        self.remeasure_shapes |= remeasure_shapes;
        self
    }

    pub fn build_minimizer(&self) -> FrequencyMinimizer {
        FrequencyMinimizer::new(self.cover_mode, &self.id_separator)
    }
}
