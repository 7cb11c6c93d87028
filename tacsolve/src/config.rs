//! Application configuration management.
//!
//! Settings are merged from default values, an optional configuration file,
//! environment variables and finally the command line.

use crate::{Cli, CliError};
use serde::{Deserialize, Serialize};
use tac_solver::{SolverSettings, Supply};

/// The main application configuration
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Search limits
    #[serde(default)]
    pub solver: SolverSettings,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Command-line flags (highest priority)
    /// 2. Environment variables
    /// 3. Config file given by the CLI
    /// 4. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `TAC_<SECTION>__<KEY>` to `<section>.<key>`:
    ///
    /// ```bash
    /// export TAC_SOLVER__TIME_LIMIT="1s 500ms"
    /// export TAC_SOLVER__TARGET_SCORE=9000
    /// export TAC_SOLVER__SUPPLY=owned
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = &cli.config {
            if !path.exists() {
                return Err(CliError::MissingConfig(path.clone()).into());
            }
            config = config.add_source(config::File::from(path.as_path()));
        }

        // TAC_SOLVER__TIME_LIMIT maps to solver.time_limit
        config = config.add_source(
            config::Environment::with_prefix("TAC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut app: Self = config.build()?.try_deserialize()?;

        if let Some(limit) = &cli.time_limit {
            app.solver.time_limit = Some(**limit);
        }
        if let Some(target) = cli.target_score {
            app.solver.target_score = Some(target);
        }
        if cli.owned_only {
            app.solver.supply = Supply::Owned;
        }
        Ok(app)
    }
}
