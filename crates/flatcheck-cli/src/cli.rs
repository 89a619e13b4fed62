// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Argument parsing and command dispatch.

use crate::report::{self, Format};
use crate::{logging, suite};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use flatcheck_config::{ConfigService, FsConfigStore, RunnerConfig, RUNNER_CONFIG_KEY};
use flatcheck_core::StateSource;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

/// Top-level arguments.
#[derive(Parser)]
#[command(name = "flatcheck")]
#[command(about = "Verify expectations against flattened resource state")]
pub struct Cli {
    /// Directory holding saved settings (defaults to the platform config dir)
    #[arg(long, global = true, env = "FLATCHECK_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Runner commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run a checks file against a state document
    Run {
        /// State document (falls back to the saved `default_state`)
        #[arg(long)]
        state: Option<PathBuf>,
        /// Checks file: a JSON array of checks or `{ "checks": [...] }`
        #[arg(long)]
        checks: PathBuf,
        /// Stop at the first failing check
        #[arg(long)]
        fail_fast: bool,
        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Print the flattened attributes of one resource's primary instance
    Inspect {
        /// State document (falls back to the saved `default_state`)
        #[arg(long)]
        state: Option<PathBuf>,
        /// Resource name, e.g. `xenorchestra_vm.vm`
        name: String,
        /// Only show keys starting with this prefix
        #[arg(long, default_value = "")]
        prefix: String,
    },
    /// Show or change saved settings
    Config {
        /// What to do with the settings.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `flatcheck config` actions.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective settings as JSON
    Show,
    /// Set one field (`log_level`, `fail_fast`, `default_state`)
    Set {
        /// Field name
        field: String,
        /// New value; an empty `default_state` clears it
        value: String,
    },
}

/// Parse arguments, apply saved settings and run the chosen command.
pub fn entrypoint() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG needs no settings, so store access below is already traced
    let env_logging = logging::init_from_env();
    let store = match &cli.config_dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new().context("failed to resolve config directory")?,
    };
    let service = ConfigService::new(store);
    let mut cfg = service.runner().context("failed to load runner config")?;
    if !env_logging {
        logging::init(&cfg.log_level);
    }
    debug!(
        path = %service.store().path_for(RUNNER_CONFIG_KEY).display(),
        log_level = %cfg.log_level,
        "runner config loaded"
    );

    match cli.command {
        Commands::Run {
            state,
            checks,
            fail_fast,
            format,
        } => {
            let state_path = resolve_state(state, &cfg)?;
            let module = flatcheck_snapshot::load_state(&state_path)
                .with_context(|| format!("failed to load state {}", state_path.display()))?;
            let suite = suite::load_suite(&checks)?;
            info!(checks = suite.checks.len(), state = %state_path.display(), "running suite");
            let report = suite.run(&module, fail_fast || cfg.fail_fast);
            println!("{}", report::render(&report, format)?);
            Ok(if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Inspect {
            state,
            name,
            prefix,
        } => {
            let state_path = resolve_state(state, &cfg)?;
            let module = flatcheck_snapshot::load_state(&state_path)
                .with_context(|| format!("failed to load state {}", state_path.display()))?;
            let instance = module.instance(&name)?;
            println!("{}", report::render_instance(instance, &prefix));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => println!("{}", serde_json::to_string_pretty(&cfg)?),
                ConfigAction::Set { field, value } => {
                    cfg.set(&field, &value)?;
                    service.save_runner(&cfg)?;
                    info!(%field, "config saved");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn resolve_state(flag: Option<PathBuf>, cfg: &RunnerConfig) -> Result<PathBuf> {
    flag.or_else(|| cfg.default_state.clone()).ok_or_else(|| {
        anyhow!("no state document: pass --state or run `flatcheck config set default_state <path>`")
    })
}
