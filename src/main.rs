//! genesis3-conformance CLI
//!
//! Usage: genesis3-conformance <COMMAND>
//!
//! Commands:
//!   run       Run scenarios against the generator
//!   list      List modules and scenarios
//!   validate  Load and validate suites without running the generator
//!
//! Exit codes: 0 all scenarios passed, 1 failures or cancellation,
//! 2 usage, config or suite loading errors.

mod commands;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use genesis3_conformance::presentation::{Cli, Commands};

use crate::commands::run::RunArgs;
use crate::ui::context::UiContext;

const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match dispatch(cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(EXIT_ERROR)),
        Err(err) => {
            ui::error::print_error(&err, json);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn dispatch(cli: Cli) -> Result<i32> {
    let ui = UiContext::new(cli.json, cli.verbose, cli.color);

    let loaded = commands::load_config(cli.config.as_deref())?;
    commands::print_config_warnings(&loaded.warnings);
    let config = loaded.config;

    match cli.command {
        Commands::Run {
            suites,
            modules,
            scenario,
            concurrency,
            timeout,
            retain,
            workspace_root,
            generator,
            check_determinism,
            no_transitive,
        } => {
            let args = RunArgs {
                suites,
                modules,
                scenario,
                concurrency,
                timeout,
                retain,
                workspace_root,
                generator,
                check_determinism,
                no_transitive,
            };
            commands::run::cmd_run(&args, config, &ui)
        }
        Commands::List { suites } => commands::list::cmd_list(&suites, &config, &ui),
        Commands::Validate { suites } => commands::validate::cmd_validate(&suites, &config, &ui),
    }
}
