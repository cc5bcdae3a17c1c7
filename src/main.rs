// fmgit: File Manager Git Engine
//
// SPDX-FileCopyrightText: 2026 fmgit contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Locate | Status | Ls | New/Rename/Delete | Branch | Merge | Files | Commit
//!   | Clone | Log
//! ```

use std::process::ExitCode;

use fmgit::cli::global::GlobalOptions;
use fmgit::cli::{self, Command};
use fmgit::cmd::browse::{
    run_delete_command, run_ls_command, run_new_command, run_rename_command,
};
use fmgit::cmd::config::{run_configs_command, run_options_command};
use fmgit::cmd::git::{
    run_add_command, run_branch_command, run_clone_command, run_commit_command,
    run_init_command, run_locate_command, run_log_command, run_merge_command, run_mv_command,
    run_restore_command, run_rm_command, run_status_command,
};
use fmgit::config::loader::ConfigLoader;
use fmgit::config::{Config, ENV_PREFIX, LOCAL_CONFIG_FILE};
use fmgit::git::Git;
use fmgit::logging::{LogConfig, init_logging};
use tracing::debug;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&config);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config).await
}

fn build_log_config(config: &Config) -> LogConfig {
    let log_file = &config.global.log_file;
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            (!log_file.as_os_str().is_empty()).then(|| log_file.display().to_string()),
        )
        .with_json_file(config.global.log_json)
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let git = Git::from_config(&config.git);
    debug!(backend = git.query().name(), program = git.runner().program(), "engine ready");
    let json = cli.global.json;

    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => run_options_command(config, json),
        Some(Command::Configs) => {
            run_configs_command(&build_config_loader(&cli.global).format_loaded_files());
            Ok(())
        }
        Some(Command::Locate(args)) => run_locate_command(args, json),
        Some(Command::Status(args)) => run_status_command(args, &git, json).await,
        Some(Command::Ls(args)) => run_ls_command(args, &git, json).await,
        Some(Command::New(args)) => run_new_command(args).await,
        Some(Command::Rename(args)) => run_rename_command(args).await,
        Some(Command::Delete(args)) => run_delete_command(args).await,
        Some(Command::Branch(args)) => run_branch_command(args, &git, json).await,
        Some(Command::Merge(args)) => run_merge_command(args, &git, json).await,
        Some(Command::Add(args)) => run_add_command(args, &git).await,
        Some(Command::Restore(args)) => run_restore_command(args, &git).await,
        Some(Command::Rm(args)) => run_rm_command(args, &git).await,
        Some(Command::Mv(args)) => run_mv_command(args, &git).await,
        Some(Command::Commit(args)) => run_commit_command(args, &git, json).await,
        Some(Command::Clone(args)) => run_clone_command(args, &git, config, json).await,
        Some(Command::Init(args)) => run_init_command(args, &git).await,
        Some(Command::Log(args)) => run_log_command(args, &git, json).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional(LOCAL_CONFIG_FILE);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(global: &GlobalOptions) -> fmgit::error::Result<Config> {
    let mut loader = build_config_loader(global);
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(&key, value)?;
    }
    loader.build()
}
