use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sdk_release::cli::{self, BumpWorkflowArgs};
use sdk_release::config::{self, Config};
use sdk_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "sdk-release",
    version,
    about = "Bump the aggregate SDK version and merge per-package docs and READMEs"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Show debug logs")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bump the SDK version from its dependencies and prepend release notes
    Bump {
        #[arg(help = "Release this version instead of computing one")]
        version: Option<String>,
    },
    /// Copy per-package docs into the SDK tree and generate standalone function modules
    Docs,
    /// Merge per-package README sections into the SDK README
    Readme,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let root = std::env::current_dir().context("cannot determine working directory")?;

    let result = match args.command {
        Command::Bump { version } => bump(&root, &config, version),
        Command::Docs => docs(&root, &config),
        Command::Readme => readme(&root, &config),
    };

    if let Err(e) = result {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn bump(root: &Path, config: &Config, manual_version: Option<String>) -> Result<()> {
    if let Some(version) = &manual_version {
        ui::display_status(&format!("Manually setting SDK version to {}", version));
    }

    let args = BumpWorkflowArgs {
        manual_version,
        timestamp: chrono::Local::now().naive_local(),
    };
    let outcome = cli::run_bump_workflow(root, config, &args)?;

    ui::display_bump_decision(&outcome.previous_version, &outcome.decision);
    ui::display_boundary_warnings(&outcome.warnings);

    let Some(new_version) = outcome.decision.new_version() else {
        return Ok(());
    };

    ui::display_dependency_changes(&outcome.changes);
    ui::display_success(&format!(
        "Updated {} to version {}",
        config.release.manifest.display(),
        new_version
    ));
    ui::display_success(&format!(
        "Updated {} with version {}",
        config.release.changelog.display(),
        new_version
    ));
    if outcome.lockfile_synced {
        ui::display_success("Lockfile synced");
    }

    Ok(())
}

fn docs(root: &Path, config: &Config) -> Result<()> {
    ui::display_status("Rebuilding aggregated documentation...");
    let report = cli::run_docs_workflow(root, config)?;

    for path in &report.written {
        ui::display_written_file(path.strip_prefix(root).unwrap_or(path));
    }
    ui::display_boundary_warnings(&report.warnings);

    ui::display_success(&format!(
        "Copied {} files and generated {} standalone function modules",
        report.written.len(),
        report.func_modules.len()
    ));
    Ok(())
}

fn readme(root: &Path, config: &Config) -> Result<()> {
    let outcome = cli::run_readme_workflow(root, config)?;

    for section in outcome.sections.iter().filter(|s| s.applied) {
        ui::display_section_merged(&section.name, section.contributors);
    }
    ui::display_boundary_warnings(&outcome.warnings);

    if outcome.updated {
        ui::display_success(&format!(
            "{} updated successfully",
            config.readme.target.display()
        ));
    } else {
        ui::display_status(&format!(
            "{} left unchanged",
            config.readme.target.display()
        ));
    }
    Ok(())
}
