//! hosts-manager - entry point.
//!
//! Downloads the selected blocklists, merges them into the managed section of
//! the hosts file, and reports what changed. All decisions about messages and
//! exit status are made here; the library only returns errors.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use hosts_manager::config::{CATALOG, CatalogSource, DEFAULT_HOSTS_PATH, select_by_id};
use hosts_manager::prompt::select_sources;
use hosts_manager::util::is_privileged;
use hosts_manager::{ExclusionTable, Fetcher, HostsError, HostsFile, Result, aggregate};

/// Merge hosts blocklists into a managed section of the hosts file.
#[derive(Parser)]
#[command(name = "hosts-manager", version, about)]
struct Cli {
    /// Hosts file to manage.
    #[arg(long, global = true, default_value = DEFAULT_HOSTS_PATH)]
    hosts_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download blocklists and rewrite the managed section.
    Update {
        /// Catalog id of a source to include (repeatable). Prompts when omitted.
        #[arg(short, long = "source", value_name = "ID")]
        sources: Vec<String>,

        /// Include every catalog source without prompting.
        #[arg(long, conflicts_with = "sources")]
        all: bool,

        /// Print the resulting file instead of writing it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Strip the managed section, keeping everything else.
    Remove {
        /// Print the resulting file instead of writing it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Show whether the hosts file is managed.
    Status,

    /// List the available blocklist sources.
    Sources,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn ensure_privileged() -> Result<()> {
    if is_privileged() {
        Ok(())
    } else {
        Err(HostsError::NotPrivileged)
    }
}

fn choose_sources(ids: &[String], all: bool) -> Result<Vec<&'static CatalogSource>> {
    if all {
        return Ok(CATALOG.iter().collect());
    }
    if !ids.is_empty() {
        return select_by_id(ids);
    }

    println!("Select hosts sources to use.");
    let selected = select_sources(CATALOG, &mut io::stdin().lock(), &mut io::stdout())?;
    if selected.is_empty() {
        return Err(HostsError::NoSourcesSelected);
    }
    Ok(selected)
}

fn update(file: &HostsFile, ids: &[String], all: bool, dry_run: bool) -> Result<()> {
    if !dry_run {
        ensure_privileged()?;
    }

    // Fail on a malformed file before spending time on downloads.
    file.inspect()?;

    let selected = choose_sources(ids, all)?;
    let sources = Fetcher::new()?.fetch_all(&selected)?;

    let result = aggregate(&sources, &ExclusionTable::default());
    if !result.rejected.is_empty() {
        tracing::warn!(lines = result.rejected.len(), "Some entries could not be parsed");
    }

    if dry_run {
        print!("{}", file.plan(&result.hosts)?);
        return Ok(());
    }

    let report = file.apply(&result.hosts)?;
    println!(
        "Added {} hosts entries (previously {}). Backup saved to {}.",
        report.hosts,
        report.previous_hosts,
        report.backup.display()
    );
    Ok(())
}

fn remove(file: &HostsFile, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", file.inspect()?.preamble);
        return Ok(());
    }

    ensure_privileged()?;
    if file.remove()? {
        println!("Removed managed hosts from {}.", file.path().display());
    } else {
        println!("{} has no managed hosts section.", file.path().display());
    }
    Ok(())
}

fn status(file: &HostsFile) -> Result<()> {
    let content = file.inspect()?;
    if content.had_block() {
        println!(
            "{} is managed: {} hosts blocked.",
            file.path().display(),
            content.managed_hosts().len()
        );
    } else {
        println!("{} is not managed.", file.path().display());
    }
    Ok(())
}

fn list_sources() {
    for source in CATALOG {
        println!("{:<10} {:<28} {}", source.id, source.name, source.url);
    }
}

fn run(cli: Cli) -> Result<()> {
    let file = HostsFile::with_path(cli.hosts_file);
    match cli.command {
        Command::Update {
            sources,
            all,
            dry_run,
        } => update(&file, &sources, all, dry_run),
        Command::Remove { dry_run } => remove(&file, dry_run),
        Command::Status => status(&file),
        Command::Sources => {
            list_sources();
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "hosts-manager failed");
            if e.is_permission_denied() {
                eprintln!("Permission denied. Try running with sudo.");
            }
            ExitCode::FAILURE
        }
    }
}
