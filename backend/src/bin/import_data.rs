//! Import a catalogue export (`major_types.json`, `minor_types.json`,
//! `idioms.json`) into PostgreSQL.
//!
//! The bundle is analysed first; dangling category references are listed
//! and the operator confirms before any row is written. Rows are written one
//! at a time and the run stops at the first failure.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use serde::de::DeserializeOwned;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use chengyu_backend::domain::{
    CatalogueImport, CategoryService, IdiomService, ImportAnalysis, ImportBundle,
};
use chengyu_backend::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselIdiomRepository, PoolConfig, run_migrations,
};

const MAJOR_TYPES_FILE: &str = "major_types.json";
const MINOR_TYPES_FILE: &str = "minor_types.json";
const IDIOMS_FILE: &str = "idioms.json";
const DATABASE_URL_VAR: &str = "CHENGYU_DATABASE_URL";

/// `import-data` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "import-data",
    about = "Import idioms and categories from a JSON export",
    version
)]
struct CliArgs {
    /// Directory holding the three export files.
    #[arg(long = "dir", value_name = "path", default_value = "data")]
    dir: PathBuf,
    /// Skip the confirmation prompt.
    #[arg(long = "yes", short = 'y')]
    yes: bool,
    /// Database connection URL. Falls back to `CHENGYU_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main(CliArgs::parse()))
}

async fn async_main(args: CliArgs) -> Result<()> {
    let bundle = load_bundle(&args.dir)?;
    let analysis = ImportAnalysis::of(&bundle);

    let mut stdout = io::stdout().lock();
    write!(stdout, "{analysis}")?;
    if !args.yes && !confirm(&mut io::stdin().lock(), &mut stdout)? {
        writeln!(stdout, "import cancelled")?;
        return Ok(());
    }

    let database_url = resolve_database_url(args.database_url)?;
    run_migrations(&database_url)
        .await
        .wrap_err("apply database migrations")?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .wrap_err("create database pool")?;

    let categories = Arc::new(CategoryService::new(Arc::new(
        DieselCategoryRepository::new(pool.clone()),
    )));
    let idioms = Arc::new(IdiomService::new(Arc::new(DieselIdiomRepository::new(pool))));
    let report = CatalogueImport::new(categories, idioms)
        .run(bundle)
        .await
        .wrap_err("import aborted")?;

    writeln!(stdout, "major types created:  {}", report.major_types)?;
    writeln!(stdout, "major types existing: {}", report.major_types_existing)?;
    writeln!(stdout, "minor types created:  {}", report.minor_types)?;
    writeln!(stdout, "minor types existing: {}", report.minor_types_existing)?;
    writeln!(stdout, "idioms inserted:      {}", report.idioms_inserted)?;
    writeln!(stdout, "idioms updated:       {}", report.idioms_updated)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(dir: &Dir, root: &Path, file: &str) -> Result<T> {
    let text = dir
        .read_to_string(file)
        .wrap_err_with(|| format!("read '{}'", root.join(file).display()))?;
    serde_json::from_str(&text).wrap_err_with(|| format!("parse '{}'", root.join(file).display()))
}

/// Read the three export files from `root`.
fn load_bundle(root: &Path) -> Result<ImportBundle> {
    let dir = Dir::open_ambient_dir(root, ambient_authority())
        .wrap_err_with(|| format!("open import directory '{}'", root.display()))?;
    Ok(ImportBundle {
        major_types: read_json(&dir, root, MAJOR_TYPES_FILE)?,
        minor_types: read_json(&dir, root, MINOR_TYPES_FILE)?,
        idioms: read_json(&dir, root, IDIOMS_FILE)?,
    })
}

/// Ask the operator to continue; only `y` or `yes` proceeds.
fn confirm(input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "Proceed with import? [y/N] ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn resolve_database_url(explicit: Option<String>) -> Result<String> {
    let value = match explicit {
        Some(value) => value,
        None => env::var(DATABASE_URL_VAR)
            .map_err(|_| eyre!("database URL missing: set --database-url or {DATABASE_URL_VAR}"))?,
    };
    if value.trim().is_empty() {
        return Err(eyre!("database URL must not be empty"));
    }
    Ok(value)
}
