use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use songplay_warehouse::config::{AppConfig, CliConfig, FileConfig};
use songplay_warehouse::schema::CREATE_ORDER;
use songplay_warehouse::{
    Dialect, SqliteWarehouseStore, Statement, StatementCatalog, StatementKind, WarehouseStore,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(version, about = "Schema and statement catalog for the songplays warehouse")]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI flags.
    #[clap(long, global = true, value_parser = parse_path)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace). LOG_LEVEL takes precedence.
    #[clap(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints catalog statements.
    Print {
        /// SQL dialect to render.
        #[clap(long, value_enum)]
        dialect: Option<Dialect>,

        /// Which statements to print.
        #[clap(long, value_enum, default_value_t = Section::All)]
        section: Section,

        /// Print as JSON instead of SQL.
        #[clap(long)]
        json: bool,
    },

    /// Creates the warehouse tables, dimensions first.
    Create(DbArgs),

    /// Drops the warehouse tables.
    Drop(DbArgs),

    /// Drops and re-creates every table.
    Reset(DbArgs),

    /// Checks the live schema against the table definitions.
    Validate(DbArgs),

    /// Prints the row count of every table.
    Stats(DbArgs),
}

#[derive(Args, Debug)]
struct DbArgs {
    /// Path to the SQLite warehouse database file.
    #[clap(long, value_parser = parse_path)]
    db: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    Drop,
    Create,
    Insert,
    Select,
    All,
}

impl Section {
    fn includes(&self, kind: StatementKind) -> bool {
        match self {
            Section::All => true,
            Section::Drop => kind == StatementKind::Drop,
            Section::Create => kind == StatementKind::Create,
            Section::Insert => kind == StatementKind::Insert,
            Section::Select => kind == StatementKind::Select,
        }
    }
}

fn print_statements(catalog: &StatementCatalog, section: Section, json: bool) -> Result<()> {
    let statements: Vec<&Statement> = catalog
        .statements()
        .filter(|s| section.includes(s.kind))
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&statements)?);
        return Ok(());
    }
    for statement in statements {
        println!("-- {}", statement.name);
        println!("{}", statement.sql);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let (db_path, dialect) = match &cli_args.command {
        Command::Print { dialect, .. } => (None, *dialect),
        Command::Create(args)
        | Command::Drop(args)
        | Command::Reset(args)
        | Command::Validate(args)
        | Command::Stats(args) => (args.db.clone(), None),
    };
    let cli_config = CliConfig {
        db_path,
        dialect,
        log_level: cli_args.log_level.clone(),
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(config.log_level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    if let Command::Print { section, json, .. } = cli_args.command {
        return print_statements(StatementCatalog::of(config.dialect), section, json);
    }

    let db_path = config.require_db_path()?;
    let store = SqliteWarehouseStore::open(db_path)
        .with_context(|| format!("Failed to open warehouse database {:?}", db_path))?;

    match cli_args.command {
        Command::Print { .. } => {}
        Command::Create(_) => store.create_tables()?,
        Command::Drop(_) => store.drop_tables()?,
        Command::Reset(_) => {
            info!("Resetting warehouse at {:?}", db_path);
            store.reset()?;
        }
        Command::Validate(_) => store.validate()?,
        Command::Stats(_) => {
            for table in CREATE_ORDER {
                println!("{}\t{}", table.name, store.table_row_count(table.name)?);
            }
        }
    }
    Ok(())
}
