//! sql-dialects CLI - generate dialect-specific SQL from YAML schemas.

use clap::{Parser, Subcommand};
use serde::Serialize;
use sql_dialects::core::Capabilities;
use sql_dialects::{
    compare_schemas, Config, OutputFormat, Platform, PlatformCatalog, PlatformError, PlatformImpl,
    Schema,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sql-dialects")]
#[command(about = "Generate MySQL, PostgreSQL, Oracle and SQLite DDL from YAML schemas")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target platform (overrides the config file)
    #[arg(long)]
    platform: Option<String>,

    /// Output statements as a JSON array
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print CREATE statements for a schema file
    Create {
        /// Path to the YAML schema
        schema: PathBuf,
    },

    /// Print DROP statements for a schema file
    Drop {
        /// Path to the YAML schema
        schema: PathBuf,
    },

    /// Print the statements migrating one schema file to another
    Diff {
        /// Current schema
        from: PathBuf,

        /// Desired schema
        to: PathBuf,
    },

    /// Print the catalog queries used to introspect a database
    Introspect {
        /// Table to describe; lists databases, tables and views when omitted
        #[arg(long)]
        table: Option<String>,

        /// Database (or owner/schema) to query
        #[arg(long)]
        database: Option<String>,
    },

    /// List built-in platforms and their capabilities
    Platforms,
}

#[derive(Serialize)]
struct PlatformSummary<'a> {
    name: &'a str,
    platform: String,
    capabilities: Capabilities,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), PlatformError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(PlatformError::Config)?;

    if let Commands::Platforms = cli.command {
        return print_platforms(cli.output_json);
    }

    let config = load_config(cli.config.as_deref(), cli.platform.as_deref())?;
    let platform = PlatformImpl::from_config(&config.platform)?;

    let statements = match &cli.command {
        Commands::Platforms => unreachable!(), // Handled above
        Commands::Create { schema } => {
            let schema = load_schema(schema, &config)?;
            create_statements(&*platform, &schema)?
        }
        Commands::Drop { schema } => {
            let schema = load_schema(schema, &config)?;
            drop_statements(&*platform, &schema)?
        }
        Commands::Diff { from, to } => {
            let from = load_schema(from, &config)?;
            let to = load_schema(to, &config)?;
            compare_schemas(&from, &to, &*platform)?
        }
        Commands::Introspect { table, database } => {
            introspect_statements(&*platform, table.as_deref(), database.as_deref())?
        }
    };

    info!(
        platform = platform.name(),
        statements = statements.len(),
        "Generated SQL"
    );

    if cli.output_json || config.output.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&statements)?);
    } else {
        print!("{}", config.render_statements(&statements));
    }

    Ok(())
}

/// Config file if given, with `--platform` taking precedence over its type.
fn load_config(path: Option<&Path>, platform: Option<&str>) -> Result<Config, PlatformError> {
    let mut config = match (path, platform) {
        (Some(path), _) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        (None, Some(platform)) => Config::for_platform(platform),
        (None, None) => {
            return Err(PlatformError::Config(
                "No platform selected: pass --platform or --config".to_string(),
            ))
        }
    };

    if let Some(platform) = platform {
        if !config.platform.r#type.eq_ignore_ascii_case(platform) {
            config.platform.r#type = platform.to_string();
            config.platform.version = None;
        }
        config.validate()?;
    }

    Ok(config)
}

fn load_schema(path: &Path, config: &Config) -> Result<Schema, PlatformError> {
    let mut schema = Schema::load(path)?;
    for table in &mut schema.tables {
        config.defaults.apply(table);
    }
    debug!(
        path = %path.display(),
        tables = schema.tables.len(),
        sequences = schema.sequences.len(),
        "Loaded schema"
    );
    Ok(schema)
}

fn create_statements(platform: &dyn Platform, schema: &Schema) -> Result<Vec<String>, PlatformError> {
    let mut sql = Vec::new();
    if platform.capabilities().sequences {
        for sequence in &schema.sequences {
            sql.push(platform.create_sequence_sql(sequence)?);
        }
    }
    sql.extend(platform.create_tables_sql(&schema.tables)?);
    Ok(sql)
}

fn drop_statements(platform: &dyn Platform, schema: &Schema) -> Result<Vec<String>, PlatformError> {
    let mut sql = platform.drop_tables_sql(&schema.tables)?;
    if platform.capabilities().sequences {
        for sequence in &schema.sequences {
            sql.push(platform.drop_sequence_sql(&sequence.name)?);
        }
    }
    Ok(sql)
}

/// Catalog queries, skipping the ones the platform has no query for.
fn introspect_statements(
    platform: &dyn Platform,
    table: Option<&str>,
    database: Option<&str>,
) -> Result<Vec<String>, PlatformError> {
    let queries = match table {
        Some(table) => vec![
            platform.list_table_columns_sql(table, database),
            platform.list_table_indexes_sql(table, database),
            platform.list_table_foreign_keys_sql(table, database),
            platform.list_table_constraints_sql(table),
            platform.list_table_comments_sql(table, database),
        ],
        None => {
            let database = database.unwrap_or_default();
            vec![
                platform.list_databases_sql(),
                platform.list_tables_sql(),
                platform.list_views_sql(database),
                platform.list_sequences_sql(database),
            ]
        }
    };

    let mut sql = Vec::new();
    for query in queries {
        match query {
            Ok(query) => sql.push(query),
            Err(PlatformError::NotSupported { operation, .. }) => {
                debug!(operation = %operation, "Skipping unsupported catalog query");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(sql)
}

fn print_platforms(output_json: bool) -> Result<(), PlatformError> {
    let catalog = PlatformCatalog::with_builtins();
    let mut summaries = Vec::new();
    for name in catalog.platform_names() {
        let platform = catalog.require_platform(name)?;
        summaries.push(PlatformSummary {
            name,
            platform: platform.name().to_string(),
            capabilities: *platform.capabilities(),
        });
    }

    if output_json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    for summary in &summaries {
        let caps = &summary.capabilities;
        println!(
            "{:<12} sequences={:<3} identity={:<3} schemas={:<3} max_identifier={}",
            summary.name,
            yes_no(caps.sequences),
            yes_no(caps.identity_columns),
            yes_no(caps.schemas),
            caps.max_identifier_length
        );
    }
    Ok(())
}

/// `RUST_LOG` takes precedence over `--verbosity` when set.
fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
