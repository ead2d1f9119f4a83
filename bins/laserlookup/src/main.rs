//! laserlookup: search the laser hair removal equipment catalog.

mod browse;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use laserlookup_catalog::{Catalog, CatalogError};
use laserlookup_cli::output::{self, Status, format_count, format_duration};
use laserlookup_cli::render::Renderer;
use laserlookup_core::config::Config;
use laserlookup_core::error::{Error, ErrorCode, exit_codes};
use laserlookup_search::{SearchEngine, SearchOutcome, SearchSettings, Selection};
use laserlookup_telemetry::{TelemetryConfig, Timer};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "laserlookup")]
#[command(about = "Look up laser hair removal equipment")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, env = "LASERLOOKUP_CONFIG")]
    config: Option<PathBuf>,

    /// Equipment catalog (JSON), overrides [catalog].path
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog, falling back to suggestions
    Search {
        /// Query text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Slug of the record being viewed (never suggested as related)
        #[arg(long)]
        current: Option<String>,
        /// Only run the strict search
        #[arg(long)]
        strict: bool,
    },

    /// Show "did you mean" suggestions for a query
    Suggest {
        /// Query text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Slug of the record being viewed
        #[arg(long)]
        current: Option<String>,
    },

    /// Show one record by slug or alias
    Show {
        /// Slug or alias
        slug: String,
    },

    /// Check the configuration and catalog
    Validate,

    /// List manufacturers in the catalog
    Manufacturers,

    /// Interactive search with keyboard navigation
    Browse {
        /// Slug of the record being viewed
        #[arg(long)]
        current: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    if cli.no_color {
        output::set_color(false);
    }

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => report_error(&err, cli.json),
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;
    init_logging(cli, &config)?;

    let app = || App::load(cli, &config);
    match &cli.command {
        Commands::Search { query, current, strict } => {
            run_search(&app()?, &query.join(" "), current.as_deref(), *strict)
        }
        Commands::Suggest { query, current } => {
            run_suggest(&app()?, &query.join(" "), current.as_deref())
        }
        Commands::Show { slug } => run_show(&app()?, slug),
        Commands::Validate => run_validate(cli, &config),
        Commands::Manufacturers => run_manufacturers(&app()?),
        Commands::Browse { current } => run_browse(&app()?, current.clone()),
    }
}

fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let log_level = match cli.verbose {
        0 => config.schema.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    laserlookup_telemetry::init_with_config(TelemetryConfig {
        log_level,
        json: config.schema.logging.json,
        ansi: !cli.no_color,
        ..TelemetryConfig::default()
    })
}

fn report_error(err: &anyhow::Error, json: bool) -> i32 {
    match err.downcast_ref::<Error>() {
        Some(error) => {
            if json {
                if let Ok(text) = serde_json::to_string_pretty(&error.to_report()) {
                    println!("{}", text);
                }
            } else {
                Status::error(&error.to_string());
            }
            error.exit_code()
        }
        None => {
            Status::error(&format!("{:#}", err));
            exit_codes::FAILURE
        }
    }
}

/// Catalog, engine and output settings shared by the subcommands
struct App {
    catalog: Catalog,
    engine: Arc<SearchEngine>,
    settings: SearchSettings,
    renderer: Renderer,
    json: bool,
}

impl App {
    fn load(cli: &Cli, config: &Config) -> Result<Self> {
        let path = cli.catalog.clone().unwrap_or_else(|| config.catalog_path());
        let catalog = load_catalog(&path)?;
        tracing::debug!(path = %path.display(), records = catalog.len(), "Catalog loaded");

        let settings = SearchSettings::from_config(&config.schema);
        let timer = Timer::start("index_build");
        let engine = SearchEngine::new(&catalog, &mut settings.cache(), &settings);
        timer.stop();

        Ok(Self {
            catalog,
            engine: Arc::new(engine),
            settings,
            renderer: Renderer::new(!cli.no_color && console::colors_enabled()),
            json: cli.json,
        })
    }

    fn print_json(&self, value: &impl Serialize) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn load_catalog(path: &Path) -> Result<Catalog, Error> {
    Catalog::from_path(path).map_err(|err| match err {
        CatalogError::Io { ref source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
            Error::catalog_not_found(path)
        }
        other if other.is_data_error() => Error::validation(other.to_string())
            .with_context(format!("While loading {}", path.display()))
            .with_suggestion("Fix the record named above in the catalog file")
            .with_source(other),
        other => {
            let message = other.to_string();
            Error::new(ErrorCode::CatalogError, message)
                .with_context(format!("While loading {}", path.display()))
                .with_source(other)
        }
    })
}

fn run_search(app: &App, query: &str, current: Option<&str>, strict: bool) -> Result<i32> {
    let timer = Timer::start("search");
    let outcome = if strict {
        app.engine.search(query)
    } else {
        app.engine.lookup(query, current)
    };
    let elapsed = timer.stop();

    if app.json {
        app.print_json(&outcome)?;
        return Ok(exit_codes::SUCCESS);
    }

    match &outcome {
        SearchOutcome::Idle => {
            Status::warning("Empty query, nothing to search");
            return Ok(exit_codes::SUCCESS);
        }
        SearchOutcome::Results(results) if results.is_empty() => {
            Status::info(&format!("No matches for \"{}\"", query));
            return Ok(exit_codes::SUCCESS);
        }
        SearchOutcome::Results(results) => Status::header(&format!(
            "{} for \"{}\" ({})",
            format_count(results.len(), "match", "matches"),
            query,
            format_duration(elapsed)
        )),
        SearchOutcome::Suggestions(_) => {
            Status::info(&format!("No matches for \"{}\". Did you mean:", query))
        }
    }

    for line in app.renderer.outcome_lines(&outcome, None) {
        println!("{}", line);
    }
    Ok(exit_codes::SUCCESS)
}

fn run_suggest(app: &App, query: &str, current: Option<&str>) -> Result<i32> {
    let suggestions = app.engine.suggest(query, current);

    if app.json {
        app.print_json(&suggestions)?;
        return Ok(exit_codes::SUCCESS);
    }

    if suggestions.is_empty() {
        Status::info(&format!("No suggestions for \"{}\"", query));
    }
    for suggestion in &suggestions {
        println!("  {}", app.renderer.suggestion_line(suggestion));
    }
    println!(
        "  {} {}",
        app.renderer.browse_all_line(),
        Selection::BrowseAll.route(&app.settings.route_namespace)
    );
    Ok(exit_codes::SUCCESS)
}

fn run_show(app: &App, slug: &str) -> Result<i32> {
    let record = app.catalog.resolve(slug).ok_or_else(|| Error::record_not_found(slug))?;

    if app.json {
        app.print_json(&**record)?;
        return Ok(exit_codes::SUCCESS);
    }

    let rows = app.renderer.record_details(record);
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    Status::header(record.name());
    for (label, value) in rows {
        println!("{:width$}  {}", label, value, width = width);
    }
    let route = Selection::Record {
        slug: record.slug().to_string(),
    }
    .route(&app.settings.route_namespace);
    println!("{:width$}  {}", "Route", route, width = width);
    Ok(exit_codes::SUCCESS)
}

#[derive(Serialize)]
struct ManufacturerRow<'a> {
    name: &'a str,
    machines: usize,
    /// Named in a query, this manufacturer yields related suggestions
    detected: bool,
}

fn run_manufacturers(app: &App) -> Result<i32> {
    let rows: Vec<ManufacturerRow<'_>> = app
        .catalog
        .manufacturers()
        .into_iter()
        .map(|name| ManufacturerRow {
            name,
            machines: app.catalog.by_manufacturer(name, None, usize::MAX).len(),
            detected: app.engine.resolver().detect_manufacturer(name).is_some(),
        })
        .collect();

    if app.json {
        app.print_json(&rows)?;
        return Ok(exit_codes::SUCCESS);
    }

    Status::header(&format_count(rows.len(), "manufacturer", "manufacturers"));
    let width = rows.iter().map(|row| row.name.chars().count()).max().unwrap_or(0);
    for row in &rows {
        let marker = if row.detected { "" } else { "  (not in suggest.manufacturers)" };
        println!(
            "{:width$}  {}{}",
            row.name,
            format_count(row.machines, "machine", "machines"),
            marker,
            width = width
        );
    }
    Ok(exit_codes::SUCCESS)
}

#[derive(Serialize)]
struct ValidationSummary {
    config: Option<PathBuf>,
    catalog: PathBuf,
    records: usize,
    machines: usize,
    technology_terms: usize,
    warnings: Vec<String>,
}

fn run_validate(cli: &Cli, config: &Config) -> Result<i32> {
    let report = config.validate();
    let path = cli.catalog.clone().unwrap_or_else(|| config.catalog_path());
    let catalog = load_catalog(&path)?;

    let mut warnings: Vec<String> = report.warnings().iter().map(ToString::to_string).collect();
    let known = &config.schema.suggest.manufacturers;
    for manufacturer in catalog.manufacturers() {
        if !known.iter().any(|k| k.eq_ignore_ascii_case(manufacturer)) {
            warnings.push(format!(
                "Manufacturer \"{}\" is missing from suggest.manufacturers",
                manufacturer
            ));
        }
    }

    let summary = ValidationSummary {
        config: config.path.clone(),
        catalog: path,
        records: catalog.len(),
        machines: catalog.machines().count(),
        technology_terms: catalog.technology_terms().count(),
        warnings,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(exit_codes::SUCCESS);
    }

    match &summary.config {
        Some(path) => Status::success(&format!("Configuration valid: {}", path.display())),
        None => Status::success("Configuration valid (defaults)"),
    }
    Status::success(&format!(
        "Catalog valid: {} ({} machines, {} technology terms)",
        format_count(summary.records, "record", "records"),
        summary.machines,
        summary.technology_terms
    ));
    for warning in &summary.warnings {
        Status::warning(warning);
    }
    Ok(exit_codes::SUCCESS)
}

fn run_browse(app: &App, current: Option<String>) -> Result<i32> {
    let route = browse::run(Arc::clone(&app.engine), &app.settings, app.renderer, current)?;

    match route {
        Some(route) if app.json => app.print_json(&serde_json::json!({ "route": route }))?,
        Some(route) => println!("{}", route),
        None => {}
    }
    Ok(exit_codes::SUCCESS)
}
