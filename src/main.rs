use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use popgrowth::{
    codec,
    export,
    format::{format_population, format_rate},
    presets::{PresetCatalog, PresetLoader},
    web::{self, WebServerConfig},
    AppConfig, GrowthParameters, ModelType, ParameterBounds, Simulation,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Exponential and logistic population growth simulator")]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the simulated series
    Run {
        #[command(flatten)]
        select: Selection,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Write the simulated series to a CSV file
    Export {
        #[command(flatten)]
        select: Selection,
        /// Destination CSV file
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the shareable query string or link
    Link {
        #[command(flatten)]
        select: Selection,
        /// Base URL to prepend to the query
        #[arg(long)]
        base: Option<String>,
    },
    /// List the available presets
    Presets,
    /// Serve the JSON/CSV API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Parameter sources, applied in order: defaults, preset, query, explicit flags.
#[derive(Debug, Args)]
struct Selection {
    /// Start from a named preset
    #[arg(long)]
    preset: Option<String>,

    /// Shared query string, e.g. "model=logistic&P0=500&r=0.1&K=8000&T=120"
    #[arg(long)]
    query: Option<String>,

    /// Growth model ("exponential" or "logistic")
    #[arg(long)]
    model: Option<ModelType>,

    /// Population at year 0
    #[arg(long = "initial-population")]
    initial_population: Option<f64>,

    /// Fractional growth rate per year
    #[arg(long = "growth-rate")]
    growth_rate: Option<f64>,

    /// Carrying capacity (logistic model)
    #[arg(long = "carrying-capacity")]
    carrying_capacity: Option<f64>,

    /// Number of years to simulate
    #[arg(long)]
    years: Option<u32>,

    /// Snap parameters into the interactive slider ranges
    #[arg(long)]
    clamp: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl Selection {
    fn resolve(&self, defaults: &GrowthParameters, catalog: &PresetCatalog) -> Result<GrowthParameters> {
        let mut params = *defaults;
        if let Some(name) = &self.preset {
            params = catalog.get(name)?.parameters();
        }
        if let Some(query) = &self.query {
            params = codec::decode(&params, query);
        }
        if let Some(model) = self.model {
            params.model = model;
        }
        if let Some(value) = self.initial_population {
            params.initial_population = value;
        }
        if let Some(value) = self.growth_rate {
            params.growth_rate = value;
        }
        if let Some(value) = self.carrying_capacity {
            params.carrying_capacity = value;
        }
        if let Some(value) = self.years {
            params.time_span = value;
        }
        if self.clamp {
            params = ParameterBounds::default().clamp(&params);
        }
        params.validate()?;
        Ok(params)
    }

    fn simulate(&self, defaults: &GrowthParameters, catalog: &PresetCatalog) -> Result<Simulation> {
        let params = self.resolve(defaults, catalog)?;
        Ok(Simulation::new(params)?)
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Extra catalog paths in the config are relative to the config file.
fn load_catalog(config: &AppConfig, config_path: Option<&Path>) -> Result<PresetCatalog> {
    let mut catalog = PresetCatalog::builtin()?;
    if let Some(path) = &config.presets {
        let base_dir = config_path
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new("."));
        catalog.merge(PresetLoader::new(base_dir).load(path)?);
    }
    Ok(catalog)
}

fn print_table(sim: &Simulation) {
    let params = sim.params();
    println!("{} ({})", params.model.label(), params.model.formula());
    println!(
        "initial population {} | growth rate {}{}",
        format_population(params.initial_population),
        format_rate(params.growth_rate),
        match params.model {
            ModelType::Logistic => format!(
                " | carrying capacity {}",
                format_population(params.carrying_capacity)
            ),
            ModelType::Exponential => String::new(),
        }
    );
    println!("{:>6}  {:>14}  {:>8}", "year", "population", "label");
    for point in sim.points() {
        println!(
            "{:>6}  {:>14}  {:>8}",
            point.year,
            point.population,
            format_population(point.population as f64)
        );
    }
    let summary = sim.summary();
    println!(
        "final population after {} years: {}",
        summary.years,
        format_population(summary.final_population as f64)
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::from_yaml(path)?,
        None => AppConfig::default(),
    };
    init_logging(&config.logging.level);
    let catalog = load_catalog(&config, cli.config.as_deref())?;

    match cli.command {
        Command::Run { select, format } => {
            let sim = select.simulate(&config.defaults, &catalog)?;
            info!(query = %sim.query(), points = sim.points().len(), "simulation complete");
            match format {
                OutputFormat::Table => print_table(&sim),
                OutputFormat::Csv => println!("{}", export::to_csv(sim.points())),
                OutputFormat::Json => println!("{}", export::to_json(&sim.report())?),
            }
        }
        Command::Export { select, out } => {
            let sim = select.simulate(&config.defaults, &catalog)?;
            export::write_csv(&out, sim.points())?;
            info!(path = %out.display(), rows = sim.points().len(), "wrote CSV export");
        }
        Command::Link { select, base } => {
            let params = select.resolve(&config.defaults, &catalog)?;
            match base {
                Some(base) => println!("{}", codec::share_link(&base, &params)),
                None => println!("?{}", codec::encode(&params)),
            }
        }
        Command::Presets => {
            for preset in &catalog.presets {
                println!(
                    "{:<20} {:<12} {}",
                    preset.name,
                    preset.model.as_str(),
                    preset.description.as_deref().unwrap_or("")
                );
                println!("{:<20} ?{}", "", preset.query());
            }
        }
        Command::Serve { host, port } => {
            let server = WebServerConfig {
                defaults: config.defaults,
                catalog,
                max_time_span: config.server.max_time_span,
                host: host.unwrap_or(config.server.host),
                port: port.unwrap_or(config.server.port),
            };
            web::run(server).await?;
        }
    }
    Ok(())
}
