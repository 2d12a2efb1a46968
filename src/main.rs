use chamber_directory::config::{self, ConfigFile};
use chamber_directory::page::{self, Page};
use chamber_directory::prelude::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Render chamber member directory and spotlight regions
#[derive(Parser, Debug)]
#[command(name = "chamber")]
#[command(about = "Render member directory cards and spotlights from a member document")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the member directory (one card per member)
    Directory {
        /// Member document path or URL (default: data/members.json, or CHAMBER_DATA env var)
        #[arg(long)]
        source: Option<String>,

        /// YAML config file (default: CHAMBER_CONFIG env var)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Layout: grid or list
        #[arg(long, value_parser = ["grid", "list"])]
        layout: Option<String>,

        /// Print the element tree as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Render a random spotlight of Silver and Gold members
    Spotlight {
        /// Member document path or URL (default: data/members.json, or CHAMBER_DATA env var)
        #[arg(long)]
        source: Option<String>,

        /// YAML config file (default: CHAMBER_CONFIG env var)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed for a reproducible selection
        #[arg(long)]
        seed: Option<u64>,

        /// Print the element tree as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Render a standalone HTML page with both regions
    Page {
        /// Member document path or URL (default: data/members.json, or CHAMBER_DATA env var)
        #[arg(long)]
        source: Option<String>,

        /// YAML config file (default: CHAMBER_CONFIG env var)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Layout: grid or list
        #[arg(long, value_parser = ["grid", "list"])]
        layout: Option<String>,

        /// Seed for a reproducible selection
        #[arg(long)]
        seed: Option<u64>,

        /// Page title
        #[arg(long, default_value = "Chamber Member Directory")]
        title: String,

        /// Write the page to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  directory   Render the member directory");
    println!("  spotlight   Render a random member spotlight");
    println!("  page        Render a standalone page with both regions");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chamber_directory=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Resolve configuration: flag, then environment variable, then config file, then defaults
fn load_config(
    source: Option<String>,
    config_path: Option<PathBuf>,
    layout: Option<String>,
) -> anyhow::Result<Config> {
    let config_path = config_path.or_else(|| std::env::var("CHAMBER_CONFIG").ok().map(PathBuf::from));
    let file = match config_path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            config::load_file(&path)?
        }
        None => ConfigFile::default(),
    };

    let mut builder = ConfigBuilder::new(DataSource::default()).apply_file(file);

    if let Some(source) = source.or_else(|| std::env::var("CHAMBER_DATA").ok()) {
        builder = builder.source(DataSource::parse(&source));
    }

    if let Some(layout) = layout {
        builder = builder.layout(Layout::from(layout.as_str()));
    }

    Ok(builder.build()?)
}

fn print_element(element: &Element, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(element)?);
    } else {
        println!("{}", element.to_html());
    }
    Ok(())
}

async fn run_directory_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Directory {
        source,
        config,
        layout,
        json,
    } = cmd else {
        unreachable!()
    };

    let config = load_config(source, config, layout)?;
    let mut renderer = DirectoryRenderer::from_config(&config);
    renderer.load_and_render().await;

    print_element(&renderer.container().to_element(), json)
}

async fn run_spotlight_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Spotlight {
        source,
        config,
        seed,
        json,
    } = cmd else {
        unreachable!()
    };

    let config = load_config(source, config, None)?;
    let mut selector = match seed {
        Some(seed) => SpotlightSelector::seeded(&config, seed),
        None => SpotlightSelector::from_config(&config),
    };

    if let SpotlightState::Loaded(schedule) = selector.load_spotlights().await {
        tracing::info!(
            "{} (reveal completes after {} ms)",
            schedule.announcement(),
            schedule.completes_after().as_millis()
        );
    }

    print_element(&selector.container().to_element(), json)
}

async fn run_page_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Page {
        source,
        config,
        layout,
        seed,
        title,
        output,
    } = cmd else {
        unreachable!()
    };

    let config = load_config(source, config, layout)?;
    let loaded = Page::load(&config, seed).await;
    let html = page::render_document(&title, &loaded);

    match output {
        Some(path) => {
            tokio::fs::write(&path, html).await?;
            tracing::info!("Wrote page to {}", path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Some(cmd @ Command::Directory { .. }) => run_directory_command(cmd).await,
        Some(cmd @ Command::Spotlight { .. }) => run_spotlight_command(cmd).await,
        Some(cmd @ Command::Page { .. }) => run_page_command(cmd).await,
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
