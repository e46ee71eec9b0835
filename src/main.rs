//! tldrify CLI - TL;DR block generation for HTML documents
//!
//! The pipeline is contained in lib.rs, and this file is responsible for
//! parsing arguments, loading the source document and printing results.

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tldrify::{scrape, Options};

#[derive(Parser)]
#[command(name = "tldrify")]
#[command(author, version, about = "TL;DR summary block generation for HTML documents", long_about = None)]
struct Cli {
    /// Config file path, defaults to tldrify.toml in cwd or ~/.config/tldrify/
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Common option overrides applied on top of the config file
#[derive(clap::Args)]
struct Overrides {
    /// Collapse summaries, expanding on headline clicks
    #[arg(long)]
    collapsed: bool,
    /// Allow several summaries expanded at once in collapsed mode
    #[arg(long)]
    no_accordion: bool,
    /// Comma-separated elements treated as headlines
    #[arg(long)]
    headlines: Option<String>,
    /// Selector for the scan root
    #[arg(long)]
    target: Option<String>,
    /// Minimum number of headlines required, 0 for no threshold
    #[arg(long)]
    min_headlines: Option<usize>,
    /// Character budget per summary, 0 for unlimited
    #[arg(long)]
    max_length: Option<usize>,
    /// List element for the block, ol or ul
    #[arg(long)]
    list_type: Option<String>,
    /// Title text for the block
    #[arg(long)]
    title: Option<String>,
    /// Skip the meta-description intro line
    #[arg(long)]
    no_description: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the TL;DR block for a page
    Generate {
        /// URL or local HTML file to scan
        source: String,
        /// Print structured results as JSON instead of markup
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the scanned content with the TL;DR block inserted
    Inject {
        /// URL or local HTML file to scan
        source: String,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            source,
            json,
            overrides,
        } => {
            let opts = load_options(cli.config.as_deref(), &overrides)?;
            let html = load_source(&source).await?;
            let mut doc = scrape::parse_document(&html, &opts);

            match tldrify::build(&mut doc, &opts) {
                Some(block) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&block.entries)?);
                    } else {
                        println!("{}", block.html);
                    }
                }
                None => print_not_applicable(&opts),
            }
        }
        Commands::Inject { source, overrides } => {
            let opts = load_options(cli.config.as_deref(), &overrides)?;
            let html = load_source(&source).await?;
            let mut doc = scrape::parse_document(&html, &opts);

            match tldrify::build(&mut doc, &opts) {
                Some(block) => println!("{}", doc.to_html_with_block(&block.html, &opts)),
                None => {
                    print_not_applicable(&opts);
                    println!("{}", doc.to_html());
                }
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "tldrify", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Load options from the config file and apply CLI overrides
fn load_options(config: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Options> {
    let mut opts = match config {
        Some(path) => Options::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Options::load()?,
    };

    if overrides.collapsed {
        opts.collapsed = true;
    }
    if overrides.no_accordion {
        opts.accordion = false;
    }
    if overrides.no_description {
        opts.use_meta_description = false;
    }
    if let Some(headlines) = &overrides.headlines {
        opts.headline_elements = headlines.clone();
    }
    if let Some(target) = &overrides.target {
        opts.target = target.clone();
    }
    if let Some(min) = overrides.min_headlines {
        opts.minimum_headlines = min;
    }
    if let Some(max) = overrides.max_length {
        opts.max_summary_length = max;
    }
    if let Some(list_type) = &overrides.list_type {
        opts.list_type = list_type.clone();
    }
    if let Some(title) = &overrides.title {
        opts.header_title = title.clone();
    }

    Ok(opts)
}

/// Read the source document from a URL or a local file
async fn load_source(source: &str) -> anyhow::Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        eprintln!("{} {}", "Fetching:".bold(), source);
        Ok(scrape::fetch_html(source).await?)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {}", source))
    }
}

/// A document below the headline threshold is not an error, just nothing
/// to do
fn print_not_applicable(opts: &Options) {
    let detail = if opts.minimum_headlines > 0 {
        format!(
            "fewer than {} matching headlines ({})",
            opts.minimum_headlines, opts.headline_elements
        )
    } else {
        format!("no matching headlines ({})", opts.headline_elements)
    };
    eprintln!("{}", format!("No TL;DR produced: {}", detail).yellow());
}
