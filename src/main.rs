//! # gitcard CLI
//!
//! Usage:
//!   gitcard render card.json -o card.svg --theme dark
//!   cat card.json | gitcard render --format json
//!   gitcard fetch octocat -o octocat.svg
//!   gitcard serve --addr 0.0.0.0:3000
//!   gitcard themes

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;

use gitcard::config::Config;
use gitcard::github::GithubClient;
use gitcard::server::{run_server, ServerState};
use gitcard::{render_card_json, render_card_svg, CardRecord};

#[derive(Parser, Debug)]
#[command(name = "gitcard", version, about = "Render GitHub profile cards as SVG")]
struct Cli {
    /// Read settings from a TOML file (default: ./gitcard.toml if present)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render card data from a JSON file (or stdin)
    Render {
        /// CardRecord JSON; reads stdin when omitted
        input: Option<PathBuf>,
        #[arg(short = 't', long = "theme")]
        theme: Option<String>,
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
        #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Svg)]
        format: Format,
    },
    /// Fetch an account from GitHub and render its card
    Fetch {
        handle: String,
        #[arg(short = 't', long = "theme")]
        theme: Option<String>,
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
        #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Svg)]
        format: Format,
    },
    /// Serve cards over HTTP
    Serve {
        /// Bind address (overrides config)
        #[arg(short = 'a', long = "addr")]
        addr: Option<String>,
    },
    /// List available themes
    Themes,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    gitcard::logging::init(cli.verbose);
    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Command::Render { input, theme, output, format } => {
            let json = read_input(input.as_ref())?;
            if json.trim().is_empty() {
                bail!("no card data provided");
            }
            let record: CardRecord =
                serde_json::from_str(&json).context("card data is not a valid CardRecord")?;
            let theme = theme.unwrap_or_else(|| config.default_theme.clone());
            write_output(output.as_ref(), &render(&record, &theme, format)?)
        }
        Command::Fetch { handle, theme, output, format } => {
            let client = GithubClient::new(&config.github)?;
            let record = client
                .fetch_embedded_card(&handle)
                .await
                .with_context(|| format!("failed to fetch card data for {}", handle))?;
            let theme = theme.unwrap_or_else(|| config.default_theme.clone());
            write_output(output.as_ref(), &render(&record, &theme, format)?)
        }
        Command::Serve { addr } => {
            if let Some(addr) = addr {
                config.server.addr = addr;
            }
            run_server(ServerState::new(config)?).await
        }
        Command::Themes => {
            for theme in gitcard::svg::all_themes() {
                println!(
                    "{:<12} {:<8} {:?}",
                    theme.id,
                    theme.name,
                    theme.appearance()
                );
            }
            Ok(())
        }
    }
}

fn render(record: &CardRecord, theme: &str, format: Format) -> Result<String> {
    Ok(match format {
        Format::Svg => render_card_svg(record, theme),
        Format::Json => render_card_json(record, theme)?,
    })
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(bytes = content.len(), path = %path.display(), "card written");
        }
        None => println!("{}", content),
    }
    Ok(())
}
