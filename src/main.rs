mod logging;
mod serve;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::eyre};
use limn_highlight::RenderOptions;
use std::fs;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "limn", about = "Live syntax-highlighting server for paste editors")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the highlight session server
    Serve {
        /// Address to bind on
        #[arg(short, long, default_value = "127.0.0.1")]
        bind: String,

        /// Preferred port (the next 19 are tried when it is taken)
        #[arg(short, long, default_value = "4000", env = "LIMN_PORT")]
        port: u16,

        /// Seconds between keepalive pings on idle connections
        #[arg(long, default_value = "15", env = "LIMN_KEEPALIVE_SECS")]
        keepalive_secs: u64,
    },

    /// Highlight one file and print the markup to stdout
    Highlight {
        /// File to highlight (the filename drives language guessing)
        file: Utf8PathBuf,

        /// Language name override (beats filename guessing)
        #[arg(short, long)]
        language: Option<String>,

        /// Emit a numbered two-column table instead of a flat fragment
        #[arg(long)]
        numbered: bool,

        /// Anchor namespace for line numbers
        #[arg(long, default_value = "")]
        id_prefix: String,
    },

    /// List the supported language identifiers
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            bind,
            port,
            keepalive_secs,
        } => {
            logging::init_standard_tracing();

            let ip: Ipv4Addr = bind
                .parse()
                .map_err(|_| eyre!("invalid bind address: {bind}"))?;
            let server = Arc::new(serve::HighlightServer::new(Duration::from_secs(
                keepalive_secs,
            )));
            serve::run(server, ip, port).await?;
        }
        Command::Highlight {
            file,
            language,
            numbered,
            id_prefix,
        } => {
            // No tracing here: stdout is the markup, nothing else.
            let source = fs::read_to_string(&file)?;
            let filename = file.file_name().unwrap_or(file.as_str());
            let options = RenderOptions {
                numbered,
                id_prefix,
                ..RenderOptions::default()
            };
            let html =
                limn_highlight::highlight_file(filename, language.as_deref(), &source, &options);
            println!("{html}");
        }
        Command::Languages => {
            for name in limn_highlight::supported_languages() {
                println!("{name}");
            }
        }
    }

    Ok(())
}
