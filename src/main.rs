//! Park Scout - browse national park sites by state, then look up nearby
//! places around a chosen site.
//!
//! The binary wires one session together: it resolves the state directory
//! once at startup, then drives the prompt loop over stdin/stdout. All
//! logging goes to stderr so it never interleaves with the prompts.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use parkscout::cache::SessionCache;
use parkscout::cli::{Cli, StartupConfig};
use parkscout::config::Config;
use parkscout::data::{DirectoryClient, PlacesClient, SiteClient};
use parkscout::fetch::{HttpFetcher, PageFetcher};
use parkscout::session::{Flow, Session};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // RUST_LOG controls the log level (e.g. RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let startup = StartupConfig::from_cli(&cli);
    let config = Config::from_env()?;

    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new()?);
    let cache = Arc::new(SessionCache::new());

    info!("resolving state directory");
    let directory = DirectoryClient::new(fetcher.clone()).resolve_states().await?;

    let sites = SiteClient::new(fetcher.clone(), cache.clone());
    let places = PlacesClient::new(fetcher, cache.clone(), config.api_key);
    let session = Session::new(directory, sites, places);

    run_session(session, startup.initial_state).await?;

    let stats = cache.stats();
    info!(
        "session cache totals: {} site hits / {} misses, {} places hits / {} misses",
        stats.site_hits, stats.site_misses, stats.places_hits, stats.places_misses
    );
    Ok(())
}

/// Drives the prompt loop over stdin until the user exits or input ends
async fn run_session(mut session: Session, initial_state: Option<String>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if let Some(state) = initial_state {
        let (lines, flow) = session.handle_line(&state).await;
        print_lines(&mut stdout, &lines)?;
        if flow == Flow::Exit {
            return Ok(());
        }
    }

    loop {
        write!(stdout, "{}", session.prompt())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // End of input counts as a quiet exit
            break;
        }

        let (lines, flow) = session.handle_line(&line).await;
        print_lines(&mut stdout, &lines)?;
        if flow == Flow::Exit {
            break;
        }
    }
    Ok(())
}

fn print_lines(stdout: &mut io::Stdout, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(stdout, "{}", line)?;
    }
    Ok(())
}
