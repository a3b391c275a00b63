use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use sitesearch::app::App;
use sitesearch::config::CONFIG;
use sitesearch::view;
use sitesearch::{SearchClient, SessionState};

#[derive(Parser, Debug)]
#[command(name = "sitesearch", about = "Search the content of a website through a search backend")]
struct Cli {
    /// Search endpoint, overrides SITESEARCH_ENDPOINT
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one search and print the results
    Search {
        #[arg(long)]
        url: String,
        #[arg(long)]
        query: String,
        /// Result number to expand or collapse; may be repeated
        #[arg(long = "expand", value_name = "N")]
        expand: Vec<usize>,
    },
    /// Line-driven session on stdin
    Interactive {
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Check whether the backend is up
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the page.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let endpoint = cli.endpoint.unwrap_or_else(|| CONFIG.endpoint.clone());
    let client = SearchClient::new(endpoint);
    log::info!("using search endpoint {}", client.endpoint());

    match cli.command {
        Command::Search { url, query, expand } => {
            let mut session = SessionState::with_fields(url, query);
            let submission = session
                .submit()
                .context("both --url and --query must be non-empty")?;
            let outcome = client.search(&submission.request).await;
            session.complete(submission.ticket, outcome);
            for n in expand {
                if n == 0 || !session.toggle_expanded(n - 1) {
                    log::warn!("no result #{n} to expand");
                }
            }
            print!("{}", view::render(&session));
        }
        Command::Interactive { url, query } => {
            let app = App::new(client, SessionState::with_fields(url, query));
            let input = BufReader::new(tokio::io::stdin());
            app.run(input, tokio::io::stdout()).await?;
        }
        Command::Health => {
            let health = client.health().await?;
            print!("{}", view::render_health(&health));
            if !health.is_healthy() {
                anyhow::bail!("search backend is unhealthy");
            }
        }
    }
    Ok(())
}
