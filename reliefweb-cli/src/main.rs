use anyhow::Result;
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "rwapi")]
#[command(about = "ReliefWeb API command line client")]
#[command(version)]
struct Cli {
    /// API base URL
    #[arg(long, env = "RELIEFWEB_API_URL", default_value = reliefweb::DEFAULT_BASE_URL)]
    api_url: String,

    /// Application name reported to the API
    #[arg(long, env = "RELIEFWEB_APPNAME")]
    appname: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 2)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search a resource collection (reports, jobs, training, sources,
    /// countries, disasters)
    Search {
        /// Resource collection to query
        resource: String,

        /// Full-text search query
        #[arg(short, long)]
        query: Option<String>,

        /// Fields to include in each item (repeatable)
        #[arg(short, long)]
        include: Vec<String>,

        /// Sort tokens like date:desc (repeatable)
        #[arg(short, long)]
        sort: Vec<String>,

        /// Maximum number of items to return
        #[arg(short, long)]
        limit: Option<usize>,

        /// Offset from which to start returning items
        #[arg(short, long)]
        offset: Option<usize>,

        /// Response profile
        #[arg(long)]
        profile: Option<String>,

        /// Query preset
        #[arg(long)]
        preset: Option<String>,

        /// Print the raw response payload instead of a summary
        #[arg(long)]
        raw: bool,
    },

    /// Fetch a single resource item by id
    Get {
        /// Resource collection the item belongs to
        resource: String,

        /// Item id
        id: String,

        /// Fields to include (repeatable)
        #[arg(short, long)]
        include: Vec<String>,

        /// Response profile
        #[arg(long)]
        profile: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut builder = reliefweb::Client::builder()
        .base_url(cli.api_url.as_str())
        .timeout(Duration::from_secs(cli.timeout));
    if let Some(appname) = &cli.appname {
        builder = builder.appname(appname.as_str());
    }
    let client = builder.build()?;

    match cli.command {
        Commands::Search {
            resource,
            query,
            include,
            sort,
            limit,
            offset,
            profile,
            preset,
            raw,
        } => {
            commands::search::run_search(
                &client,
                &resource,
                commands::search::SearchOpts {
                    query,
                    include,
                    sort,
                    limit,
                    offset,
                    profile,
                    preset,
                    raw,
                },
            )
            .await
        }
        Commands::Get {
            resource,
            id,
            include,
            profile,
        } => commands::item::run_get(&client, &resource, &id, &include, profile.as_deref()).await,
    }
}
