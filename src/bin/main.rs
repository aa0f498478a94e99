use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "movie-server")]
#[command(about = "Movie catalog REST server", long_about = None)]
struct Args {
    /// Optional YAML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Override the document store file from the config.
    #[arg(short, long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movieserver=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Err(e) = movieserver::run(args.config.as_deref(), args.database.as_deref()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
