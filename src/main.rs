use std::path::PathBuf;

use clap::Parser;
use study_deck::models::Mode;
use study_deck::{Config, DEFAULT_BACKEND_URL, DEFAULT_LOG_FILE, OfflineResponse};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the study backend
    #[arg(long, env = "STUDY_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    /// File to write logs to
    #[arg(long, env = "STUDY_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Report malformed questions and drop malformed table rows
    #[arg(long, env = "STUDY_STRICT")]
    strict: bool,

    /// Open a saved response instead of starting from an empty prompt
    #[arg(long, value_name = "FILE", requires = "mode")]
    open: Option<PathBuf>,

    /// Mode the saved response was generated with (summarize, mcq, explain, examprep)
    #[arg(long, requires = "open")]
    mode: Option<Mode>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let open = args
            .open
            .zip(args.mode)
            .map(|(path, mode)| OfflineResponse { path, mode });
        Config {
            backend_url: args.backend_url,
            log_file: args.log_file,
            strict: args.strict,
            open,
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from(Args::parse());

    if let Err(e) = study_deck::logging::init(&config.log_file) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = study_deck::run(config).await {
        eprintln!("Error running study-deck: {}", e);
        std::process::exit(1);
    }
}
