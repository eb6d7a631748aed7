use clap::{CommandFactory, FromArgMatches, Parser};
use samppick::config::Config;
use samppick::error::SampPickError;
use std::process;
use strum::Display;
use tracing::{error, info, Level};

mod cmd;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "A tool for the analysis and optimization of sample distributions",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Available donors CSV (id,allele1,allele2)
    available: String,

    /// Just analyze the available sample in its entirety
    #[arg(long, default_value_t = false)]
    basic: bool,

    /// JSON settings file; flags given on the command line take precedence
    #[arg(long = "config")]
    settings: Option<String>,

    #[arg(long, default_value_t = false)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, Display)]
enum RunMode {
    #[strum(serialize = "optimize")]
    Optimize,
    #[strum(serialize = "basic")]
    Basic,
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    let config = match &cli.settings {
        Some(path) => {
            info!("⚙️  Loading Settings: {}", path);
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                error!("❌ {}", e);
                process::exit(1);
            });
            file_config.merge_from_cli(&cli.config, &matches);
            file_config
        }
        None => cli.config.clone(),
    };

    let mode = if cli.basic {
        RunMode::Basic
    } else {
        RunMode::Optimize
    };
    info!("🧬 SampPick ({} mode)", mode);

    let result = match mode {
        RunMode::Optimize => cmd::select::run(&config, &cli.available),
        RunMode::Basic => cmd::basic::run(&config, &cli.available),
    };

    match result {
        Ok(()) => info!("Finished"),
        Err(e @ SampPickError::Configuration(_)) => {
            error!("❌ {}", e);
            process::exit(2);
        }
        Err(e) => {
            error!("❌ {}", e);
            process::exit(1);
        }
    }
}
