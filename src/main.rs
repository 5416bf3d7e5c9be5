use std::fs::File;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use mathdash::core::config::{self, Overrides};
use mathdash::tui;

/// Terminal arithmetic drill: solve as many random equations as you can
/// before the clock runs out.
#[derive(Parser)]
#[command(name = "mathdash", about = "Terminal arithmetic drill game")]
struct Args {
    /// Minimum value for the first addend
    #[arg(long, value_name = "N")]
    a1_min: Option<u32>,
    /// Maximum value for the first addend
    #[arg(long, value_name = "N")]
    a1_max: Option<u32>,
    /// Minimum value for the second addend
    #[arg(long, value_name = "N")]
    a2_min: Option<u32>,
    /// Maximum value for the second addend
    #[arg(long, value_name = "N")]
    a2_max: Option<u32>,
    /// Minimum value for the first factor
    #[arg(long, value_name = "N")]
    m1_min: Option<u32>,
    /// Maximum value for the first factor
    #[arg(long, value_name = "N")]
    m1_max: Option<u32>,
    /// Minimum value for the second factor
    #[arg(long, value_name = "N")]
    m2_min: Option<u32>,
    /// Maximum value for the second factor
    #[arg(long, value_name = "N")]
    m2_max: Option<u32>,
    /// Allowed operators, 1-4 characters from "+-*/"
    #[arg(short = 'o', long)]
    operators: Option<String>,
    /// Game duration in seconds
    #[arg(short = 't', long)]
    time: Option<u64>,
    /// Show a debug line with the raw input buffer
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn into_overrides(self) -> Overrides {
        Overrides {
            a1_min: self.a1_min,
            a1_max: self.a1_max,
            a2_min: self.a2_min,
            a2_max: self.a2_max,
            m1_min: self.m1_min,
            m1_max: self.m1_max,
            m2_min: self.m2_min,
            m2_max: self.m2_max,
            operators: self.operators,
            time: self.time,
            debug: self.debug,
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger - stdout belongs to the TUI while the game runs.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("mathdash.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
    log::info!("mathdash starting up");

    // Resolve and validate before any terminal mode change.
    let overrides = args.into_overrides();
    let game_config = match config::load_file_config()
        .and_then(|file| config::resolve(&file, &overrides))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("mathdash: {e}");
            std::process::exit(2);
        }
    };

    match tui::run(game_config).await {
        Ok(score) => {
            println!("Score: {score}");
            Ok(())
        }
        Err(e) => {
            log::error!("session aborted: {e}");
            eprintln!("mathdash: {e}");
            std::process::exit(1);
        }
    }
}
