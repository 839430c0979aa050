use adjacency::{
    Config,
    constants::{EXIT_BAD_DATA, EXIT_MISMATCH, EXIT_OK},
    verify::verify_bounds_file,
};
use anyhow::Result;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Compare closed-form adjacency bounds against a dense table", long_about = None)]
struct Args {
    /// Dense table file (`r,c,o,a,count` rows ending in `.DONE.`)
    path: PathBuf,

    /// Configuration file path
    #[arg(short = 'c', long = "config", default_value = "config/default.toml")]
    config: PathBuf,

    /// List individual mismatches
    #[arg(long)]
    show: bool,

    /// Mismatches listed per bound with --show
    #[arg(long = "max-show")]
    max_show: Option<usize>,

    /// Print the report as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    // exit 1 is reserved for mismatches
    let config = match Config::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("ERROR: {e}");
            std::process::exit(EXIT_BAD_DATA);
        }
    };
    let show = args.show || config.verify.show_mismatches;
    let max_show = args.max_show.unwrap_or(config.verify.max_show);

    info!("Checking bounds: {}", args.path.display());
    let report = match verify_bounds_file(&args.path) {
        Ok(report) => report,
        Err(e) => {
            error!("ERROR reading file: {e}");
            std::process::exit(EXIT_BAD_DATA);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    report.log_summary(show, max_show);

    std::process::exit(if report.is_clean() {
        EXIT_OK
    } else {
        EXIT_MISMATCH
    });
}
