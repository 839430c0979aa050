use adjacency::{
    CheckKind, Config, FileVerifier, InProcessVerifier, SubprocessVerifier,
    batch::{find_table_files, run_batch},
};
use anyhow::Result;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Verify every dense adjacency table in a directory", long_about = None)]
struct Args {
    /// Directory holding dense table files
    dir: PathBuf,

    /// Configuration file path
    #[arg(short = 'c', long = "config", default_value = "config/default.toml")]
    config: PathBuf,

    /// Check to run on each file (defaults to the config's batch.check)
    #[arg(long, value_enum)]
    check: Option<CheckKind>,

    /// Verifier binary to run per file (defaults to the sibling verify_* binary)
    #[arg(long)]
    verifier: Option<PathBuf>,

    /// Run the check inside this process instead of spawning a verifier
    #[arg(long)]
    in_process: bool,
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    let config = Config::load_or_default(&args.config)?;
    let check = args.check.unwrap_or(config.batch.check);

    let files = match find_table_files(&args.dir, &config.batch.extension) {
        Ok(files) => files,
        Err(e) => {
            error!("ERROR: {e}");
            std::process::exit(1);
        }
    };
    info!("Found {} table files in {}", files.len(), args.dir.display());

    let verifier: Box<dyn FileVerifier> = if args.in_process {
        Box::new(InProcessVerifier {
            check,
            show: config.verify.show_mismatches,
            max_show: config.verify.max_show,
        })
    } else {
        let verifier = match args.verifier {
            Some(program) => SubprocessVerifier::new(program),
            None => SubprocessVerifier::sibling_of_current_exe(check)?,
        };
        info!("Verifier: {}", verifier.program.display());
        Box::new(verifier)
    };

    let summary = run_batch(&files, verifier.as_ref())?;
    summary.log_summary();

    std::process::exit(if summary.all_passed() { 0 } else { 1 });
}
