use adjacency::CheckKind;
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Check data correctness of a dense adjacency table", long_about = None)]
struct Args {
    /// Dense table file (`r,c,o,a,count` rows ending in `.DONE.`)
    path: PathBuf,
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    info!("Verifying: {}", args.path.display());
    // data checks take no display options
    let code = CheckKind::Csv.exit_code(&args.path, false, 0);
    std::process::exit(code);
}
