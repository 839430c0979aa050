use adjacency::GridShape;
use anyhow::Result;
use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(author, version, about = "Minimum and maximum on-on adjacency counts of a grid", long_about = None)]
struct Args {
    /// Number of grid rows
    rows: u64,

    /// Number of grid columns
    cols: u64,

    /// Number of marked cells (every occupancy if omitted)
    occupied: Option<u64>,
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    let shape = GridShape::new(args.rows, args.cols)?;
    debug!(
        "{shape}: {} cells, {} edges",
        shape.cells(),
        shape.edge_count()
    );

    match args.occupied {
        Some(o) => {
            let min = shape.min_adjacency(o)?;
            let max = shape.max_adjacency(o)?;
            println!("{shape} o={o}: min={min} max={max}");
        }
        None => {
            println!("{:>5} {:>6} {:>6}", "o", "min", "max");
            for b in shape.bounds_profile() {
                println!("{:>5} {:>6} {:>6}", b.occupied, b.min, b.max);
            }
        }
    }

    Ok(())
}
