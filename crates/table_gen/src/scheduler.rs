use crate::{
    config::Config,
    error::Result,
    export,
    progress::{self, JobOutcome, ProgressSnapshot},
    signals::StopFlag,
};
use adjacency::{GridShape, compute_table};
use log::{error, info};
use rayon::prelude::*;
use std::{path::Path, time::Instant};

/// Shapes `r x c` with `1 <= r <= max_rows` and `r <= c <= max_cols`
pub fn shapes(max_rows: u64, max_cols: u64) -> Result<Vec<GridShape>> {
    let mut out = Vec::new();
    for r in 1..=max_rows {
        for c in r..=max_cols {
            out.push(GridShape::new(r, c)?);
        }
    }
    Ok(out)
}

/// Generates and writes the table for one shape unless it is already done
pub fn run_job(shape: GridShape, output_dir: &Path) -> Result<JobOutcome> {
    if export::is_done(output_dir, shape) {
        info!("SKIP {shape} (DONE)");
        return Ok(JobOutcome::Skipped);
    }

    info!("START {shape}");
    let started = Instant::now();
    let table = compute_table(shape)?;
    let path = export::export_table_with_path(&table, output_dir)?;
    info!(
        "FINISH {shape} -> {} ({:.2?})",
        path.display(),
        started.elapsed()
    );
    Ok(JobOutcome::Finished)
}

/// Runs every job of `config` on a pool of `config.threads` workers.
/// Shapes not yet started when `stop` trips are counted as cancelled.
pub fn run_all(config: &Config, stop: &StopFlag) -> Result<ProgressSnapshot> {
    let jobs = shapes(config.max_rows, config.max_cols)?;
    info!("Scheduling {} shapes", jobs.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .thread_name(|i| format!("table-gen-{i}"))
        .build()?;

    let tally = progress::create_progress();
    pool.install(|| {
        jobs.par_iter().for_each(|&shape| {
            if stop.is_stopped() {
                progress::record(&tally, JobOutcome::Cancelled);
                return;
            }
            match run_job(shape, &config.output_dir) {
                Ok(outcome) => progress::record(&tally, outcome),
                Err(e) => {
                    error!("ERROR on {shape}: {e}");
                    progress::record(&tally, JobOutcome::Failed);
                }
            }
        });
    });

    Ok(progress::get_progress_snapshot(&tally))
}
