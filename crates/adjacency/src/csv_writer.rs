use crate::constants::{DONE_SENTINEL, EXPECTED_HEADER};
use crate::error::Result;
use crate::table::DenseTable;

use csv::WriterBuilder;
use std::io::Write;

/// Writes `table` in the dense format: header, one row per `(o, a)` in
/// increasing order, then the `.DONE.` sentinel line.
pub fn write_dense_table<W: Write>(table: &DenseTable, writer: W) -> Result<()> {
    // flexible so the one-field sentinel can follow five-field rows
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);

    wtr.write_record(EXPECTED_HEADER)?;
    let r = table.shape().rows().to_string();
    let c = table.shape().cols().to_string();
    for (o, a, cnt) in table.entries() {
        let (o, a, cnt) = (o.to_string(), a.to_string(), cnt.to_string());
        wtr.write_record([&r, &c, &o, &a, &cnt])?;
    }
    wtr.write_record([DONE_SENTINEL])?;
    wtr.flush()?;
    Ok(())
}
