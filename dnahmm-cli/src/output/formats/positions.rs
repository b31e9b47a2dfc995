use std::io::Write;

use crate::error::CliError;
use crate::output::SequenceReport;

pub fn write_positions_header<W: Write>(writer: &mut W) -> Result<(), CliError> {
    writeln!(writer, "#id\tposition\tstate\tconfidence")?;
    Ok(())
}

pub fn write_positions_format<W: Write>(
    writer: &mut W,
    report: &SequenceReport<'_>,
) -> Result<(), CliError> {
    let result = report.result;
    for (position, (state, confidence)) in result
        .state_sequence
        .iter()
        .zip(&result.confidences)
        .enumerate()
    {
        writeln!(writer, "{}\t{}\t{}\t{:.4}", report.id, position, state, confidence)?;
    }
    Ok(())
}
