use std::io::Write;

use dnahmm_core::constants::VERSION;
use dnahmm_core::types::RegionKind;

use crate::error::CliError;
use crate::output::SequenceReport;

pub fn write_gff_header<W: Write>(writer: &mut W) -> Result<(), CliError> {
    writeln!(writer, "##gff-version 3")?;
    Ok(())
}

/// Write results in GFF format, one feature per region
pub fn write_gff_format<W: Write>(
    writer: &mut W,
    report: &SequenceReport<'_>,
) -> Result<(), CliError> {
    let result = report.result;
    match report.description {
        Some(desc) => writeln!(
            writer,
            "# Sequence Data: seqnum={};seqlen={};seqhdr=\"{} {}\"",
            report.number,
            result.len(),
            report.id,
            desc
        )?,
        None => writeln!(
            writer,
            "# Sequence Data: seqnum={};seqlen={};seqhdr=\"{}\"",
            report.number,
            result.len(),
            report.id
        )?,
    }
    writeln!(
        writer,
        "# Model Data: version=dnahmm.v{};log_likelihood={:.6};coding_fraction={:.4}",
        VERSION,
        result.log_likelihood,
        result.coding_fraction()
    )?;

    for (k, region) in result.regions().into_iter().enumerate() {
        let feature = match region.kind {
            RegionKind::Coding => "coding_region",
            RegionKind::NonCoding => "non_coding_region",
        };
        // GFF3 coordinates are 1-based, inclusive
        writeln!(
            writer,
            "{}\tdnahmm_v{}\t{}\t{}\t{}\t{:.3}\t.\t.\tID={}_r{};length={}",
            report.id,
            VERSION,
            feature,
            region.start + 1,
            region.end + 1,
            result.mean_confidence(region),
            report.id,
            k + 1,
            region.length
        )?;
    }
    Ok(())
}
