use std::io::Write;

use crate::error::CliError;
use crate::output::SequenceReport;

pub fn write_regions_header<W: Write>(writer: &mut W) -> Result<(), CliError> {
    writeln!(writer, "#id\tkind\tstart\tend\tlength\tsubsequence")?;
    Ok(())
}

/// Write one sequence as a summary comment followed by its regions
pub fn write_regions_format<W: Write>(
    writer: &mut W,
    report: &SequenceReport<'_>,
) -> Result<(), CliError> {
    let result = report.result;
    writeln!(
        writer,
        "# {} length={} log_likelihood={:.6} coding={} non_coding={}",
        report.id,
        result.len(),
        result.log_likelihood,
        result.coding_count,
        result.non_coding_count
    )?;

    for region in result.regions() {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            report.id, region.kind, region.start, region.end, region.length, region.subsequence
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnahmm_core::DnaHmmAnalyzer;

    #[test]
    fn test_regions_block() {
        let result = DnaHmmAnalyzer::default().analyze_regions("ATGCAT").unwrap();
        let report = SequenceReport {
            number: 1,
            id: "chr1",
            description: None,
            result: &result,
        };
        let mut buffer = Vec::new();
        write_regions_format(&mut buffer, &report).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "# chr1 length=6 log_likelihood=-8.296395 coding=1 non_coding=2"
        );
        assert_eq!(lines[1], "chr1\tnon-coding\t0\t1\t2\tAT");
        assert_eq!(lines[2], "chr1\tcoding\t2\t3\t2\tGC");
        assert_eq!(lines[3], "chr1\tnon-coding\t4\t5\t2\tAT");
    }

    #[test]
    fn test_regions_block_empty_sequence() {
        let result = DnaHmmAnalyzer::default().analyze_regions("").unwrap();
        let report = SequenceReport {
            number: 1,
            id: "empty",
            description: None,
            result: &result,
        };
        let mut buffer = Vec::new();
        write_regions_format(&mut buffer, &report).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "# empty length=0 log_likelihood=0.000000 coding=0 non_coding=0\n"
        );
    }
}
