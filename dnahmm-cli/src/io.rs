use std::fs::File;
use std::io::Read;
use std::path::Path;

use bio::io::fasta;

use crate::error::CliError;

/// Identifier given to a sequence passed inline with `--sequence`.
pub const INLINE_SEQUENCE_ID: &str = "seq1";

/// One input sequence with its FASTA identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub description: Option<String>,
    pub sequence: String,
}

impl SequenceRecord {
    pub fn inline(sequence: &str) -> Self {
        Self {
            id: INLINE_SEQUENCE_ID.to_string(),
            description: None,
            sequence: sequence.trim().to_string(),
        }
    }
}

/// Reads every record of a FASTA stream using rust-bio.
pub fn read_fasta<R: Read>(reader: R) -> Result<Vec<SequenceRecord>, CliError> {
    let reader = fasta::Reader::new(reader);
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| CliError::ParseError(e.to_string()))?;
        let sequence = std::str::from_utf8(record.seq())
            .map_err(|e| {
                CliError::ParseError(format!("sequence '{}' is not valid text: {e}", record.id()))
            })?
            .to_string();
        records.push(SequenceRecord {
            id: record.id().to_string(),
            description: record.desc().map(String::from),
            sequence,
        });
    }

    Ok(records)
}

pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>, CliError> {
    let file = File::open(path)?;
    read_fasta(file)
}

pub fn read_fasta_stdin() -> Result<Vec<SequenceRecord>, CliError> {
    read_fasta(std::io::stdin().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_fasta_basic() {
        let records = read_fasta(">test_sequence\nATCG\nGCTA\n".as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "test_sequence");
        assert_eq!(records[0].description, None);
        assert_eq!(records[0].sequence, "ATCGGCTA");
    }

    #[test]
    fn test_read_fasta_multiple_with_description() {
        let content = ">seq1 first one\nATCG\n>seq2\nGCTA\n>seq3\nTTAA\n";
        let records = read_fasta(content.as_bytes()).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["seq1", "seq2", "seq3"]);
        assert_eq!(records[0].description.as_deref(), Some("first one"));
        assert_eq!(records[2].sequence, "TTAA");
    }

    #[test]
    fn test_read_fasta_empty_input() {
        let records = read_fasta("".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_read_fasta_missing_header() {
        let result = read_fasta("ATCG\n".as_bytes());
        assert!(matches!(result, Err(CliError::ParseError(_))));
    }

    #[test]
    fn test_read_fasta_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, ">chr1\nGGCC\nAATT\n").unwrap();
        let records = read_fasta_file(file.path()).unwrap();
        assert_eq!(records[0].sequence, "GGCCAATT");
    }

    #[test]
    fn test_read_fasta_file_not_found() {
        let result = read_fasta_file("/nonexistent/path/to/file.fasta");
        assert!(matches!(result, Err(CliError::IoError(_))));
    }

    #[test]
    fn test_inline_record() {
        let record = SequenceRecord::inline("ATGCAT\n");
        assert_eq!(record.id, "seq1");
        assert_eq!(record.sequence, "ATGCAT");
    }
}
