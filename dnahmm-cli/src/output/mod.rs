//! Output formatting for analysis results.
//!
//! ## Supported Formats
//!
//! - **Regions**: tab-separated regions, 0-based inclusive coordinates
//! - **GFF3**: one feature per region, 1-based inclusive coordinates
//! - **Positions**: decoded state and confidence at every position
//!
//! Every format writes a header once with [`write_header`], then one block per
//! sequence with [`write_results`].

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use dnahmm_core::results::AnalysisResult;

use crate::error::CliError;

mod formats {
    pub mod gff;
    pub mod positions;
    pub mod regions;
}

use formats::{
    gff::{write_gff_format, write_gff_header},
    positions::{write_positions_format, write_positions_header},
    regions::{write_regions_format, write_regions_header},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab-separated region table
    #[default]
    Regions,
    /// General Feature Format version 3
    Gff,
    /// Per-position state and confidence table
    Positions,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regions" | "tsv" => Ok(Self::Regions),
            "gff" | "gff3" => Ok(Self::Gff),
            "positions" => Ok(Self::Positions),
            other => Err(CliError::ParseError(format!(
                "invalid output format '{other}' (expected regions, gff or positions)"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regions => write!(f, "regions"),
            Self::Gff => write!(f, "gff"),
            Self::Positions => write!(f, "positions"),
        }
    }
}

/// One analyzed sequence, as handed to the writers.
#[derive(Debug, Clone, Copy)]
pub struct SequenceReport<'a> {
    /// 1-based position of the sequence in the input
    pub number: usize,
    pub id: &'a str,
    /// FASTA description, if the header had one
    pub description: Option<&'a str>,
    pub result: &'a AnalysisResult,
}

/// Writes the file-level header of `format`.
pub fn write_header<W: Write>(writer: &mut W, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Regions => write_regions_header(writer),
        OutputFormat::Gff => write_gff_header(writer),
        OutputFormat::Positions => write_positions_header(writer),
    }
}

/// Writes the block of one sequence in `format`.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if writing fails.
pub fn write_results<W: Write>(
    writer: &mut W,
    report: &SequenceReport<'_>,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Regions => write_regions_format(writer, report),
        OutputFormat::Gff => write_gff_format(writer, report),
        OutputFormat::Positions => write_positions_format(writer, report),
    }
}
