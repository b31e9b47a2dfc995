//! # dnahmm - Coding / Non-coding DNA Segmentation
//!
//! A command-line interface for the dnahmm Hidden Markov Model analyzer.
//!
//! ## Usage
//!
//! ```bash
//! # Segment every sequence of a FASTA file with the GC-content preset
//! dnahmm -i genome.fasta -o regions.tsv
//!
//! # Output in GFF format
//! dnahmm -i genome.fasta -f gff -o regions.gff
//!
//! # Analyze one sequence given on the command line
//! dnahmm -s ATGCATGCAT
//!
//! # Custom model, two coding states, four threads
//! dnahmm -i contigs.fasta -m model.json -c exon1,exon2 -j 4
//! ```
//!
//! ## Options
//!
//! - `-i, --input <FILE>`: Input FASTA file (default: stdin)
//! - `-s, --sequence <SEQ>`: Analyze a single sequence instead of FASTA input
//! - `-o, --output <FILE>`: Output file (default: stdout)
//! - `-m, --model <FILE>`: JSON model file (default: GC-content preset)
//! - `-c, --coding <LIST>`: Comma-separated coding states
//! - `-f, --format <FORMAT>`: Output format: regions, gff, positions (default: regions)
//! - `--ignore-case`: Accept lowercase bases
//! - `-j, --threads <N>`: Worker threads (default: all cores)
//! - `-q, --quiet`: Suppress progress messages

mod error;
mod io;
mod model_file;
mod output;

use std::fs::File;
use std::io::{BufWriter, Write};

use clap::{Arg, ArgAction, Command};
use dnahmm_core::config::AnalyzerConfig;
use dnahmm_core::model::presets;
use dnahmm_core::DnaHmmAnalyzer;

use crate::error::CliError;
use crate::io::{read_fasta_file, read_fasta_stdin, SequenceRecord};
use crate::model_file::ModelFile;
use crate::output::{write_header, write_results, OutputFormat, SequenceReport};

fn cli() -> Command {
    Command::new("dnahmm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Coding / non-coding DNA segmentation with a Hidden Markov Model")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Input FASTA file (default: stdin)"),
        )
        .arg(
            Arg::new("sequence")
                .short('s')
                .long("sequence")
                .value_name("SEQ")
                .conflicts_with("input")
                .help("Analyze a single sequence given on the command line"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output file (default: stdout)"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("FILE")
                .help("JSON model file (default: GC-content preset)"),
        )
        .arg(
            Arg::new("coding")
                .short('c')
                .long("coding")
                .value_name("LIST")
                .help("Comma-separated coding states (default: from model file, or H)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format: regions, gff, positions")
                .default_value("regions"),
        )
        .arg(
            Arg::new("ignore-case")
                .long("ignore-case")
                .action(ArgAction::SetTrue)
                .help("Accept lowercase bases"),
        )
        .arg(
            Arg::new("threads")
                .short('j')
                .long("threads")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Number of worker threads (default: all cores)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Quiet mode"),
        )
}

/// Main entry point for the dnahmm CLI application.
///
/// Parses command-line arguments, builds the model and analyzer, analyzes the
/// input sequences in parallel and writes results in the requested format.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map_or(Ok(OutputFormat::default()), |s| s.parse())?;
    let quiet = matches.get_flag("quiet");

    let (model, file_coding_states) = match matches.get_one::<String>("model") {
        Some(path) => {
            let file = ModelFile::from_path(path)?;
            (file.to_model()?, file.coding_states)
        }
        None => (presets::gc_content()?, None),
    };

    let coding_states = match matches.get_one::<String>("coding") {
        Some(list) => parse_coding_list(list)?,
        None => file_coding_states.unwrap_or_else(|| AnalyzerConfig::default().coding_states),
    };

    let config = AnalyzerConfig {
        coding_states,
        ignore_case: matches.get_flag("ignore-case"),
        quiet,
        num_threads: matches.get_one::<usize>("threads").copied(),
    };
    let analyzer = DnaHmmAnalyzer::new(model, config)?;

    let records = if let Some(sequence) = matches.get_one::<String>("sequence") {
        vec![SequenceRecord::inline(sequence)]
    } else if let Some(input_file) = matches.get_one::<String>("input") {
        read_fasta_file(input_file)?
    } else {
        read_fasta_stdin()?
    };

    let sequences: Vec<&str> = records.iter().map(|r| r.sequence.as_str()).collect();
    let results = analyzer.analyze_batch(&sequences);

    let mut writer: Box<dyn Write> = if let Some(output_file) = matches.get_one::<String>("output")
    {
        Box::new(BufWriter::new(File::create(output_file)?))
    } else {
        Box::new(BufWriter::new(std::io::stdout()))
    };

    write_header(&mut writer, format)?;
    let mut coding_regions = 0;
    for (number, (record, result)) in records.iter().zip(results).enumerate() {
        let result = result.map_err(|e| format!("sequence '{}': {e}", record.id))?;
        coding_regions += result.coding_count;
        let report = SequenceReport {
            number: number + 1,
            id: &record.id,
            description: record.description.as_deref(),
            result: &result,
        };
        write_results(&mut writer, &report, format)?;
    }
    writer.flush()?;

    if !quiet {
        eprintln!(
            "Analysis complete! Found {} coding regions in {} sequences.",
            coding_regions,
            records.len()
        );
    }

    Ok(())
}

fn parse_coding_list(list: &str) -> Result<Vec<String>, CliError> {
    let states: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if states.is_empty() {
        return Err(CliError::ParseError(
            "--coding needs at least one state name".to_string(),
        ));
    }
    Ok(states)
}
