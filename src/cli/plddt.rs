use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::core::types::{mean_score, ResidueScore, StructureFormat};
use crate::parsing::confidence::extract_residue_scores;
use crate::parsing::file::read_structure_file;
use crate::parsing::format::{detect_format, detect_format_from_filename};

#[derive(Args)]
pub struct PlddtArgs {
    /// Structure file (.pdb, .ent, .cif, .mmcif, optionally .gz)
    #[arg(required = true)]
    pub input: PathBuf,
}

#[derive(Serialize)]
struct PlddtReport<'a> {
    file: String,
    format: StructureFormat,
    mean_plddt: Option<f64>,
    residues: &'a [ResidueScore],
}

pub fn run(args: PlddtArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let text = read_structure_file(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let detected = detect_format(&text);
    if let Some(expected) = detect_format_from_filename(&args.input) {
        if expected != detected {
            tracing::warn!(
                "{} looks like {} by name but {} by content; using content",
                args.input.display(),
                expected,
                detected
            );
        }
    }

    let residues = extract_residue_scores(&text);
    let plddt: Vec<f64> = residues.iter().map(|r| r.plddt).collect();
    let mean_plddt = mean_score(&plddt);

    if verbose {
        eprintln!(
            "Parsed {} as {}: {} residues",
            args.input.display(),
            detected,
            residues.len()
        );
    }

    match format {
        OutputFormat::Text => {
            println!("File: {}", args.input.display());
            println!("Format: {detected}");
            println!("Residues: {}", residues.len());
            match mean_plddt {
                Some(mean) => println!("Mean pLDDT: {mean:.2}"),
                None => println!("Mean pLDDT: no confidence data available"),
            }
            for score in &residues {
                println!("  {:>5}  {:>6.2}", score.residue.0, score.plddt);
            }
        }
        OutputFormat::Json => {
            let report = PlddtReport {
                file: args.input.display().to_string(),
                format: detected,
                mean_plddt,
                residues: &residues,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Tsv => {
            println!("residue\tplddt\tatoms");
            for score in &residues {
                println!("{}\t{:.2}\t{}", score.residue, score.plddt, score.atoms);
            }
        }
    }

    Ok(())
}
