use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};

use crate::cli::{OutputFormat, ProviderArgs};
use crate::core::request::{Boltz2Params, FoldingRequest};
use crate::core::result::FoldResult;
use crate::folding::FoldingService;

#[derive(Args)]
pub struct FoldArgs {
    #[command(subcommand)]
    pub model: FoldModel,
}

#[derive(Subcommand)]
pub enum FoldModel {
    /// Fold a protein with ESMFold
    Esmfold(EsmfoldArgs),

    /// Fold a protein (and optional ligand) with Boltz-2
    Boltz2(Boltz2Args),
}

#[derive(Args)]
pub struct EsmfoldArgs {
    /// Protein sequence (single-letter amino acid codes)
    #[arg(short, long)]
    pub sequence: String,

    /// Write the predicted structure to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

#[derive(Args)]
pub struct Boltz2Args {
    /// Protein sequence (single-letter amino acid codes)
    #[arg(short, long)]
    pub sequence: String,

    /// Ligand SMILES
    #[arg(short, long)]
    pub ligand: Option<String>,

    /// Recycling steps (1-10)
    #[arg(long, default_value = "1")]
    pub recycling_steps: u32,

    /// Sampling steps (1-100)
    #[arg(long, default_value = "50")]
    pub sampling_steps: u32,

    /// Diffusion samples (1-10)
    #[arg(long, default_value = "3")]
    pub diffusion_samples: u32,

    /// Write the predicted structure to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

pub fn run(args: FoldArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (request, provider, output) = match args.model {
        FoldModel::Esmfold(a) => (FoldingRequest::esmfold(&a.sequence)?, a.provider, a.output),
        FoldModel::Boltz2(a) => {
            let params = Boltz2Params {
                recycling_steps: a.recycling_steps,
                sampling_steps: a.sampling_steps,
                diffusion_samples: a.diffusion_samples,
            };
            (
                FoldingRequest::boltz2(&a.sequence, a.ligand.as_deref(), params)?,
                a.provider,
                a.output,
            )
        }
    };

    if provider.api_key.is_empty() {
        tracing::warn!("No API key configured; set NVIDIA_API_KEY or pass --api-key");
    }

    if verbose {
        eprintln!(
            "Submitting {} residues to {}",
            request.sequence().len(),
            request.model()
        );
    }

    let service = FoldingService::from_config(provider.to_config())?;
    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(service.fold(&request))?;

    if let Some(path) = &output {
        std::fs::write(path, &result.structure)
            .with_context(|| format!("Failed to write structure to {}", path.display()))?;
        if verbose {
            eprintln!("Wrote {} structure to {}", result.format, path.display());
        }
    }

    match format {
        OutputFormat::Text => print_text_result(&request, &result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Tsv => print_tsv_result(&result),
    }

    Ok(())
}

fn print_text_result(request: &FoldingRequest, result: &FoldResult) {
    println!("{} prediction", request.model());
    println!("{}", "=".repeat(60));
    println!("  Sequence length: {}", request.sequence().len());
    if let Some(ligand) = request.ligand_smiles() {
        println!("  Ligand: {ligand}");
    }
    println!("  Structure format: {}", result.format);
    println!("  Scored residues: {}", result.plddt.len());

    match result.mean_plddt() {
        Some(mean) => println!("  Mean pLDDT: {mean:.2}"),
        None => println!("  Mean pLDDT: no confidence data available"),
    }

    if let Some(scores) = &result.confidence_scores {
        if !scores.is_empty() {
            let rendered: Vec<String> = scores.iter().map(|s| format!("{s:.3}")).collect();
            println!("  Confidence scores: {}", rendered.join(", "));
        }
    }

    if !result.plddt.is_empty() {
        println!("\nPer-residue pLDDT:");
        for (position, score) in result.plddt.iter().enumerate() {
            println!("  {:>5}  {score:>6.2}", position + 1);
        }
    }
}

fn print_tsv_result(result: &FoldResult) {
    println!("position\tplddt");
    for (position, score) in result.plddt.iter().enumerate() {
        println!("{}\t{score:.2}", position + 1);
    }
}
