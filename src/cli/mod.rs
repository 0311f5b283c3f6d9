//! Command-line interface for fold-relay.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **fold**: Predict a structure with ESMFold or Boltz-2 and report per-residue pLDDT
//! - **plddt**: Extract per-residue pLDDT from a local PDB or mmCIF file
//! - **serve**: Start the HTTP relay
//!
//! ## Usage
//!
//! ```text
//! # Fold with ESMFold
//! NVIDIA_API_KEY=nvapi-... fold-relay fold esmfold --sequence MKTAYIAKQR
//!
//! # Fold with Boltz-2 and a ligand, saving the structure
//! fold-relay fold boltz2 --sequence MKTAYIAKQR --ligand "CC(=O)O" --output model.cif
//!
//! # Score a local structure
//! fold-relay plddt model.pdb --format tsv
//!
//! # Start the relay
//! fold-relay serve --port 8000
//! ```

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::client::config::{
    ClientConfig, DEFAULT_BOLTZ2_URL, DEFAULT_ESMFOLD_URL, DEFAULT_STATUS_URL,
};

pub mod fold;
pub mod plddt;

#[derive(Parser)]
#[command(name = "fold-relay")]
#[command(version)]
#[command(about = "Protein structure prediction relay with per-residue confidence")]
#[command(
    long_about = "fold-relay submits protein (and optional ligand) sequences to hosted structure prediction models and reports the predicted structure with a per-residue pLDDT profile.\n\nSupported models:\n- ESMFold (PDB output)\n- Boltz-2 (mmCIF output, optional ligand)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict a structure with a remote model
    Fold(fold::FoldArgs),

    /// Extract per-residue pLDDT from a structure file
    Plddt(plddt::PlddtArgs),

    /// Start the web server
    Serve(ServeArgs),
}

/// Provider endpoint and credential settings
#[derive(clap::Args, Clone, Debug)]
pub struct ProviderArgs {
    /// API key for the hosted models
    #[arg(long, env = "NVIDIA_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// ESMFold endpoint
    #[arg(long, env = "FOLD_RELAY_ESMFOLD_URL", default_value = DEFAULT_ESMFOLD_URL)]
    pub esmfold_url: String,

    /// Boltz-2 endpoint
    #[arg(long, env = "FOLD_RELAY_BOLTZ2_URL", default_value = DEFAULT_BOLTZ2_URL)]
    pub boltz2_url: String,

    /// Status endpoint base for deferred jobs
    #[arg(long, env = "FOLD_RELAY_STATUS_URL", default_value = DEFAULT_STATUS_URL)]
    pub status_url: String,

    /// Timeout for each submit or poll request, in seconds
    #[arg(long, default_value = "400")]
    pub request_timeout_secs: u64,

    /// Delay between status queries, in seconds
    #[arg(long, default_value = "5")]
    pub poll_interval_secs: u64,

    /// Give up after this many status queries (default: unbounded)
    #[arg(long, env = "FOLD_RELAY_MAX_POLLS")]
    pub max_polls: Option<u32>,

    /// Give up after polling for this many seconds (default: unbounded)
    #[arg(long, env = "FOLD_RELAY_MAX_WAIT_SECS")]
    pub max_wait_secs: Option<u64>,

    /// Log raw provider responses
    #[arg(long, env = "FOLD_RELAY_DEBUG")]
    pub debug: bool,
}

impl ProviderArgs {
    #[must_use]
    pub fn to_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_key.clone())
            .with_esmfold_url(&self.esmfold_url)
            .with_boltz2_url(&self.boltz2_url)
            .with_status_url(&self.status_url)
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_poll_interval(Duration::from_secs(self.poll_interval_secs))
            .with_max_polls(self.max_polls)
            .with_max_wait(self.max_wait_secs.map(Duration::from_secs))
            .with_debug(self.debug)
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_fold_boltz2() {
        let cli = Cli::try_parse_from([
            "fold-relay",
            "fold",
            "boltz2",
            "--sequence",
            "MKT",
            "--ligand",
            "CCO",
            "--max-polls",
            "12",
            "--format",
            "json",
        ])
        .unwrap();

        assert!(matches!(cli.format, OutputFormat::Json));
        let Commands::Fold(args) = cli.command else {
            panic!("expected fold command");
        };
        let fold::FoldModel::Boltz2(boltz) = args.model else {
            panic!("expected boltz2");
        };
        assert_eq!(boltz.ligand.as_deref(), Some("CCO"));
        assert_eq!(boltz.provider.max_polls, Some(12));
    }

    #[test]
    fn test_provider_args_to_config() {
        let cli = Cli::try_parse_from([
            "fold-relay",
            "serve",
            "--api-key",
            "k",
            "--status-url",
            "http://localhost:1/status",
            "--poll-interval-secs",
            "2",
            "--max-wait-secs",
            "60",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve command");
        };

        let config = args.provider.to_config();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.status_url, "http://localhost:1/status");
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.max_wait, Some(Duration::from_secs(60)));
        assert!(config.max_polls.is_none());
    }
}
