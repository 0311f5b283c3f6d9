//! HTTP relay for browser and service clients.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8000
//! fold-relay serve
//!
//! # Bind to all interfaces with polling bounded to 30 minutes
//! fold-relay serve --address 0.0.0.0 --max-wait-secs 1800
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /api/v1/protein_fold/health` - Liveness check
//! - `POST /api/v1/protein_fold/esmfold` - Fold `{"sequence"}` with ESMFold
//! - `POST /api/v1/protein_fold/boltz2` - Fold `{"sequence", "ligand_smiles"?, ...}` with Boltz-2
//!
//! Successful responses carry `{"results": [FoldResult]}`; failures carry
//! `{"error", "error_type", "details"}` with the matching HTTP status.

pub mod server;
