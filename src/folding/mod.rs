//! Orchestration of folding requests.
//!
//! Builds provider-specific payloads, resolves them through the
//! [`InvocationClient`](crate::client::InvocationClient), and assembles the
//! [`FoldResult`](crate::core::result::FoldResult) with per-residue pLDDT.
//!
//! | Model   | Endpoint behaviour | Structure format |
//! |---------|--------------------|------------------|
//! | ESMFold | synchronous        | PDB              |
//! | Boltz-2 | usually deferred   | mmCIF            |

pub mod boltz2;
pub mod esmfold;
pub mod service;

pub use service::FoldingService;
