//! Structure file parsers for per-residue confidence extraction.
//!
//! Prediction providers return structures in one of two text formats:
//!
//! - **PDB** (ESMFold): fixed-column `ATOM` records, pLDDT stored as a fraction
//!   in the temperature-factor column
//! - **mmCIF** (Boltz-2): an `_atom_site` loop, pLDDT stored in
//!   `B_iso_or_equiv` as either a fraction or a percentage
//!
//! The format is detected from the leading `data_` block header. Both branches
//! feed a shared [`confidence::ConfidenceAccumulator`] that averages readings per
//! residue and emits one score per residue in ascending residue order.
//!
//! ## Example
//!
//! ```rust
//! use fold_relay::parsing::confidence::extract_confidence;
//!
//! let cif = "data_model\nloop_\n_atom_site.label_seq_id\n_atom_site.B_iso_or_equiv\n1 0.9\n2 85.0\n";
//! assert_eq!(extract_confidence(cif), vec![90.0, 85.0]);
//! ```
//!
//! ## Normalization
//!
//! | Format | Rule |
//! |--------|------|
//! | PDB    | always `x 100` ([`pdb::pdb_fraction_to_percent`]) |
//! | mmCIF  | `x 100` only when `<= 1.0` ([`mmcif::mmcif_bfactor_to_percent`]) |

pub mod confidence;
pub mod file;
pub mod format;
pub mod mmcif;
pub mod pdb;
