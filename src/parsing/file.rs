//! Reading structure files from disk.
//!
//! Supports plain and gzip-compressed `.pdb`, `.ent`, `.cif`, and `.mmcif` files.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read a structure file into memory, decompressing gzip input
///
/// # Errors
///
/// Returns an IO error if the file cannot be opened, decompressed, or is not valid UTF-8.
pub fn read_structure_file(path: &Path) -> std::io::Result<String> {
    let file = std::fs::File::open(path)?;
    let mut text = String::new();

    if is_gzipped(path) {
        GzDecoder::new(file).read_to_string(&mut text)?;
    } else {
        std::io::BufReader::new(file).read_to_string(&mut text)?;
    }

    Ok(text)
}
