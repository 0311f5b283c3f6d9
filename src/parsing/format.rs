use std::path::Path;

use crate::core::types::StructureFormat;

/// Block header that opens every mmCIF data block
pub const MMCIF_DATA_BLOCK_MARKER: &str = "data_";

/// Detect the structure format from the leading content.
///
/// Text whose first non-whitespace content is an mmCIF `data_` block header is
/// mmCIF; everything else is treated as fixed-column PDB.
#[must_use]
pub fn detect_format(content: &str) -> StructureFormat {
    if content.trim_start().starts_with(MMCIF_DATA_BLOCK_MARKER) {
        StructureFormat::Mmcif
    } else {
        StructureFormat::Pdb
    }
}

/// Detect format from a filename's extension, ignoring a trailing `.gz` or `.bgz`
#[must_use]
pub fn detect_format_from_filename(filename: &Path) -> Option<StructureFormat> {
    let lower_name = filename.to_string_lossy().to_lowercase();
    let stem = lower_name
        .strip_suffix(".gz")
        .or_else(|| lower_name.strip_suffix(".bgz"))
        .unwrap_or(&lower_name);

    let extension = Path::new(stem).extension()?.to_str()?;
    match extension {
        "pdb" | "ent" => Some(StructureFormat::Pdb),
        "cif" | "mmcif" => Some(StructureFormat::Mmcif),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mmcif() {
        assert_eq!(detect_format("data_model\n#\n"), StructureFormat::Mmcif);
        assert_eq!(
            detect_format("\n\n  data_boltz\nloop_\n"),
            StructureFormat::Mmcif
        );
    }

    #[test]
    fn test_detect_pdb() {
        assert_eq!(
            detect_format("HEADER    PROTEIN\nATOM      1  N   MET A   1"),
            StructureFormat::Pdb
        );
        assert_eq!(detect_format(""), StructureFormat::Pdb);
        // Marker must lead the content
        assert_eq!(detect_format("REMARK data_\n"), StructureFormat::Pdb);
    }

    #[test]
    fn test_detect_from_filename() {
        assert_eq!(
            detect_format_from_filename(Path::new("model.PDB")),
            Some(StructureFormat::Pdb)
        );
        assert_eq!(
            detect_format_from_filename(Path::new("model.cif.gz")),
            Some(StructureFormat::Mmcif)
        );
        assert_eq!(
            detect_format_from_filename(Path::new("model.cif.bgz")),
            Some(StructureFormat::Mmcif)
        );
        assert_eq!(
            detect_format_from_filename(Path::new("model.pdb.BGZ")),
            Some(StructureFormat::Pdb)
        );
        assert_eq!(detect_format_from_filename(Path::new("model.txt")), None);
    }
}
