//! Proposal export
//!
//! Layout and rendering happen entirely in memory. Only a fully rendered PDF
//! reaches the disk, written to a sibling `.part` file and renamed into
//! place, so a failed export never leaves a partial document behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ProposalConfig;
use crate::document::{LayoutEngine, ProposalDraft, render_pdf};
use crate::error::Result;

/// File name of an exported proposal: `Offre_Osmoz_Djoudi_Promotion.pdf`
pub fn export_file_name(prefix: &str, client: &str) -> String {
    let client = client
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['/', '\\'], "_");
    format!("{}_{}.pdf", prefix, client)
}

/// Lay out, render and write the proposal into `out_dir`.
///
/// Returns the path of the written file.
pub fn export_proposal(
    draft: &ProposalDraft,
    config: &ProposalConfig,
    out_dir: &Path,
) -> Result<PathBuf> {
    let document = LayoutEngine::default().layout(draft, config)?;
    let bytes = render_pdf(&document, config)?;
    debug!(
        pages = document.page_count(),
        bytes = bytes.len(),
        "Proposal rendered"
    );

    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(export_file_name(&config.file_prefix, &draft.client_name));
    write_staged(&path, |staging| fs::write(staging, &bytes))?;

    info!(
        path = %path.display(),
        reference = %draft.reference,
        pages = document.page_count(),
        "Proposal exported"
    );
    Ok(path)
}

/// Write through `<name>.pdf.part` and rename into place. On any failure the
/// staging file is removed, so `path` is either complete or absent.
fn write_staged<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    let staging = path.with_extension("pdf.part");
    let result = write(&staging).and_then(|()| fs::rename(&staging, path));
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::document::DocumentReference;
    use crate::error::QuoteError;
    use crate::selection::SelectionState;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn draft(client: &str) -> ProposalDraft {
        let selection = SelectionState::new(&Catalog::builtin(), client);
        ProposalDraft::with_reference(
            &selection,
            DocumentReference::new("OSM", 2026, 4821),
            NaiveDate::from_ymd_opt(2026, 10, 16).expect("date"),
        )
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name("Offre_Osmoz", "Djoudi Promotion"),
            "Offre_Osmoz_Djoudi_Promotion.pdf"
        );
        assert_eq!(export_file_name("Offre_Osmoz", "  A \t B  "), "Offre_Osmoz_A_B.pdf");
        assert_eq!(export_file_name("Offre_Osmoz", "../etc"), "Offre_Osmoz_.._etc.pdf");
    }

    #[test]
    fn test_export_writes_pdf() {
        let dir = tempdir().expect("tempdir");
        let path = export_proposal(&draft("Djoudi Promotion"), &ProposalConfig::default(), dir.path())
            .expect("export");

        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("Offre_Osmoz_Djoudi_Promotion.pdf")
        );
        let bytes = fs::read(&path).expect("read");
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(!path.with_extension("pdf.part").exists());
    }

    #[test]
    fn test_failed_layout_writes_nothing() {
        let dir = tempdir().expect("tempdir");
        let mut draft = draft("ACME");
        draft.phases[0].features = (0..300).map(|i| format!("Feature {}", i)).collect();

        let result = export_proposal(&draft, &ProposalConfig::default(), dir.path());
        assert!(matches!(result, Err(QuoteError::Layout(_))));
        assert_eq!(fs::read_dir(dir.path()).expect("dir").count(), 0);
    }

    #[test]
    fn test_interrupted_write_removes_staging_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("Offre_Osmoz_ACME.pdf");

        let result = write_staged(&path, |staging| {
            fs::write(staging, b"%PDF-1.7 truncated")?;
            Err(io::Error::other("disk full"))
        });

        assert!(result.is_err());
        assert!(!path.exists());
        assert!(!path.with_extension("pdf.part").exists());
        assert_eq!(fs::read_dir(dir.path()).expect("dir").count(), 0);
    }
}
