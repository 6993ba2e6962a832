use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::models::AccountInfo;
use crate::source::OcrTextSource;

const SIDECAR_FILE_NAME: &str = "ocr.txt";

/// Reads first-page OCR text that was saved next to the extracted tables.
///
/// For a statement directory the text lives in `ocr.txt`; for a single table
/// file `statement.csv` it lives in `statement.txt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarOcrSource;

impl OcrTextSource for SidecarOcrSource {
    fn first_page_text(&self, document: &Path, resolution_hint: u32) -> Option<String> {
        let path = sidecar_path(document).filter(|path| path.is_file())?;

        debug!("Reading OCR text for [{}] rendered at {resolution_hint} dpi from [{}]", document.display(), path.display());

        fs::read_to_string(&path)
            .inspect_err(|error| debug!("OCR text at [{}] is unreadable: {error}", path.display()))
            .ok()
    }
}

fn sidecar_path(document: &Path) -> Option<PathBuf> {
    if document.is_dir() {
        return Some(document.join(SIDECAR_FILE_NAME));
    }

    document.file_stem().map(|_| document.with_extension("txt"))
}

fn account_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Account\s+Number[:\s]*(\d+)").expect("account number regex"))
}

fn holder_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)Account\s+Holder(?:'s|s)?\s+Name[:\t ]*([A-Z][A-Z \t]*)").expect("holder name regex")
    })
}

/// Pulls the account holder and number out of first-page OCR text. Missing labels yield `None`.
pub fn extract_account_info(text: &str) -> AccountInfo {
    let capture = |re: &Regex| {
        re.captures(text)
            .and_then(|captures| captures.get(1))
            .map(|value| value.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
    };

    AccountInfo {
        holder_name: capture(holder_name_re()),
        account_number: capture(account_number_re())
    }
}
