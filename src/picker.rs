use std::path::Path;

use anyhow::Result;
use regex::Regex;

use crate::models::LicenseFile;

/// Pick license-like files from the top level of a crate directory.
///
/// A name matches only when a recognized stem (`license`, `licence`,
/// `copying`, `copyright`, `unlicense`) is followed by a `.` or the end of
/// the name — `LICENSE` and `LICENSE.txt` match, `LICENSE-MIT` does not.
/// Subdirectories are never entered. Matches are ordered with
/// `license`/`licence` names first, then alphabetically case-insensitive.
///
/// Any filesystem error while listing yields an empty list; the crate then
/// simply contributes nothing to the notice file.
pub fn pick_license_files(crate_dir: &Path) -> Vec<LicenseFile> {
    try_pick(crate_dir).unwrap_or_default()
}

fn try_pick(crate_dir: &Path) -> Result<Vec<LicenseFile>> {
    let pattern = Regex::new(r"(?i)^(license|licence|copying|copyright|unlicense)(\.|$)")?;

    let mut files = Vec::new();
    for entry in std::fs::read_dir(crate_dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if pattern.is_match(&name) {
            files.push(LicenseFile {
                name,
                path: entry.path(),
            });
        }
    }

    files.sort_by_key(|f| {
        let lower = f.name.to_lowercase();
        let canonical = lower.starts_with("license") || lower.starts_with("licence");
        (u8::from(!canonical), lower)
    });

    Ok(files)
}
