use std::path::Path;

use anyhow::{Context, Result};

use crate::models::CrateOutcome;

const SEPARATOR_WIDTH: usize = 79;

/// Render the aggregate notice file.
///
/// Only crates with at least one picked license file contribute a block;
/// everything else is omitted without comment. Blocks are ordered by
/// `(name lowercased, version)`. Each block is a separator line, a
/// `name version` line, then per license file a `[ filename ]` marker, a
/// blank line, and the file content trimmed of surrounding whitespace with
/// two trailing newlines. A license file that cannot be read is skipped;
/// the crate's other files still appear.
pub fn render(outcomes: &[CrateOutcome], product: &str) -> String {
    let mut bundled: Vec<&CrateOutcome> = outcomes.iter().filter(|o| o.bundled()).collect();
    bundled.sort_by_key(|o| (o.name.to_lowercase(), o.version.clone()));

    let mut out = String::new();
    out.push_str(&format!(
        "This file aggregates license texts of third-party Rust crates bundled in {product} binaries.\n\n"
    ));

    for outcome in bundled {
        out.push_str(&"-".repeat(SEPARATOR_WIDTH));
        out.push('\n');
        out.push_str(&format!("{} {}\n", outcome.name, outcome.version));
        for file in &outcome.license_files {
            // Lossy read: license files in the wild are not always UTF-8.
            let Ok(bytes) = std::fs::read(&file.path) else {
                continue;
            };
            let text = String::from_utf8_lossy(&bytes);
            out.push_str(&format!("[ {} ]\n\n", file.name));
            out.push_str(text.trim());
            out.push_str("\n\n");
        }
    }

    out
}

/// Write the rendered notice wholesale, overwriting any prior content.
/// This is the only stage allowed to fail the run.
pub fn write(out_path: &Path, content: &str) -> Result<()> {
    std::fs::write(out_path, content)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CrateDir, CrateOrigin, LicenseFile};
    use std::path::PathBuf;

    fn outcome(name: &str, version: &str, files: Vec<LicenseFile>) -> CrateOutcome {
        CrateOutcome {
            name: name.to_string(),
            version: version.to_string(),
            crate_dir: Some(CrateDir {
                path: PathBuf::from("/cache"),
                origin: CrateOrigin::Registry,
            }),
            license_files: files,
        }
    }

    fn license(dir: &tempfile::TempDir, name: &str, content: &str) -> LicenseFile {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        LicenseFile {
            name: name.to_string(),
            path,
        }
    }

    #[test]
    fn test_header_only_when_nothing_bundled() {
        let rendered = render(&[], "acme");
        assert_eq!(
            rendered,
            "This file aggregates license texts of third-party Rust crates bundled in acme binaries.\n\n"
        );
    }

    #[test]
    fn test_block_layout() {
        let dir = tempfile::tempdir().unwrap();
        let outcomes = vec![outcome(
            "foo",
            "1.2.3",
            vec![license(&dir, "LICENSE", "MIT\n")],
        )];

        let rendered = render(&outcomes, "acme");
        assert!(rendered.contains(&"-".repeat(79)));
        assert!(rendered.contains("\nfoo 1.2.3\n"));
        assert!(rendered.contains("[ LICENSE ]\n\nMIT\n\n"));
    }

    #[test]
    fn test_content_trimmed_with_two_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let outcomes = vec![outcome(
            "foo",
            "1.0.0",
            vec![license(&dir, "LICENSE", "\n\n  MIT  \n\n")],
        )];

        let rendered = render(&outcomes, "acme");
        assert!(rendered.ends_with("[ LICENSE ]\n\nMIT\n\n"));
    }

    #[test]
    fn test_sorted_by_lowercased_name_then_version() {
        let dir = tempfile::tempdir().unwrap();
        let outcomes = vec![
            outcome("Zeta", "0.1.0", vec![license(&dir, "LICENSE", "z")]),
            outcome("alpha", "2.0.0", vec![license(&dir, "LICENSE.txt", "a2")]),
            outcome("alpha", "1.0.0", vec![license(&dir, "COPYING", "a1")]),
        ];

        let rendered = render(&outcomes, "acme");
        let alpha1 = rendered.find("alpha 1.0.0").unwrap();
        let alpha2 = rendered.find("alpha 2.0.0").unwrap();
        let zeta = rendered.find("Zeta 0.1.0").unwrap();
        assert!(alpha1 < alpha2 && alpha2 < zeta);
    }

    #[test]
    fn test_unreadable_file_skipped_others_kept() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = vec![license(&dir, "LICENSE", "MIT")];
        files.push(LicenseFile {
            name: "COPYING".to_string(),
            path: dir.path().join("missing-COPYING"),
        });
        let outcomes = vec![outcome("foo", "1.0.0", files)];

        let rendered = render(&outcomes, "acme");
        assert!(rendered.contains("[ LICENSE ]"));
        assert!(!rendered.contains("[ COPYING ]"));
        assert!(rendered.contains("foo 1.0.0"));
    }

    #[test]
    fn test_unbundled_crate_omitted() {
        let outcomes = vec![CrateOutcome {
            name: "ghost".to_string(),
            version: "0.0.1".to_string(),
            crate_dir: None,
            license_files: Vec::new(),
        }];

        let rendered = render(&outcomes, "acme");
        assert!(!rendered.contains("ghost"));
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("THIRD-PARTY-LICENSES.txt");
        std::fs::write(&path, "stale").unwrap();

        write(&path, "fresh").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
    }
}
