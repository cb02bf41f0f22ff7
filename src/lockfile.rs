use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;

use crate::models::PackageRecord;

/// Accumulator for the `[[package]]` block currently being scanned.
#[derive(Debug, Default)]
struct Block {
    name: Option<String>,
    version: Option<String>,
    source: Option<String>,
}

impl Block {
    /// A block is a valid record only once it has both a name and a version.
    fn finish(self) -> Option<(String, String, Option<String>)> {
        match (self.name, self.version) {
            (Some(name), Some(version)) => Some((name, version, self.source)),
            _ => None,
        }
    }
}

/// Scan a `Cargo.lock` for third-party package records.
///
/// This is a deliberately reduced line-oriented scan, not a full TOML parse:
/// only `name`, `version` and `source` are recognized, and block boundaries
/// exist only at `[[package]]` marker lines. A missing lockfile yields an
/// empty list rather than an error.
///
/// Filtering applied to the raw blocks, in order:
/// - duplicate `(name, version)` keys keep the first occurrence only;
/// - records without a `source` (workspace members) are dropped;
/// - records whose name starts with any of `internal_prefixes` are dropped.
pub fn parse_lockfile(lock_path: &Path, internal_prefixes: &[String]) -> Result<Vec<PackageRecord>> {
    if !lock_path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(lock_path)?;

    let mut raw = Vec::new();
    let mut current: Option<Block> = None;

    for line in content.lines() {
        let line = line.trim();
        if line == "[[package]]" {
            if let Some(block) = current.take() {
                raw.extend(block.finish());
            }
            current = Some(Block::default());
            continue;
        }
        let Some(block) = current.as_mut() else {
            continue;
        };
        if let Some(value) = line.strip_prefix("name = ") {
            block.name = Some(unquote(value));
        } else if let Some(value) = line.strip_prefix("version = ") {
            block.version = Some(unquote(value));
        } else if let Some(value) = line.strip_prefix("source = ") {
            block.source = Some(unquote(value));
        }
    }
    if let Some(block) = current.take() {
        raw.extend(block.finish());
    }

    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for (name, version, source) in raw {
        if !seen.insert((name.clone(), version.clone())) {
            continue;
        }
        let Some(source) = source.filter(|s| !s.is_empty()) else {
            continue;
        };
        if internal_prefixes.iter().any(|p| name.starts_with(p.as_str())) {
            continue;
        }
        records.push(PackageRecord { name, version, source });
    }

    Ok(records)
}

fn unquote(value: &str) -> String {
    value.trim().trim_matches('"').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_lock(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_lockfile_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records = parse_lockfile(&dir.path().join("Cargo.lock"), &[]).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_no_package_markers_is_empty() {
        let lock = write_lock("version = 3\n\n[metadata]\nfoo = \"bar\"\n");
        let records = parse_lockfile(lock.path(), &[]).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parses_name_version_source() {
        let lock = write_lock(
            r#"
version = 3

[[package]]
name = "serde"
version = "1.0.150"
source = "registry+https://github.com/rust-lang/crates.io-index"
checksum = "abc123"
"#,
        );
        let records = parse_lockfile(lock.path(), &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "serde");
        assert_eq!(records[0].version, "1.0.150");
        assert!(records[0].source.starts_with("registry+"));
    }

    #[test]
    fn test_workspace_members_dropped() {
        let lock = write_lock(
            r#"
[[package]]
name = "my-app"
version = "0.1.0"

[[package]]
name = "tokio"
version = "1.25.0"
source = "registry+https://github.com/rust-lang/crates.io-index"
"#,
        );
        let records = parse_lockfile(lock.path(), &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "tokio");
    }

    #[test]
    fn test_internal_prefix_dropped() {
        let lock = write_lock(
            r#"
[[package]]
name = "acme-core"
version = "0.3.0"
source = "git+https://example.com/acme/acme.git"

[[package]]
name = "anyhow"
version = "1.0.80"
source = "registry+https://github.com/rust-lang/crates.io-index"
"#,
        );
        let records = parse_lockfile(lock.path(), &["acme-".to_string()]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "anyhow");
    }

    #[test]
    fn test_duplicate_key_keeps_first() {
        let lock = write_lock(
            r#"
[[package]]
name = "log"
version = "0.4.20"
source = "registry+https://github.com/rust-lang/crates.io-index"

[[package]]
name = "log"
version = "0.4.20"
source = "git+https://github.com/rust-lang/log.git"
"#,
        );
        let records = parse_lockfile(lock.path(), &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].source.starts_with("registry+"));
    }

    #[test]
    fn test_block_without_version_dropped() {
        let lock = write_lock(
            r#"
[[package]]
name = "mystery"
source = "registry+https://github.com/rust-lang/crates.io-index"

[[package]]
name = "regex"
version = "1.10.0"
source = "registry+https://github.com/rust-lang/crates.io-index"
"#,
        );
        let records = parse_lockfile(lock.path(), &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "regex");
    }

    #[test]
    fn test_final_block_finalized_at_eof() {
        let lock = write_lock(
            "[[package]]\nname = \"bytes\"\nversion = \"1.5.0\"\nsource = \"registry+https://example\"",
        );
        let records = parse_lockfile(lock.path(), &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "bytes");
    }
}
