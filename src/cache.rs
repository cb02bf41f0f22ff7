use std::path::{Path, PathBuf};

use regex::RegexBuilder;

use crate::models::{CrateDir, CrateOrigin};

/// Resolve the Cargo cache root: explicit override, then `$CARGO_HOME`,
/// then `.cargo` under the user's home directory.
pub fn cargo_home(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path.to_path_buf());
    }
    if let Ok(env) = std::env::var("CARGO_HOME") {
        if !env.is_empty() {
            return Some(PathBuf::from(env));
        }
    }
    dirs::home_dir().map(|home| home.join(".cargo"))
}

/// Locate the extracted source directory of `name`-`version` in the cache.
///
/// Registry layout is `<cargo_home>/registry/src/<index>/<name>-<version>`;
/// every index directory is checked for an exact match. If none is found,
/// falls back to `<cargo_home>/git/checkouts`, matching checkout directory
/// names case-insensitively on the crate name and returning the first
/// subdirectory inside a match. The git fallback does not verify the
/// version; callers get the checkout that happens to be on disk.
pub fn find_crate_dir(cargo_home: &Path, name: &str, version: &str) -> Option<CrateDir> {
    let src_root = cargo_home.join("registry").join("src");
    if let Ok(indexes) = std::fs::read_dir(&src_root) {
        for index in indexes.flatten() {
            let candidate = index.path().join(format!("{name}-{version}"));
            if candidate.exists() {
                return Some(CrateDir {
                    path: candidate,
                    origin: CrateOrigin::Registry,
                });
            }
        }
    }

    find_git_checkout(&cargo_home.join("git").join("checkouts"), name)
}

fn find_git_checkout(git_root: &Path, name: &str) -> Option<CrateDir> {
    let pattern = RegexBuilder::new(&regex::escape(name))
        .case_insensitive(true)
        .build()
        .ok()?;

    for checkout in std::fs::read_dir(git_root).ok()?.flatten() {
        if !pattern.is_match(&checkout.file_name().to_string_lossy()) {
            continue;
        }
        if let Ok(children) = std::fs::read_dir(checkout.path()) {
            for child in children.flatten() {
                if child.path().is_dir() {
                    return Some(CrateDir {
                        path: child.path(),
                        origin: CrateOrigin::Git,
                    });
                }
            }
        }
    }
    None
}
