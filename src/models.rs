use std::path::PathBuf;

use serde::Serialize;

/// One third-party package pinned in the lockfile.
///
/// Identity is `(name, version)`; the parser collapses duplicate keys to
/// the first occurrence.
#[derive(Debug, Clone, Serialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    /// Provenance tag from the lockfile (registry or git URL). Workspace
    /// members carry none and never reach this struct.
    pub source: String,
}

/// Which part of the Cargo cache a crate directory was found in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrateOrigin {
    Registry,
    Git,
}

impl std::fmt::Display for CrateOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrateOrigin::Registry => write!(f, "registry"),
            CrateOrigin::Git => write!(f, "git"),
        }
    }
}

/// A resolved crate source directory plus where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct CrateDir {
    pub path: PathBuf,
    pub origin: CrateOrigin,
}

/// A license-like file picked from the top level of a crate directory.
#[derive(Debug, Clone, Serialize)]
pub struct LicenseFile {
    pub name: String,
    pub path: PathBuf,
}

/// Per-crate outcome of cache resolution and license picking.
#[derive(Debug, Clone, Serialize)]
pub struct CrateOutcome {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crate_dir: Option<CrateDir>,
    pub license_files: Vec<LicenseFile>,
}

impl CrateOutcome {
    /// Whether this crate contributes a block to the notice file.
    pub fn bundled(&self) -> bool {
        !self.license_files.is_empty()
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match (&self.crate_dir, self.license_files.is_empty()) {
            (None, _) => Some(SkipReason::NotInCache),
            (Some(_), true) => Some(SkipReason::NoLicenseFiles),
            (Some(_), false) => None,
        }
    }
}

/// Why a crate contributes nothing to the notice file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    NotInCache,
    NoLicenseFiles,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotInCache => write!(f, "not found in cache"),
            SkipReason::NoLicenseFiles => write!(f, "no license files"),
        }
    }
}
