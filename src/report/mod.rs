//! Post-run report renderers.
//!
//! - [`terminal`] — colored summary box plus a skipped-crate warning list;
//!   `--verbose` adds a per-crate table. (JSON output is rendered inline
//!   in `main`.)

pub mod terminal;
