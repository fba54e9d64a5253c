//! Workspace tooling package.
//!
//! Holds the `rusty-hook` pre-commit configuration in the root manifest. The
//! libraries and binaries live under `crates/`.

/// Member crates of the workspace, relative to the root manifest.
pub const MEMBERS: &[&str] = &[
    "crates/mapquery-lib",
    "crates/mapquery-cli",
    "crates/mapquery-service-shared",
    "crates/mapquery-service",
];
