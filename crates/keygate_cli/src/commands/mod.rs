//! CLI command handlers.

/// Build script wiring and project setup.
pub mod init;
/// Pattern listing and inspection.
pub mod patterns;
/// Source tree scanning for exposed secrets.
pub mod scan;

/// Convenience alias for command return types.
pub type Result<T = ()> = anyhow::Result<T>;
