//! The five-step toolchain verification/install workflow.
//!
//! - [`version`] - Version parsing and floor comparison
//! - [`relaxed`] - Tolerant reader for JS-object-literal output
//! - [`detect`] - Output-shape parsers, one per tool's reporting format
//! - [`workflow`] - Step orchestration and self-repair

pub mod detect;
pub mod relaxed;
pub mod version;
pub mod workflow;

pub use detect::CheckError;
pub use version::ToolVersion;
pub use workflow::{ToolchainInstaller, WorkDir};
