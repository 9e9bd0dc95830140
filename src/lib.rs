//! Rigup - Frontend toolchain verification and bootstrap.
//!
//! Rigup checks a workstation for the JavaScript tooling a frontend project
//! needs (the Node.js runtime, npm, the Angular CLI, Yarn, and npx),
//! installs the pieces it can, and reports progress through a pair of
//! callbacks. Checks run in a fixed order and stop at the first failure.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`shell`] - External process execution and line capture
//! - [`toolchain`] - The five-step verification/install workflow
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```no_run
//! use rigup::shell::ProcessRunner;
//! use rigup::toolchain::{ToolchainInstaller, WorkDir};
//!
//! let runner = ProcessRunner;
//! let workdir = WorkDir::create(WorkDir::default_location())?;
//! let installer = ToolchainInstaller::new(&runner, workdir);
//! let ok = installer.install(
//!     &mut |msg| println!("{}", msg),
//!     &mut |err| eprintln!("{}", err),
//! );
//! println!("toolchain ready: {}", ok);
//! # Ok::<(), rigup::RigupError>(())
//! ```

pub mod cli;
pub mod error;
pub mod shell;
pub mod toolchain;
pub mod ui;

pub use error::{Result, RigupError};
