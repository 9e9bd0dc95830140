//! Step orchestration for the toolchain workflow.
//!
//! Five checks in fixed order: node, npm, Angular CLI, yarn, npx. Each
//! announces itself through the message callback, decides pass/fail from
//! captured process output, and reports failures through the error
//! callback. The first failing check stops the run; tools installed by
//! earlier checks stay installed.

use crate::error::{Result, RigupError};
use crate::shell::{CommandRunner, ExecutionResult, Invocation};
use crate::toolchain::detect::{self, CheckError};
use crate::toolchain::version::ToolVersion;
use std::fs;
use std::path::{Path, PathBuf};

/// Contractual version floors, as (major, minor).
const NODE_FLOOR: (u32, u32) = (22, 0);
const NPM_FLOOR: (u32, u32) = (10, 0);
const ANGULAR_FLOOR: (u32, u32) = (19, 0);
const YARN_FLOOR: (u32, u32) = (1, 22);

/// Banner line prefix the Angular CLI reports its own version under.
const ANGULAR_CLI_LABEL: &str = "Angular CLI:";

/// Install-path fragment that marks a usable npx.
#[cfg(windows)]
const NPX_PATH_FRAGMENT: &str = r"\nodejs\";
#[cfg(not(windows))]
const NPX_PATH_FRAGMENT: &str = "/bin/npx";

#[cfg(windows)]
const LOCATOR: &str = "where";
#[cfg(not(windows))]
const LOCATOR: &str = "which";

/// Scratch directory handle for a workflow run.
///
/// Acquired once at workflow start and passed explicitly; left in place
/// afterwards for the caller to clean up.
#[derive(Debug, Clone)]
pub struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    /// Create the directory at `path` if it does not already exist.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path).map_err(|source| RigupError::WorkDirCreate {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path })
    }

    /// Default location under the system temp directory.
    pub fn default_location() -> PathBuf {
        std::env::temp_dir().join("rigup")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Runs the five toolchain checks in order, stopping at the first failure.
pub struct ToolchainInstaller<'a> {
    runner: &'a dyn CommandRunner,
    workdir: WorkDir,
}

impl<'a> ToolchainInstaller<'a> {
    pub fn new(runner: &'a dyn CommandRunner, workdir: WorkDir) -> Self {
        Self { runner, workdir }
    }

    /// Run all checks. Returns `true` only if every one passed.
    ///
    /// `on_message` receives progress strings (each check's announcement
    /// and `Done`); `on_error` receives diagnostics and remediation hints.
    /// Nothing else is observable from the outside.
    pub fn install(
        &self,
        on_message: &mut dyn FnMut(&str),
        on_error: &mut dyn FnMut(&str),
    ) -> bool {
        self.check_node(on_message, on_error)
            && self.check_npm(on_message, on_error)
            && self.check_angular_cli(on_message, on_error)
            && self.check_yarn(on_message, on_error)
            && self.check_npx(on_message, on_error)
    }

    /// Step 1: node present with major version >= 22. No remediation;
    /// installing a runtime is the user's call.
    fn check_node(
        &self,
        on_message: &mut dyn FnMut(&str),
        on_error: &mut dyn FnMut(&str),
    ) -> bool {
        on_message("Checking node.js..");
        let result = self.query("node", &["-v"]);
        if result.has_errors() {
            for line in &result.stderr {
                on_error(line);
            }
            on_error("Download node.js at https://nodejs.org/en");
            return false;
        }

        let outcome = detect::unique_v_prefixed_version(&result.stdout)
            .and_then(|v| floor_check(v, NODE_FLOOR));
        match outcome {
            Ok(version) => {
                tracing::debug!(%version, "node check passed");
                on_message("Done");
                true
            }
            Err(e) => {
                on_error(&e.to_string());
                on_error("Download node.js at https://nodejs.org/en");
                false
            }
        }
    }

    /// Step 2: npm reports major version >= 10 through its object-literal
    /// version report. No remediation; npm ships with node.
    fn check_npm(
        &self,
        on_message: &mut dyn FnMut(&str),
        on_error: &mut dyn FnMut(&str),
    ) -> bool {
        on_message("Checking npm..");
        let result = self.query("npm", &["version"]);

        let outcome =
            detect::field_version(&result.stdout, "npm").and_then(|v| floor_check(v, NPM_FLOOR));
        match outcome {
            Ok(version) => {
                tracing::debug!(%version, "npm check passed");
                on_message("Done");
                true
            }
            Err(e) => {
                for line in &result.stderr {
                    on_error(line);
                }
                on_error(&e.to_string());
                on_error("Update npm with: npm install -g npm@latest");
                false
            }
        }
    }

    /// Step 3: Angular CLI >= 19, installing it once if the first query
    /// fails.
    fn check_angular_cli(
        &self,
        on_message: &mut dyn FnMut(&str),
        on_error: &mut dyn FnMut(&str),
    ) -> bool {
        on_message("Installing Angular CLI if necessary..");
        let outcome = self.detect_with_repair(
            ("ng", &["version"]),
            ("npm", &["install", "-g", "@angular/cli"]),
            |result| {
                detect::labeled_version(&result.stdout, ANGULAR_CLI_LABEL)
                    .and_then(|v| floor_check(v, ANGULAR_FLOOR))
            },
        );
        match outcome {
            Ok(version) => {
                tracing::debug!(%version, "angular cli check passed");
                on_message("Done");
                true
            }
            Err(e) => {
                on_error(&e.to_string());
                on_error("Install the Angular CLI with: npm install -g @angular/cli");
                false
            }
        }
    }

    /// Step 4: yarn >= 1.22, installing it once if the first query fails.
    fn check_yarn(
        &self,
        on_message: &mut dyn FnMut(&str),
        on_error: &mut dyn FnMut(&str),
    ) -> bool {
        on_message("Installing yarn if necessary..");
        let outcome = self.detect_with_repair(
            ("yarn", &["--version"]),
            ("npm", &["install", "-g", "yarn"]),
            |result| {
                detect::version_shaped_line(&result.stdout).and_then(|v| floor_check(v, YARN_FLOOR))
            },
        );
        match outcome {
            Ok(version) => {
                tracing::debug!(%version, "yarn check passed");
                on_message("Done");
                true
            }
            Err(e) => {
                on_error(&e.to_string());
                on_error("Install yarn with: npm install -g yarn");
                false
            }
        }
    }

    /// Step 5: npx located at the expected install path, installing it once
    /// if the locator comes up empty. Presence only, no version floor.
    fn check_npx(
        &self,
        on_message: &mut dyn FnMut(&str),
        on_error: &mut dyn FnMut(&str),
    ) -> bool {
        on_message("Installing npx if necessary..");
        let outcome = self.detect_with_repair(
            (LOCATOR, &["npx"]),
            ("npm", &["install", "-g", "npx"]),
            |result| {
                if detect::contains_path_fragment(&result.stdout, NPX_PATH_FRAGMENT) {
                    Ok(())
                } else {
                    Err(CheckError::MissingInstallPath {
                        fragment: NPX_PATH_FRAGMENT,
                    })
                }
            },
        );
        match outcome {
            Ok(()) => {
                tracing::debug!("npx check passed");
                on_message("Done");
                true
            }
            Err(e) => {
                on_error(&e.to_string());
                on_error("Install npx with: npm install -g npx");
                false
            }
        }
    }

    /// One remediation attempt, one re-verification.
    ///
    /// If `detect` rejects the first query, the install command runs once
    /// and the query runs once more; the second verdict is final. The
    /// install's own output is not consulted: it is already logged by the
    /// runner, and the re-check is the arbiter.
    fn detect_with_repair<T>(
        &self,
        query: (&str, &[&str]),
        install: (&str, &[&str]),
        detect: impl Fn(&ExecutionResult) -> std::result::Result<T, CheckError>,
    ) -> std::result::Result<T, CheckError> {
        let first = self.query(query.0, query.1);
        match detect(&first) {
            Ok(value) => Ok(value),
            Err(reason) => {
                tracing::debug!(%reason, "check failed, attempting install");
                self.query(install.0, install.1);
                let second = self.query(query.0, query.1);
                detect(&second)
            }
        }
    }

    fn query(&self, program: &str, args: &[&str]) -> ExecutionResult {
        self.runner
            .run(&Invocation::new(program, args, self.workdir.path()))
    }
}

fn floor_check(
    version: ToolVersion,
    floor: (u32, u32),
) -> std::result::Result<ToolVersion, CheckError> {
    if version.at_least(floor.0, floor.1) {
        Ok(version)
    } else {
        Err(CheckError::VersionTooLow { found: version })
    }
}
