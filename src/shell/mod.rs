//! External process execution and line capture.

pub mod command;

pub use command::{CommandRunner, ExecutionResult, Invocation, ProcessRunner};
