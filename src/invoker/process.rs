//! Subprocess-backed invokers.

use std::process::Command;

use tracing::debug;

use super::Invoker;
use super::types::{InvokeError, Invocation};

/// Runs the external tool and waits for it to exit.
///
/// Stdout and stderr are inherited so the tool's own progress output is
/// visible to the user.
#[derive(Debug, Default)]
pub struct ProcessInvoker;

impl ProcessInvoker {
    pub fn new() -> Self {
        Self
    }
}

impl Invoker for ProcessInvoker {
    fn invoke(&self, invocation: &Invocation) -> Result<(), InvokeError> {
        debug!("Executing: {}", invocation.command_line());

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .map_err(|e| InvokeError::SpawnFailed(format!("{}: {e}", invocation.program)))?;

        if status.success() {
            return Ok(());
        }

        match status.code() {
            Some(code) => Err(InvokeError::ExitStatus(code)),
            None => Err(InvokeError::Terminated),
        }
    }
}

/// Prints each command instead of running it.
#[derive(Debug, Default)]
pub struct DryRunInvoker;

impl DryRunInvoker {
    pub fn new() -> Self {
        Self
    }
}

impl Invoker for DryRunInvoker {
    fn invoke(&self, invocation: &Invocation) -> Result<(), InvokeError> {
        println!("  {}", invocation.command_line());
        Ok(())
    }
}
