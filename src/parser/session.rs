//! External analytics session for statistical table formats
//!
//! Statistical-package files (SAS, SPSS, Stata) are not decoded in-process.
//! They are handed to an [`AnalyticsSession`], which owns the conversion and
//! returns a plain [`Table`]. One session is opened before a batch, shared by
//! every statistical file in it, and closed afterwards.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::model::Table;

use super::csv::read_delimited;

/// Extensions routed to the analytics session
pub const SESSION_EXTENSIONS: &[&str] = &["sas7bdat", "xpt", "sav", "dta"];

/// Whether files with this (lowercase) extension need the analytics session
pub fn is_session_extension(ext: &str) -> bool {
    SESSION_EXTENSIONS.contains(&ext)
}

/// An external service that turns a statistical table file into a [`Table`]
pub trait AnalyticsSession {
    /// Human-readable name for log lines
    fn name(&self) -> &str;

    fn open(&mut self) -> Result<(), SessionError>;

    fn is_open(&self) -> bool;

    /// Convert one file; only valid while the session is open
    fn read_table(&mut self, path: &Path) -> Result<Table, SessionError>;

    fn close(&mut self) -> Result<(), SessionError>;
}

/// Session backed by a converter program.
///
/// The program is invoked once per file with the configured arguments followed
/// by the file path, and must print the table as CSV (with a header row) on
/// stdout. A non-zero exit status is a failed conversion.
#[derive(Debug)]
pub struct CommandSession {
    config: SessionConfig,
    open: bool,
}

impl CommandSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            open: false,
        }
    }
}

impl AnalyticsSession for CommandSession {
    fn name(&self) -> &str {
        &self.config.program
    }

    fn open(&mut self) -> Result<(), SessionError> {
        if self.config.program.trim().is_empty() {
            return Err(SessionError::NoProgram);
        }
        self.open = true;
        info!("Analytics session opened using {}", self.name());
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn read_table(&mut self, path: &Path) -> Result<Table, SessionError> {
        if !self.open {
            return Err(SessionError::NotOpen);
        }

        debug!("Converting {} with {}", path.display(), self.config.program);
        let output = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(path)
            .output()
            .map_err(|source| SessionError::Spawn {
                program: self.config.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SessionError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        read_delimited(output.stdout.as_slice(), b',')
            .map_err(|e| SessionError::Output(e.to_string()))
    }

    fn close(&mut self) -> Result<(), SessionError> {
        if self.open {
            self.open = false;
            info!("Analytics session closed");
        }
        Ok(())
    }
}
