//! Format resolution and loading of individual files

mod csv;
#[cfg(feature = "excel")]
mod excel;
mod json;
mod parquet;
mod session;
mod text;

use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::error::{LoadError, SessionError};
use crate::model::Dataset;

pub use self::csv::{read_delimited, CsvParser};
#[cfg(feature = "excel")]
pub use self::excel::ExcelParser;
pub use self::json::JsonParser;
pub use self::parquet::ParquetParser;
pub use self::session::{
    is_session_extension, AnalyticsSession, CommandSession, SESSION_EXTENSIONS,
};
pub use self::text::TextParser;

/// Trait for parsing one file format
pub trait Parser {
    /// Parse a file into a dataset
    fn parse(&self, path: &Path) -> Result<Dataset, LoadError>;

    /// Check if this parser handles the given lowercase extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Lowercase trailing extension, empty when there is none
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Dispatches files to parsers by extension.
///
/// Statistical table formats go to the injected [`AnalyticsSession`], if any.
pub struct Loader {
    parsers: Vec<Box<dyn Parser>>,
    session: Option<Box<dyn AnalyticsSession>>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// Loader with every built-in parser and no analytics session
    pub fn new() -> Self {
        let mut parsers: Vec<Box<dyn Parser>> = vec![
            Box::new(CsvParser),
            Box::new(JsonParser),
            Box::new(TextParser),
            Box::new(ParquetParser),
        ];
        #[cfg(feature = "excel")]
        parsers.push(Box::new(ExcelParser));

        Self {
            parsers,
            session: None,
        }
    }

    /// Attach the analytics session used for statistical formats
    pub fn with_session(mut self, session: Box<dyn AnalyticsSession>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Open the attached session, if there is one
    pub fn open_session(&mut self) -> Result<(), SessionError> {
        match self.session.as_mut() {
            Some(session) if !session.is_open() => session.open(),
            _ => Ok(()),
        }
    }

    /// Close the attached session, if there is one
    pub fn close_session(&mut self) -> Result<(), SessionError> {
        match self.session.as_mut() {
            Some(session) => session.close(),
            None => Ok(()),
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Option<&dyn Parser> {
        let ext = extension_of(path);
        self.parsers
            .iter()
            .find(|p| p.supports_extension(&ext))
            .map(|p| p.as_ref())
    }

    /// Load one file.
    ///
    /// Failures are logged here with the file path and extension and handed
    /// back as the error; nothing propagates past the caller's batch loop.
    pub fn load(&mut self, path: &Path) -> Result<Dataset, LoadError> {
        let ext = extension_of(path);
        info!("Reading {}", path.display());

        let result = self.dispatch(path, &ext);
        match &result {
            Ok(data) => info!(
                "Loaded {} from {} ({} entries)",
                data.shape(),
                path.display(),
                data.entry_count()
            ),
            Err(e) if e.is_unsupported() => warn!("{} ({})", e, path.display()),
            Err(e) => error!(
                "Error reading {} (extension: {:?}): {}",
                path.display(),
                ext,
                e
            ),
        }
        result
    }

    fn dispatch(&mut self, path: &Path, ext: &str) -> Result<Dataset, LoadError> {
        if is_session_extension(ext) {
            let session = self.session.as_mut().ok_or(LoadError::SessionUnavailable)?;
            debug!("Handing {} to analytics session {}", path.display(), session.name());
            return Ok(Dataset::Table(session.read_table(path)?));
        }

        match self.get_parser(path) {
            Some(parser) => parser.parse(path),
            None => Err(LoadError::Unsupported {
                extension: ext.to_string(),
            }),
        }
    }
}
