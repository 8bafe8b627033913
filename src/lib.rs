//! datapeek - print the contents of every data file in a directory
//!
//! Each file's format is picked from its extension, parsed into a [`Dataset`]
//! (table, workbook, record or lines) and rendered as plain text.

pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;

pub use batch::{run_batch, BatchSummary};
pub use config::Config;
pub use error::{LoadError, LoadErrorKind, SessionError};
pub use model::{Dataset, Table};
pub use output::Renderer;
pub use parser::Loader;
