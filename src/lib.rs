//! sheetexport - CSV to spreadsheet-friendly downloads
//!
//! Parses delimited text and renders it as XML Spreadsheet markup, an HTML
//! table, or re-quoted CSV, classifying cells so spreadsheet applications keep
//! leading zeros and long digit strings intact. Also builds the download
//! headers to send with the result.

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod output;
pub mod parser;
pub mod response;

pub use config::{ExportConfig, ExportFormat};
pub use error::{ExportError, Result};
pub use export::{export_csv, export_table, ExportArtifact, ExportRequest};
pub use model::{CellKind, NumberPolicy, Table};
pub use output::{Rendered, TableSerializer};
pub use response::ResponseHeaderSet;
