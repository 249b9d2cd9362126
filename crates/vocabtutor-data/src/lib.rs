//! vocabtutor-data: Durable backends for vocabtutor.
//!
//! Provides the JSON-file key-value store that persists scores, the
//! directory and HTTP vocabulary sources, and the score export writer.

pub mod export;
pub mod source;
pub mod store;

pub use export::{export_file_name, write_export};
pub use source::{source_from_config, DirectorySource, HttpSource};
pub use store::JsonFileStore;
