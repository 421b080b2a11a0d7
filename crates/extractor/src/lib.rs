#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`ExtractorError`)
//! - [`config`]: Extractor configuration (`ExtractorConfig`, builder)
//! - [`types`]: Domain types (`PackageCoordinate`, `CoordinateSet`, `ManifestFormat`, ...)
//! - [`parser`]: Format extractors (`ManifestExtractor` trait, npm, requirements, yarn classic/modern)
//! - [`dispatcher`]: Filename-based selection and result validation (`FormatDispatcher`)
//!
//! # Architecture
//!
//! ```text
//! (filename, content) --> FormatDispatcher --> ManifestDetector --> ManifestFormat
//!                               |
//!          +--------------------+---------------------+
//!          |                    |                     |
//!   NpmLockExtractor   RequirementsExtractor   YarnClassicExtractor
//!                                                     | (on failure)
//!                                              YarnModernExtractor
//!                               |
//!                         CoordinateSet
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod parser;
pub mod types;

// --- Public API Re-exports ---

// Dispatcher (entry point)
pub use dispatcher::{Extraction, FormatDispatcher, extract};

// Configuration
pub use config::{ExtractorConfig, ExtractorConfigBuilder};

// Error
pub use error::ExtractorError;

// Types
pub use types::{
    CoordinateSet, Ecosystem, ManifestDocument, ManifestFormat, PackageCoordinate,
    ParsedPackageEntry,
};

// Parser
pub use parser::npm::NpmLockExtractor;
pub use parser::requirements::RequirementsExtractor;
pub use parser::yarn_classic::YarnClassicExtractor;
pub use parser::yarn_modern::YarnModernExtractor;
pub use parser::{ManifestDetector, ManifestExtractor};
