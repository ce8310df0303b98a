//! # mindmapify
//!
//! Turns free text or a PDF (typically a résumé) into a bounded three-level
//! mind map: a root topic, up to five category nodes, and their topics.
//!
//! ## Architecture
//!
//! - **Parsing** (`nlp`): deterministic rule-based English tokenizer, tagger
//!   and shallow dependency parser behind the [`nlp::LanguageModel`] trait
//! - **Extraction** (`hierarchy`): concept set, noun adjacency, keyword
//!   categorization and the "Other" bucket
//! - **Documents** (`document`): PDF text extraction via `pdf-extract`
//! - **Rendering** (`render`): Mermaid flowcharts
//! - **Serving** (`server`): axum HTTP API, behind the `server` feature
//!
//! ## Library usage
//!
//! ```no_run
//! use mindmapify::hierarchy::HierarchyExtractor;
//! use mindmapify::nlp::RuleModel;
//!
//! let model = RuleModel::small();
//! let map = HierarchyExtractor::default()
//!     .extract_text(&model, "Alice studied algorithms at IIT Bombay")
//!     .unwrap();
//! assert_eq!(map.root, "Alice");
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod hierarchy;
pub mod nlp;
pub mod render;
#[cfg(feature = "server")]
pub mod server;

pub use error::{MindMapError, MindMapResult};
