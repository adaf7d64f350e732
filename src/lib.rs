//! Library root for the `ltr_trainer` crate
//!
//! Turns the weight vector produced by `svm_rank_learn` into a linear
//! learning-to-rank model document for Solr.

// Error handling
pub mod errors;

// Model document and template
pub mod ltr_model;
pub mod model_template;

// Trainer invocation and result parsing
pub mod param_extractor;
pub mod trainer;

// Output
pub mod model_writer;

// Configuration & CLI
pub mod cli;
pub mod config;

// Orchestration
pub mod pipeline;


pub use errors::{LtrError, LtrResult};
pub use ltr_model::ModelDocument;
pub use model_template::{ModelTemplate, WeightEncoding, FEATURE_NAMES};
pub use pipeline::ModelBuilder;
pub use trainer::OverwriteMode;
