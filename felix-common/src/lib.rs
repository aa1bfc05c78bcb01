//! # Felix Common Library
//!
//! Shared code for the Fix-It Felix dashboard:
//! - Analysis data model (request, response, operation modes)
//! - Error envelope returned by the analyze proxy
//! - Configuration loading
//! - Plain-text report rendering

pub mod analysis;
pub mod config;
pub mod error;
pub mod report;

pub use analysis::{AnalysisRequest, AnalysisResponse, ErrorEnvelope, ImageUpload, OperationMode};
pub use error::{Error, Result};
