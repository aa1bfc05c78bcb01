//! Test helper modules for felix-ui integration tests
//!
//! - MockEngine: throwaway AI Engine bound to 127.0.0.1:0
//! - StalledBodyEngine: engine that stops mid-response
//! - MultipartBuilder: hand-built multipart/form-data request bodies
//!
//! Not every test binary uses every helper.
#![allow(dead_code, unused_imports)]

pub mod mock_engine;
pub mod multipart;

pub use mock_engine::{sample_analysis, unused_addr, MockEngine, StalledBodyEngine};
pub use multipart::MultipartBuilder;
