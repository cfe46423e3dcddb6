//! depverify - Dependency smoke test
//!
//! Probes an HTTP API, exercises date parsing and calendar arithmetic, and
//! runs a self-test of numeric, random and JSON facilities, then returns a
//! fixed-shape JSON report.

pub mod config;
pub mod error;
pub mod utils;
pub mod verify;

pub use config::Config;
pub use error::{DepVerifyError, Result};
pub use verify::{
    wrap_for_pipeline, Clock, DependencyVerifier, FixedClock, GitHubClient, PipelineItem,
    RepoMetadataSource, RepoResponse, SystemClock, VerificationReport,
};
