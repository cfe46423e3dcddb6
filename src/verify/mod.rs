//! Dependency verification.
//!
//! [`DependencyVerifier::verify`] runs three independent sections and
//! folds them into a [`VerificationReport`]:
//!
//! - HTTP client: fetch repository metadata from the GitHub API
//! - Date library: parse two date formats, do calendar arithmetic
//! - Stdlib: math, random sampling, JSON round-trip, clock formatting
//!
//! Each section yields a `Result`; a failure lands in that section's
//! `error` field and never touches its siblings. `verify` itself cannot fail.

pub mod clock;
pub mod dates;
pub mod network;
pub mod report;
pub mod stdlib;

use std::sync::Arc;

use rand::Rng;

use crate::config::{Config, DEFAULT_PROBE_REPO};
use crate::error::Result;
use crate::log_component;

pub use clock::{Clock, FixedClock, SystemClock};
pub use network::{GitHubClient, RepoMetadataSource, RepoResponse, UnavailableSource};
pub use report::{
    wrap_for_pipeline, PackageEntry, Packages, PipelineItem, Summary, TestEntry, Tests,
    VerificationReport, REPORT_STATUS, SUMMARY_MESSAGE,
};

use dates::iso_timestamp;

/// Runs the verification sections against injected collaborators.
pub struct DependencyVerifier {
    source: Arc<dyn RepoMetadataSource>,
    clock: Arc<dyn Clock>,
    repo: String,
}

impl DependencyVerifier {
    /// Verifier probing the default repository.
    pub fn new(source: Arc<dyn RepoMetadataSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            repo: DEFAULT_PROBE_REPO.to_string(),
        }
    }

    /// Real GitHub client and system clock, as configured.
    ///
    /// If the client cannot be built, the HTTP section reports the setup
    /// error and the other sections still run.
    pub fn from_config(config: &Config) -> Self {
        let source: Arc<dyn RepoMetadataSource> = match GitHubClient::from_config(&config.probe)
        {
            Ok(client) => Arc::new(client),
            Err(e) => {
                let reason = e.to_string();
                log_component!(
                    warn,
                    "verify",
                    "HTTP client setup failed",
                    error = reason.as_str()
                );
                Arc::new(UnavailableSource::new(reason))
            }
        };
        Self::new(source, Arc::new(SystemClock)).with_repo(&config.probe.repo)
    }

    /// Like [`from_config`](Self::from_config), but takes the outcome of
    /// loading the config. A load error is reported in the HTTP section
    /// instead of aborting the run.
    pub fn from_loaded_config(loaded: Result<Config>) -> Self {
        match loaded {
            Ok(config) => Self::from_config(&config),
            Err(e) => {
                let reason = e.to_string();
                log_component!(
                    warn,
                    "verify",
                    "config unusable, probe disabled",
                    error = reason.as_str()
                );
                Self::new(Arc::new(UnavailableSource::new(reason)), Arc::new(SystemClock))
            }
        }
    }

    /// Probe `repo` (`owner/name`) instead of the default.
    pub fn with_repo(mut self, repo: &str) -> Self {
        self.repo = repo.to_string();
        self
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Run every section once and build the report.
    pub async fn verify<R: Rng + ?Sized>(&self, rng: &mut R) -> VerificationReport {
        let http_client =
            PackageEntry::from(network::check_http_client(self.source.as_ref(), &self.repo).await);
        log_section("http-client", http_client.error());

        let date_library = PackageEntry::from(dates::check_date_library(self.clock.as_ref()));
        log_section("date-library", date_library.error());

        let stdlib = TestEntry::from(stdlib::check_stdlib(rng, self.clock.as_ref()));
        log_section(
            "stdlib",
            match &stdlib {
                TestEntry::Passed(_) => None,
                TestEntry::Failed { error } => Some(error.as_str()),
            },
        );

        let packages = Packages {
            http_client,
            date_library,
        };

        let summary = Summary {
            message: SUMMARY_MESSAGE.to_string(),
            timestamp: iso_timestamp(&self.clock.now()),
            packages_working: packages.working_count(),
        };
        log_component!(
            info,
            "verify",
            "verification finished",
            packages_working = summary.packages_working
        );

        VerificationReport {
            status: REPORT_STATUS.to_string(),
            packages,
            tests: Tests { stdlib },
            summary,
        }
    }
}

fn log_section(section: &'static str, error: Option<&str>) {
    match error {
        None => log_component!(info, "verify", "section passed", section = section),
        Some(e) => log_component!(warn, "verify", "section failed", section = section, error = e),
    }
}
