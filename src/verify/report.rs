//! Report types and their wire shape.
//!
//! The JSON layout is fixed: `status`, `packages` (`http-client`,
//! `date-library`), `tests` (`stdlib`) and `summary`. Sections that fail
//! keep their slot and carry an `error` string instead of data.

use serde::{Serialize, Serializer};

use crate::error::Result;

/// Top-level status line. Constant regardless of section outcomes.
pub const REPORT_STATUS: &str = "✅ ALL DEPENDENCIES WORKING";
/// Summary message. Constant regardless of section outcomes.
pub const SUMMARY_MESSAGE: &str = "🎉 All packages and stdlib modules working!";

// ============================================================================
// Section envelopes
// ============================================================================

/// Outcome of a package check. Serializes as the check's own fields plus
/// `"installed": true`, or `{"error": ..., "installed": false}`.
#[derive(Debug, Clone, PartialEq)]
pub enum PackageEntry<T> {
    Working(T),
    Failed(String),
}

impl<T> PackageEntry<T> {
    pub fn is_installed(&self) -> bool {
        matches!(self, PackageEntry::Working(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PackageEntry::Working(_) => None,
            PackageEntry::Failed(msg) => Some(msg.as_str()),
        }
    }
}

impl<T> From<Result<T>> for PackageEntry<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(details) => PackageEntry::Working(details),
            Err(e) => PackageEntry::Failed(e.to_string()),
        }
    }
}

impl<T: Serialize> Serialize for PackageEntry<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Working<'a, T> {
            #[serde(flatten)]
            details: &'a T,
            installed: bool,
        }

        #[derive(Serialize)]
        struct Failed<'a> {
            error: &'a str,
            installed: bool,
        }

        match self {
            PackageEntry::Working(details) => Working {
                details,
                installed: true,
            }
            .serialize(serializer),
            PackageEntry::Failed(error) => Failed {
                error: error.as_str(),
                installed: false,
            }
            .serialize(serializer),
        }
    }
}

/// Outcome of a self-test. Unlike [`PackageEntry`] a failure carries no
/// `installed` flag: `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TestEntry<T> {
    Passed(T),
    Failed { error: String },
}

impl<T> TestEntry<T> {
    pub fn is_passed(&self) -> bool {
        matches!(self, TestEntry::Passed(_))
    }
}

impl<T> From<Result<T>> for TestEntry<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(details) => TestEntry::Passed(details),
            Err(e) => TestEntry::Failed {
                error: e.to_string(),
            },
        }
    }
}

// ============================================================================
// HTTP client section
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpClientCheck {
    /// HTTP client library version
    pub version: String,
    /// e.g. "GitHub API status: 200"
    pub test: String,
    pub repo_data: RepoData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoData {
    pub name: String,
    /// Star count with thousands separators
    pub stars: String,
    /// Fork count with thousands separators
    pub forks: String,
    pub language: Option<String>,
}

// ============================================================================
// Date library section
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateLibraryCheck {
    pub test: String,
    pub parsed_dates: ParsedDates,
    pub calculations: DateCalculations,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDates {
    pub iso: String,
    pub natural: String,
    pub current_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateCalculations {
    #[serde(rename = "in3Months15Days")]
    pub in_3_months_15_days: String,
    #[serde(rename = "30DaysAgo")]
    pub days_ago_30: String,
}

// ============================================================================
// Stdlib section
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StdlibCheck {
    pub math: MathResults,
    pub random: RandomSample,
    pub json: JsonRoundTrip,
    pub datetime: ClockSample,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MathResults {
    pub circle_area: f64,
    pub sqrt144: f64,
    pub pi_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomSample {
    pub random_number: u32,
    pub random_choice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRoundTrip {
    pub serialized: String,
    pub deserialized: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockSample {
    pub now: String,
    pub today: String,
}

// ============================================================================
// Report
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Packages {
    #[serde(rename = "http-client")]
    pub http_client: PackageEntry<HttpClientCheck>,
    #[serde(rename = "date-library")]
    pub date_library: PackageEntry<DateLibraryCheck>,
}

impl Packages {
    /// Number of package entries reporting `installed: true`.
    pub fn working_count(&self) -> usize {
        [
            self.http_client.is_installed(),
            self.date_library.is_installed(),
        ]
        .into_iter()
        .filter(|ok| *ok)
        .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tests {
    pub stdlib: TestEntry<StdlibCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub message: String,
    pub timestamp: String,
    pub packages_working: usize,
}

/// The full verification report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationReport {
    pub status: String,
    pub packages: Packages,
    pub tests: Tests,
    pub summary: Summary,
}

/// One element of the `[{"json": report}]` sequence workflow runners consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineItem {
    pub json: VerificationReport,
}

/// Wrap a report in the single-element pipeline envelope.
pub fn wrap_for_pipeline(report: VerificationReport) -> Vec<PipelineItem> {
    vec![PipelineItem { json: report }]
}
