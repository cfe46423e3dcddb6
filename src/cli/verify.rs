//! Verify command — run the checks and print the report.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use depverify::config::Config;
use depverify::utils::string::preview;
use depverify::verify::{PackageEntry, TestEntry};
use depverify::{wrap_for_pipeline, DependencyVerifier, VerificationReport};

use super::OutputFormat;

/// Longest error message shown per line in text output.
const MAX_ERROR_CHARS: usize = 120;

pub(crate) async fn cmd_verify(
    format: OutputFormat,
    unwrapped: bool,
    compact: bool,
    seed: Option<u64>,
) -> Result<()> {
    // Config problems only disable the probe; the report is still printed.
    let verifier = DependencyVerifier::from_loaded_config(Config::load());

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let report = verifier.verify(&mut rng).await;

    let output = match format {
        OutputFormat::Json => render_json(report, unwrapped, compact)?,
        OutputFormat::Text => render_text(&report),
    };
    println!("{}", output);

    Ok(())
}

pub fn render_json(report: VerificationReport, unwrapped: bool, compact: bool) -> Result<String> {
    let value = if unwrapped {
        serde_json::to_value(&report)?
    } else {
        serde_json::to_value(wrap_for_pipeline(report))?
    };
    let text = if compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(text)
}

fn line(ok: bool, section: &str, detail: &str) -> String {
    let icon = if ok { "[ok]" } else { "[ERR]" };
    format!("{:<6} {:<14} {}", icon, section, detail)
}

pub fn render_text(report: &VerificationReport) -> String {
    let mut lines = vec![
        "depverify".to_string(),
        "=========".to_string(),
        String::new(),
    ];

    lines.push(match &report.packages.http_client {
        PackageEntry::Working(check) => line(
            true,
            "http-client",
            &format!(
                "{} {}: {} ({} stars, {} forks)",
                check.version,
                check.test,
                check.repo_data.name,
                check.repo_data.stars,
                check.repo_data.forks
            ),
        ),
        PackageEntry::Failed(e) => line(false, "http-client", &preview(e, MAX_ERROR_CHARS)),
    });

    lines.push(match &report.packages.date_library {
        PackageEntry::Working(check) => line(
            true,
            "date-library",
            &format!(
                "parsed {}, in 3 months 15 days: {}, 30 days ago: {}",
                check.parsed_dates.iso,
                check.calculations.in_3_months_15_days,
                check.calculations.days_ago_30
            ),
        ),
        PackageEntry::Failed(e) => line(false, "date-library", &preview(e, MAX_ERROR_CHARS)),
    });

    lines.push(match &report.tests.stdlib {
        TestEntry::Passed(check) => line(
            true,
            "stdlib",
            &format!(
                "circle area {}, random {} / {}",
                check.math.circle_area, check.random.random_number, check.random.random_choice
            ),
        ),
        TestEntry::Failed { error } => line(false, "stdlib", &preview(error, MAX_ERROR_CHARS)),
    });

    lines.push(String::new());
    lines.push(format!(
        "{}/2 packages working ({})",
        report.summary.packages_working, report.summary.timestamp
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use depverify::verify::report::{
        ClockSample, DateCalculations, DateLibraryCheck, JsonRoundTrip, MathResults,
        ParsedDates, RandomSample, StdlibCheck,
    };
    use depverify::verify::{Packages, Summary, Tests, REPORT_STATUS, SUMMARY_MESSAGE};

    fn report_with_http_failure() -> VerificationReport {
        VerificationReport {
            status: REPORT_STATUS.into(),
            packages: Packages {
                http_client: PackageEntry::Failed("HTTP error: operation timed out".into()),
                date_library: PackageEntry::Working(DateLibraryCheck {
                    test: "Date parsing and manipulation".into(),
                    parsed_dates: ParsedDates {
                        iso: "2025-10-22T14:30:00+00:00".into(),
                        natural: "2025-10-22".into(),
                        current_time: "2025-11-30T09:15:00+00:00".into(),
                    },
                    calculations: DateCalculations {
                        in_3_months_15_days: "2026-03-15".into(),
                        days_ago_30: "2025-10-31".into(),
                    },
                }),
            },
            tests: Tests {
                stdlib: TestEntry::Passed(StdlibCheck {
                    math: MathResults {
                        circle_area: 78.54,
                        sqrt144: 12.0,
                        pi_value: 3.1416,
                    },
                    random: RandomSample {
                        random_number: 17,
                        random_choice: "cherry".into(),
                    },
                    json: JsonRoundTrip {
                        serialized: r#"{"name": "test", "value": 42}"#.into(),
                        deserialized: serde_json::json!({"name": "test", "value": 42}),
                    },
                    datetime: ClockSample {
                        now: "2025-11-30T09:15:00+00:00".into(),
                        today: "2025-11-30".into(),
                    },
                }),
            },
            summary: Summary {
                message: SUMMARY_MESSAGE.into(),
                timestamp: "2025-11-30T09:15:00+00:00".into(),
                packages_working: 1,
            },
        }
    }

    #[test]
    fn test_render_json_wrapped() {
        let out = render_json(report_with_http_failure(), false, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["json"]["summary"]["packagesWorking"], 1);
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_render_json_unwrapped() {
        let out = render_json(report_with_http_failure(), true, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], REPORT_STATUS);
        assert_eq!(value["packages"]["http-client"]["installed"], false);
    }

    #[test]
    fn test_render_text() {
        let out = render_text(&report_with_http_failure());
        assert!(out.contains("[ERR]  http-client    HTTP error: operation timed out"));
        assert!(out.contains("[ok]   date-library"));
        assert!(out.contains("2026-03-15"));
        assert!(out.contains("[ok]   stdlib         circle area 78.54, random 17 / cherry"));
        assert!(out.contains("1/2 packages working"));
    }

    #[test]
    fn test_render_text_truncates_long_errors() {
        let mut report = report_with_http_failure();
        report.packages.http_client = PackageEntry::Failed("x".repeat(500));
        let out = render_text(&report);
        let http_line = out.lines().find(|l| l.contains("http-client")).unwrap();
        assert!(http_line.ends_with("..."));
        assert!(http_line.len() < 200);
    }
}
