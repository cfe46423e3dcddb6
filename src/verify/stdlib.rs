//! Self-test of core numeric, random and serialization facilities.

use std::f64::consts::PI;
use std::io;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

use crate::error::{DepVerifyError, Result};

use super::clock::Clock;
use super::dates::{calendar_date, iso_timestamp};
use super::report::{ClockSample, JsonRoundTrip, MathResults, RandomSample, StdlibCheck};

/// Items the random choice draws from.
pub const FRUITS: [&str; 3] = ["apple", "banana", "cherry"];

const CIRCLE_RADIUS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct JsonSample {
    name: String,
    value: i64,
}

/// Round half away from zero to `places` decimal places.
pub fn round_to(x: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (x * factor).round() / factor
}

pub fn math_results() -> MathResults {
    MathResults {
        circle_area: round_to(PI * CIRCLE_RADIUS.powi(2), 2),
        sqrt144: 144f64.sqrt(),
        pi_value: round_to(PI, 4),
    }
}

/// Draw a number in `[1, 100]` and one element of `choices`.
pub fn random_sample<R: Rng + ?Sized>(rng: &mut R, choices: &[&str]) -> Result<RandomSample> {
    let random_number = rng.gen_range(1..=100);
    let random_choice = choices
        .choose(rng)
        .ok_or(DepVerifyError::EmptyChoice)?
        .to_string();
    Ok(RandomSample {
        random_number,
        random_choice,
    })
}

/// Single-line JSON with `", "` between items and `": "` after keys,
/// e.g. `{"name": "test", "value": 42}`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialize `value` with [`SpacedFormatter`].
pub fn to_spaced_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| DepVerifyError::RoundTrip(e.to_string()))
}

/// Serialize the sample object, parse it back, and require equality.
pub fn json_round_trip() -> Result<JsonRoundTrip> {
    let sample = JsonSample {
        name: "test".to_string(),
        value: 42,
    };
    let serialized = to_spaced_string(&sample)?;
    let parsed: JsonSample = serde_json::from_str(&serialized)?;
    if parsed != sample {
        return Err(DepVerifyError::RoundTrip(format!(
            "{:?} came back as {:?}",
            sample, parsed
        )));
    }
    Ok(JsonRoundTrip {
        serialized,
        deserialized: serde_json::to_value(&parsed)?,
    })
}

/// Run the stdlib self-test.
pub fn check_stdlib<R: Rng + ?Sized>(rng: &mut R, clock: &dyn Clock) -> Result<StdlibCheck> {
    let math = math_results();
    let random = random_sample(rng, &FRUITS)?;
    let json = json_round_trip()?;

    let now = clock.now();
    let datetime = ClockSample {
        now: iso_timestamp(&now),
        today: calendar_date(now.date_naive()),
    };

    Ok(StdlibCheck {
        math,
        random,
        json,
        datetime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::clock::FixedClock;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn test_math_results() {
        let math = math_results();
        assert_eq!(math.circle_area, 78.54);
        assert_eq!(math.sqrt144, 12.0);
        assert_eq!(math.pi_value, 3.1416);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.345, 1), 2.3);
        assert_eq!(round_to(-1.25, 0), -1.0);
        assert_eq!(round_to(10.0, 3), 10.0);
    }

    #[test]
    fn test_random_sample_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let sample = random_sample(&mut rng, &FRUITS).unwrap();
            assert!((1..=100).contains(&sample.random_number));
            assert!(FRUITS.contains(&sample.random_choice.as_str()));
        }
    }

    #[test]
    fn test_random_sample_seeded_is_reproducible() {
        let a = random_sample(&mut StdRng::seed_from_u64(42), &FRUITS).unwrap();
        let b = random_sample(&mut StdRng::seed_from_u64(42), &FRUITS).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_sample_empty_choices() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = random_sample(&mut rng, &[]).unwrap_err();
        assert!(matches!(err, DepVerifyError::EmptyChoice));
    }

    #[test]
    fn test_json_round_trip() {
        let rt = json_round_trip().unwrap();
        assert_eq!(rt.deserialized, json!({"name": "test", "value": 42}));
        let reparsed: serde_json::Value = serde_json::from_str(&rt.serialized).unwrap();
        assert_eq!(reparsed, rt.deserialized);
    }

    #[test]
    fn test_spaced_string_separators() {
        let rt = json_round_trip().unwrap();
        assert_eq!(rt.serialized, r#"{"name": "test", "value": 42}"#);

        let nested = json!({"a": [1, 2, {"b": null}], "c": {}});
        assert_eq!(
            to_spaced_string(&nested).unwrap(),
            r#"{"a": [1, 2, {"b": null}], "c": {}}"#
        );
    }

    #[test]
    fn test_check_stdlib_uses_clock() {
        let clock = FixedClock::from_rfc3339("2025-11-30T23:59:59-05:00").unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let check = check_stdlib(&mut rng, &clock).unwrap();
        assert_eq!(check.datetime.now, "2025-11-30T23:59:59-05:00");
        assert_eq!(check.datetime.today, "2025-11-30");
    }

    #[test]
    fn test_check_stdlib_serialized_shape() {
        let clock = FixedClock::from_rfc3339("2025-11-30T12:00:00Z").unwrap();
        let check = check_stdlib(&mut StdRng::seed_from_u64(9), &clock).unwrap();
        let value = serde_json::to_value(&check).unwrap();
        assert_eq!(value["math"]["circleArea"], json!(78.54));
        assert_eq!(value["math"]["sqrt144"], json!(12.0));
        assert_eq!(value["math"]["piValue"], json!(3.1416));
        assert!(value["random"]["randomNumber"].is_u64());
        assert!(value["random"]["randomChoice"].is_string());
        assert_eq!(
            value["json"]["serialized"],
            json!(r#"{"name": "test", "value": 42}"#)
        );
    }
}
