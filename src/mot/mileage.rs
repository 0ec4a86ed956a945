use chrono::NaiveDateTime;
use serde_json::Value;

/// Timestamp format of `completedDate` in the MOT API
pub const COMPLETED_DATE_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

const SECONDS_PER_YEAR: f64 = 3600.0 * 24.0 * 365.0;

/// One test from the MOT history, reduced to what mileage needs
#[derive(Debug, Clone, PartialEq)]
pub struct MotHistoryEntry {
    pub odometer_value: i64,
    pub completed_date: NaiveDateTime,
}

/// Tests of the first vehicle in an MOT response. `None` if the vehicle list
/// is empty or any test lacks a readable odometer value or completion date.
pub fn parse_tests(mot_data: &Value) -> Option<Vec<MotHistoryEntry>> {
    let tests = mot_data.get(0)?.get("motTests")?.as_array()?;

    tests
        .iter()
        .map(|test| {
            Some(MotHistoryEntry {
                odometer_value: parse_odometer(test.get("odometerValue")?)?,
                completed_date: NaiveDateTime::parse_from_str(
                    test.get("completedDate")?.as_str()?,
                    COMPLETED_DATE_FORMAT,
                )
                .ok()?,
            })
        })
        .collect()
}

/// The API sends odometer readings as strings; accept numbers too
fn parse_odometer(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// Miles per year between the two most recent tests, truncated toward zero.
/// Anything short of two usable tests gives 0.
pub fn mileage_rate(entries: &[MotHistoryEntry]) -> i64 {
    let mut sorted: Vec<&MotHistoryEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.completed_date.cmp(&a.completed_date));

    let [latest, previous, ..] = sorted.as_slice() else {
        return 0;
    };

    let years =
        (latest.completed_date - previous.completed_date).num_seconds() as f64 / SECONDS_PER_YEAR;
    if years == 0.0 {
        return 0;
    }

    let Some(miles) = latest.odometer_value.checked_sub(previous.odometer_value) else {
        return 0;
    };
    let rate = miles as f64 / years;
    if rate.is_finite() {
        rate as i64
    } else {
        0
    }
}

/// `last_year_mileage` for a raw MOT response
pub fn last_year_mileage(mot_data: &Value) -> i64 {
    parse_tests(mot_data)
        .map(|entries| mileage_rate(&entries))
        .unwrap_or(0)
}
