use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ValidationError;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Non-negative cooking duration.
///
/// Accepts a number of seconds, an ISO 8601 duration (`PT1H30M`) or a clock
/// string (`1 day, 01:30:00`, `45:00`). Serializes as ISO 8601.
///
/// Stricter than a general timedelta: negative durations and the calendar
/// designators `Y` and `M` (date part) are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CookingTime(TimeDelta);

impl CookingTime {
    pub fn from_secs(secs: u64) -> Result<Self, ValidationError> {
        let secs = i64::try_from(secs).map_err(|_| too_large())?;
        TimeDelta::try_seconds(secs).map(Self).ok_or_else(too_large)
    }

    pub fn from_secs_f64(secs: f64) -> Result<Self, ValidationError> {
        if secs < 0.0 {
            return Err(invalid("duration must not be negative"));
        }
        let duration = std::time::Duration::try_from_secs_f64(secs)
            .map_err(|_| invalid("duration must be a finite number of seconds"))?;
        TimeDelta::from_std(duration)
            .map(Self)
            .map_err(|_| too_large())
    }

    fn from_nanos(total: u128) -> Result<Self, ValidationError> {
        let secs = i64::try_from(total / NANOS_PER_SEC).map_err(|_| too_large())?;
        let nanos = (total % NANOS_PER_SEC) as u32;
        TimeDelta::new(secs, nanos).map(Self).ok_or_else(too_large)
    }

    pub fn as_duration(&self) -> TimeDelta {
        self.0
    }

    pub fn num_minutes(&self) -> i64 {
        self.0.num_minutes()
    }
}

fn invalid(reason: &str) -> ValidationError {
    ValidationError::InvalidField {
        field: "cooking_time",
        reason: reason.to_string(),
    }
}

fn too_large() -> ValidationError {
    invalid("duration is too large")
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Unsigned decimal (`90`, `1.5`) times `unit_secs`, in nanoseconds.
/// Digits past nanosecond precision are dropped.
fn scaled_nanos(value: &str, unit_secs: u64) -> Result<u128, ValidationError> {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if !is_digits(whole) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("duration field is not an unsigned number"));
    }

    let whole: u128 = whole.parse().map_err(|_| too_large())?;
    let fraction_nanos: u128 = fraction
        .bytes()
        .take(9)
        .zip((0..9).rev())
        .map(|(digit, exp)| u128::from(digit - b'0') * 10u128.pow(exp))
        .sum();

    whole
        .checked_mul(NANOS_PER_SEC)
        .and_then(|nanos| nanos.checked_add(fraction_nanos))
        .and_then(|nanos| nanos.checked_mul(u128::from(unit_secs)))
        .ok_or_else(too_large)
}

fn checked_sum(total: u128, part: u128) -> Result<u128, ValidationError> {
    total.checked_add(part).ok_or_else(too_large)
}

impl FromStr for CookingTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(invalid("duration is empty"));
        }
        if s.starts_with('-') {
            return Err(invalid("duration must not be negative"));
        }

        let nanos = if let Some(rest) = s.strip_prefix('P') {
            parse_iso8601(rest)?
        } else {
            parse_clock(s)?
        };

        Self::from_nanos(nanos)
    }
}

/// Parses the part after the leading `P`: `[nW][nD][T[nH][nM][nS]]`.
fn parse_iso8601(s: &str) -> Result<u128, ValidationError> {
    let (date, time) = match s.split_once('T') {
        Some((date, time)) if !time.is_empty() => (date, Some(time)),
        Some(_) => return Err(invalid("ISO 8601 duration has an empty time part")),
        None => (s, None),
    };
    if date.is_empty() && time.is_none() {
        return Err(invalid("ISO 8601 duration has no components"));
    }

    let mut total = 0;
    for (value, unit) in iso_components(date)? {
        let unit_secs = match unit {
            'W' => 7 * SECS_PER_DAY,
            'D' => SECS_PER_DAY,
            'Y' | 'M' => return Err(invalid("years and months are not supported in durations")),
            _ => return Err(invalid("unknown ISO 8601 date designator")),
        };
        total = checked_sum(total, scaled_nanos(&value, unit_secs)?)?;
    }
    if let Some(time) = time {
        for (value, unit) in iso_components(time)? {
            let unit_secs = match unit {
                'H' => SECS_PER_HOUR,
                'M' => SECS_PER_MINUTE,
                'S' => 1,
                _ => return Err(invalid("unknown ISO 8601 time designator")),
            };
            total = checked_sum(total, scaled_nanos(&value, unit_secs)?)?;
        }
    }
    Ok(total)
}

fn iso_components(s: &str) -> Result<Vec<(String, char)>, ValidationError> {
    let mut components = Vec::new();
    let mut number = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() || c == '.' || c == ',' {
            number.push(if c == ',' { '.' } else { c });
        } else if c.is_ascii_alphabetic() {
            if number.is_empty() {
                return Err(invalid("ISO 8601 designator without a value"));
            }
            components.push((std::mem::take(&mut number), c.to_ascii_uppercase()));
        } else {
            return Err(invalid("unexpected character in ISO 8601 duration"));
        }
    }
    if !number.is_empty() {
        return Err(invalid("ISO 8601 value without a designator"));
    }
    Ok(components)
}

/// Parses `[D day[s], ][[HH:]MM:]SS[.fff]`. Every field is unsigned.
fn parse_clock(s: &str) -> Result<u128, ValidationError> {
    let (mut total, clock) = match s.split_once("day") {
        Some((days, rest)) => {
            let days = days.trim();
            if !is_digits(days) {
                return Err(invalid("day count is not a number"));
            }
            let rest = rest.strip_prefix('s').unwrap_or(rest);
            let rest = rest.trim_start_matches(',').trim();
            (scaled_nanos(days, SECS_PER_DAY)?, rest)
        }
        None => (0, s),
    };

    if !clock.is_empty() {
        let parts: Vec<&str> = clock.split(':').map(str::trim).collect();
        if parts.len() > 3 {
            return Err(invalid("clock duration has too many fields"));
        }
        let units = [SECS_PER_HOUR, SECS_PER_MINUTE, 1];
        let seconds_index = parts.len() - 1;
        for (index, (part, unit_secs)) in parts
            .iter()
            .zip(&units[units.len() - parts.len()..])
            .enumerate()
        {
            if index != seconds_index && !is_digits(part) {
                return Err(invalid("clock duration field is not a number"));
            }
            total = checked_sum(total, scaled_nanos(part, *unit_secs)?)?;
        }
    }

    Ok(total)
}

impl fmt::Display for CookingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.num_seconds().unsigned_abs();
        let nanos = self.0.subsec_nanos().unsigned_abs();

        let days = total / SECS_PER_DAY;
        let hours = (total % SECS_PER_DAY) / SECS_PER_HOUR;
        let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
        let seconds = total % SECS_PER_MINUTE;

        f.write_str("P")?;
        if days > 0 {
            write!(f, "{days}D")?;
        }
        if hours == 0 && minutes == 0 && seconds == 0 && nanos == 0 {
            if days == 0 {
                f.write_str("T0S")?;
            }
            return Ok(());
        }
        f.write_str("T")?;
        if hours > 0 {
            write!(f, "{hours}H")?;
        }
        if minutes > 0 {
            write!(f, "{minutes}M")?;
        }
        if nanos > 0 {
            let fraction = format!("{nanos:09}");
            write!(f, "{seconds}.{}S", fraction.trim_end_matches('0'))?;
        } else if seconds > 0 {
            write!(f, "{seconds}S")?;
        }
        Ok(())
    }
}

impl Serialize for CookingTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCookingTime {
    Whole(u64),
    Seconds(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for CookingTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match RawCookingTime::deserialize(deserializer)? {
            RawCookingTime::Whole(secs) => Self::from_secs(secs),
            RawCookingTime::Seconds(secs) => Self::from_secs_f64(secs),
            RawCookingTime::Text(text) => text.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: &str) -> i64 {
        s.parse::<CookingTime>().unwrap().as_duration().num_seconds()
    }

    #[test]
    fn parses_iso8601() {
        assert_eq!(secs("PT1H30M"), 5400);
        assert_eq!(secs("P1DT2H"), 93_600);
        assert_eq!(secs("PT45S"), 45);
        assert_eq!(secs("P1W"), 604_800);
        assert_eq!(secs("PT0.5H"), 1800);
    }

    #[test]
    fn parses_clock_strings() {
        assert_eq!(secs("01:30:00"), 5400);
        assert_eq!(secs("45:00"), 2700);
        assert_eq!(secs("90"), 90);
        assert_eq!(secs("1 day, 00:10:00"), 87_000);
        assert_eq!(secs("2 days, 1:00:00"), 176_400);
    }

    #[test]
    fn rejects_malformed_and_negative() {
        for input in [
            "", "-PT5M", "-30", "P", "PT", "PT5", "P1M", "soon", "1:2:3:4", "PTxM", "1:-30",
            "1 day, -600", "+30", "1:+30", "-1 day", "1.5:30", "1::30", "PT-5M", "PT1.2.3S",
        ] {
            assert!(input.parse::<CookingTime>().is_err(), "accepted {input:?}");
        }
        assert!(CookingTime::from_secs_f64(-1.0).is_err());
        assert!(CookingTime::from_secs_f64(f64::NAN).is_err());
    }

    #[test]
    fn huge_values_are_rejected_not_wrapped() {
        for input in [
            "213503982334602 days",
            "300000000000000 days",
            "P999999999999999999999999W",
            "PT99999999999999999999H",
            "99999999999999999999999999999999999999999",
        ] {
            match input.parse::<CookingTime>() {
                Err(ValidationError::InvalidField {
                    field: "cooking_time",
                    ..
                }) => {}
                other => panic!("{input:?} gave {other:?}"),
            }
        }
        assert!(CookingTime::from_secs(u64::MAX).is_err());
    }

    #[test]
    fn fractional_fields_are_exact() {
        let time: CookingTime = "PT0.1S".parse().unwrap();
        assert_eq!(time.as_duration(), TimeDelta::milliseconds(100));
        let time: CookingTime = "1:30.25".parse().unwrap();
        assert_eq!(time.as_duration(), TimeDelta::milliseconds(90_250));
    }

    #[test]
    fn large_whole_seconds_round_trip() {
        let secs = (1u64 << 53) + 1;
        let time = CookingTime::from_secs(secs).unwrap();

        let text = serde_json::to_string(&time).unwrap();
        let back: CookingTime = serde_json::from_str(&text).unwrap();
        assert_eq!(back, time);

        let from_number: CookingTime = serde_json::from_str(&secs.to_string()).unwrap();
        assert_eq!(from_number, time);
        assert_eq!(from_number.as_duration().num_seconds(), secs as i64);
    }

    #[test]
    fn displays_as_iso8601() {
        assert_eq!(CookingTime::from_secs(0).unwrap().to_string(), "PT0S");
        assert_eq!(CookingTime::from_secs(5400).unwrap().to_string(), "PT1H30M");
        assert_eq!(CookingTime::from_secs(86_400).unwrap().to_string(), "P1D");
        assert_eq!(CookingTime::from_secs(90_061).unwrap().to_string(), "P1DT1H1M1S");
        assert_eq!(CookingTime::from_secs_f64(1.5).unwrap().to_string(), "PT1.5S");
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let from_int: CookingTime = serde_json::from_str("1800").unwrap();
        let from_float: CookingTime = serde_json::from_str("1800.0").unwrap();
        let from_iso: CookingTime = serde_json::from_str("\"PT30M\"").unwrap();
        assert_eq!(from_int, from_float);
        assert_eq!(from_int, from_iso);
        assert_eq!(from_int.num_minutes(), 30);
        assert_eq!(serde_json::to_string(&from_int).unwrap(), "\"PT30M\"");

        assert!(serde_json::from_str::<CookingTime>("-5").is_err());
        assert!(serde_json::from_str::<CookingTime>("true").is_err());
    }
}
