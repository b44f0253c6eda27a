//! Reservation intake validation
//!
//! An ordered pipeline of independent checks over a raw reservation draft.
//! Checks do not short-circuit: each one records its violation and lets the
//! rest of the pipeline run, so a bad payload reports everything wrong with
//! it in a single round trip. Checks that depend on a value an earlier check
//! failed to produce (e.g. the closed-day rule when the date is malformed)
//! are skipped. Messages are de-duplicated at the end, preserving first
//! occurrence order.
//!
//! The caller passes `now` explicitly; nothing in here reads the clock.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use serde::Deserialize;
use serde_json::Value;

use crate::booking::lifecycle::ReservationStatus;

/// Opening and closing times, both inclusive, as (hour, minute).
pub const OPENING_HM: (u32, u32) = (10, 30);
pub const CLOSING_HM: (u32, u32) = (21, 30);

/// The restaurant is closed on Tuesdays.
const CLOSED_DAY: Weekday = Weekday::Tue;

const MSG_FIRST_NAME: &str = "Reservation must include a first_name.";
const MSG_LAST_NAME: &str = "Reservation must include a last_name.";
const MSG_MOBILE: &str =
    "Reservation must include a mobile_number in this format: XXX-XXX-XXXX or XXX-XXXX.";
const MSG_DATE: &str = "Reservation must include a reservation_date in this format: YYYY-MM-DD.";
const MSG_PAST: &str = "Reservation cannot be made in the past. Only future reservations are allowed.";
const MSG_CLOSED_DAY: &str =
    "Reservations cannot be made on a Tuesday, when the restaurant is closed.";
const MSG_TIME: &str = "Reservation must include a reservation_time in this format: HH:MM.";
const MSG_HOURS: &str = "Reservation time must be between 10:30 and 21:30.";
const MSG_TIME_PASSED: &str = "Reservation time must be later than the current time.";
const MSG_PEOPLE: &str =
    "Reservation must indicate the number of people in a party, ranging from 1 to 6.";

/// Raw reservation payload as received from the client.
///
/// Every field stays optional (and `people` stays an untyped JSON value) so
/// malformed input reaches the pipeline and gets a rule message instead of
/// dying in JSON extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile_number: Option<String>,
    pub reservation_date: Option<String>,
    pub reservation_time: Option<String>,
    pub people: Option<Value>,
    pub status: Option<String>,
}

/// A draft that passed every intake check, ready to persist.
///
/// Date and time are re-serialized from their parsed forms, so stored values
/// are canonical regardless of what shape variant the client sent.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: String,
    pub reservation_time: String,
    pub people: i64,
}

/// Run the full intake pipeline over `draft`.
///
/// Returns the validated reservation, or every violated rule's message in
/// check order with duplicates removed.
pub fn validate_create(
    draft: &ReservationDraft,
    now: DateTime<Utc>,
) -> Result<NewReservation, Vec<String>> {
    let today = now.date_naive();
    let now_time = now.time();
    let mut violations: Vec<String> = Vec::new();

    let first_name = check_required_text(&draft.first_name, MSG_FIRST_NAME, &mut violations);
    let last_name = check_required_text(&draft.last_name, MSG_LAST_NAME, &mut violations);
    let mobile_number = check_mobile_number(&draft.mobile_number, &mut violations);

    let date = check_date(&draft.reservation_date, &mut violations);
    if let Some(date) = date {
        if date < today {
            violations.push(MSG_PAST.to_string());
        }
        if date.weekday() == CLOSED_DAY {
            violations.push(MSG_CLOSED_DAY.to_string());
        }
    }

    let time = check_time(&draft.reservation_time, &mut violations);
    if let Some(time) = time {
        let hm = (time.hour(), time.minute());
        if hm < OPENING_HM || hm > CLOSING_HM {
            violations.push(MSG_HOURS.to_string());
        }
        if date == Some(today) && time < now_time {
            violations.push(MSG_TIME_PASSED.to_string());
        }
    }

    let people = check_people(&draft.people, &mut violations);
    check_status_on_create(&draft.status, &mut violations);

    dedup_first_seen(&mut violations);

    match (
        violations.is_empty(),
        first_name,
        last_name,
        mobile_number,
        date,
        time,
        people,
    ) {
        (
            true,
            Some(first_name),
            Some(last_name),
            Some(mobile_number),
            Some(date),
            Some(time),
            Some(people),
        ) => Ok(NewReservation {
            first_name,
            last_name,
            mobile_number,
            reservation_date: date.format("%Y-%m-%d").to_string(),
            reservation_time: time.format("%H:%M").to_string(),
            people,
        }),
        _ => Err(violations),
    }
}

fn check_required_text(
    field: &Option<String>,
    message: &str,
    violations: &mut Vec<String>,
) -> Option<String> {
    match field.as_deref() {
        Some(value) if !value.trim().is_empty() => Some(value.to_string()),
        _ => {
            violations.push(message.to_string());
            None
        }
    }
}

fn check_mobile_number(field: &Option<String>, violations: &mut Vec<String>) -> Option<String> {
    let valid = field
        .as_deref()
        .is_some_and(|m| matches_shape(m, "ddd-ddd-dddd") || matches_shape(m, "ddd-dddd"));
    if valid {
        field.clone()
    } else {
        violations.push(MSG_MOBILE.to_string());
        None
    }
}

fn check_date(field: &Option<String>, violations: &mut Vec<String>) -> Option<NaiveDate> {
    let parsed = field.as_deref().and_then(parse_iso_date);
    if parsed.is_none() {
        violations.push(MSG_DATE.to_string());
    }
    parsed
}

fn check_time(field: &Option<String>, violations: &mut Vec<String>) -> Option<NaiveTime> {
    let parsed = field.as_deref().and_then(parse_hm_time);
    if parsed.is_none() {
        violations.push(MSG_TIME.to_string());
    }
    parsed
}

fn check_people(field: &Option<Value>, violations: &mut Vec<String>) -> Option<i64> {
    // Must be a genuine JSON integer; "3" (a string) or 2.5 are rejected.
    let people = field
        .as_ref()
        .and_then(Value::as_i64)
        .filter(|n| (1..=6).contains(n));
    if people.is_none() {
        violations.push(MSG_PEOPLE.to_string());
    }
    people
}

fn check_status_on_create(field: &Option<String>, violations: &mut Vec<String>) {
    let Some(raw) = field.as_deref() else {
        return;
    };
    match raw.parse::<ReservationStatus>() {
        Ok(ReservationStatus::Booked) => {}
        Ok(other) => violations.push(format!(
            "A new reservation cannot have status '{other}'; it is created as 'booked'."
        )),
        Err(unknown) => violations.push(unknown.to_string()),
    }
}

/// Byte-shape match: `d` in the shape requires an ASCII digit, any other
/// byte requires itself. Length must match exactly.
fn matches_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value
            .bytes()
            .zip(shape.bytes())
            .all(|(v, s)| if s == b'd' { v.is_ascii_digit() } else { v == s })
}

/// Parse `YYYY-MM-DD` from its numeric components. Explicit calendar
/// arithmetic keeps the result independent of locale and timezone.
fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    if !matches_shape(raw, "dddd-dd-dd") {
        return None;
    }
    let year: i32 = raw.get(0..4)?.parse().ok()?;
    let month: u32 = raw.get(5..7)?.parse().ok()?;
    let day: u32 = raw.get(8..10)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse `HH:MM` (24h).
fn parse_hm_time(raw: &str) -> Option<NaiveTime> {
    if !matches_shape(raw, "dd:dd") {
        return None;
    }
    let hour: u32 = raw.get(0..2)?.parse().ok()?;
    let minute: u32 = raw.get(3..5)?.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Final aggregation pass: drop repeated messages, keeping first occurrence.
fn dedup_first_seen(messages: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    messages.retain(|m| seen.insert(m.clone()));
}
