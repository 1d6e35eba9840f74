//! Weighted sampling and timestamp helpers shared by every generator.

use std::ops::RangeInclusive;

use mongodb::bson::DateTime;
use rand::Rng;
use time::{Duration, OffsetDateTime};
use uuid::Builder;

/// Returns `true` with the given probability, expressed in percent.
///
/// Values of 100 or more always return `true`; 0 never does.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, percent: u32) -> bool {
    rng.gen_range(0..100) < percent
}

/// Produces a value with the given probability (in percent), otherwise `None`.
pub fn maybe<R: Rng + ?Sized, T>(
    rng: &mut R,
    percent: u32,
    value: impl FnOnce(&mut R) -> T,
) -> Option<T> {
    if chance(rng, percent) {
        Some(value(rng))
    } else {
        None
    }
}

/// Picks one element from a non-empty slice.
///
/// Panics on an empty slice; callers only pass constant tables.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Random v4 UUID rendered as a hyphenated string, drawn from `rng`.
pub fn uuid_string<R: Rng + ?Sized>(rng: &mut R) -> String {
    Builder::from_random_bytes(rng.r#gen()).into_uuid().to_string()
}

/// Converts to a BSON datetime (millisecond precision).
pub fn to_bson(at: OffsetDateTime) -> DateTime {
    DateTime::from_millis(unix_millis(at))
}

/// Milliseconds since the Unix epoch.
pub fn unix_millis(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}

/// A point between `hours.start()` and `hours.end()` hours before `now`.
pub fn hours_before<R: Rng + ?Sized>(
    now: OffsetDateTime,
    hours: RangeInclusive<i64>,
    rng: &mut R,
) -> DateTime {
    to_bson(now - Duration::hours(rng.gen_range(hours)))
}

/// A point between `days.start()` and `days.end()` days before `now`.
pub fn days_before<R: Rng + ?Sized>(
    now: OffsetDateTime,
    days: RangeInclusive<i64>,
    rng: &mut R,
) -> DateTime {
    to_bson(now - Duration::days(rng.gen_range(days)))
}
