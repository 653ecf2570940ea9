use crate::{constants::DAY_SECONDS, prelude::Epoch};

/// Julian Date of J2000.0
const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Greenwich Mean Sidereal Time (radians) at 0h UT of the [Epoch] day,
/// from the IAU polynomial referenced to J2000.0.
pub fn gmst_at_midnight_rad(t: Epoch) -> f64 {
    let (year, month, day, _, _, _, _) = t.to_gregorian_utc();

    let days = julian_date_at_midnight(year, month, day) - J2000_JD;
    let centuries = days / DAYS_PER_JULIAN_CENTURY;

    let gmst_deg = 280.46061837 + 360.98564736629 * days + 0.000387933 * centuries.powi(2)
        - centuries.powi(3) / 38_710_000.0;

    gmst_deg.rem_euclid(360.0).to_radians()
}

/// Julian Date at 0h of this calendar day (Gregorian calendar).
fn julian_date_at_midnight(year: i32, month: u8, day: u8) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
}

/// Seconds elapsed since 0h UTC of the [Epoch] day.
pub fn utc_time_of_day_seconds(t: Epoch) -> f64 {
    let (_, _, _, hours, minutes, seconds, nanos) = t.to_gregorian_utc();
    let tod = hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds as f64 + nanos as f64 * 1.0E-9;
    tod % DAY_SECONDS
}
