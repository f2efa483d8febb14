//! Gregorian to Hijri conversion.
//!
//! The arithmetic lives behind [`HijriConverter`]; the gateway carries an
//! optional implementation and reports `FeatureUnavailable` without one.
//! [`TabularHijri`] is the built-in arithmetic calendar.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use minbar_core::Error;

/// Regional adjustments beyond this many days are clamped.
pub const MAX_ADJUSTMENT_DAYS: i64 = 2;

/// Arabic Hijri month names, Muharram first.
pub const HIJRI_MONTHS: [&str; 12] = [
    "محرم",
    "صفر",
    "ربيع الأول",
    "ربيع الثاني",
    "جمادى الأولى",
    "جمادى الآخرة",
    "رجب",
    "شعبان",
    "رمضان",
    "شوال",
    "ذو القعدة",
    "ذو الحجة",
];

/// A Hijri calendar day as numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HijriDay {
    pub year: u32,
    /// 1-based month.
    pub month: u8,
    pub day: u8,
}

/// Converts a Gregorian date to the Hijri calendar.
pub trait HijriConverter: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when `date` is outside the converter's supported range.
    fn to_hijri(&self, date: NaiveDate) -> Result<HijriDay, Error>;
}

/// Julian day number of 1 Muharram 1 AH (16 July 622, Julian).
const HIJRI_EPOCH_JDN: i64 = 1_948_440;

/// Offset from chrono's days-since-CE count to the Julian day number.
const CE_TO_JDN: i64 = 1_721_425;

/// The tabular (arithmetic) Islamic calendar: 30-year cycles with 11 leap
/// years, months alternating 30 and 29 days.
///
/// Observation-based calendars such as Umm al-Qura can differ from it by a
/// day or two; the regional adjustment in [`CalendarAdapter::convert`]
/// covers that.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabularHijri;

impl TabularHijri {
    /// Julian day number of `day`/`month`/`year` AH.
    fn to_jdn(year: i64, month: i64, day: i64) -> i64 {
        day + (59 * (month - 1) + 1) / 2 + (year - 1) * 354 + (3 + 11 * year).div_euclid(30) + HIJRI_EPOCH_JDN - 1
    }
}

impl HijriConverter for TabularHijri {
    fn to_hijri(&self, date: NaiveDate) -> Result<HijriDay, Error> {
        let jdn = i64::from(date.num_days_from_ce()) + CE_TO_JDN;
        if jdn < HIJRI_EPOCH_JDN {
            return Err(Error::InvalidInput(format!("{date} is before the Hijri epoch")));
        }

        let mut year = (30 * (jdn - HIJRI_EPOCH_JDN) + 10_646).div_euclid(10_631);
        while Self::to_jdn(year + 1, 1, 1) <= jdn {
            year += 1;
        }
        while Self::to_jdn(year, 1, 1) > jdn {
            year -= 1;
        }
        let month = (1..=12).rev().find(|&m| Self::to_jdn(year, m, 1) <= jdn).unwrap_or(1);
        let day = jdn - Self::to_jdn(year, month, 1) + 1;

        let out_of_range = |_| Error::InvalidInput(format!("{date} is outside the supported range"));
        Ok(HijriDay {
            year: u32::try_from(year).map_err(out_of_range)?,
            month: u8::try_from(month).map_err(out_of_range)?,
            day: u8::try_from(day).map_err(out_of_range)?,
        })
    }
}

/// A converted date, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HijriDate {
    pub day: u8,
    pub month: u8,
    pub month_name: &'static str,
    pub year: u32,
    /// `"{day} {month_name} {year} هـ"`.
    pub formatted: String,
}

impl TryFrom<HijriDay> for HijriDate {
    type Error = Error;

    fn try_from(day: HijriDay) -> Result<Self, Error> {
        let month_name = usize::from(day.month)
            .checked_sub(1)
            .and_then(|index| HIJRI_MONTHS.get(index).copied())
            .ok_or_else(|| Error::InvalidInput(format!("hijri month {} out of range", day.month)))?;
        Ok(Self {
            day: day.day,
            month: day.month,
            month_name,
            year: day.year,
            formatted: format!("{} {month_name} {} هـ", day.day, day.year),
        })
    }
}

/// Calendar conversion through the installed converter, if any.
#[derive(Clone, Copy)]
pub struct CalendarAdapter<'a> {
    converter: Option<&'a dyn HijriConverter>,
}

impl std::fmt::Debug for CalendarAdapter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarAdapter")
            .field("converter", &self.converter.is_some())
            .finish()
    }
}

impl<'a> CalendarAdapter<'a> {
    pub(crate) fn new(converter: Option<&'a dyn HijriConverter>) -> Self {
        Self { converter }
    }

    /// Whether a converter is installed.
    pub fn is_available(&self) -> bool {
        self.converter.is_some()
    }

    /// Convert `date`, shifted by `adjustment` days (clamped to ±2) first.
    ///
    /// # Errors
    ///
    /// `FeatureUnavailable` without a converter; `InvalidInput` when the
    /// shifted date leaves chrono's range or the converter rejects it.
    pub fn convert(&self, date: NaiveDate, adjustment: i64) -> Result<HijriDate, Error> {
        let converter = self
            .converter
            .ok_or_else(|| Error::FeatureUnavailable("no hijri converter installed".into()))?;

        let shifted = shift(date, adjustment.clamp(-MAX_ADJUSTMENT_DAYS, MAX_ADJUSTMENT_DAYS))
            .ok_or_else(|| Error::InvalidInput(format!("{date} cannot be adjusted by {adjustment} days")))?;

        HijriDate::try_from(converter.to_hijri(shifted)?)
    }

    /// Like [`CalendarAdapter::convert`] for a `YYYY-MM-DD` string.
    pub fn convert_iso(&self, date: &str, adjustment: i64) -> Result<HijriDate, Error> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| Error::InvalidInput(format!("invalid date {date:?}: {e}")))?;
        self.convert(date, adjustment)
    }
}

fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 { date.checked_add_days(magnitude) } else { date.checked_sub_days(magnitude) }
}
