//! Hijri dates for new field reports, on the Umm al-Qura calendar.

use chrono::{Datelike, NaiveDate};
use icu_calendar::cal::HijriUmmAlQura;
use icu_calendar::Date;

const MONTHS: [&str; 12] = [
    "محرم",
    "صفر",
    "ربيع الأول",
    "ربيع الآخر",
    "جمادى الأولى",
    "جمادى الآخرة",
    "رجب",
    "شعبان",
    "رمضان",
    "شوال",
    "ذو القعدة",
    "ذو الحجة",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HijriDate {
    pub year: i64,
    /// 1-based
    pub month: u32,
    pub day: u32,
}

impl HijriDate {
    /// `None` only when the date lies outside the calendar's supported range.
    pub fn from_gregorian(date: NaiveDate) -> Option<Self> {
        let month = u8::try_from(date.month()).ok()?;
        let day = u8::try_from(date.day()).ok()?;
        let iso = Date::try_new_iso(date.year(), month, day).ok()?;
        let hijri = Date::new_from_iso(iso, HijriUmmAlQura::new());

        Some(Self {
            year: i64::from(hijri.era_year().year),
            month: u32::from(hijri.month().ordinal),
            day: u32::from(hijri.day_of_month().0),
        })
    }

    pub fn month_name(&self) -> &'static str {
        MONTHS[(self.month as usize).clamp(1, 12) - 1]
    }

    /// e.g. `١ رمضان ١٤٤٧`
    pub fn to_arabic_string(&self) -> String {
        format!(
            "{} {} {}",
            arabic_digits(&self.day.to_string()),
            self.month_name(),
            arabic_digits(&self.year.to_string())
        )
    }
}

/// Render ASCII digits as Arabic-Indic digits.
pub fn arabic_digits(ascii: &str) -> String {
    ascii
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}
