//! Monthly period model.
//!
//! Allocation works on a fixed horizon of twelve calendar months,
//! January through December, independent of any fiscal year start.
//! `Month` is the immutable period key; `MonthlyHours` is a dense
//! twelve-entry vector indexed by it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut};

/// Number of periods in the allocation horizon.
pub const MONTHS_PER_YEAR: usize = 12;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; MONTHS_PER_YEAR] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based position in the year (January = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// English month name.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Looks up a month by English name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Month> {
        let name = name.trim();
        Month::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hours per month over the twelve-month horizon.
///
/// Used for both demand (work items) and capacity (resources).
/// Serialized as a month-name map; months absent from the map read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Month, f64>", into = "BTreeMap<Month, f64>")]
pub struct MonthlyHours([f64; MONTHS_PER_YEAR]);

impl MonthlyHours {
    /// All months zero.
    pub fn zero() -> Self {
        Self([0.0; MONTHS_PER_YEAR])
    }

    /// Every month set to the same value.
    pub fn filled(hours: f64) -> Self {
        Self([hours; MONTHS_PER_YEAR])
    }

    /// Builds from a calendar-ordered array.
    pub fn from_array(hours: [f64; MONTHS_PER_YEAR]) -> Self {
        Self(hours)
    }

    /// A vector with a single non-zero month.
    pub fn single(month: Month, hours: f64) -> Self {
        Self::zero().with(month, hours)
    }

    /// Sets one month, builder style.
    pub fn with(mut self, month: Month, hours: f64) -> Self {
        self.0[month.index()] = hours;
        self
    }

    /// Hours for a month.
    #[inline]
    pub fn get(&self, month: Month) -> f64 {
        self.0[month.index()]
    }

    /// Sets hours for a month.
    #[inline]
    pub fn set(&mut self, month: Month, hours: f64) {
        self.0[month.index()] = hours;
    }

    /// Calendar-ordered view of the values.
    pub fn as_array(&self) -> &[f64; MONTHS_PER_YEAR] {
        &self.0
    }

    /// Iterates `(month, hours)` pairs in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (Month, f64)> + '_ {
        Month::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    /// Sum over all twelve months.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Whether every month is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|h| h.is_finite() && *h >= 0.0)
    }

    /// First month that is negative or non-finite.
    pub fn first_invalid(&self) -> Option<(Month, f64)> {
        self.iter().find(|(_, h)| !h.is_finite() || *h < 0.0)
    }

    /// Each month divided by `divisor`.
    pub fn divided_by(&self, divisor: f64) -> Self {
        let mut out = *self;
        for h in out.0.iter_mut() {
            *h /= divisor;
        }
        out
    }
}

impl Index<Month> for MonthlyHours {
    type Output = f64;

    fn index(&self, month: Month) -> &f64 {
        &self.0[month.index()]
    }
}

impl IndexMut<Month> for MonthlyHours {
    fn index_mut(&mut self, month: Month) -> &mut f64 {
        &mut self.0[month.index()]
    }
}

impl AddAssign<&MonthlyHours> for MonthlyHours {
    fn add_assign(&mut self, rhs: &MonthlyHours) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl Add for MonthlyHours {
    type Output = MonthlyHours;

    fn add(mut self, rhs: MonthlyHours) -> MonthlyHours {
        self += &rhs;
        self
    }
}

impl<'a> std::iter::Sum<&'a MonthlyHours> for MonthlyHours {
    fn sum<I: Iterator<Item = &'a MonthlyHours>>(iter: I) -> Self {
        iter.fold(MonthlyHours::zero(), |mut acc, h| {
            acc += h;
            acc
        })
    }
}

impl From<BTreeMap<Month, f64>> for MonthlyHours {
    fn from(map: BTreeMap<Month, f64>) -> Self {
        let mut hours = MonthlyHours::zero();
        for (month, h) in map {
            hours.set(month, h);
        }
        hours
    }
}

impl From<MonthlyHours> for BTreeMap<Month, f64> {
    fn from(hours: MonthlyHours) -> Self {
        hours.iter().collect()
    }
}
