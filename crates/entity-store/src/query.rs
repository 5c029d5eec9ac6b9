use chrono::{Datelike, Duration, NaiveDate};

/// Case-insensitive substring search term.
///
/// An empty term matches every value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    lowered: String,
}

impl SearchTerm {
    /// Creates a search term.
    pub fn new(term: impl Into<String>) -> Self {
        let raw = term.into();
        let lowered = raw.to_lowercase();
        Self { raw, lowered }
    }

    /// Returns the term as given by the caller.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true if `value` contains the term, ignoring case.
    pub fn matches(&self, value: &str) -> bool {
        self.lowered.is_empty() || value.to_lowercase().contains(&self.lowered)
    }

    /// Returns true if any of `values` contains the term, ignoring case.
    pub fn matches_any<'a>(&self, values: impl IntoIterator<Item = &'a str>) -> bool {
        values.into_iter().any(|value| self.matches(value))
    }
}

impl From<&str> for SearchTerm {
    fn from(term: &str) -> Self {
        Self::new(term)
    }
}

impl From<String> for SearchTerm {
    fn from(term: String) -> Self {
        Self::new(term)
    }
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First date in the range (inclusive).
    pub start: NaiveDate,
    /// Last date in the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from `start` to `end`, both inclusive.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns Monday through Sunday of the week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let days_since_monday = i64::from(date.weekday().num_days_from_monday());
        let start = date - Duration::days(days_since_monday);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// Returns true if `date` falls within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
