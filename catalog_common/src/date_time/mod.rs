use thiserror::Error;
use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

mod bson;

/// A date and time in the UTC time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UtcDateTimeError {
    #[error("timestamp out of range")]
    OutOfRange,
    #[error("invalid date time string format `{0}`")]
    InvalidFormat(String),
}

/// Calendar date format used for birthdates, `DD-MM-YYYY`.
const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[day]-[month]-[year]");

const NANOSECONDS_PER_MILLISECOND: i128 = 1_000_000;

impl UtcDateTime {
    /// Creates a date time from milliseconds since the Unix epoch, the resolution
    /// the document store keeps timestamps in.
    pub fn from_millis(milliseconds: i64) -> Result<Self, UtcDateTimeError> {
        OffsetDateTime::from_unix_timestamp_nanos(
            i128::from(milliseconds) * NANOSECONDS_PER_MILLISECOND,
        )
        .map(Self)
        .map_err(|_| UtcDateTimeError::OutOfRange)
    }

    /// Milliseconds since the Unix epoch, truncating sub-millisecond precision.
    pub fn timestamp_millis(self) -> i64 {
        (self.0.unix_timestamp_nanos() / NANOSECONDS_PER_MILLISECOND) as i64
    }

    /// Parses a `DD-MM-YYYY` calendar date as midnight UTC of that day.
    ///
    /// Only the zero-padded form is accepted, so formatting the result with
    /// [`Self::format_date`] gives back the exact input.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_common::date_time::UtcDateTime;
    ///
    /// let date = UtcDateTime::parse_date("15-03-1990").unwrap();
    /// assert_eq!(date.timestamp_millis(), 637_459_200_000);
    /// assert_eq!(date.format_date().unwrap(), "15-03-1990");
    /// ```
    pub fn parse_date<S: AsRef<str>>(input: S) -> Result<Self, UtcDateTimeError> {
        let input = input.as_ref();
        if !crate::regex!(r"^\d{2}-\d{2}-\d{4}$").is_match(input) {
            return Err(UtcDateTimeError::InvalidFormat(input.into()));
        }
        Date::parse(input, DATE_FORMAT)
            .map(|date| Self(date.midnight().assume_utc()))
            .map_err(|_| UtcDateTimeError::InvalidFormat(input.into()))
    }

    /// Formats the calendar day of this instant as `DD-MM-YYYY`.
    pub fn format_date(&self) -> Result<String, time::error::Format> {
        self.0.date().format(DATE_FORMAT)
    }
}
