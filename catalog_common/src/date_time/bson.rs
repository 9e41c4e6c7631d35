use ::bson::DateTime;

use crate::date_time::{UtcDateTime, UtcDateTimeError};

impl From<UtcDateTime> for DateTime {
    fn from(value: UtcDateTime) -> Self {
        Self::from_millis(value.timestamp_millis())
    }
}

impl TryFrom<DateTime> for UtcDateTime {
    type Error = UtcDateTimeError;

    fn try_from(value: DateTime) -> Result<Self, Self::Error> {
        Self::from_millis(value.timestamp_millis())
    }
}
