use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// A date handed to git, either already in a form git understands or as a
/// structured value that is rendered as ISO-8601 text.
///
/// Naive values carry no zone and are taken to be UTC, so the resulting
/// commit does not depend on the host's time zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSpec {
    Text(String),
    Time(DateTime<FixedOffset>),
}

impl DateSpec {
    /// Returns the text git is given for this date.
    pub fn to_git(&self) -> String {
        match self {
            DateSpec::Text(text) => text.clone(),
            DateSpec::Time(time) => time.format(ISO_FORMAT).to_string(),
        }
    }
}

impl From<&str> for DateSpec {
    fn from(text: &str) -> DateSpec {
        DateSpec::Text(text.to_string())
    }
}

impl From<String> for DateSpec {
    fn from(text: String) -> DateSpec {
        DateSpec::Text(text)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateSpec {
    fn from(time: DateTime<Tz>) -> DateSpec {
        DateSpec::Time(time.fixed_offset())
    }
}

impl From<NaiveDateTime> for DateSpec {
    fn from(time: NaiveDateTime) -> DateSpec {
        Utc.from_utc_datetime(&time).into()
    }
}

impl From<NaiveDate> for DateSpec {
    fn from(date: NaiveDate) -> DateSpec {
        date.and_time(NaiveTime::MIN).into()
    }
}
