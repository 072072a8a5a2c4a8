use chrono::{DateTime, Utc};

/// Separates fields within one line of `git log` output.
pub(crate) const FIELD_SEPARATOR: char = '\u{1f}';

/// An attribute of a commit that can be read back with `Git::log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogFormat {
    Hash,
    AuthorName,
    AuthorEmail,
    AuthorDate,
    CommitterName,
    CommitterEmail,
    CommitterDate,
}

impl LogFormat {
    /// Returns the `git log --format` placeholder for this attribute.
    pub fn placeholder(self) -> &'static str {
        match self {
            LogFormat::Hash => "%H",
            LogFormat::AuthorName => "%an",
            LogFormat::AuthorEmail => "%ae",
            LogFormat::AuthorDate => "%at",
            LogFormat::CommitterName => "%cn",
            LogFormat::CommitterEmail => "%ce",
            LogFormat::CommitterDate => "%ct",
        }
    }

    fn is_date(self) -> bool {
        matches!(self, LogFormat::AuthorDate | LogFormat::CommitterDate)
    }

    pub(crate) fn parse(self, text: &str) -> LogValue {
        if self.is_date() {
            if let Some(time) = text
                .parse::<i64>()
                .ok()
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            {
                return LogValue::Date(time);
            }
        }
        LogValue::Text(text.to_string())
    }
}

/// Builds the `--format` argument for the given attributes.
pub(crate) fn format_arg(attributes: &[LogFormat]) -> String {
    let placeholders: Vec<&str> = attributes.iter().map(|a| a.placeholder()).collect();
    format!("--format={}", placeholders.join("%x1f"))
}

/// The value of one commit attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogValue {
    Text(String),
    Date(DateTime<Utc>),
}

impl LogValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            LogValue::Text(text) => Some(text),
            LogValue::Date(_) => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            LogValue::Date(time) => Some(*time),
            LogValue::Text(_) => None,
        }
    }
}

/// The requested attributes of a single commit, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    values: Vec<(LogFormat, LogValue)>,
}

impl LogEntry {
    pub(crate) fn parse(attributes: &[LogFormat], line: &str) -> LogEntry {
        let values = attributes
            .iter()
            .zip(line.split(FIELD_SEPARATOR))
            .map(|(attribute, text)| (*attribute, attribute.parse(text)))
            .collect();

        LogEntry { values }
    }

    pub fn get(&self, attribute: LogFormat) -> Option<&LogValue> {
        self.values
            .iter()
            .find(|(a, _)| *a == attribute)
            .map(|(_, v)| v)
    }

    pub fn values(&self) -> &[(LogFormat, LogValue)] {
        &self.values
    }
}
