use std::fmt;

use crate::error::{LookupError, Result};

/// An NBA season, labelled `YYYY-YY` after the calendar years it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Season {
    start_year: u16,
}

impl Season {
    pub fn from_start_year(start_year: u16) -> Self {
        Self { start_year }
    }

    /// Parse a `YYYY-YY` label.  The suffix must be the year after `YYYY`.
    pub fn parse(label: &str) -> Result<Self> {
        let invalid = || LookupError::InvalidSeason(label.to_string());
        let label_trimmed = label.trim();

        let (start, end) = label_trimmed.split_once('-').ok_or_else(invalid)?;
        if start.len() != 4
            || end.len() != 2
            || !start.bytes().all(|b| b.is_ascii_digit())
            || !end.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let start_year: u16 = start.parse().map_err(|_| invalid())?;
        let end_suffix: u16 = end.parse().map_err(|_| invalid())?;
        if (start_year + 1) % 100 != end_suffix {
            return Err(invalid());
        }
        Ok(Self { start_year })
    }

    /// The year sent as the `season` query parameter: the first four
    /// characters of the label.
    pub fn year(&self) -> String {
        format!("{:04}", self.start_year)
    }

    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.start_year, (self.start_year + 1) % 100)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Seasons from `latest` down to `earliest`, newest first.
pub fn available_seasons(latest: u16, earliest: u16) -> Vec<Season> {
    (earliest..=latest)
        .rev()
        .map(Season::from_start_year)
        .collect()
}
