use anyhow::{Result, bail};
use std::fmt;

/// The day whose sensor readings are being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyDate {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

impl SurveyDate {
    pub fn new(day: u8, month: u8, year: u16) -> Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("Invalid month: {}", month);
        }
        if !(1..=31).contains(&day) {
            bail!("Invalid day: {}", day);
        }
        Ok(Self { day, month, year })
    }

    /// URL path segment used by the data server: `YYYY/MM/DD`
    pub fn server_path(&self) -> String {
        format!("{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for SurveyDate {
    /// `DD-MM-YYYY`, as used in output file names
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }
}
