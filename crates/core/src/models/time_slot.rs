use std::{fmt, str::FromStr};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{LabError, LabResult};

/// Wire format for every calendar date the API accepts or returns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The fixed set of usage slots a lab can be booked or scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "09:00")]
    Morning,
    #[serde(rename = "12:00")]
    Noon,
    #[serde(rename = "15:00")]
    Afternoon,
}

impl TimeSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "09:00",
            TimeSlot::Noon => "12:00",
            TimeSlot::Afternoon => "15:00",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSlot {
    type Err = LabError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "09:00" => Ok(TimeSlot::Morning),
            "12:00" => Ok(TimeSlot::Noon),
            "15:00" => Ok(TimeSlot::Afternoon),
            other => Err(LabError::validation(format!(
                "invalid time slot '{}', expected one of 09:00, 12:00, 15:00",
                other
            ))),
        }
    }
}

/// Parses a `YYYY-MM-DD` date, naming `field` in the validation error.
pub fn parse_date(field: &str, value: &str) -> LabResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| LabError::validation(format!("invalid date for {}: '{}'", field, value)))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
