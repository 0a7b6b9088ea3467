// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::Duration;
use chrono::NaiveDateTime;
use chrono::SubsecRound;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A timestamp without a timezone and millisecond precision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(ndt: NaiveDateTime) -> Self {
        Self(ndt.trunc_subsecs(3))
    }

    /// Converts a timestamp into a `NaiveDateTime`.
    pub fn into_inner(self) -> NaiveDateTime {
        self.0
    }

    /// The current timestamp in the user's local time.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(chrono::Local::now().naive_local().trunc_subsecs(3))
    }

    /// This instant shifted forward by a whole number of days.
    pub fn plus_days(self, days: u32) -> Self {
        Self(self.0 + Duration::days(i64::from(days)))
    }

    /// Whole days from `self` until `later`, rounded down. Negative when
    /// `later` is in the past.
    pub fn days_until(self, later: Timestamp) -> i64 {
        (later.0 - self.0).num_days()
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Timestamp::try_from(value.as_str())
    }
}

impl TryFrom<&str> for Timestamp {
    type Error = ErrorReport;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let ndt = NaiveDateTime::parse_from_str(value, FORMAT)
            .map_err(|_| ErrorReport::new(format!("Failed to parse timestamp: '{value}'.")))?;
        Ok(Timestamp(ndt))
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> String {
        ts.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_timestamp_to_string() -> Fallible<()> {
        let ts = Timestamp::try_from("2023-10-05T14:30:15.123")?;
        assert_eq!(ts.to_string(), "2023-10-05T14:30:15.123");
        Ok(())
    }

    #[test]
    fn test_invalid_timestamp() {
        let err = Timestamp::try_from("yesterday").unwrap_err();
        assert_eq!(err.to_string(), "error: Failed to parse timestamp: 'yesterday'.");
    }

    #[test]
    fn test_serde() -> Fallible<()> {
        let ts = Timestamp::try_from("2023-10-05T14:30:15.123")?;
        let serialized = serde_json::to_string(&ts)?;
        assert_eq!(serialized, "\"2023-10-05T14:30:15.123\"");
        let back: Timestamp = serde_json::from_str(&serialized)?;
        assert_eq!(back, ts);
        Ok(())
    }

    #[test]
    fn test_plus_days() -> Fallible<()> {
        let ts = Timestamp::try_from("2024-02-28T09:00:00.000")?;
        assert_eq!(ts.plus_days(0), ts);
        assert_eq!(ts.plus_days(2).to_string(), "2024-03-01T09:00:00.000");
        assert_eq!(ts.plus_days(30).to_string(), "2024-03-29T09:00:00.000");
        Ok(())
    }

    #[test]
    fn test_days_until_floors() -> Fallible<()> {
        let now = Timestamp::try_from("2024-01-01T12:00:00.000")?;
        let later = Timestamp::try_from("2024-01-04T11:59:59.999")?;
        assert_eq!(now.days_until(later), 2);
        assert_eq!(now.days_until(now.plus_days(7)), 7);
        Ok(())
    }
}
