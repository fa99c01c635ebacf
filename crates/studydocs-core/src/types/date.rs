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

use chrono::NaiveDate;

/// A calendar date, as printed in document headers and footers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(naive_date: NaiveDate) -> Self {
        Self(naive_date)
    }

    /// Long form, e.g. `Monday, October 19, 2026`.
    pub fn long_format(self) -> String {
        self.0.format("%A, %B %-d, %Y").to_string()
    }

    /// Short US form, e.g. `10/19/2026`.
    pub fn short_format(self) -> String {
        self.0.format("%-m/%-d/%Y").to_string()
    }
}

/// ISO 8601 calendar date, e.g. `2026-10-19`.
impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_formats() {
        let d = date(2026, 10, 5);
        assert_eq!(d.to_string(), "2026-10-05");
        assert_eq!(d.long_format(), "Monday, October 5, 2026");
        assert_eq!(d.short_format(), "10/5/2026");
    }
}
