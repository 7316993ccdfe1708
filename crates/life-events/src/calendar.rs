//! Calendar
//!
//! The game only counts days. A [`SimDate`] is derived from that count for
//! display and for season-gated content.
//!
//! ```
//! use life_events::{Season, SimDate};
//!
//! let date = SimDate::from_days(45);
//! assert_eq!(date.season, Season::Summer);
//! assert_eq!(date.to_string(), "year_1.summer.day_16");
//! ```

use std::fmt;

/// Number of days in each season.
pub const DAYS_PER_SEASON: u32 = 30;

/// Number of days in a year (four seasons).
pub const DAYS_PER_YEAR: u32 = DAYS_PER_SEASON * 4;

/// Season of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    const IN_ORDER: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    fn for_day_of_year(day_of_year: u32) -> Self {
        Self::IN_ORDER[(day_of_year / DAYS_PER_SEASON % 4) as usize]
    }

    fn name(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Date derived from the day counter. Day zero is the first day of spring in
/// year one; `year` and `day` count from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimDate {
    pub year: u32,
    pub season: Season,
    pub day: u32,
}

impl SimDate {
    pub fn from_days(days_passed: u32) -> Self {
        let day_of_year = days_passed % DAYS_PER_YEAR;
        Self {
            year: days_passed / DAYS_PER_YEAR + 1,
            season: Season::for_day_of_year(day_of_year),
            day: day_of_year % DAYS_PER_SEASON + 1,
        }
    }
}

impl fmt::Display for SimDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "year_{}.{}.day_{}", self.year, self.season, self.day)
    }
}
