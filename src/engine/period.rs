// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Start-of-period resolution for recurring budgets.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::BudgetPeriod;

/// Day a week begins on when resolving weekly windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Some(WeekStart::Sunday),
            "monday" | "mon" => Some(WeekStart::Monday),
            _ => None,
        }
    }
}

/// Inclusive start of the period containing `now`, weeks starting on Sunday.
pub fn resolve_window_start(period: BudgetPeriod, now: NaiveDateTime) -> NaiveDateTime {
    resolve_window_start_with(period, now, WeekStart::default())
}

pub fn resolve_window_start_with(
    period: BudgetPeriod,
    now: NaiveDateTime,
    week_start: WeekStart,
) -> NaiveDateTime {
    let today = now.date();
    let first_day = match period {
        BudgetPeriod::Weekly => {
            let back = (today.weekday().num_days_from_sunday() + 7
                - week_start.weekday().num_days_from_sunday())
                % 7;
            today - Days::new(u64::from(back))
        }
        BudgetPeriod::Monthly => first_of_month(today),
        BudgetPeriod::Yearly => today.with_ordinal(1).unwrap_or(today),
    };
    start_of_day(first_day)
}

pub fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

pub fn start_of_month(now: NaiveDateTime) -> NaiveDateTime {
    start_of_day(first_of_month(now.date()))
}

pub fn start_of_previous_month(now: NaiveDateTime) -> NaiveDateTime {
    let first = first_of_month(now.date());
    start_of_day(first.checked_sub_months(Months::new(1)).unwrap_or(first))
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}
