use chrono::Datelike;
use chrono::NaiveDate;
use chrono::Weekday;
use serde::Serialize;

pub const COLUMNS: [&str; 10] = [
    "Date",
    "DateKey",
    "Year",
    "Month",
    "MonthName",
    "YearMonth",
    "Quarter",
    "DayOfWeek",
    "DayOfWeekNum",
    "WeekOfYear",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateRow {
    pub date: NaiveDate,
    pub date_key: i32,
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub year_month: String,
    pub quarter: String,
    pub day_of_week: String,
    pub day_of_week_num: u32,
    pub week_of_year: u32,
}

impl DateRow {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            date_key: date_key(date),
            year: date.year(),
            month: date.month(),
            month_name: date.format("%b").to_string(),
            year_month: year_month(date),
            quarter: format!("Q{}", (date.month() - 1) / 3 + 1),
            day_of_week: date.format("%a").to_string(),
            day_of_week_num: date.weekday().number_from_monday(),
            week_of_year: date.iso_week().week(),
        }
    }
}

/// YYYYMMDD as an integer.
pub fn date_key(date: NaiveDate) -> i32 {
    date.year() * 10000 + date.month() as i32 * 100 + date.day() as i32
}

pub fn year_month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Every day from `from` to `to`, both inclusive. Empty when `to < from`.
pub fn days(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    from.iter_days().take_while(move |d| *d <= to)
}

/// First day of every calendar month touched by the range.
pub fn months(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let mut res = Vec::new();
    if to < from {
        return res;
    }

    let (mut year, mut month) = (from.year(), from.month());
    while (year, month) <= (to.year(), to.month()) {
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(d) => res.push(d),
            None => break,
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    res
}

pub fn build_dim_date(from: NaiveDate, to: NaiveDate) -> Vec<DateRow> {
    days(from, to).map(DateRow::new).collect()
}

// weekends watch more
pub fn weekday_factor(day: Weekday) -> f64 {
    match day {
        Weekday::Mon => 0.85,
        Weekday::Tue => 0.85,
        Weekday::Wed => 0.9,
        Weekday::Thu => 0.95,
        Weekday::Fri => 1.1,
        Weekday::Sat => 1.25,
        Weekday::Sun => 1.2,
    }
}

// summer and december peaks
pub fn month_factor(month: u32) -> f64 {
    match month {
        1 | 2 => 0.95,
        3 | 4 => 1.0,
        5 => 1.05,
        6 => 1.1,
        7 => 1.12,
        8 => 1.1,
        9 => 1.0,
        10 => 1.02,
        11 => 1.05,
        12 => 1.15,
        _ => 1.0,
    }
}

pub fn day_multiplier(date: NaiveDate) -> f64 {
    weekday_factor(date.weekday()) * month_factor(date.month())
}
