use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};

/// Inclusive window of local calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Truncates both bounds to their calendar date in the timestamps' own
    /// zone, so a bound of 18:00 still admits a workout at 07:00 that day.
    pub fn between<Tz: TimeZone>(from: &DateTime<Tz>, to: &DateTime<Tz>) -> Self {
        Self::new(from.date_naive(), to.date_naive())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    /// Parses `YYYY-MM-DD` bounds. A missing bound defaults to `today`.
    pub fn parse(from: Option<&str>, to: Option<&str>, today: NaiveDate) -> Result<Self, String> {
        let from = match from {
            Some(value) => parse_date(value)?,
            None => today,
        };
        let to = match to {
            Some(value) => parse_date(value)?,
            None => today,
        };
        Ok(Self::new(from, to))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    Week,
    Month,
    Quarter,
    Year,
    All,
}

impl RangePreset {
    /// Resolves the preset ending on `today`. `All` starts at `earliest`
    /// (the first logged workout) when there is one.
    pub fn resolve(self, today: NaiveDate, earliest: Option<NaiveDate>) -> DateRange {
        let days_back = match self {
            Self::Week => 6,
            Self::Month => 29,
            Self::Quarter => 89,
            Self::Year => 364,
            Self::All => {
                let from = earliest.map_or(today, |date| date.min(today));
                return DateRange::new(from, today);
            }
        };
        DateRange::new(today - Duration::days(days_back), today)
    }
}

impl std::str::FromStr for RangePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(Self::Week),
            "30d" => Ok(Self::Month),
            "90d" => Ok(Self::Quarter),
            "1y" => Ok(Self::Year),
            "all" => Ok(Self::All),
            _ => Err(format!("unknown range preset: {s}")),
        }
    }
}

pub fn local_date(timestamp: &DateTime<Local>) -> NaiveDate {
    timestamp.date_naive()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid date '{value}': {err}"))
}
