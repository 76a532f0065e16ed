// src/stats.rs

use std::fmt;

const SECONDS_PER_DAY: i64 = 86_400;
const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Sunday-based weekday index (0..7) of an epoch-second timestamp.
///
/// The epoch fell on a Thursday, hence the offset of 4.
pub fn weekday_bucket(timestamp: i64) -> usize {
    (timestamp.div_euclid(SECONDS_PER_DAY) + 4).rem_euclid(7) as usize
}

/// Commit counts per weekday
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekdayHistogram {
    pub counts: [usize; 7],
}

impl WeekdayHistogram {
    pub fn from_timestamps(timestamps: impl IntoIterator<Item = i64>) -> Self {
        let mut histogram = Self::default();
        for ts in timestamps {
            histogram.counts[weekday_bucket(ts)] += 1;
        }
        histogram
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl fmt::Display for WeekdayHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = DAY_NAMES
            .iter()
            .zip(self.counts)
            .map(|(day, count)| format!("{day}={count}"))
            .collect();
        write!(f, "{}", cells.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Utc};

    #[test]
    fn epoch_day_is_thursday() {
        assert_eq!(weekday_bucket(0), 4);
        assert_eq!(weekday_bucket(86_399), 4);
        assert_eq!(weekday_bucket(86_400), 5);
        assert_eq!(weekday_bucket(3 * 86_400), 0);
        assert_eq!(weekday_bucket(-1), 3);
    }

    #[test]
    fn agrees_with_calendar() {
        for ts in [0, 951_782_400, 1_234_567_890, 1_700_000_000, 2_000_000_000] {
            let date = Utc.timestamp_opt(ts, 0).single().unwrap();
            assert_eq!(
                weekday_bucket(ts),
                date.weekday().num_days_from_sunday() as usize,
                "{date}"
            );
        }
    }

    #[test]
    fn histogram_counts_and_renders() {
        let histogram = WeekdayHistogram::from_timestamps([0, 10, 86_400, 3 * 86_400]);
        assert_eq!(histogram.counts, [1, 0, 0, 0, 2, 1, 0]);
        assert_eq!(histogram.total(), 4);
        assert_eq!(
            histogram.to_string(),
            "Sun=1 Mon=0 Tue=0 Wed=0 Thu=2 Fri=1 Sat=0"
        );
    }
}
