//! Multi-day summary: bucket forecast samples by local calendar day and
//! reduce each bucket to a mean temperature and a dominant condition.

use chrono::NaiveDate;

use crate::local_time::{day_label, TimeZonePolicy};
use crate::types::{Condition, DaySummary, ForecastSample, ForecastSeries, UnitSystem};

/// Days shown in the summary
pub const MAX_FORECAST_DAYS: usize = 5;

/// Summarize `series` into at most [`MAX_FORECAST_DAYS`] days, in order of
/// first appearance.
///
/// The average is the arithmetic mean of every sample in the day, rounded
/// once after conversion into `unit`. The dominant condition is the
/// (code, description) pair seen most often; ties go to the pair seen first.
pub fn summarize_days(
    series: &ForecastSeries,
    policy: TimeZonePolicy,
    unit: UnitSystem,
) -> Vec<DaySummary> {
    let offset = series.utc_offset_seconds();
    let mut buckets: Vec<(NaiveDate, Vec<&ForecastSample>)> = Vec::new();

    for sample in series.samples() {
        let Some(date) = policy.local_date(sample.timestamp, offset) else {
            tracing::debug!(timestamp = sample.timestamp, "Skipping unrepresentable timestamp");
            continue;
        };

        match buckets.iter_mut().find(|(day, _)| *day == date) {
            Some((_, samples)) => samples.push(sample),
            None => buckets.push((date, vec![sample])),
        }
    }

    buckets.truncate(MAX_FORECAST_DAYS);

    buckets
        .into_iter()
        .filter_map(|(date, samples)| summarize_day(date, &samples, unit))
        .collect()
}

fn summarize_day(
    date: NaiveDate,
    samples: &[&ForecastSample],
    unit: UnitSystem,
) -> Option<DaySummary> {
    let condition = dominant_condition(samples)?;

    let count = samples.len() as f64;
    let mean_c = samples.iter().map(|s| s.temperature_c).sum::<f64>() / count;
    let (min_c, max_c) = samples.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), s| (lo.min(s.temperature_c), hi.max(s.temperature_c)),
    );

    Some(DaySummary {
        date,
        label: day_label(date),
        avg_temp: unit.whole_degrees(mean_c),
        min_temp: unit.display_temperature(min_c),
        max_temp: unit.display_temperature(max_c),
        sample_count: samples.len(),
        condition: condition.clone(),
    })
}

/// Most frequent (code, description) pair; earliest wins a tie. The icon is
/// taken from the pair's first occurrence.
fn dominant_condition<'a>(samples: &[&'a ForecastSample]) -> Option<&'a Condition> {
    // (first occurrence, count), kept in first-seen order
    let mut tally: Vec<(&'a Condition, usize)> = Vec::new();

    for sample in samples {
        let condition = &sample.condition;
        match tally.iter_mut().find(|(seen, _)| {
            seen.code == condition.code && seen.description == condition.description
        }) {
            Some((_, count)) => *count += 1,
            None => tally.push((condition, 1)),
        }
    }

    let mut best: Option<(&'a Condition, usize)> = None;
    for (condition, count) in tally {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((condition, count));
        }
    }
    best.map(|(condition, _)| condition)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    const HOUR: i64 = 3600;
    const STEP: i64 = 3 * HOUR;
    // 2024-03-11T00:00:00Z
    const MIDNIGHT_UTC: i64 = 1_710_115_200;

    fn sample(ts: i64, temp: f64, code: &str, desc: &str) -> ForecastSample {
        ForecastSample {
            timestamp: ts,
            temperature_c: temp,
            condition: Condition::new(code, desc, format!("{}-icon", code.to_lowercase())),
        }
    }

    fn uniform_series(count: usize, start: i64, offset: i32) -> ForecastSeries {
        let samples = (0..count as i64)
            .map(|i| sample(start + i * STEP, 10.0, "Clear", "clear sky"))
            .collect();
        ForecastSeries::new(samples, offset).unwrap()
    }

    #[test]
    fn test_empty_series_yields_no_days() {
        let series = ForecastSeries::default();
        assert!(summarize_days(&series, TimeZonePolicy::LocationOffset, UnitSystem::Metric).is_empty());
    }

    #[test]
    fn test_five_uniform_days() {
        let series = uniform_series(40, MIDNIGHT_UTC, 0);
        let days = summarize_days(&series, TimeZonePolicy::LocationOffset, UnitSystem::Metric);

        assert_eq!(days.len(), 5);
        for day in &days {
            assert_eq!(day.avg_temp, 10);
            assert_eq!(day.condition.code, "Clear");
            assert_eq!(day.sample_count, 8);
        }
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(days[4].date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(days[0].label, "Mon, Mar 11");
    }

    #[test]
    fn test_truncates_to_five_days() {
        // Seven days of samples
        let series = uniform_series(56, MIDNIGHT_UTC, 0);
        let days = summarize_days(&series, TimeZonePolicy::Utc, UnitSystem::Metric);
        assert_eq!(days.len(), MAX_FORECAST_DAYS);
        assert_eq!(days[4].date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_fewer_days_are_not_padded() {
        let series = uniform_series(10, MIDNIGHT_UTC, 0);
        let days = summarize_days(&series, TimeZonePolicy::Utc, UnitSystem::Metric);
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].sample_count, 2);
    }

    #[test]
    fn test_singleton_bucket() {
        let series =
            ForecastSeries::new(vec![sample(MIDNIGHT_UTC, 7.4, "Snow", "light snow")], 0).unwrap();
        let days = summarize_days(&series, TimeZonePolicy::Utc, UnitSystem::Metric);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].avg_temp, 7);
        assert_eq!(days[0].condition.description, "light snow");
        assert_eq!(days[0].min_temp, 7.4);
        assert_eq!(days[0].max_temp, 7.4);
    }

    #[test]
    fn test_average_is_rounded_mean() {
        let temps = [1.0, 2.0, 2.0, 3.5];
        let samples = temps
            .iter()
            .enumerate()
            .map(|(i, t)| sample(MIDNIGHT_UTC + i as i64 * STEP, *t, "Clouds", "overcast clouds"))
            .collect();
        let series = ForecastSeries::new(samples, 0).unwrap();
        let days = summarize_days(&series, TimeZonePolicy::Utc, UnitSystem::Metric);

        // mean = 2.125
        assert_eq!(days[0].avg_temp, 2);
        assert_eq!(days[0].min_temp, 1.0);
        assert_eq!(days[0].max_temp, 3.5);
    }

    #[test]
    fn test_negative_half_degree_rounds_up() {
        let samples = vec![
            sample(MIDNIGHT_UTC, -2.0, "Snow", "snow"),
            sample(MIDNIGHT_UTC + STEP, -3.0, "Snow", "snow"),
        ];
        let series = ForecastSeries::new(samples, 0).unwrap();
        let days = summarize_days(&series, TimeZonePolicy::Utc, UnitSystem::Metric);

        // mean = -2.5
        assert_eq!(days[0].avg_temp, -2);
    }

    #[test]
    fn test_tie_goes_to_first_seen_condition() {
        let pattern = [
            ("Rain", "light rain"),
            ("Rain", "light rain"),
            ("Clouds", "broken clouds"),
            ("Rain", "light rain"),
            ("Clouds", "broken clouds"),
            ("Clouds", "broken clouds"),
            ("Rain", "light rain"),
            ("Clouds", "broken clouds"),
        ];
        let samples = pattern
            .iter()
            .enumerate()
            .map(|(i, (code, desc))| sample(MIDNIGHT_UTC + i as i64 * STEP, 5.0, code, desc))
            .collect();
        let series = ForecastSeries::new(samples, 0).unwrap();
        let days = summarize_days(&series, TimeZonePolicy::Utc, UnitSystem::Metric);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].condition.code, "Rain");
        assert_eq!(days[0].condition.icon, "rain-icon");
    }

    #[test]
    fn test_tie_order_follows_day_not_series() {
        // Day one is all Clouds; day two ties Snow (first) and Clouds
        let samples = vec![
            sample(MIDNIGHT_UTC, 0.0, "Clouds", "few clouds"),
            sample(MIDNIGHT_UTC + 24 * HOUR, 0.0, "Snow", "snow"),
            sample(MIDNIGHT_UTC + 27 * HOUR, 0.0, "Clouds", "few clouds"),
        ];
        let series = ForecastSeries::new(samples, 0).unwrap();
        let days = summarize_days(&series, TimeZonePolicy::Utc, UnitSystem::Metric);
        assert_eq!(days[1].condition.code, "Snow");
    }

    #[test]
    fn test_description_distinguishes_conditions() {
        let samples = vec![
            sample(MIDNIGHT_UTC, 0.0, "Rain", "light rain"),
            sample(MIDNIGHT_UTC + STEP, 0.0, "Rain", "heavy rain"),
            sample(MIDNIGHT_UTC + 2 * STEP, 0.0, "Rain", "heavy rain"),
        ];
        let series = ForecastSeries::new(samples, 0).unwrap();
        let days = summarize_days(&series, TimeZonePolicy::Utc, UnitSystem::Metric);
        assert_eq!(days[0].condition.description, "heavy rain");
    }

    #[test]
    fn test_policies_bucket_differently() {
        // 21:00Z and 00:00Z next day; at UTC+5 both fall on the later date
        let samples = vec![
            sample(MIDNIGHT_UTC - STEP, 4.0, "Clear", "clear sky"),
            sample(MIDNIGHT_UTC, 6.0, "Clear", "clear sky"),
        ];
        let series = ForecastSeries::new(samples, 5 * 3600).unwrap();

        let utc_days = summarize_days(&series, TimeZonePolicy::Utc, UnitSystem::Metric);
        assert_eq!(utc_days.len(), 2);
        assert_eq!(utc_days[0].date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());

        let local_days = summarize_days(&series, TimeZonePolicy::LocationOffset, UnitSystem::Metric);
        assert_eq!(local_days.len(), 1);
        assert_eq!(local_days[0].date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(local_days[0].avg_temp, 5);
    }

    #[test]
    fn test_imperial_rounds_after_conversion() {
        // mean 10.25°C = 50.45°F
        let samples = vec![
            sample(MIDNIGHT_UTC, 10.0, "Clear", "clear sky"),
            sample(MIDNIGHT_UTC + STEP, 10.5, "Clear", "clear sky"),
        ];
        let series = ForecastSeries::new(samples, 0).unwrap();
        let days = summarize_days(&series, TimeZonePolicy::Utc, UnitSystem::Imperial);
        assert_eq!(days[0].avg_temp, 50);
        assert_eq!(days[0].min_temp, 50.0);
    }

    #[test]
    fn test_output_length_matches_distinct_days() {
        for count in [1usize, 7, 8, 9, 17, 33, 40] {
            let series = uniform_series(count, MIDNIGHT_UTC + 6 * HOUR, 0);
            let distinct = {
                let mut dates: Vec<NaiveDate> = series
                    .samples()
                    .iter()
                    .map(|s| TimeZonePolicy::Utc.local_date(s.timestamp, 0).unwrap())
                    .collect();
                dates.dedup();
                dates.len()
            };
            let days = summarize_days(&series, TimeZonePolicy::Utc, UnitSystem::Metric);
            assert_eq!(days.len(), distinct.min(MAX_FORECAST_DAYS), "count={}", count);
        }
    }
}
