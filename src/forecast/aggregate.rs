use indexmap::IndexMap;

use super::models::{DailySummary, DailyTemperature, ForecastSample};

/// Number of days every forecast response carries
pub const FORECAST_DAYS: usize = 7;

const SECONDS_PER_DAY: i64 = 86_400;

/// Collapse 3-hour forecast samples into at most seven daily summaries,
/// padding with synthetic trailing days when the provider covers fewer.
///
/// Samples are grouped by UTC calendar day in first-seen order; the
/// provider sends them in non-decreasing timestamp order, so group order
/// is chronological. Empty input yields an empty output — the caller must
/// reject an empty provider list before this point.
pub fn aggregate_daily(samples: &[ForecastSample]) -> Vec<DailySummary> {
    let mut days: Vec<DailySummary> = group_by_utc_day(samples)
        .into_iter()
        .take(FORECAST_DAYS)
        .filter_map(|(_, group)| summarize_day(&group))
        .collect();
    pad_to_week(&mut days);
    days
}

/// UTC day index (days since the epoch) of a sample timestamp
fn utc_day_index(dt: i64) -> i64 {
    dt.div_euclid(SECONDS_PER_DAY)
}

/// Partition samples by UTC day, preserving first-seen day order
fn group_by_utc_day(samples: &[ForecastSample]) -> IndexMap<i64, Vec<&ForecastSample>> {
    let mut groups: IndexMap<i64, Vec<&ForecastSample>> = IndexMap::new();
    for sample in samples {
        groups
            .entry(utc_day_index(sample.dt))
            .or_default()
            .push(sample);
    }
    groups
}

/// Reduce one day's samples to min/max/mean statistics
fn summarize_day(samples: &[&ForecastSample]) -> Option<DailySummary> {
    let first = samples.first()?;
    let n = samples.len() as f64;

    let mut temp_sum = 0.0;
    let mut humidity_sum = 0.0;
    let mut wind_sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for sample in samples {
        temp_sum += sample.main.temp;
        humidity_sum += f64::from(sample.main.humidity);
        wind_sum += sample.wind.speed;
        min = min.min(sample.main.temp_min);
        max = max.max(sample.main.temp_max);
    }

    Some(DailySummary {
        dt: first.dt,
        temp: DailyTemperature {
            day: temp_sum / n,
            min,
            max,
        },
        weather: first.weather.clone(),
        // f64::round ties away from zero: half-up on the 0-100 domain
        humidity: (humidity_sum / n).round() as u32,
        wind_speed: wind_sum / n,
    })
}

/// Extend a short forecast to a full week by repeating the last real day
/// at successive 24-hour offsets
fn pad_to_week(days: &mut Vec<DailySummary>) {
    let Some(last) = days.last().cloned() else {
        return;
    };
    let missing = FORECAST_DAYS.saturating_sub(days.len()) as i64;
    for i in 1..=missing {
        days.push(DailySummary {
            dt: last.dt + i * SECONDS_PER_DAY,
            ..last.clone()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::models::{SampleMain, SampleWind, WeatherCondition};

    const DAY: i64 = SECONDS_PER_DAY;
    // An arbitrary UTC day index well past the epoch
    const BASE_DAY: i64 = 19_700;

    fn condition(id: u32, main: &str, description: &str, icon: &str) -> WeatherCondition {
        WeatherCondition {
            id,
            main: main.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        }
    }

    fn sample(dt: i64, temp: f64, temp_min: f64, temp_max: f64, humidity: u32, wind: f64) -> ForecastSample {
        ForecastSample {
            dt,
            main: SampleMain {
                temp,
                temp_min,
                temp_max,
                humidity,
            },
            weather: vec![condition(800, "Clear", "clear sky", "01d")],
            wind: SampleWind { speed: wind },
        }
    }

    /// Build a 3-hourly run of `count` samples starting at `start`
    fn three_hourly(start: i64, count: usize) -> Vec<ForecastSample> {
        (0..count)
            .map(|i| sample(start + i as i64 * 3 * 3600, 15.0, 10.0, 20.0, 50, 3.0))
            .collect()
    }

    #[test]
    fn test_statistics_for_one_day() {
        let start = BASE_DAY * DAY;
        let samples = vec![
            sample(start, 10.0, 5.0, 15.0, 40, 2.0),
            sample(start + 3 * 3600, 20.0, 8.0, 25.0, 60, 4.0),
            sample(start + 6 * 3600, 30.0, 9.0, 35.0, 80, 6.0),
        ];

        let days = aggregate_daily(&samples);

        let first = &days[0];
        assert_eq!(first.dt, start);
        assert_eq!(first.temp.day, 20.0);
        assert_eq!(first.temp.min, 5.0);
        assert_eq!(first.temp.max, 35.0);
        assert_eq!(first.humidity, 60);
        assert_eq!(first.wind_speed, 4.0);
    }

    #[test]
    fn test_groups_by_utc_day() {
        // 23:00 UTC and 01:00 UTC the next day must land in different groups
        let late = sample(BASE_DAY * DAY + 23 * 3600, 10.0, 9.0, 11.0, 50, 1.0);
        let early = sample((BASE_DAY + 1) * DAY + 3600, 20.0, 19.0, 21.0, 70, 2.0);

        let days = aggregate_daily(&[late.clone(), early.clone()]);

        assert_eq!(days[0].dt, late.dt);
        assert_eq!(days[0].temp.day, 10.0);
        assert_eq!(days[1].dt, early.dt);
        assert_eq!(days[1].temp.day, 20.0);
    }

    #[test]
    fn test_grouping_preserves_chronological_order() {
        // Full 40-sample, 5-day window: 5 real groups of 8 samples each
        let samples = three_hourly(BASE_DAY * DAY, 40);

        let days = aggregate_daily(&samples);

        assert_eq!(days.len(), FORECAST_DAYS);
        for (i, day) in days.iter().take(5).enumerate() {
            assert_eq!(day.dt, (BASE_DAY + i as i64) * DAY);
        }
    }

    #[test]
    fn test_truncates_to_seven_days() {
        // One sample per day over 10 distinct days
        let samples: Vec<_> = (0..10)
            .map(|i| sample((BASE_DAY + i) * DAY, i as f64, 0.0, 1.0, 50, 1.0))
            .collect();

        let days = aggregate_daily(&samples);

        assert_eq!(days.len(), FORECAST_DAYS);
        // days 8-10 are absent; the last entry is day 7
        assert_eq!(days[6].dt, (BASE_DAY + 6) * DAY);
        assert_eq!(days[6].temp.day, 6.0);
        assert!(days.iter().all(|d| d.dt < (BASE_DAY + 7) * DAY));
    }

    #[test]
    fn test_pads_short_forecast_to_seven_entries() {
        // Two real days
        let samples = vec![
            sample(BASE_DAY * DAY, 10.0, 8.0, 12.0, 40, 2.0),
            sample((BASE_DAY + 1) * DAY, 14.0, 11.0, 17.0, 60, 5.0),
        ];

        let days = aggregate_daily(&samples);

        assert_eq!(days.len(), FORECAST_DAYS);
        let last_real = &days[1];
        for (i, padded) in days[2..].iter().enumerate() {
            assert_eq!(padded.dt, last_real.dt + (i as i64 + 1) * DAY);
            assert_eq!(padded.temp, last_real.temp);
            assert_eq!(padded.weather, last_real.weather);
            assert_eq!(padded.humidity, last_real.humidity);
            assert_eq!(padded.wind_speed, last_real.wind_speed);
        }
    }

    #[test]
    fn test_single_sample_fills_a_week() {
        let only = sample(BASE_DAY * DAY + 6 * 3600, 21.0, 18.5, 23.5, 55, 3.2);

        let days = aggregate_daily(&[only.clone()]);

        assert_eq!(days.len(), FORECAST_DAYS);
        assert_eq!(days[0].dt, only.dt);
        assert_eq!(days[0].temp.day, 21.0);
        assert_eq!(days[0].temp.min, 18.5);
        assert_eq!(days[0].temp.max, 23.5);
        assert_eq!(days[0].humidity, 55);
        assert_eq!(days[0].wind_speed, 3.2);
        for (i, day) in days.iter().enumerate().skip(1) {
            assert_eq!(day.dt, only.dt + i as i64 * DAY);
            assert_eq!(day.temp, days[0].temp);
        }
    }

    #[test]
    fn test_humidity_rounds_half_up() {
        let start = BASE_DAY * DAY;
        let samples = vec![
            sample(start, 10.0, 9.0, 11.0, 40, 1.0),
            sample(start + 3 * 3600, 10.0, 9.0, 11.0, 45, 1.0),
        ];

        let days = aggregate_daily(&samples);

        // mean 42.5 rounds up
        assert_eq!(days[0].humidity, 43);
    }

    #[test]
    fn test_representative_conditions_come_from_first_sample() {
        let start = BASE_DAY * DAY;
        let mut morning = sample(start, 10.0, 9.0, 11.0, 50, 1.0);
        morning.weather = vec![condition(500, "Rain", "light rain", "10d")];
        let mut evening = sample(start + 9 * 3600, 12.0, 9.0, 13.0, 50, 1.0);
        evening.weather = vec![condition(800, "Clear", "clear sky", "01n")];

        let days = aggregate_daily(&[morning, evening]);

        assert_eq!(days[0].weather.len(), 1);
        assert_eq!(days[0].weather[0].main, "Rain");
        assert_eq!(days[0].weather[0].icon, "10d");
    }

    #[test]
    fn test_idempotent_over_same_input() {
        let samples = three_hourly(BASE_DAY * DAY + 2 * 3600, 17);

        let first = aggregate_daily(&samples);
        let second = aggregate_daily(&samples);

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(aggregate_daily(&[]).is_empty());
    }
}
