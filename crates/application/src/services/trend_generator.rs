use crate::ports::RandomSource;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use ecostats_domain::{GrowthTrends, TimeRange, TrendDataPoint};

const LOGISTIC_STEEPNESS: f64 = 6.0;
const LOGISTIC_MIDPOINT: f64 = 0.5;
const APPROACH_RATE: f64 = 3.0;
const JITTER: f64 = 0.10;

/// How values between launch and today are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendMode {
    /// Logistic S-curve over the requested window; used for mock projections.
    Synthetic,
    /// Exponential approach from launch to today's totals, with jitter.
    Projection,
}

/// Current totals the curves converge to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrendTotals {
    pub plugins: u64,
    pub marketplaces: u64,
    pub developers: u64,
    pub downloads: u64,
}

pub struct TrendGenerator {
    launch_date: NaiveDate,
}

impl TrendGenerator {
    pub fn new(launch_date: DateTime<Utc>) -> Self {
        Self {
            launch_date: launch_date.date_naive(),
        }
    }

    pub fn launch_date(&self) -> NaiveDate {
        self.launch_date
    }

    pub fn generate(
        &self,
        range: TimeRange,
        totals: TrendTotals,
        now: DateTime<Utc>,
        mode: TrendMode,
        rng: &dyn RandomSource,
    ) -> GrowthTrends {
        GrowthTrends {
            plugins: self.series(range, totals.plugins, now, mode, rng),
            marketplaces: self.series(range, totals.marketplaces, now, mode, rng),
            developers: self.series(range, totals.developers, now, mode, rng),
            downloads: self.series(range, totals.downloads, now, mode, rng),
        }
    }

    /// Sample dates for a range, ascending and anchored on today.
    ///
    /// The span is clamped to the time elapsed since launch, so no point
    /// predates it.
    pub fn sample_dates(&self, range: TimeRange, now: DateTime<Utc>) -> Vec<NaiveDate> {
        let today = now.date_naive();
        let since_launch = (today - self.launch_date).num_days().max(0);
        let span = range
            .days()
            .map_or(since_launch, |days| days.min(since_launch));
        let step = range.step_days();
        let count = span / step + 1;

        (0..count)
            .map(|i| today - Duration::days((count - 1 - i) * step))
            .collect()
    }

    pub fn series(
        &self,
        range: TimeRange,
        target: u64,
        now: DateTime<Utc>,
        mode: TrendMode,
        rng: &dyn RandomSource,
    ) -> Vec<TrendDataPoint> {
        let dates = self.sample_dates(range, now);
        let values = match mode {
            TrendMode::Synthetic => logistic_values(dates.len(), target),
            TrendMode::Projection => self.projected_values(&dates, target, now, rng),
        };
        TrendDataPoint::series(dates.into_iter().zip(values))
    }

    fn projected_values(
        &self,
        dates: &[NaiveDate],
        target: u64,
        now: DateTime<Utc>,
        rng: &dyn RandomSource,
    ) -> Vec<u64> {
        let since_launch = (now.date_naive() - self.launch_date).num_days();
        let normaliser = 1.0 - (-APPROACH_RATE).exp();
        let last = dates.len().saturating_sub(1);
        let mut running_max = 0u64;

        dates
            .iter()
            .enumerate()
            .map(|(i, date)| {
                if i == last {
                    return target;
                }
                let progress = if since_launch > 0 {
                    (*date - self.launch_date).num_days() as f64 / since_launch as f64
                } else {
                    1.0
                };
                let curve = (1.0 - (-APPROACH_RATE * progress.clamp(0.0, 1.0)).exp()) / normaliser;
                let jitter = 1.0 + (rng.next_f64() * 2.0 - 1.0) * JITTER;
                let value = (target as f64 * curve * jitter).round().clamp(0.0, target as f64) as u64;
                running_max = running_max.max(value);
                running_max
            })
            .collect()
    }
}

fn logistic_values(count: usize, target: u64) -> Vec<u64> {
    (0..count)
        .map(|i| {
            let x = if count > 1 {
                i as f64 / (count - 1) as f64
            } else {
                1.0
            };
            let s = 1.0 / (1.0 + (-LOGISTIC_STEEPNESS * (x - LOGISTIC_MIDPOINT)).exp());
            (target as f64 * s).round() as u64
        })
        .collect()
}
