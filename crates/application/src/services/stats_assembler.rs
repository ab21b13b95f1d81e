use super::analytics_deriver::{round2, AnalyticsDeriver, DerivedAnalytics};
use super::trend_generator::{TrendGenerator, TrendMode, TrendTotals};
use crate::ports::RandomSource;
use chrono::{DateTime, Utc};
use ecostats_domain::{
    DataFreshness, EcosystemMetadata, EcosystemOverview, EcosystemStats, MarketplaceRecord,
    PluginRecord, RawDataset, TimeRange, TrendDataPoint,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Turns one raw collection into a complete [`EcosystemStats`].
pub struct StatsAssembler {
    deriver: Arc<AnalyticsDeriver>,
    trends: Arc<TrendGenerator>,
}

impl StatsAssembler {
    pub fn new(deriver: Arc<AnalyticsDeriver>, trends: Arc<TrendGenerator>) -> Self {
        Self { deriver, trends }
    }

    pub fn trends(&self) -> &TrendGenerator {
        &self.trends
    }

    pub fn assemble(
        &self,
        dataset: &RawDataset,
        now: DateTime<Utc>,
        mode: TrendMode,
        data_sources: Vec<String>,
        rng: &dyn RandomSource,
    ) -> EcosystemStats {
        let start = Instant::now();

        let marketplaces: Vec<MarketplaceRecord> =
            keep_valid(&dataset.marketplaces, MarketplaceRecord::validate);
        let plugins: Vec<PluginRecord> = keep_valid(&dataset.plugins, PluginRecord::validate);
        let rejected = (dataset.marketplaces.len() - marketplaces.len())
            + (dataset.plugins.len() - plugins.len());
        let skipped_records = (dataset.skipped + rejected) as u64;
        if skipped_records > 0 {
            warn!(
                skipped = skipped_records,
                malformed = dataset.skipped,
                invalid = rejected,
                "Skipped unusable records"
            );
        }

        let derived = self.deriver.derive(&marketplaces, &plugins, now, rng);
        let totals = TrendTotals {
            plugins: derived.total_plugins,
            marketplaces: derived.total_marketplaces,
            developers: derived.total_developers,
            downloads: derived.total_downloads,
        };

        let growth: BTreeMap<_, _> = TimeRange::all()
            .iter()
            .map(|range| (*range, self.trends.generate(*range, totals, now, mode, rng)))
            .collect();

        let monthly_growth_rate = growth
            .get(&TimeRange::ThirtyDays)
            .map(|trends| window_growth(&trends.plugins))
            .unwrap_or(0.0);

        let overview = overview(&derived, &marketplaces, dataset, monthly_growth_rate);
        let freshness = DataFreshness {
            marketplaces_age_ms: age_ms(newest(&marketplaces, |m| m.updated_at), now),
            plugins_age_ms: age_ms(newest(&plugins, |p| p.updated_at), now),
        };

        let DerivedAnalytics {
            categories,
            developers,
            quality,
            ..
        } = derived;

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            marketplaces = marketplaces.len(),
            plugins = plugins.len(),
            categories = categories.len(),
            processing_time_ms,
            sources = ?data_sources,
            "Ecosystem stats assembled"
        );

        EcosystemStats {
            overview,
            growth,
            categories,
            developers,
            quality,
            metadata: EcosystemMetadata {
                last_updated: now,
                data_sources,
                processing_time_ms,
                marketplace_count: marketplaces.len() as u64,
                plugin_count: plugins.len() as u64,
                skipped_records,
                cache_info: Default::default(),
                freshness,
            },
        }
    }
}

fn keep_valid<T: Clone, E>(records: &[T], validate: impl Fn(&T) -> Result<(), E>) -> Vec<T> {
    records
        .iter()
        .filter(|record| validate(*record).is_ok())
        .cloned()
        .collect()
}

fn overview(
    derived: &DerivedAnalytics,
    marketplaces: &[MarketplaceRecord],
    dataset: &RawDataset,
    monthly_growth_rate: f64,
) -> EcosystemOverview {
    let average_plugins_per_marketplace = if derived.total_marketplaces > 0 {
        round2(derived.total_plugins as f64 / derived.total_marketplaces as f64)
    } else {
        0.0
    };

    EcosystemOverview {
        total_marketplaces: derived.total_marketplaces,
        total_plugins: derived.total_plugins,
        total_developers: derived.total_developers,
        total_downloads: derived.total_downloads,
        total_stars: derived.total_stars,
        verified_marketplaces: marketplaces.iter().filter(|m| m.has_manifest).count() as u64,
        average_plugins_per_marketplace,
        monthly_growth_rate,
        last_updated: dataset
            .generated_at
            .or_else(|| newest(marketplaces, |m| m.updated_at)),
    }
}

/// Percent change between the first and last point of a series.
fn window_growth(points: &[TrendDataPoint]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if first.value > 0 => {
            round2((last.value as f64 - first.value as f64) * 100.0 / first.value as f64)
        }
        _ => 0.0,
    }
}

fn newest<T>(records: &[T], updated_at: impl Fn(&T) -> DateTime<Utc>) -> Option<DateTime<Utc>> {
    records.iter().map(updated_at).max()
}

fn age_ms(newest: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<u64> {
    newest.map(|at| (now - at).num_milliseconds().max(0) as u64)
}
