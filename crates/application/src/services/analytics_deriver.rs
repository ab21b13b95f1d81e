use crate::ports::{EstimationModel, PluginCountExtractor, RandomSource};
use chrono::{DateTime, Duration, Utc};
use ecostats_domain::{
    CategoryAnalytics, DeveloperAnalytics, MaintenanceMetrics, MarketplaceRecord, PluginCategory,
    PluginRecord, QualityBadge, QualityDistribution, QualityIndicators, QualityIssue,
    QualityMetrics, SecurityMetrics, TopPlugin, VerificationMetrics,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

pub const TOP_DEVELOPERS: usize = 15;
const TOP_TAGS: usize = 5;
const TOP_PLUGINS: usize = 5;

const RECENT_DAYS: i64 = 30;
const STALE_DAYS: i64 = 90;
const ABANDONED_DAYS: i64 = 180;
const WELL_DOCUMENTED_CHARS: usize = 50;

const HIGH_QUALITY: f64 = 80.0;
const GOOD_QUALITY: f64 = 60.0;
const FAIR_QUALITY: f64 = 40.0;

/// Fallback bounds when a marketplace description carries no plugin count.
const ESTIMATED_PLUGINS_MIN: u64 = 1;
const ESTIMATED_PLUGINS_MAX: u64 = 5;

/// Everything derived from one raw collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedAnalytics {
    pub total_marketplaces: u64,
    pub total_plugins: u64,
    pub total_developers: u64,
    pub total_stars: u64,
    pub total_downloads: u64,
    pub categories: Vec<CategoryAnalytics>,
    pub developers: Vec<DeveloperAnalytics>,
    pub quality: QualityIndicators,
}

pub struct AnalyticsDeriver {
    extractor: Arc<dyn PluginCountExtractor>,
    estimator: Arc<dyn EstimationModel>,
}

impl AnalyticsDeriver {
    pub fn new(
        extractor: Arc<dyn PluginCountExtractor>,
        estimator: Arc<dyn EstimationModel>,
    ) -> Self {
        Self {
            extractor,
            estimator,
        }
    }

    pub fn derive(
        &self,
        marketplaces: &[MarketplaceRecord],
        plugins: &[PluginRecord],
        now: DateTime<Utc>,
        rng: &dyn RandomSource,
    ) -> DerivedAnalytics {
        let total_stars = saturating_sum(marketplaces.iter().map(|m| m.stars));
        let total_downloads = saturating_sum(
            marketplaces
                .iter()
                .map(|m| self.estimator.marketplace_downloads(m.stars, m.forks)),
        );

        let developer_logins: HashSet<String> = marketplaces
            .iter()
            .map(|m| m.owner.login.to_lowercase())
            .chain(plugins.iter().filter_map(|p| p.developer()).map(str::to_lowercase))
            .collect();

        DerivedAnalytics {
            total_marketplaces: marketplaces.len() as u64,
            total_plugins: plugins.len() as u64,
            total_developers: developer_logins.len() as u64,
            total_stars,
            total_downloads,
            categories: self.categories(plugins, now),
            developers: self.developers(marketplaces, rng),
            quality: self.quality(marketplaces, plugins, now),
        }
    }

    /// Buckets plugins into the taxonomy. Empty buckets are omitted and the
    /// result is sorted by plugin count.
    pub fn categories(&self, plugins: &[PluginRecord], now: DateTime<Utc>) -> Vec<CategoryAnalytics> {
        let mut buckets: BTreeMap<PluginCategory, Vec<&PluginRecord>> = BTreeMap::new();
        for plugin in plugins {
            buckets
                .entry(PluginCategory::classify(plugin))
                .or_default()
                .push(plugin);
        }

        let total = plugins.len() as u64;
        let mut categories: Vec<CategoryAnalytics> = buckets
            .into_iter()
            .map(|(category, members)| self.category_analytics(category, &members, total, now))
            .collect();

        categories.sort_by(|a, b| {
            b.plugin_count
                .cmp(&a.plugin_count)
                .then_with(|| a.category.cmp(&b.category))
        });
        categories
    }

    fn category_analytics(
        &self,
        category: PluginCategory,
        members: &[&PluginRecord],
        total: u64,
        now: DateTime<Utc>,
    ) -> CategoryAnalytics {
        let count = members.len() as u64;
        let scores: Vec<f64> = members
            .iter()
            .map(|p| self.estimator.quality_score(p, now))
            .collect();

        let developers: HashSet<String> = members
            .iter()
            .filter_map(|p| p.developer())
            .map(str::to_lowercase)
            .collect();

        let recent_cutoff = now - Duration::days(RECENT_DAYS);
        let recent = members
            .iter()
            .filter(|p| p.first_seen() > recent_cutoff)
            .count() as u64;

        let mut ranked: Vec<(&PluginRecord, f64)> =
            members.iter().copied().zip(scores.iter().copied()).collect();
        ranked.sort_by(|(pa, sa), (pb, sb)| {
            sb.total_cmp(sa)
                .then_with(|| pb.stars.cmp(&pa.stars))
                .then_with(|| pa.name.cmp(&pb.name))
        });

        let top_plugins = ranked
            .into_iter()
            .take(TOP_PLUGINS)
            .map(|(plugin, score)| TopPlugin {
                name: plugin.name.clone(),
                marketplace: plugin.marketplace.clone(),
                quality_score: round2(score),
                stars: plugin.stars,
                estimated_downloads: self.estimator.plugin_downloads(plugin),
            })
            .collect();

        CategoryAnalytics {
            category: category.label().to_string(),
            plugin_count: count,
            percentage: percentage(count, total),
            average_quality_score: round2(mean(&scores)),
            total_downloads: saturating_sum(
                members.iter().map(|p| self.estimator.plugin_downloads(p)),
            ),
            developer_count: developers.len() as u64,
            growth_rate: growth_rate(recent, count - recent),
            popular_tags: popular_tags(members),
            top_plugins,
        }
    }

    /// Rolls marketplaces up per owner, sorted by stars and capped at
    /// [`TOP_DEVELOPERS`].
    pub fn developers(
        &self,
        marketplaces: &[MarketplaceRecord],
        rng: &dyn RandomSource,
    ) -> Vec<DeveloperAnalytics> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut developers: Vec<DeveloperAnalytics> = Vec::new();

        for marketplace in marketplaces {
            let key = marketplace.owner.login.to_lowercase();
            let slot = *index.entry(key).or_insert_with(|| {
                developers.push(DeveloperAnalytics {
                    login: marketplace.owner.login.clone(),
                    avatar_url: marketplace.owner.avatar_url.clone(),
                    ..Default::default()
                });
                developers.len() - 1
            });
            let developer = &mut developers[slot];

            let extracted = marketplace
                .description
                .as_deref()
                .and_then(|d| self.extractor.extract(d));
            let plugin_count = match extracted {
                Some(count) => count,
                None => {
                    developer.plugin_count_estimated = true;
                    rng.range_u64(ESTIMATED_PLUGINS_MIN, ESTIMATED_PLUGINS_MAX)
                }
            };

            developer.marketplace_count += 1;
            developer.plugin_count = developer.plugin_count.saturating_add(plugin_count);
            developer.total_stars = developer.total_stars.saturating_add(marketplace.stars);
            developer.total_forks = developer.total_forks.saturating_add(marketplace.forks);
            developer.estimated_downloads = developer.estimated_downloads.saturating_add(
                self.estimator
                    .marketplace_downloads(marketplace.stars, marketplace.forks),
            );
            developer.last_active = developer.last_active.max(Some(marketplace.updated_at));
            if developer.avatar_url.is_none() {
                developer.avatar_url = marketplace.owner.avatar_url.clone();
            }
        }

        developers.sort_by(|a, b| {
            b.total_stars
                .cmp(&a.total_stars)
                .then_with(|| a.login.cmp(&b.login))
        });
        developers.truncate(TOP_DEVELOPERS);
        developers
    }

    pub fn quality(
        &self,
        marketplaces: &[MarketplaceRecord],
        plugins: &[PluginRecord],
        now: DateTime<Utc>,
    ) -> QualityIndicators {
        let total = plugins.len() as u64;
        let days_since_update: Vec<i64> = plugins
            .iter()
            .map(|p| (now - p.updated_at).num_days().max(0))
            .collect();

        let verified = count_plugins(plugins, |p| p.verified);
        let recently_updated = days_since_update.iter().filter(|d| **d <= RECENT_DAYS).count() as u64;
        let abandoned = days_since_update
            .iter()
            .filter(|d| **d >= ABANDONED_DAYS)
            .count() as u64;
        let stale = days_since_update.iter().filter(|d| **d > STALE_DAYS).count() as u64;
        let well_documented = count_plugins(plugins, |p| {
            p.description
                .as_deref()
                .is_some_and(|d| d.trim().chars().count() >= WELL_DOCUMENTED_CHARS)
        });
        let with_manifest = marketplaces.iter().filter(|m| m.has_manifest).count() as u64;

        let scores: Vec<f64> = plugins
            .iter()
            .map(|p| self.estimator.quality_score(p, now))
            .collect();
        let mut distribution = QualityDistribution::default();
        for score in &scores {
            match *score {
                s if s >= HIGH_QUALITY => distribution.excellent += 1,
                s if s >= GOOD_QUALITY => distribution.good += 1,
                s if s >= FAIR_QUALITY => distribution.fair += 1,
                _ => distribution.poor += 1,
            }
        }

        let mut badges = vec![
            badge("Verified", verified, total),
            badge("Well Documented", well_documented, total),
            badge("Actively Maintained", recently_updated, total),
            badge("Manifest Published", with_manifest, marketplaces.len() as u64),
        ];
        badges.retain(|b| b.count > 0);

        let mut common_issues: Vec<QualityIssue> = [
            ("Missing description", count_plugins(plugins, |p| !p.has_description())),
            ("No tags", count_plugins(plugins, |p| p.tags.is_empty())),
            ("Not verified", total - verified),
            ("No update in 90+ days", stale),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(issue, count)| QualityIssue {
            issue: issue.to_string(),
            count,
            percentage: percentage(count, total),
        })
        .collect();
        common_issues.sort_by(|a, b| b.count.cmp(&a.count));

        QualityIndicators {
            verification: VerificationMetrics {
                verified_plugins: verified,
                verification_rate: percentage(verified, total),
                badges,
            },
            maintenance: MaintenanceMetrics {
                recently_updated,
                active_maintenance_rate: percentage(recently_updated, total),
                avg_update_frequency: round2(mean_days(&days_since_update)),
                abandoned_plugins: abandoned,
            },
            quality_metrics: QualityMetrics {
                avg_quality_score: round2(mean(&scores)),
                high_quality_plugins: distribution.excellent,
                common_issues,
                distribution,
            },
            security: security_metrics(plugins),
        }
    }
}

fn security_metrics(plugins: &[PluginRecord]) -> Option<SecurityMetrics> {
    let scanned: Vec<u32> = plugins
        .iter()
        .filter_map(|p| p.security.as_ref())
        .filter(|s| s.scanned)
        .map(|s| s.critical_issues)
        .collect();
    if scanned.is_empty() {
        return None;
    }

    let clean = scanned.iter().filter(|issues| **issues == 0).count() as u64;
    Some(SecurityMetrics {
        scanned_plugins: scanned.len() as u64,
        critical_issues: saturating_sum(scanned.iter().map(|i| u64::from(*i))),
        security_score: percentage(clean, scanned.len() as u64),
    })
}

fn popular_tags(members: &[&PluginRecord]) -> Vec<String> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for tag in members.iter().flat_map(|p| p.tags.iter()) {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() {
            *counts.entry(tag).or_default() += 1;
        }
    }

    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(TOP_TAGS).map(|(tag, _)| tag).collect()
}

fn count_plugins(plugins: &[PluginRecord], pred: impl Fn(&PluginRecord) -> bool) -> u64 {
    plugins.iter().filter(|p| pred(*p)).count() as u64
}

fn badge(name: &str, count: u64, total: u64) -> QualityBadge {
    QualityBadge {
        name: name.to_string(),
        count,
        percentage: percentage(count, total),
    }
}

/// New plugins in the last 30 days relative to those that existed before.
fn growth_rate(recent: u64, existing: u64) -> f64 {
    match (recent, existing) {
        (0, _) => 0.0,
        (_, 0) => 100.0,
        (recent, existing) => round2(recent as f64 * 100.0 / existing as f64),
    }
}

/// `part / whole` as a percentage rounded to two decimals; 0 for an empty whole.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 * 100.0 / whole as f64)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Counts pinned at `u64::MAX` instead of wrapping.
fn saturating_sum(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0u64, u64::saturating_add)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn mean_days(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<i64>() as f64 / values.len() as f64
}
