use crate::ports::EstimationModel;
use chrono::{DateTime, Utc};
use ecostats_domain::PluginRecord;

const STAR_WEIGHT: u64 = 10;
const FORK_WEIGHT: u64 = 25;
const VERIFIED_DOWNLOAD_BONUS: u64 = 100;
const FRESH_UPDATE_DAYS: i64 = 90;

/// Default engagement and quality heuristics.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicEstimationModel;

impl HeuristicEstimationModel {
    pub fn new() -> Self {
        Self
    }
}

impl EstimationModel for HeuristicEstimationModel {
    fn marketplace_downloads(&self, stars: u64, forks: u64) -> u64 {
        stars
            .saturating_mul(STAR_WEIGHT)
            .saturating_add(forks.saturating_mul(FORK_WEIGHT))
    }

    fn plugin_downloads(&self, plugin: &PluginRecord) -> u64 {
        let bonus = if plugin.verified {
            VERIFIED_DOWNLOAD_BONUS
        } else {
            0
        };
        plugin.stars.saturating_mul(STAR_WEIGHT).saturating_add(bonus)
    }

    fn quality_score(&self, plugin: &PluginRecord, now: DateTime<Utc>) -> f64 {
        if let Some(score) = plugin.quality_score {
            return score.clamp(0.0, 100.0);
        }

        let mut score = 30.0;
        if plugin.has_description() {
            score += 20.0;
        }
        if !plugin.tags.is_empty() {
            score += 10.0;
        }
        if plugin.version.is_some() {
            score += 10.0;
        }
        if plugin.verified {
            score += 15.0;
        }
        if (now - plugin.updated_at).num_days() <= FRESH_UPDATE_DAYS {
            score += 15.0;
        }
        score
    }
}
