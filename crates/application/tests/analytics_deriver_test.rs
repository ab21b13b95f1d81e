use ecostats_application::services::{AnalyticsDeriver, HeuristicEstimationModel, TOP_DEVELOPERS};
use ecostats_domain::PluginRecord;
use std::sync::Arc;

mod helpers;
use helpers::{
    days_before, described, marketplace, sample_dataset, ts, FixedRandom, PluginBuilder,
    WordPluginCountExtractor,
};

fn deriver() -> AnalyticsDeriver {
    AnalyticsDeriver::new(
        Arc::new(WordPluginCountExtractor),
        Arc::new(HeuristicEstimationModel::new()),
    )
}

#[test]
fn test_scenario_empty_input_yields_zeroed_analytics() {
    let derived = deriver().derive(&[], &[], ts(2026, 10, 14), &FixedRandom::new(0.5));

    assert_eq!(derived.total_plugins, 0);
    assert_eq!(derived.total_marketplaces, 0);
    assert_eq!(derived.total_developers, 0);
    assert_eq!(derived.total_downloads, 0);
    assert!(derived.categories.is_empty());
    assert!(derived.developers.is_empty());

    let quality = &derived.quality;
    assert_eq!(quality.verification.verification_rate, 0.0);
    assert_eq!(quality.maintenance.active_maintenance_rate, 0.0);
    assert_eq!(quality.maintenance.avg_update_frequency, 0.0);
    assert_eq!(quality.quality_metrics.avg_quality_score, 0.0);
    assert!(quality.quality_metrics.common_issues.is_empty());
    assert!(quality.security.is_none());
}

#[test]
fn test_scenario_thirty_seventy_split_is_exact() {
    let mut plugins: Vec<PluginRecord> = (0..30)
        .map(|i| PluginBuilder::new(&format!("scan-{}", i)).category("Security").build())
        .collect();
    plugins.extend((0..70).map(|i| {
        PluginBuilder::new(&format!("suite-{}", i))
            .category("Testing & QA")
            .build()
    }));

    let categories = deriver().categories(&plugins, ts(2026, 10, 14));
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].category, "Testing & QA");
    assert_eq!(categories[0].percentage, 70.0);
    assert_eq!(categories[1].category, "Security");
    assert_eq!(categories[1].percentage, 30.0);
}

#[test]
fn test_categories_partition_plugins_and_sum_to_hundred() {
    let dataset = sample_dataset();
    let categories = deriver().categories(&dataset.plugins, ts(2026, 10, 14));

    let counted: u64 = categories.iter().map(|c| c.plugin_count).sum();
    assert_eq!(counted, dataset.plugins.len() as u64);

    let total: f64 = categories.iter().map(|c| c.percentage).sum();
    assert!((total - 100.0).abs() < 0.05, "percentages sum to {}", total);

    let labels: Vec<&str> = categories.iter().map(|c| c.category.as_str()).collect();
    assert!(labels.contains(&"Security"));
    assert!(labels.contains(&"Testing & QA"));
    assert!(labels.contains(&"Development Tools"));
    assert!(labels.contains(&"Other"));
}

#[test]
fn test_percentages_of_three_way_split_stay_near_hundred() {
    let plugins: Vec<PluginRecord> = ["Security", "Documentation", "Design & UI"]
        .iter()
        .enumerate()
        .map(|(i, category)| PluginBuilder::new(&format!("p{}", i)).category(category).build())
        .collect();

    let categories = deriver().categories(&plugins, ts(2026, 10, 14));
    assert!(categories.iter().all(|c| c.percentage == 33.33));
    let total: f64 = categories.iter().map(|c| c.percentage).sum();
    assert!((total - 100.0).abs() < 0.05);
}

#[test]
fn test_category_growth_rate_and_tags() {
    let now = ts(2026, 10, 14);
    let plugins = vec![
        PluginBuilder::new("a").category("Security").tags(&["audit", "CVE"]).created(days_before(now, 5)).build(),
        PluginBuilder::new("b").category("Security").tags(&["audit"]).created(days_before(now, 200)).build(),
        PluginBuilder::new("c").category("Security").tags(&["audit", "cve"]).created(days_before(now, 300)).build(),
    ];

    let categories = deriver().categories(&plugins, now);
    let security = &categories[0];
    assert_eq!(security.plugin_count, 3);
    // one new against two existing
    assert_eq!(security.growth_rate, 50.0);
    assert_eq!(security.popular_tags, vec!["audit".to_string(), "cve".to_string()]);
}

#[test]
fn test_top_plugins_capped_and_ranked_by_quality() {
    let plugins: Vec<PluginRecord> = (0..8)
        .map(|i| {
            PluginBuilder::new(&format!("doc-{}", i))
                .category("Documentation")
                .quality(10.0 * i as f64)
                .build()
        })
        .collect();

    let categories = deriver().categories(&plugins, ts(2026, 10, 14));
    let top = &categories[0].top_plugins;
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].name, "doc-7");
    assert_eq!(top[0].quality_score, 70.0);
    assert!(top.windows(2).all(|p| p[0].quality_score >= p[1].quality_score));
}

#[test]
fn test_developers_grouped_by_owner() {
    let dataset = sample_dataset();
    let developers = deriver().developers(&dataset.marketplaces, &FixedRandom::new(0.5));

    assert_eq!(developers.len(), 2);
    let acme = &developers[0];
    assert_eq!(acme.login, "acme");
    assert_eq!(acme.marketplace_count, 2);
    assert_eq!(acme.total_stars, 120);
    assert_eq!(acme.total_forks, 10);
    assert_eq!(acme.estimated_downloads, 120 * 10 + 10 * 25);
    // 12 extracted plus the 1..=5 fallback drawn at 0.5
    assert_eq!(acme.plugin_count, 15);
    assert!(acme.plugin_count_estimated);

    let zen = &developers[1];
    assert_eq!(zen.plugin_count, 3);
    assert!(!zen.plugin_count_estimated);
}

#[test]
fn test_fallback_plugin_count_within_bounds() {
    let marketplaces = vec![marketplace("solo", "bare", 1, 0)];
    for value in [0.0, 0.3, 0.999] {
        let developers = deriver().developers(&marketplaces, &FixedRandom::new(value));
        let count = developers[0].plugin_count;
        assert!((1..=5).contains(&count), "fallback {} out of range", count);
    }
}

#[test]
fn test_developers_sorted_by_stars_and_capped() {
    let marketplaces: Vec<_> = (0..20)
        .map(|i| described(marketplace(&format!("owner-{}", i), "m", i * 10, 0), "2 plugins"))
        .collect();

    let developers = deriver().developers(&marketplaces, &FixedRandom::new(0.5));
    assert_eq!(developers.len(), TOP_DEVELOPERS);
    assert_eq!(developers[0].login, "owner-19");
    assert!(developers.windows(2).all(|d| d[0].total_stars >= d[1].total_stars));
}

#[test]
fn test_quality_bands_and_maintenance() {
    let now = ts(2026, 10, 14);
    let plugins = vec![
        PluginBuilder::new("excellent").quality(80.0).verified().updated(days_before(now, 3)).build(),
        PluginBuilder::new("good").quality(79.9).updated(days_before(now, 30)).build(),
        PluginBuilder::new("fair").quality(40.0).updated(days_before(now, 100)).build(),
        PluginBuilder::new("poor").quality(39.0).updated(days_before(now, 180)).build(),
    ];

    let quality = deriver().quality(&[], &plugins, now);
    let distribution = &quality.quality_metrics.distribution;
    assert_eq!(distribution.excellent, 1);
    assert_eq!(distribution.good, 1);
    assert_eq!(distribution.fair, 1);
    assert_eq!(distribution.poor, 1);
    assert_eq!(quality.quality_metrics.high_quality_plugins, 1);

    assert_eq!(quality.verification.verified_plugins, 1);
    assert_eq!(quality.verification.verification_rate, 25.0);
    assert_eq!(quality.maintenance.recently_updated, 2);
    assert_eq!(quality.maintenance.active_maintenance_rate, 50.0);
    assert_eq!(quality.maintenance.abandoned_plugins, 1);
    assert_eq!(quality.maintenance.avg_update_frequency, 78.25);

    let stale = quality
        .quality_metrics
        .common_issues
        .iter()
        .find(|i| i.issue == "No update in 90+ days")
        .unwrap();
    assert_eq!(stale.count, 2);
    assert_eq!(stale.percentage, 50.0);
}

#[test]
fn test_out_of_range_scores_are_clamped() {
    let plugins = vec![PluginBuilder::new("over").quality(140.0).build()];
    let quality = deriver().quality(&[], &plugins, ts(2026, 10, 14));
    assert_eq!(quality.quality_metrics.avg_quality_score, 100.0);
}

#[test]
fn test_security_present_only_with_scan_data() {
    let now = ts(2026, 10, 14);
    let unscanned = vec![PluginBuilder::new("a").build()];
    assert!(deriver().quality(&[], &unscanned, now).security.is_none());

    let scanned = vec![
        PluginBuilder::new("a").scanned(0).build(),
        PluginBuilder::new("b").scanned(2).build(),
        PluginBuilder::new("c").build(),
    ];
    let security = deriver().quality(&[], &scanned, now).security.unwrap();
    assert_eq!(security.scanned_plugins, 2);
    assert_eq!(security.critical_issues, 2);
    assert_eq!(security.security_score, 50.0);
}

#[test]
fn test_totals_count_distinct_developers() {
    let dataset = sample_dataset();
    let derived = deriver().derive(
        &dataset.marketplaces,
        &dataset.plugins,
        ts(2026, 10, 14),
        &FixedRandom::new(0.5),
    );

    assert_eq!(derived.total_marketplaces, 3);
    assert_eq!(derived.total_plugins, 4);
    assert_eq!(derived.total_stars, 170);
    // acme and zen; plugins credit the "acme" marketplace owner
    assert_eq!(derived.total_developers, 2);
    assert_eq!(derived.total_downloads, 170 * 10 + 14 * 25);
}

#[test]
fn test_developer_totals_saturate_instead_of_overflowing() {
    let half = u64::MAX / 2 + 1;
    let marketplaces = vec![
        described(marketplace("bulk", "bulk-a", half, half), "18446744073709551615 plugins"),
        described(marketplace("bulk", "bulk-b", half, half), "5 plugins"),
    ];

    let derived = deriver().derive(&marketplaces, &[], ts(2026, 10, 14), &FixedRandom::new(0.5));

    assert_eq!(derived.total_stars, u64::MAX);
    assert_eq!(derived.total_downloads, u64::MAX);

    let developer = &derived.developers[0];
    assert_eq!(developer.marketplace_count, 2);
    assert_eq!(developer.plugin_count, u64::MAX);
    assert_eq!(developer.total_stars, u64::MAX);
    assert_eq!(developer.total_forks, u64::MAX);
    assert_eq!(developer.estimated_downloads, u64::MAX);
}

#[test]
fn test_category_downloads_saturate_instead_of_overflowing() {
    let plugins = vec![
        PluginBuilder::new("vault-a").category("Security").stars(u64::MAX).build(),
        PluginBuilder::new("vault-b").category("Security").stars(u64::MAX).build(),
    ];

    let categories = deriver().categories(&plugins, ts(2026, 10, 14));

    assert_eq!(categories[0].plugin_count, 2);
    assert_eq!(categories[0].total_downloads, u64::MAX);
    assert_eq!(categories[0].top_plugins[0].estimated_downloads, u64::MAX);
}
