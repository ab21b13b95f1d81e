#![allow(dead_code)]
use chrono::{DateTime, Duration, TimeZone, Utc};
use ecostats_domain::{MarketplaceOwner, MarketplaceRecord, PluginRecord, RawDataset, SecurityScan};

pub fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn days_before(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

pub struct PluginBuilder {
    record: PluginRecord,
}

impl PluginBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            record: PluginRecord {
                name: name.to_string(),
                marketplace: Some("acme/plugins".to_string()),
                author: None,
                description: None,
                category: None,
                tags: Vec::new(),
                version: None,
                verified: false,
                quality_score: None,
                stars: 0,
                updated_at: ts(2026, 10, 1),
                created_at: Some(ts(2025, 11, 1)),
                security: None,
            },
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.record.category = Some(category.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.record.description = Some(description.to_string());
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.record.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.record.author = Some(author.to_string());
        self
    }

    pub fn verified(mut self) -> Self {
        self.record.verified = true;
        self
    }

    pub fn quality(mut self, score: f64) -> Self {
        self.record.quality_score = Some(score);
        self
    }

    pub fn stars(mut self, stars: u64) -> Self {
        self.record.stars = stars;
        self
    }

    pub fn updated(mut self, at: DateTime<Utc>) -> Self {
        self.record.updated_at = at;
        self
    }

    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.record.created_at = Some(at);
        self
    }

    pub fn scanned(mut self, critical_issues: u32) -> Self {
        self.record.security = Some(SecurityScan {
            scanned: true,
            critical_issues,
        });
        self
    }

    pub fn build(self) -> PluginRecord {
        self.record
    }
}

pub fn marketplace(owner: &str, name: &str, stars: u64, forks: u64) -> MarketplaceRecord {
    MarketplaceRecord {
        name: name.to_string(),
        owner: MarketplaceOwner {
            login: owner.to_string(),
            avatar_url: None,
        },
        description: None,
        stars,
        forks,
        updated_at: ts(2026, 10, 1),
        created_at: Some(ts(2025, 10, 20)),
        has_manifest: true,
        url: None,
    }
}

pub fn described(mut record: MarketplaceRecord, description: &str) -> MarketplaceRecord {
    record.description = Some(description.to_string());
    record
}

/// Small dataset: two owners, three marketplaces, four plugins.
pub fn sample_dataset() -> RawDataset {
    RawDataset::new(
        vec![
            described(marketplace("acme", "acme-tools", 100, 10), "Home of 12 plugins"),
            marketplace("acme", "acme-extras", 20, 0),
            described(marketplace("zen", "zen-market", 50, 4), "3 plugins for focus"),
        ],
        vec![
            PluginBuilder::new("secret-scanner")
                .description("Finds leaked secrets in commits")
                .tags(&["security", "secrets"])
                .verified()
                .build(),
            PluginBuilder::new("test-writer").tags(&["testing"]).build(),
            PluginBuilder::new("code-helper")
                .category("Development Tools")
                .quality(91.0)
                .build(),
            PluginBuilder::new("mystery").build(),
        ],
    )
}
