#![allow(dead_code)]
use chrono::{DateTime, TimeZone, Utc};
use ecostats_domain::{MarketplaceOwner, MarketplaceRecord, PluginRecord};

pub fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub struct PluginRecordBuilder {
    record: PluginRecord,
}

impl PluginRecordBuilder {
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
                updated_at: ts(2026, 1, 1),
                created_at: None,
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

    pub fn build(self) -> PluginRecord {
        self.record
    }
}

pub fn marketplace(owner: &str, name: &str) -> MarketplaceRecord {
    MarketplaceRecord {
        name: name.to_string(),
        owner: MarketplaceOwner {
            login: owner.to_string(),
            avatar_url: None,
        },
        description: None,
        stars: 0,
        forks: 0,
        updated_at: ts(2026, 1, 1),
        created_at: None,
        has_manifest: true,
        url: None,
    }
}
