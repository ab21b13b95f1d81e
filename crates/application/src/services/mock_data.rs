use crate::ports::RandomSource;
use chrono::{DateTime, Duration, Utc};
use ecostats_domain::{MarketplaceOwner, MarketplaceRecord, PluginRecord, RawDataset, SecurityScan};

const OWNERS: [&str; 12] = [
    "acme-labs",
    "devtools-collective",
    "cloudsmith",
    "quality-guild",
    "data-forge",
    "pixel-studio",
    "secure-ops",
    "docs-crew",
    "agentic-works",
    "flowstate",
    "infra-hub",
    "testbench",
];

// (name, category hint, description, tags)
const PLUGIN_TEMPLATES: [(&str, &str, &str, &[&str]); 18] = [
    ("code-reviewer", "Development Tools", "Automated code review with inline suggestions", &["code", "review"]),
    ("refactor-assistant", "Development Tools", "Guided refactoring for large codebases", &["refactor", "code"]),
    ("git-flow", "Development Tools", "Branching and commit helpers for git", &["git", "workflow"]),
    ("prompt-library", "AI & Machine Learning", "Curated prompts for common agent tasks", &["prompts", "llm"]),
    ("rag-builder", "AI & Machine Learning", "Retrieval pipelines over local documents", &["rag", "embeddings"]),
    ("task-tracker", "Productivity", "Tracks todos across sessions", &["tasks", "todo"]),
    ("daily-notes", "Productivity", "Structured daily notes and summaries", &["notes"]),
    ("test-generator", "Testing & QA", "Generates unit tests from function signatures", &["testing", "tdd"]),
    ("coverage-report", "Testing & QA", "Summarises coverage gaps per module", &["coverage", "tests"]),
    ("k8s-deployer", "DevOps & Infrastructure", "Kubernetes manifests and rollout checks", &["kubernetes", "deploy"]),
    ("ci-doctor", "DevOps & Infrastructure", "Diagnoses failing CI pipelines", &["ci", "devops"]),
    ("readme-writer", "Documentation", "Drafts README files from project structure", &["readme", "docs"]),
    ("changelog-bot", "Documentation", "Keeps a changelog from commit history", &["changelog"]),
    ("secret-scanner", "Security", "Finds committed secrets before they ship", &["secrets", "security"]),
    ("dep-audit", "Security", "Audits dependencies against known CVEs", &["audit", "cve"]),
    ("sql-explorer", "Data & Analytics", "Explores database schemas and queries", &["sql", "database"]),
    ("ui-kit", "Design & UI", "Component scaffolding with design tokens", &["ui", "design"]),
    ("misc-utils", "", "", &[]),
];

/// Synthetic dataset used when the scanner output is unavailable.
///
/// Everything is drawn from the injected random source, so a seeded source
/// yields the same dataset for the same `now`.
pub struct MockDataGenerator {
    launch_date: DateTime<Utc>,
}

impl MockDataGenerator {
    pub fn new(launch_date: DateTime<Utc>) -> Self {
        Self { launch_date }
    }

    pub fn generate(&self, now: DateTime<Utc>, rng: &dyn RandomSource) -> RawDataset {
        let age_days = (now - self.launch_date).num_days().max(1) as u64;

        let marketplaces: Vec<MarketplaceRecord> = OWNERS
            .iter()
            .map(|owner| {
                let plugin_count = rng.range_u64(2, 24);
                let description = if rng.chance(0.75) {
                    format!("Marketplace with {} plugins", plugin_count)
                } else {
                    "Community marketplace".to_string()
                };
                MarketplaceRecord {
                    name: format!("{}-marketplace", owner),
                    owner: MarketplaceOwner {
                        login: owner.to_string(),
                        avatar_url: Some(format!("https://avatars.githubusercontent.com/{}", owner)),
                    },
                    description: Some(description),
                    stars: rng.range_u64(5, 1_500),
                    forks: rng.range_u64(0, 200),
                    updated_at: recent(now, age_days, rng),
                    created_at: Some(since_launch(self.launch_date, age_days, rng)),
                    has_manifest: rng.chance(0.8),
                    url: Some(format!("https://github.com/{}/{}-marketplace", owner, owner)),
                }
            })
            .collect();

        let plugins = marketplaces
            .iter()
            .flat_map(|marketplace| {
                let count = rng.range_u64(1, 4) as usize;
                let offset = rng.range_u64(0, PLUGIN_TEMPLATES.len() as u64 - 1) as usize;
                (0..count)
                    .map(move |i| (marketplace, PLUGIN_TEMPLATES[(offset + i) % PLUGIN_TEMPLATES.len()]))
                    .collect::<Vec<_>>()
            })
            .map(|(marketplace, (name, category, description, tags))| {
                let scanned = rng.chance(0.4);
                PluginRecord {
                    name: format!("{}-{}", marketplace.owner.login, name),
                    marketplace: Some(format!("{}/{}", marketplace.owner.login, marketplace.name)),
                    author: Some(marketplace.owner.login.clone()),
                    description: (!description.is_empty()).then(|| description.to_string()),
                    category: (!category.is_empty()).then(|| category.to_string()),
                    tags: tags.iter().map(|t| t.to_string()).collect(),
                    version: rng.chance(0.7).then(|| format!("1.{}.0", rng.range_u64(0, 9))),
                    verified: rng.chance(0.35),
                    quality_score: None,
                    stars: rng.range_u64(0, 400),
                    updated_at: recent(now, age_days, rng),
                    created_at: Some(since_launch(self.launch_date, age_days, rng)),
                    security: scanned.then(|| SecurityScan {
                        scanned: true,
                        critical_issues: rng.range_u64(0, 2) as u32,
                    }),
                }
            })
            .collect();

        RawDataset {
            marketplaces,
            plugins,
            generated_at: Some(now),
            skipped: 0,
        }
    }
}

fn recent(now: DateTime<Utc>, age_days: u64, rng: &dyn RandomSource) -> DateTime<Utc> {
    now - Duration::days(rng.range_u64(0, age_days.min(240)) as i64)
}

fn since_launch(launch: DateTime<Utc>, age_days: u64, rng: &dyn RandomSource) -> DateTime<Utc> {
    launch + Duration::days(rng.range_u64(0, age_days) as i64)
}
