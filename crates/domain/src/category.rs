use std::collections::HashSet;
use std::fmt;

use crate::PluginRecord;

/// Fixed taxonomy plugins are bucketed into. `Other` catches everything
/// unmatched, so the buckets always partition the plugin set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluginCategory {
    DevelopmentTools,
    AiMachineLearning,
    Productivity,
    TestingQa,
    DevOpsInfrastructure,
    Documentation,
    Security,
    DataAnalytics,
    DesignUi,
    Other,
}

// Matching order: narrow categories first so "security testing" is not
// swallowed by the broad development bucket.
const MATCH_ORDER: [PluginCategory; 9] = [
    PluginCategory::Security,
    PluginCategory::TestingQa,
    PluginCategory::AiMachineLearning,
    PluginCategory::DevOpsInfrastructure,
    PluginCategory::Documentation,
    PluginCategory::DataAnalytics,
    PluginCategory::DesignUi,
    PluginCategory::Productivity,
    PluginCategory::DevelopmentTools,
];

impl PluginCategory {
    pub fn all() -> &'static [PluginCategory] {
        &[
            PluginCategory::DevelopmentTools,
            PluginCategory::AiMachineLearning,
            PluginCategory::Productivity,
            PluginCategory::TestingQa,
            PluginCategory::DevOpsInfrastructure,
            PluginCategory::Documentation,
            PluginCategory::Security,
            PluginCategory::DataAnalytics,
            PluginCategory::DesignUi,
            PluginCategory::Other,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PluginCategory::DevelopmentTools => "Development Tools",
            PluginCategory::AiMachineLearning => "AI & Machine Learning",
            PluginCategory::Productivity => "Productivity",
            PluginCategory::TestingQa => "Testing & QA",
            PluginCategory::DevOpsInfrastructure => "DevOps & Infrastructure",
            PluginCategory::Documentation => "Documentation",
            PluginCategory::Security => "Security",
            PluginCategory::DataAnalytics => "Data & Analytics",
            PluginCategory::DesignUi => "Design & UI",
            PluginCategory::Other => "Other",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            PluginCategory::DevelopmentTools => &[
                "development", "developer", "dev", "code", "coding", "refactor", "refactoring",
                "lint", "linter", "formatter", "git", "ide", "debug", "debugger", "compiler",
                "build", "sdk", "api", "typescript", "python", "rust",
            ],
            PluginCategory::AiMachineLearning => &[
                "ai", "ml", "llm", "agent", "agents", "gpt", "model", "models", "prompt",
                "prompts", "embedding", "embeddings", "neural", "rag", "machine learning",
            ],
            PluginCategory::Productivity => &[
                "productivity", "workflow", "workflows", "automation", "task", "tasks", "todo",
                "notes", "calendar", "commands", "shortcuts",
            ],
            PluginCategory::TestingQa => &[
                "test", "tests", "testing", "qa", "coverage", "e2e", "jest", "pytest", "tdd",
                "benchmark",
            ],
            PluginCategory::DevOpsInfrastructure => &[
                "devops", "docker", "kubernetes", "k8s", "deploy", "deployment", "ci", "cd",
                "terraform", "infrastructure", "cloud", "aws", "monitoring",
            ],
            PluginCategory::Documentation => &[
                "docs", "documentation", "readme", "markdown", "wiki", "changelog",
            ],
            PluginCategory::Security => &[
                "security", "secure", "vulnerability", "vulnerabilities", "audit", "secrets",
                "auth", "encryption", "cve", "pentest",
            ],
            PluginCategory::DataAnalytics => &[
                "data", "database", "sql", "analytics", "csv", "etl", "postgres",
                "visualization", "pandas",
            ],
            PluginCategory::DesignUi => &[
                "design", "ui", "ux", "css", "figma", "frontend", "tailwind", "theme",
                "accessibility",
            ],
            PluginCategory::Other => &[],
        }
    }

    /// Maps free text onto the taxonomy, `None` when nothing matches.
    pub fn match_text(text: &str) -> Option<PluginCategory> {
        let lowered = text.to_lowercase();
        if let Some(exact) = PluginCategory::all()
            .iter()
            .find(|c| c.label().to_lowercase() == lowered.trim())
        {
            return Some(*exact);
        }

        let tokens: HashSet<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        MATCH_ORDER.into_iter().find(|category| {
            category.keywords().iter().any(|kw| {
                if kw.contains(' ') {
                    lowered.contains(kw)
                } else {
                    tokens.contains(kw)
                }
            })
        })
    }

    /// An explicit category wins when it maps onto the taxonomy; otherwise
    /// name, description and tags are matched.
    pub fn classify(plugin: &PluginRecord) -> PluginCategory {
        if let Some(category) = plugin.category.as_deref().and_then(Self::match_text) {
            return category;
        }

        let mut text = plugin.name.replace(['-', '_'], " ");
        if let Some(description) = &plugin.description {
            text.push(' ');
            text.push_str(description);
        }
        for tag in &plugin.tags {
            text.push(' ');
            text.push_str(tag);
        }

        Self::match_text(&text).unwrap_or(PluginCategory::Other)
    }
}

impl fmt::Display for PluginCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
