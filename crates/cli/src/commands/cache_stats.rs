use super::print_json;
use crate::di::UseCases;

/// Runs one lookup cycle so the report reflects a populated cache.
pub async fn run_cache_stats(use_cases: &UseCases, pretty: bool) -> anyhow::Result<()> {
    use_cases.get_stats.execute(false).await;
    print_json(&use_cases.get_cache_stats.execute(), pretty)
}
