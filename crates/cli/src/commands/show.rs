use super::print_json;
use crate::di::UseCases;
use clap::Args;
use ecostats_domain::StatsQuery;
use tracing::info;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Growth period (7d, 30d, 90d, 1y)
    #[arg(short, long, default_value = "30d")]
    pub period: String,

    /// Bucket growth points (daily, weekly, monthly)
    #[arg(short, long, default_value = "daily")]
    pub aggregation: String,

    /// Skip the cache and recompute
    #[arg(short, long)]
    pub force_refresh: bool,

    /// Print every growth range instead of only the requested period
    #[arg(long)]
    pub all_ranges: bool,

    /// Pretty-print JSON
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run_show(use_cases: &UseCases, args: ShowArgs) -> anyhow::Result<()> {
    let query = StatsQuery::parse(&args.period, &args.aggregation, args.force_refresh)?;

    let stats = if args.all_ranges {
        use_cases.get_stats.execute(query.force_refresh).await
    } else {
        use_cases.get_stats.execute_query(&query).await
    };

    info!(
        period = %query.period,
        aggregation = query.aggregation.as_str(),
        sources = ?stats.metadata.data_sources,
        cache_hit = stats.metadata.cache_info.hit,
        "Stats ready"
    );

    print_json(&stats, args.pretty)
}
