pub mod cache_stats;
pub mod show;
pub mod watch;

pub use cache_stats::run_cache_stats;
pub use show::{run_show, ShowArgs};
pub use watch::run_watch;

use serde::Serialize;

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}
