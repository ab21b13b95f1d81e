use ecostats_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        data_path = %config.stats.data_path,
        cache_ttl_secs = config.stats.cache_ttl_secs,
        single_flight = config.stats.single_flight,
        "Configuration loaded"
    );

    Ok(config)
}
