mod logging;
mod runner;
mod settings;

use std::path::Path;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "agent.ron".to_string());
    let config = settings::load(Path::new(&config_path))?;

    logging::initialize(logging::LogDestination::Both, config.debug_logging);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(runner::run(config))
}
