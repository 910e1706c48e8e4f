mod bootstrap;

use anyhow::{Context, Result};
use bikeshare_core::settings::Settings;
use bikeshare_runtime::prompt::Console;
use bikeshare_runtime::session::Session;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data dir: {}, page size: {}",
        settings.data_dir.display(),
        settings.page_size
    );

    for path in bootstrap::missing_city_files(&settings.data_dir) {
        tracing::warn!("City data file not found: {}", path.display());
    }

    let mut session = Session::from_settings(Console::stdio(), &settings);
    session.run().context("bikeshare session ended with an error")?;

    Ok(())
}
