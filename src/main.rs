use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use whatshouldweplay::console::ReaderLines;
use whatshouldweplay::{AppConfig, AppContext, AppError, BggClient, Console, FileKeyValueStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // Initialize tracing on stderr so it stays out of the screens
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "whatshouldweplay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting What Should We Play?");

    let config = AppConfig::load()?;
    let data_file = config.storage.data_file_path();
    info!(path = %data_file.display(), "Using data file");

    // Wire the concrete store and catalog into the shared context
    let key_value_store = Arc::new(FileKeyValueStore::new(data_file));
    let catalog = Arc::new(BggClient::new(&config.catalog)?);
    let context = AppContext::new(config, key_value_store, catalog);

    let mut console = Console::new(
        context,
        Box::new(ReaderLines::stdin()),
        Box::new(std::io::stdout()),
    );
    console.run().await
}
