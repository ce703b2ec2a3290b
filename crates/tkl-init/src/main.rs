use std::path::PathBuf;

use tracing::info;

use tkl_store::MessageStore;

/// Schema initializer for the tkl-chat message store: opens the database,
/// ensures the messages table and its indexes exist, and exits. Safe to run
/// any number of times, including while other processes use the store.
fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tkl_store=debug,tkl_init=info".into()),
        )
        .init();

    // Config
    let db_path: PathBuf = std::env::var("TKL_CHAT_DB_PATH")
        .unwrap_or_else(|_| "tkl-chat.db".into())
        .into();

    let store = MessageStore::open(&db_path)?;
    store.ensure_schema()?;

    info!("tkl-chat message store ready at {}", db_path.display());
    Ok(())
}
