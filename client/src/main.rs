//! Main entry point for the showcase client.
//!
//! Loads configuration, initialises tracing, restores any persisted session
//! and, when one is present, lists the users visible to it.

use anyhow::Context;
use showcase_client::config::ClientConfig;
use showcase_client::telemetry::init_tracing;
use showcase_client::AppContext;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env().context("loading configuration")?;
    init_tracing(&config.log_level).context("installing tracing subscriber")?;
    info!(config = ?config, "starting showcase client");

    let context = AppContext::from_config(&config).context("building application context")?;

    match context.session.current_session().user() {
        Some(user) => {
            info!(user_id = user.id, "restored session");
            match context.users.get_users().await {
                Ok(users) => {
                    for user in users {
                        info!(user_id = user.id, role = %user.role, "user");
                    }
                }
                Err(err) => warn!(error = %err, "cannot list users"),
            }
        }
        None => info!("no stored session, nothing to do"),
    }

    let AppContext {
        session,
        resources,
        users,
    } = context;
    drop(users);
    drop(resources);
    if let Ok(store) = std::sync::Arc::try_unwrap(session) {
        let last = store.teardown();
        info!(authenticated = last.is_authenticated(), "shutting down");
    }

    Ok(())
}
