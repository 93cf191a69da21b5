use blotter::config::Config;
use blotter::db::Store;
use blotter::service::ProvisionOutcome;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        secure_cookie = cfg.secure_cookie,
    );

    // Failing to open the store at startup is fatal.
    let store = Store::open(&cfg.database_url).await?;
    let state = blotter::BlotterState::new(store.clone(), cfg.secure_cookie);

    match state
        .credentials
        .provision_from(cfg.editor_username.as_deref(), cfg.editor_password.as_deref())
        .await
    {
        ProvisionOutcome::Skipped => {
            warn!("BLOTTER_EDITOR_USERNAME/BLOTTER_EDITOR_PASSWORD not set; editor account not provisioned");
        }
        ProvisionOutcome::Provisioned { username } => {
            info!(username = %username, "editor account provisioned");
        }
        ProvisionOutcome::Failed(e) => {
            error!(error = %e, "failed to provision editor account");
            return Err(e.into());
        }
    }

    let app = blotter::blotter_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("store closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
