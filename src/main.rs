use carbon_coach::session::SessionStore;
use carbon_coach::watson::WatsonClient;
use carbon_coach::{AppState, Settings, router};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            error!("{err}");
            return Err(err.into());
        }
    };

    let predictor = WatsonClient::new(&settings)?;
    let state = AppState::new(predictor, SessionStore::new(settings.session_ttl_minutes));
    let app = router(state);

    let addr = settings.bind_addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
