use alumni_console_server::{
    app,
    auth::{AppState, HttpAuthApi},
    config::ServerConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from the environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    // Invalid route tables must stop the server before it accepts traffic
    let policy = config
        .access
        .into_policy()
        .expect("invalid access configuration");
    tracing::info!(
        routes = policy.routes().entries().len(),
        foreign_area = ?policy.foreign_area(),
        "Validated access policy"
    );

    let auth_api = HttpAuthApi::new(&config.api_base_url);
    tracing::info!(login_url = auth_api.login_url(), "Using remote login endpoint");

    let state = Arc::new(AppState::new(
        policy,
        Arc::new(auth_api),
        config.session,
    ));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
