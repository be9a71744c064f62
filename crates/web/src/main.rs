use std::net::SocketAddr;

use anyhow::{Context, Result};
use bright_observability::init_tracing;
use bright_web::{build_app, WebConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("bright_web");

    let config = WebConfig::from_env()?;
    let bind = config.bind.clone();
    let route_fields = config.route_fields.as_code();
    let whatsapp_number = config.profile.whatsapp_number.clone();
    let trust_forwarded = config.trust_forwarded;

    let app = build_app(config);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(
        bind = %bind,
        route_fields,
        whatsapp_number = %whatsapp_number,
        trust_forwarded,
        "bright tours site started"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
