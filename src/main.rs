use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use http::{HeaderName, HeaderValue, Method, header};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use vapi_webhook::{
    ServerConfig, auth::WEBHOOK_SECRET_HEADER, config::TlsConfig, routes, state::AppState,
};

/// Vapi webhook receiver - in-memory history for the voice-assistant dashboard
#[derive(Parser, Debug)]
#[command(name = "vapi-webhook")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Must run before the config is read so `.env` values count as env vars.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ServerConfig::from_file(&path)
        }
        None => ServerConfig::from_env(),
    }
    .map_err(|e| anyhow!(e.to_string()))?;

    if !config.has_webhook_secret() {
        info!("VAPI_SECRET not set, webhook secret validation is disabled");
    }

    let address: SocketAddr = config
        .address()
        .parse()
        .with_context(|| format!("Invalid server address '{}'", config.address()))?;
    let tls = config.tls.clone();
    let cors = cors_layer(config.cors_allowed_origins.as_deref());

    let app = routes::create_app(AppState::new(config))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    match tls {
        Some(tls) => serve_tls(app, address, &tls).await,
        None => {
            info!("Webhook receiver listening on http://{}", address);
            let listener = TcpListener::bind(address).await?;
            axum::serve(listener, app.into_make_service()).await?;
            Ok(())
        }
    }
}

/// `*` allows any origin, a comma list allows those origins, and no value
/// leaves the browser's same-origin policy in force.
fn cors_layer(origins: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(WEBHOOK_SECRET_HEADER),
        ]);

    match origins {
        Some("*") => base.allow_origin(Any),
        Some(list) => {
            let origins: Vec<HeaderValue> = list
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            base.allow_origin(origins).allow_credentials(true)
        }
        None => {
            info!("CORS_ALLOWED_ORIGINS not set, cross-origin requests are not allowed");
            base
        }
    }
}

async fn serve_tls(app: Router, address: SocketAddr, tls: &TlsConfig) -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install default crypto provider"))?;

    let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
        .await
        .with_context(|| {
            format!(
                "Failed to load TLS certificates from {} and {}",
                tls.cert_path.display(),
                tls.key_path.display()
            )
        })?;

    info!("Webhook receiver listening on https://{} (TLS enabled)", address);
    axum_server::bind_rustls(address, rustls_config)
        .serve(app.into_make_service())
        .await
        .context("TLS server error")
}
