use http::{HeaderValue, header};
use std::{sync::Arc, time::Duration};
use tower_http::set_header::SetResponseHeaderLayer;
use upload_relay::{
    application::upload_and_tag::use_case::UploadAndTagUseCase,
    config::Config,
    infrastructure::{
        storage::local_disk_store::LocalDiskStore, tagging::cloudinary::CloudinaryServiceBuilder,
    },
    presentation::http::{routes::create_router, state::AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("info,upload_relay=debug,tower_http=debug")
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    if config.cloudinary_cloud_name.is_empty() {
        tracing::warn!("CLOUDINARY_CLOUD_NAME is not set; uploads to the provider will fail");
    }
    if config.reject_unsafe_filenames {
        tracing::info!("Unsafe upload file names will be rejected");
    }

    let store = Arc::new(LocalDiskStore::new(config.uploads_dir.clone()));
    let tagging = Arc::new(CloudinaryServiceBuilder::new(
        config.cloudinary_api_base_url.clone(),
        config.cloudinary_signature_algorithm,
        config.provider_timeout_seconds.map(Duration::from_secs),
    )?);

    let state = AppState {
        relay: Arc::new(UploadAndTagUseCase::from_config(&config, store, tagging)),
        config: config.clone(),
    };

    let app = create_router(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Upload relay listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
