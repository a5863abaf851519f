//! Job Portal API server
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration and the RSA key pair (bad keys abort startup)
//! 3. Build the job cache (Redis or in-process) and the repository
//! 4. Start the expiry sweep when the cache is in-process
//! 5. Serve the Axum router until SIGINT/SIGTERM

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use jsonwebtoken::Algorithm;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use job_portal::api::create_router;
use job_portal::auth::{CredentialHasher, TokenAuth};
use job_portal::cache::{JobCache, KvJobCache, MemoryKv, RedisKv};
use job_portal::repository::InMemoryRepository;
use job_portal::{spawn_cleanup_task, AppState, Config, Service};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "job_portal=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Portal API");

    let config = Config::from_env();
    config.validate().context("invalid configuration")?;
    info!(
        port = config.server_port,
        cache_ttl_secs = config.cache_ttl,
        token_ttl_secs = config.token_ttl,
        redis = config.redis_url.is_some(),
        "Configuration loaded"
    );

    let (private_pem, public_pem) = config.load_keys().context("loading key pair")?;
    let algorithm = Algorithm::from_str(&config.token_algorithm)
        .with_context(|| format!("unknown TOKEN_ALGORITHM {}", config.token_algorithm))?;
    let auth = TokenAuth::new(private_pem.as_bytes(), public_pem.as_bytes())
        .and_then(|auth| auth.with_algorithm(algorithm))
        .context("constructing token auth")?
        .with_issuer(config.token_issuer.clone())
        .with_ttl(config.token_ttl());
    info!(algorithm = ?auth.algorithm(), "Token auth initialized");

    let (cache, cleanup_handle) = build_cache(&config).await?;

    let hasher = CredentialHasher::with_params(config.argon2_memory_kib, config.argon2_iterations)
        .context("configuring password hashing")?;

    let service = Service::new(Arc::new(InMemoryRepository::new()), Arc::new(auth), cache)
        .with_hasher(hasher)
        .with_cache_ttl(config.cache_ttl())
        .with_io_timeout(config.io_timeout());

    let app = create_router(AppState::new(service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Picks the cache backend. A Redis that is down at startup is only a
/// warning: reads fail open to the repository until it comes back.
async fn build_cache(
    config: &Config,
) -> anyhow::Result<(Arc<dyn JobCache>, Option<JoinHandle<()>>)> {
    match &config.redis_url {
        Some(url) => {
            let kv = RedisKv::connect(url).context("creating Redis pool")?;
            match kv.ping().await {
                Ok(()) => info!("Job cache backed by Redis"),
                Err(e) => warn!(error = %e, "Redis unreachable at startup; cache reads will miss"),
            }
            Ok((Arc::new(KvJobCache::new(kv)), None))
        }
        None => {
            let kv = MemoryKv::new(config.cache_max_entries);
            let handle = spawn_cleanup_task(
                kv.store(),
                std::time::Duration::from_secs(config.cleanup_interval.max(1)),
            );
            info!(
                max_entries = config.cache_max_entries,
                "Job cache held in process"
            );
            Ok((Arc::new(KvJobCache::new(kv)), Some(handle)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        info!("Cache expiry sweep stopped");
    }
}
