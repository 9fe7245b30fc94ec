use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use shodan_mock::{
    AppState,
    config::Config,
    fixtures::DirectoryFixtures,
    router::{create_router, quota_limiter},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 定期清理已恢复满额的限流记录
const LIMITER_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Loaded configuration: {:?}", config);

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    // 检查固定数据目录
    let fixtures = DirectoryFixtures::new(config.fixtures_dir.clone());
    if !fixtures.root().is_dir() {
        tracing::error!(
            "Fixtures directory {} does not exist",
            fixtures.root().display()
        );
        std::process::exit(1);
    }
    for path in fixtures.missing() {
        tracing::warn!("Fixture file {} is missing", path.display());
    }

    let state = AppState {
        fixtures: Arc::new(fixtures),
    };

    // 设置限流器
    let limiter = Arc::new(quota_limiter(
        DefaultClock::default(),
        config.search_rate_limit,
    ));
    let sweeper = Arc::clone(&limiter);
    // 清理任务随进程退出，不需要保留句柄
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LIMITER_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sweeper.retain_recent();
            tracing::debug!("Rate limiter tracks {} keys", sweeper.tracked_keys());
        }
    });

    let app = create_router(state, limiter);

    // 启动服务器
    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
