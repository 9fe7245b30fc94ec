use std::sync::Arc;

use axum::{Router, routing::get};
use governor::clock::Clock;

use crate::{
    AppState,
    config::SearchRateLimit,
    middleware::{QuotaLimiter, RoutePolicy, enforce_quota, log_errors},
    routes::{self, API_INFO_PATH, HOST_SEARCH_PATH},
};

/// 根据配置给各路由挂上限流策略
pub fn quota_limiter<C: Clock + Clone>(clock: C, search: SearchRateLimit) -> QuotaLimiter<C> {
    let search_policy = match search {
        SearchRateLimit::Default => RoutePolicy::Default,
        SearchRateLimit::None => RoutePolicy::Unlimited,
    };

    QuotaLimiter::with_clock(clock)
        .with_route_policy(API_INFO_PATH, RoutePolicy::PerSecond)
        .with_route_policy(HOST_SEARCH_PATH, search_policy)
}

// 创建主路由
pub fn create_router<C>(state: AppState, limiter: Arc<QuotaLimiter<C>>) -> Router
where
    C: Clock + Clone + Send + Sync + 'static,
    C::Instant: Send + Sync,
{
    let router = Router::new()
        .route(API_INFO_PATH, get(routes::api_info::api_info))
        .route(HOST_SEARCH_PATH, get(routes::search::host_search))
        // route_layer 只作用于已匹配的路由，404 不计入额度
        .route_layer(axum::middleware::from_fn_with_state(
            limiter,
            enforce_quota::<C>,
        ))
        .layer(axum::middleware::from_fn(log_errors));

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = router.layer(tower_http::cors::CorsLayer::permissive());

    router.with_state(state)
}
