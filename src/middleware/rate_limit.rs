use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use governor::{
    Quota, RateLimiter,
    clock::{Clock, DefaultClock},
    middleware::NoOpMiddleware,
    state::keyed::DefaultKeyedStateStore,
};
use crate::error::AppError;
use crate::routes::first_query_value;

/// 请求没有带 key 时使用的令牌
pub const DEFAULT_KEY: &str = "default";

const ONE: NonZeroU32 = NonZeroU32::MIN;
const TWO: NonZeroU32 = NonZeroU32::new(2).unwrap();

/// 计数按 (路由, key) 隔离
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuotaKey {
    pub route: String,
    pub key: String,
}

/// 单个路由的限流策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePolicy {
    /// 全局默认：1/秒 且 2/分钟
    Default,
    /// 路由级覆盖：仅 1/秒
    PerSecond,
    /// 不限流
    Unlimited,
}

type KeyedLimiter<C> = RateLimiter<
    QuotaKey,
    DefaultKeyedStateStore<QuotaKey>,
    C,
    NoOpMiddleware<<C as Clock>::Instant>,
>;

/// 内存中的额度限制器，时钟可注入
pub struct QuotaLimiter<C: Clock = DefaultClock> {
    per_second: KeyedLimiter<C>,
    per_minute: KeyedLimiter<C>,
    routes: HashMap<String, RoutePolicy>,
}

impl QuotaLimiter<DefaultClock> {
    pub fn new() -> Self {
        Self::with_clock(DefaultClock::default())
    }
}

impl Default for QuotaLimiter<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Clone> QuotaLimiter<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            per_second: RateLimiter::new(
                Quota::per_second(ONE),
                DefaultKeyedStateStore::<QuotaKey>::default(),
                clock.clone(),
            ),
            per_minute: RateLimiter::new(
                Quota::per_minute(TWO),
                DefaultKeyedStateStore::<QuotaKey>::default(),
                clock,
            ),
            routes: HashMap::new(),
        }
    }

    /// 为某个路由设置策略，未设置的路由使用全局默认
    pub fn with_route_policy(mut self, route: impl Into<String>, policy: RoutePolicy) -> Self {
        self.routes.insert(route.into(), policy);
        self
    }

    pub fn policy_for(&self, route: &str) -> RoutePolicy {
        self.routes
            .get(route)
            .copied()
            .unwrap_or(RoutePolicy::Default)
    }

    /// 检查并记一次请求，返回是否放行
    pub fn check_and_increment(&self, key: &str, route: &str) -> bool {
        let quota_key = QuotaKey {
            route: route.to_string(),
            key: key.to_string(),
        };

        match self.policy_for(route) {
            RoutePolicy::Unlimited => true,
            RoutePolicy::PerSecond => self.per_second.check_key(&quota_key).is_ok(),
            RoutePolicy::Default => {
                self.per_second.check_key(&quota_key).is_ok()
                    && self.per_minute.check_key(&quota_key).is_ok()
            }
        }
    }

    /// 丢弃已经恢复满额的计数记录
    pub fn retain_recent(&self) {
        self.per_second.retain_recent();
        self.per_minute.retain_recent();
    }

    pub fn tracked_keys(&self) -> usize {
        self.per_second.len().max(self.per_minute.len())
    }
}

pub async fn enforce_quota<C>(
    State(limiter): State<Arc<QuotaLimiter<C>>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError>
where
    C: Clock + Clone + Send + Sync + 'static,
    C::Instant: Send + Sync,
{
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let key = first_query_value(req.uri(), "key").unwrap_or_else(|| DEFAULT_KEY.to_string());

    if !limiter.check_and_increment(&key, &route) {
        tracing::warn!("Quota exceeded - route: {}, key: {}", route, key);
        return Err(AppError::QuotaExceeded);
    }

    Ok(next.run(req).await)
}
