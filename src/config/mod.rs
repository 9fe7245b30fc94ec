use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// 搜索接口的限流策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchRateLimit {
    /// 套用全局默认策略（1/秒 + 2/分钟），没有路由级覆盖
    #[default]
    Default,
    /// 完全不限流
    None,
}

impl FromStr for SearchRateLimit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(SearchRateLimit::Default),
            "none" | "off" => Ok(SearchRateLimit::None),
            other => Err(ConfigError::Invalid {
                var: "SEARCH_RATE_LIMIT",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub fixtures_dir: PathBuf,
    pub search_rate_limit: SearchRateLimit,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            fixtures_dir: PathBuf::from("."),
            search_rate_limit: SearchRateLimit::Default,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 从任意键值来源构建配置，未设置的项使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "SERVER_PORT",
                value: raw,
            })?,
            None => defaults.server_port,
        };

        let search_rate_limit = match lookup("SEARCH_RATE_LIMIT") {
            Some(raw) => raw.parse()?,
            None => defaults.search_rate_limit,
        };

        Ok(Config {
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            fixtures_dir: lookup("FIXTURES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.fixtures_dir),
            search_rate_limit,
        })
    }
}
