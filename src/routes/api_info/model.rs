use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageLimits {
    pub scan_credits: u32,
    pub query_credits: u32,
    pub monitored_ips: u32,
}

/// 账户状态，字段顺序与真实接口一致
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiInfo {
    pub scan_credits: u32,
    pub usage_limits: UsageLimits,
    pub plan: &'static str,
    pub https: bool,
    pub unlocked: bool,
    pub query_credits: u32,
    pub monitored_ips: Option<u32>,
    pub unlocked_left: u32,
    pub telnet: bool,
}

impl ApiInfo {
    /// 虚构的 dev 套餐账户
    pub fn dev_plan() -> Self {
        Self {
            scan_credits: 100,
            usage_limits: UsageLimits {
                scan_credits: 100,
                query_credits: 100,
                monitored_ips: 16,
            },
            plan: "dev",
            https: false,
            unlocked: true,
            query_credits: 100,
            monitored_ips: None,
            unlocked_left: 100,
            telnet: false,
        }
    }
}
