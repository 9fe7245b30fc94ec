mod handler;
mod model;

pub use handler::api_info;
pub use model::{ApiInfo, UsageLimits};
