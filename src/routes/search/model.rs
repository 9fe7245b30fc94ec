use std::num::IntErrorKind;

use axum::http::Uri;

use crate::error::AppError;
use crate::fixtures::PageBucket;
use crate::routes::first_query_value;

#[derive(Debug, Default)]
pub struct SearchQuery {
    pub page: Option<String>,
}

impl SearchQuery {
    /// page 重复出现时只取第一个
    pub fn from_uri(uri: &Uri) -> Self {
        Self {
            page: first_query_value(uri, "page"),
        }
    }

    /// 未提供页码时为第 1 页；超出 i64 的整数照常分桶，非整数报错
    pub fn bucket(&self) -> Result<PageBucket, AppError> {
        let Some(raw) = self.page.as_deref() else {
            return Ok(PageBucket::First);
        };

        match raw.trim().parse::<i64>() {
            Ok(page) => Ok(PageBucket::from_page(page)),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Ok(PageBucket::End),
                IntErrorKind::NegOverflow => Ok(PageBucket::First),
                _ => Err(AppError::InvalidPage(raw.to_string())),
            },
        }
    }
}
