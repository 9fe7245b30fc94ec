use axum::{extract::Query, http::Uri};

pub mod api_info;
pub mod search;

pub const API_INFO_PATH: &str = "/api-info";
pub const HOST_SEARCH_PATH: &str = "/shodan/host/search";

/// 取查询串中某个参数的第一个值，重复出现时忽略后面的
pub fn first_query_value(uri: &Uri, name: &str) -> Option<String> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
    pairs
        .into_iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v)
}
