mod handler;
mod model;

pub use handler::host_search;
pub use model::SearchQuery;
