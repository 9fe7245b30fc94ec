// 固定响应数据
// 搜索接口的返回内容来自磁盘上的 JSON 文件，按页码分桶查找

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// 有固定数据的最后一页，超出的页码统一返回结束页
pub const LAST_PAGE: i64 = 3;

/// 页码分桶
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageBucket {
    First,
    Second,
    Third,
    End,
}

impl PageBucket {
    pub const ALL: [PageBucket; 4] = [
        PageBucket::First,
        PageBucket::Second,
        PageBucket::Third,
        PageBucket::End,
    ];

    /// 任意整数页码都落入一个桶：小于 1 的按第 1 页处理
    pub fn from_page(page: i64) -> Self {
        match page {
            i64::MIN..=1 => PageBucket::First,
            2 => PageBucket::Second,
            LAST_PAGE => PageBucket::Third,
            _ => PageBucket::End,
        }
    }
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("fixture {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FixtureError {
    pub fn path(&self) -> &Path {
        match self {
            FixtureError::Io { path, .. } | FixtureError::Json { path, .. } => path,
        }
    }
}

/// 只读的 页码桶 -> JSON 文档 查找
#[async_trait]
pub trait FixtureStore: Send + Sync {
    async fn load(&self, bucket: PageBucket) -> Result<Value, FixtureError>;
}

/// 每次请求都从目录里重新读取文件，不做缓存
#[derive(Debug, Clone)]
pub struct DirectoryFixtures {
    root: PathBuf,
}

impl DirectoryFixtures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, bucket: PageBucket) -> PathBuf {
        let file_name = match bucket {
            PageBucket::First => "response1.json",
            PageBucket::Second => "response2.json",
            PageBucket::Third => "response3.json",
            PageBucket::End => "response_end.json",
        };
        self.root.join(file_name)
    }

    /// 返回目录中缺失的固定数据文件
    pub fn missing(&self) -> Vec<PathBuf> {
        PageBucket::ALL
            .iter()
            .map(|bucket| self.path_for(*bucket))
            .filter(|path| !path.is_file())
            .collect()
    }
}

#[async_trait]
impl FixtureStore for DirectoryFixtures {
    async fn load(&self, bucket: PageBucket) -> Result<Value, FixtureError> {
        let path = self.path_for(bucket);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| FixtureError::Io {
                path: path.clone(),
                source,
            })?;
        let value = serde_json::from_slice(&bytes)
            .map_err(|source| FixtureError::Json { path: path.clone(), source })?;
        tracing::debug!("Served fixture {}", path.display());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_map_to_buckets() {
        assert_eq!(PageBucket::from_page(1), PageBucket::First);
        assert_eq!(PageBucket::from_page(2), PageBucket::Second);
        assert_eq!(PageBucket::from_page(3), PageBucket::Third);
        assert_eq!(PageBucket::from_page(4), PageBucket::End);
        assert_eq!(PageBucket::from_page(100), PageBucket::End);
        assert_eq!(PageBucket::from_page(i64::MAX), PageBucket::End);
    }

    #[test]
    fn non_positive_pages_clamp_to_first() {
        assert_eq!(PageBucket::from_page(0), PageBucket::First);
        assert_eq!(PageBucket::from_page(-7), PageBucket::First);
        assert_eq!(PageBucket::from_page(i64::MIN), PageBucket::First);
    }

    #[test]
    fn file_names_follow_buckets() {
        let store = DirectoryFixtures::new("/data");
        assert_eq!(
            store.path_for(PageBucket::Second),
            PathBuf::from("/data/response2.json")
        );
        assert_eq!(
            store.path_for(PageBucket::End),
            PathBuf::from("/data/response_end.json")
        );
    }

    #[tokio::test]
    async fn reads_file_fresh_each_time() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryFixtures::new(dir.path());
        let path = store.path_for(PageBucket::First);

        std::fs::write(&path, r#"{"total": 1}"#).unwrap();
        assert_eq!(store.load(PageBucket::First).await.unwrap()["total"], 1);

        std::fs::write(&path, r#"{"total": 2}"#).unwrap();
        assert_eq!(store.load(PageBucket::First).await.unwrap()["total"], 2);
    }

    #[tokio::test]
    async fn reports_missing_and_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryFixtures::new(dir.path());
        assert_eq!(store.missing().len(), 4);

        let err = store.load(PageBucket::Third).await.unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
        assert_eq!(err.path(), store.path_for(PageBucket::Third));

        std::fs::write(store.path_for(PageBucket::End), "{not json").unwrap();
        let err = store.load(PageBucket::End).await.unwrap_err();
        assert!(matches!(err, FixtureError::Json { .. }));
        assert_eq!(store.missing().len(), 3);
    }
}
