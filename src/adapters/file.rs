use crate::domain::model::{parse_waitlist, WaitlistEntry};
use crate::domain::ports::DataSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileDataSource {
    path: PathBuf,
}

impl FileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileDataSource {
    async fn load_waitlist_entries(&self) -> Result<Vec<WaitlistEntry>> {
        tracing::debug!("Reading waitlist file: {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;
        parse_waitlist(&data)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
