use crate::domain::model::{parse_waitlist, WaitlistEntry};
use crate::domain::ports::DataSource;
use crate::utils::error::{Result, WaitlistError};
use async_trait::async_trait;
use reqwest::Client;

pub struct HttpDataSource {
    url: String,
    client: Client,
}

impl HttpDataSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }

    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn load_waitlist_entries(&self) -> Result<Vec<WaitlistEntry>> {
        tracing::debug!("Making HTTP request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("HTTP response status: {}", response.status());

        if !response.status().is_success() {
            return Err(WaitlistError::HttpStatusError {
                status: response.status().as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.bytes().await?;
        parse_waitlist(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
