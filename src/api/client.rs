use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use super::error::FetchError;
use super::types::ExamResponse;

const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Anything that can answer an exam listing query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExamSource: Send + Sync {
    async fn fetch_exams(&self, url: &Url) -> Result<ExamResponse, FetchError>;
}

/// HTTP client for the UKE exam listing API.
pub struct UkeClient {
    client: Client,
}

impl UkeClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ExamSource for UkeClient {
    async fn fetch_exams(&self, url: &Url) -> Result<ExamResponse, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
