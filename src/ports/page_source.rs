//! Page source port - fetching settled listing HTML.

use async_trait::async_trait;
use thiserror::Error;

/// Errors a page source can surface.
///
/// The monitoring loop treats every variant as transient once past startup;
/// at startup any fetch error is fatal.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("page never settled after {attempts} attempts")]
    NotSettled { attempts: u32 },

    #[error("unexpected status code: {0}")]
    Status(u16),
}

/// Fetches the raw HTML of the token listing page.
///
/// Implementations are expected to block until the content is "settled" -
/// asynchronous page elements finished loading - applying their own bounded
/// internal retry, and to return an error rather than unsettled markup.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_settled(&self) -> Result<String, SourceError>;
}
