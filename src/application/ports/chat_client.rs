use async_trait::async_trait;

#[derive(thiserror::Error, Debug)]
pub enum ChatError {
    #[error("inference API rejected the API key")]
    Unauthorized,
    #[error("inference API returned status {0}")]
    Upstream(u16),
    #[error("inference API returned no text")]
    EmptyReply,
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn ask(&self, api_key: &str, message: &str) -> Result<String, ChatError>;
}
