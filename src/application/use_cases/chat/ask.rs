use crate::application::forms::chat::ChatForm;
use crate::application::ports::chat_client::{ChatClient, ChatError};

pub struct AskChat<'a, C: ChatClient + ?Sized> {
    pub client: &'a C,
}

impl<'a, C: ChatClient + ?Sized> AskChat<'a, C> {
    pub async fn execute(&self, form: &ChatForm) -> Result<String, ChatError> {
        let reply = self.client.ask(&form.api_key, &form.message).await?;
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(ChatError::EmptyReply);
        }
        Ok(reply.to_string())
    }
}
