use std::sync::Mutex;

use async_trait::async_trait;

use super::ChatCompletion;
use super::error::{RewriteError, RewriteResult};

/// Chat backend returning a fixed reply and recording prompts.
#[derive(Default)]
pub struct MockChatCompletion {
    reply: String,
    fail: bool,
    prompts: Mutex<Vec<String>>,
}

impl MockChatCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatCompletion for MockChatCompletion {
    async fn complete(&self, _api_key: &str, prompt: &str) -> RewriteResult<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if self.fail {
            return Err(RewriteError::Status {
                status: 401,
                body: "No auth credentials found".to_string(),
            });
        }

        if self.reply.trim().is_empty() {
            return Err(RewriteError::EmptyReply);
        }

        Ok(self.reply.clone())
    }
}
