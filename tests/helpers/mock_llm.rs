// ABOUTME: Scripted LLM provider for route and service tests
// ABOUTME: Returns a fixed answer or error and records every request it receives

use async_trait::async_trait;
use inbox_pulse::errors::{AppError, ErrorCode};
use inbox_pulse::llm::{ChatRequest, ChatResponse, LlmProvider};
use std::sync::{Arc, Mutex};

/// LLM double answering every request the same way
#[derive(Clone)]
pub struct MockLlm {
    reply: Result<String, ErrorCode>,
    prompts: Arc<Mutex<Vec<String>>>,
    token_limits: Arc<Mutex<Vec<Option<u32>>>>,
}

impl MockLlm {
    /// Answer every request with `content`
    pub fn replying(content: &str) -> Self {
        Self {
            reply: Ok(content.to_owned()),
            prompts: Arc::new(Mutex::new(Vec::new())),
            token_limits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail every request with `code`
    pub fn failing(code: ErrorCode) -> Self {
        Self {
            reply: Err(code),
            prompts: Arc::new(Mutex::new(Vec::new())),
            token_limits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// User prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// `max_tokens` of each request received so far
    pub fn token_limits(&self) -> Vec<Option<u32>> {
        self.token_limits.lock().unwrap().clone()
    }

    /// Number of completions requested
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let user_prompt = request
            .messages
            .last()
            .map(|message| message.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(user_prompt);
        self.token_limits.lock().unwrap().push(request.max_tokens);

        match &self.reply {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "mock-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            Err(code) => Err(AppError::new(*code, "scripted failure")),
        }
    }
}
