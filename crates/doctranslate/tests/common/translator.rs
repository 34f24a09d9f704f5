#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use doctranslate::error::TranslateError;
use doctranslate::{JobStore, Translator};

/// Translator double with per-input behavior keyed by substring.
pub struct RecordingTranslator {
    calls: Mutex<Vec<String>>,
    reply: Option<String>,
    fail_when: Vec<String>,
    delays: Vec<(String, Duration)>,
    clear_on_call: Option<Arc<JobStore>>,
}

impl RecordingTranslator {
    /// Replies `"[ja] {input}"`.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: None,
            fail_when: Vec::new(),
            delays: Vec::new(),
            clear_on_call: None,
        }
    }

    /// Replies `reply` to every input (may be empty).
    pub fn replying(mut self, reply: &str) -> Self {
        self.reply = Some(reply.to_string());
        self
    }

    /// Fails inputs containing `needle`.
    pub fn failing_when(mut self, needle: &str) -> Self {
        self.fail_when.push(needle.to_string());
        self
    }

    /// Sleeps before answering inputs containing `needle`.
    pub fn delaying(mut self, needle: &str, delay: Duration) -> Self {
        self.delays.push((needle.to_string(), delay));
        self
    }

    /// Clears `store` when the first call arrives.
    pub fn clearing(mut self, store: Arc<JobStore>) -> Self {
        self.clear_on_call = Some(store);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Translator for RecordingTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let first_call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(text.to_string());
            calls.len() == 1
        };

        if first_call {
            if let Some(store) = &self.clear_on_call {
                store.clear();
            }
        }

        for (needle, delay) in &self.delays {
            if text.contains(needle.as_str()) {
                tokio::time::sleep(*delay).await;
            }
        }

        if self.fail_when.iter().any(|n| text.contains(n.as_str())) {
            return Err(TranslateError::Status {
                status: 400,
                body: "API key not valid".to_string(),
            });
        }

        Ok(match &self.reply {
            Some(reply) => reply.clone(),
            None => format!("[ja] {}", text),
        })
    }
}
