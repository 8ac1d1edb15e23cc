//! In-memory provider that replays canned responses.

use std::collections::VecDeque;
use std::sync::Mutex;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::time::Instant;

use super::{ProviderFailure, TextProvider};

pub(crate) enum Reply {
    Text(String),
    Fail { status: u16, message: String },
}

/// Pops one scripted reply per call; the last reply repeats once the script
/// runs dry.
pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(Instant, String)>>,
}

impl ScriptedProvider {
    pub(crate) fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self::new([Reply::Text(text.into())])
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn call_instants(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
    }

    fn next_reply(&self) -> Result<String, ProviderFailure> {
        let mut replies = self.replies.lock().unwrap();
        let reply = if replies.len() > 1 {
            replies.pop_front()
        } else {
            None
        };
        match reply.as_ref().or(replies.front()) {
            Some(Reply::Text(text)) => Ok(text.clone()),
            Some(Reply::Fail { status, message }) => Err(ProviderFailure::Status {
                status: *status,
                message: message.clone(),
            }),
            None => Err(ProviderFailure::EmptyResponse),
        }
    }
}

impl TextProvider for ScriptedProvider {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, ProviderFailure>> {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), prompt.to_string()));
        let reply = self.next_reply();
        async move { reply }.boxed()
    }
}

/// A well-formed quiz response with `correct.len()` questions.
pub(crate) fn quiz_json(correct: &[usize]) -> String {
    let questions: Vec<_> = correct
        .iter()
        .enumerate()
        .map(|(i, index)| {
            serde_json::json!({
                "id": format!("q{}", i + 1),
                "question": format!("Sample question number {}?", i + 1),
                "options": ["alpha", "beta", "gamma", "delta"],
                "correctIndex": index,
                "explanation": "Because it is.",
            })
        })
        .collect();
    serde_json::json!({ "questions": questions }).to_string()
}
