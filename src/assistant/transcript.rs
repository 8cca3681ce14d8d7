//! In-memory chat transcript for interactive sessions

use super::router::{Reply, ReplySource};
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ReplySource>,
    pub time: DateTime<Local>,
}

/// Ordered list of turns. Lives for one session and is never sent anywhere.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: &str) {
        self.push(TranscriptEntry {
            sender: Sender::User,
            text: text.to_string(),
            source: None,
            time: Local::now(),
        })
    }

    pub fn push_reply(&mut self, reply: &Reply) {
        self.push(TranscriptEntry {
            sender: Sender::Assistant,
            text: reply.text.clone(),
            source: Some(reply.source),
            time: Local::now(),
        })
    }

    fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
