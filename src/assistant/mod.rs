//! Chat answering: agent backend, keyword fallback and currency localization

pub mod backend;
mod error;
pub mod fallback;
pub mod localize;
pub mod router;
pub mod transcript;

pub use backend::{AgentBackend, HttpAgentBackend};
pub use error::BackendError;
pub use fallback::KeywordTable;
pub use localize::CurrencyLocalizer;
pub use router::{Reply, ReplySource, ResponseRouter};
pub use transcript::{Sender, Transcript, TranscriptEntry};
