// src/lib.rs

pub mod api;
pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod logging;
pub mod models;
pub mod profile;
pub mod render;
pub mod session;
pub mod ui;

pub use api::{GeminiClient, Generator};
pub use context::{ContextBuilder, ProfileSummary};
pub use errors::{FolioError, FolioResult};
pub use models::{ChatMessage, MessageId, Sender};
pub use profile::Profile;
pub use render::{render, Fragment, Span};
pub use session::{ConversationSession, SendOutcome, SessionState};
