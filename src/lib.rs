//! Blackout poetry: redact an article down to a few seeded, verse-like lines.

pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod models;
pub mod render;
pub mod session;
pub mod source;
pub mod utils;

pub use error::BlackoutError;
pub use generator::PoemGenerator;
pub use models::{Candidate, Mode, Outcome, Selection, Settings, Token, TokenKind, Window};
pub use session::{Session, SyncResult};
pub use source::Article;
