pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod presenter;
pub mod request;
pub mod session;
pub mod view;

pub use client::SearchClient;
pub use error::SearchError;
pub use session::{SearchOutcome, SearchPhase, SessionState};
