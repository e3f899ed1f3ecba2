//! Wingman: screenshot-driven multimodal assistant core
//!
//! Captures screenshots into two bounded queues, sends them with composed prompts to a
//! remote multimodal model, and threads the structured replies through a problem →
//! solution → debug → follow-up conversation.

pub mod api;
pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod testing;
pub mod types;

pub use api::WingmanApi;
pub use error::WingmanError;
