//! Integration tests for the Wingman capture queues and analysis pipeline

mod capture_fallback;
mod capture_queue;
mod config_integration;
mod follow_up;
mod pipeline_flows;
mod test_utils;
