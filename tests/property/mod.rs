//! Property-based tests for queue bounds and reply normalization

mod normalize;
mod queue_bound;
