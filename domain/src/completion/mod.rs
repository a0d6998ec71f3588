//! Completion exchange types shared by every provider binding.
//!
//! - [`message::Message`] - one conversational turn
//! - [`request::CompletionRequest`] - what is sent to a provider
//! - [`response::CompletionResponse`] - what comes back, with usage and latency

pub mod message;
pub mod request;
pub mod response;
