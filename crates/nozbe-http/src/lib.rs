//! nozbe-http - HTTP client for the Nozbe API.

mod client;
mod http;

pub use client::NozbeClient;
