//! HTTP transport shared by the API clients

mod client;

pub use client::{HttpClient, HttpClientBuilder, RetryPolicy};
