//! Collector API: authentication and bandwidth transport

pub mod client;
pub mod models;

pub use client::{ApiClient, Transport};
pub use models::{Account, AccountId, BandwidthReport, Session};

use thiserror::Error;

/// Every way a collector request can fail; all collapse to a message for logging
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {body}")]
    InvalidResponse { body: String },

    #[error("Not authenticated: login must succeed before reporting")]
    NotAuthenticated,
}
