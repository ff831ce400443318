use serde::{Deserialize, Serialize};
use std::fmt;

use crate::collectors::bandwidth::Delta;

/// Body of `POST /api/bandwidth`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandwidthReport {
    pub bytes_up: u64,
    pub bytes_down: u64,
}

impl From<Delta> for BandwidthReport {
    fn from(delta: Delta) -> Self {
        Self {
            bytes_up: delta.bytes_out,
            bytes_down: delta.bytes_in,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
    pub user: Account,
}

/// Collector accounts may be keyed by number or by string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AccountId {
    Number(u64),
    Text(String),
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountId::Number(id) => write!(f, "{id}"),
            AccountId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub email: String,
    #[serde(default)]
    pub id: Option<AccountId>,
}

/// Credential and identity obtained from a successful login
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub account: Account,
}
