use serde::{Deserialize, Serialize};

use crate::models::EngagementCounters;

// -- Stats --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub views: u64,
    pub likes: u64,
    pub liked: bool,
}

impl StatsResponse {
    pub fn new(counters: EngagementCounters, liked: bool) -> Self {
        Self {
            views: counters.view_count,
            likes: counters.like_count,
            liked,
        }
    }
}

// -- Contact --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub sent: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactStatusResponse {
    pub configured: bool,
}

// -- Admin --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SaveCredentialsRequest {
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsQuery {
    #[serde(default)]
    pub reveal: bool,
}

/// Credentials as shown in the admin dialog; masked unless revealed.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsResponse {
    pub configured: bool,
    pub revealed: bool,
    pub public_key: String,
    pub service_id: String,
    pub template_id: String,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: String,
    pub message: String,
}
