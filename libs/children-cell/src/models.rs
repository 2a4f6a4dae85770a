// libs/children-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_gateway::GatewayError;

/// A child registered under the authenticated guardian account. Created by
/// the (external) registration flow; read-only inside the booking flow.
/// Ids are unique within one guardian's set of children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Child {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub insurance_company: Option<String>,
    #[serde(default)]
    pub insurance_number: Option<String>,
    #[serde(default)]
    pub national_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChildrenError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Failed to fetch children: {0}")]
    Fetch(#[from] GatewayError),
}
