use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-office settings. The attendance allow-list is data keyed by office,
/// never a compiled-in constant.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OfficeSettings {
    pub id: Uuid,
    pub name: String,
    /// JSON array of exact IPs or CIDR prefixes as stored in SQLite.
    pub allowed_networks: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeSettingsInput {
    pub name: String,
    pub allowed_networks: Vec<String>,
}

impl OfficeSettings {
    pub fn allowed_network_list(&self) -> Vec<String> {
        serde_json::from_str::<Vec<String>>(&self.allowed_networks).unwrap_or_default()
    }
}
