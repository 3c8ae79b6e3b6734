use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Typed view of the merged report configuration. Every field has a
/// default so an empty config is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Resort whose orders/tickets the report covers. Empty means no
    /// resort filter.
    pub resort_id: String,
    pub channels: ChannelSettings,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            resort_id: String::new(),
            channels: ChannelSettings::default(),
        }
    }
}

/// Channel-name sets for the online/kiosk split of the channel statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
    pub online: Vec<String>,
    pub kiosk: Vec<String>,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            online: vec![
                "online".to_string(),
                "click-and-collect".to_string(),
                "click_and_collect".to_string(),
            ],
            kiosk: vec!["kiosk".to_string()],
        }
    }
}

pub(crate) fn from_value(v: &Value) -> Result<ReportSettings> {
    serde_json::from_value(v.clone()).context("invalid report settings")
}
