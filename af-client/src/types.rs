//! Resource documents other than PFD transactions.
//!
//! Only the fields the console needs to address a resource are typed; every
//! other field is kept in `extra_fields` and sent back unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Where an AF service is anchored in the network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationService {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnai: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tac: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pri_dns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sec_dns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upf_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snssai: Option<String>,
    #[serde(flatten)]
    pub extra_fields: IndexMap<String, JsonValue>,
}

/// AF service registered through the 5G OAM API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub af_service_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_service: Option<LocationService>,
    #[serde(flatten)]
    pub extra_fields: IndexMap<String, JsonValue>,
}

/// Traffic influence subscription of the AF API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub af_service_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub af_app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub af_trans_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snssai: Option<JsonValue>,
    /// Link to the subscription resource, assigned by the AF.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(flatten)]
    pub extra_fields: IndexMap<String, JsonValue>,
}

impl Subscription {
    /// Subscription ID: the last segment of the `self` link.
    pub fn id(&self) -> Option<&str> {
        self.self_link
            .as_deref()
            .map(|link| link.trim_end_matches('/'))
            .and_then(|link| link.rsplit('/').next())
            .filter(|id| !id.is_empty())
    }
}

/// User-plane function instance managed through the CUPS API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Userplane {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// `SGWU`, `PGWU` or `SAEGWU`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectors: Option<Vec<JsonValue>>,
    #[serde(flatten)]
    pub extra_fields: IndexMap<String, JsonValue>,
}
