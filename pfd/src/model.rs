//! Data model for PFD transaction documents.
//!
//! The same logical transaction has two JSON shapes. The wire form is what the
//! AF API exchanges and indexes applications and PFDs by their natural keys:
//!
//! ```json
//! {
//!   "afServiceId": "s1",
//!   "pfdDatas": {
//!     "app1": {
//!       "externalAppID": "app1",
//!       "allowedDelay": 5,
//!       "pfds": {
//!         "pfd1": { "pfdID": "pfd1", "flowDescriptions": ["a"], "urls": [], "domainNames": [] }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! The UI form is what the schema-driven form renderer binds to. It can only
//! repeat field groups over arrays, so both maps become arrays of single-key
//! wrapper records:
//!
//! ```json
//! {
//!   "afServiceId": "s1",
//!   "pfdDatas": [
//!     { "apps": { "externalAppID": "app1", "allowedDelay": 5,
//!                 "pfds": [ { "pfd": { "pfdID": "pfd1", "flowDescriptions": ["a"], "urls": [], "domainNames": [] } } ] } }
//!   ]
//! }
//! ```
//!
//! Fields the model does not name are kept in `extra_fields` and passed
//! through untouched in both directions.

use crate::errors::{Result, SchemaError};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub type ExternalAppId = String;
pub type PfdId = String;

/// A single packet flow description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pfd {
    #[serde(rename = "pfdID")]
    pub pfd_id: PfdId,

    /// `None` when absent, `Some(None)` when explicitly `null`.
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub flow_descriptions: Option<Option<Vec<String>>>,

    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub urls: Option<Option<Vec<String>>>,

    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub domain_names: Option<Option<Vec<String>>>,

    /// Any other PFD attributes, passed through as-is.
    #[serde(flatten)]
    pub extra_fields: IndexMap<String, JsonValue>,
}

impl Pfd {
    pub fn new(pfd_id: impl Into<PfdId>) -> Self {
        Self {
            pfd_id: pfd_id.into(),
            flow_descriptions: None,
            urls: None,
            domain_names: None,
            extra_fields: IndexMap::new(),
        }
    }

    pub fn flow_descriptions(&self) -> Option<&[String]> {
        self.flow_descriptions.as_ref().and_then(|v| v.as_deref())
    }

    pub fn urls(&self) -> Option<&[String]> {
        self.urls.as_ref().and_then(|v| v.as_deref())
    }

    pub fn domain_names(&self) -> Option<&[String]> {
        self.domain_names.as_ref().and_then(|v| v.as_deref())
    }
}

/// Application entry of a wire-form transaction, PFDs keyed by `pfdID`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppWire {
    #[serde(rename = "externalAppID")]
    pub external_app_id: ExternalAppId,

    pub pfds: IndexMap<PfdId, Pfd>,

    /// `allowedDelay`, `cachingTime`, `self` and any other scalar fields.
    #[serde(flatten)]
    pub extra_fields: IndexMap<String, JsonValue>,
}

/// Wire-form PFD transaction, applications keyed by `externalAppID`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PfdTransactionWire {
    #[serde(rename = "pfdDatas")]
    pub pfd_datas: IndexMap<ExternalAppId, AppWire>,

    #[serde(flatten)]
    pub extra_fields: IndexMap<String, JsonValue>,
}

/// Wrapper record for one PFD inside [`AppUi::pfds`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PfdEntry {
    pub pfd: Pfd,
}

/// Application entry of a UI-form transaction, PFDs as an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppUi {
    #[serde(rename = "externalAppID")]
    pub external_app_id: ExternalAppId,

    pub pfds: Vec<PfdEntry>,

    #[serde(flatten)]
    pub extra_fields: IndexMap<String, JsonValue>,
}

/// Wrapper record for one application inside [`PfdTransactionUi::pfd_datas`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppEntry {
    pub apps: AppUi,
}

/// UI-form PFD transaction, applications as an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PfdTransactionUi {
    #[serde(rename = "pfdDatas")]
    pub pfd_datas: Vec<AppEntry>,

    #[serde(flatten)]
    pub extra_fields: IndexMap<String, JsonValue>,
}

impl AppWire {
    /// `allowedDelay` in seconds, when present and integral.
    pub fn allowed_delay(&self) -> Option<u64> {
        self.extra_fields.get("allowedDelay").and_then(JsonValue::as_u64)
    }

    /// `cachingTime` in seconds, when present and integral.
    pub fn caching_time(&self) -> Option<u64> {
        self.extra_fields.get("cachingTime").and_then(JsonValue::as_u64)
    }
}

/// A top-level PFD document: a transaction or a single application, in
/// either form.
///
/// Decoding failures name the offending field and are reported as
/// [`SchemaError::MalformedTransaction`] or
/// [`SchemaError::MalformedApplication`] depending on the document kind.
pub trait Document: Serialize + DeserializeOwned {
    fn malformed(reason: String) -> SchemaError;

    fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Self::malformed(e.to_string()))
    }

    fn from_value(value: JsonValue) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Self::malformed(e.to_string()))
    }

    fn to_value(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Document for PfdTransactionWire {
    fn malformed(reason: String) -> SchemaError {
        SchemaError::MalformedTransaction(reason)
    }
}

impl Document for PfdTransactionUi {
    fn malformed(reason: String) -> SchemaError {
        SchemaError::MalformedTransaction(reason)
    }
}

impl Document for AppWire {
    fn malformed(reason: String) -> SchemaError {
        SchemaError::MalformedApplication(reason)
    }
}

impl Document for AppUi {
    fn malformed(reason: String) -> SchemaError {
        SchemaError::MalformedApplication(reason)
    }
}
