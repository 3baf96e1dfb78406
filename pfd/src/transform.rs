//! Conversion between the wire form and the UI form of PFD documents.
//!
//! The wire form keys applications by `externalAppID` and PFDs by `pfdID`; the
//! UI form lists them in order. Going from UI to wire re-keys every entry by
//! its embedded ID, so two entries with the same ID collapse into one. What
//! happens then is decided by [`DuplicateKeyPolicy`].

use crate::errors::{Result, SchemaError};
use crate::metrics_defs::{DUPLICATE_KEYS, TRANSFORMS};
use crate::model::{
    AppEntry, AppUi, AppWire, PfdEntry, PfdTransactionUi, PfdTransactionWire,
};
use indexmap::IndexMap;
use serde::Deserialize;
use shared::counter;

/// What to do when two UI entries share the same key.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// The later entry replaces the earlier one. The key keeps the position
    /// of its first occurrence.
    #[default]
    Overwrite,
    /// Fail with [`SchemaError::DuplicateApplication`] or
    /// [`SchemaError::DuplicatePfd`].
    Reject,
}

/// Converts PFD documents between their wire and UI forms.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaTransformer {
    policy: DuplicateKeyPolicy,
}

impl SchemaTransformer {
    pub fn new(policy: DuplicateKeyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DuplicateKeyPolicy {
        self.policy
    }

    /// Builds the wire form of a UI-form transaction.
    ///
    /// Scalar fields are copied as-is. Each application is keyed by its
    /// `externalAppID` and each of its PFDs by `pfdID`. With the `Overwrite`
    /// policy this never fails.
    pub fn to_wire_form(&self, ui: &PfdTransactionUi) -> Result<PfdTransactionWire> {
        let mut pfd_datas = IndexMap::with_capacity(ui.pfd_datas.len());

        for AppEntry { apps } in &ui.pfd_datas {
            let app = self.to_wire_app(apps)?;
            if let Some(previous) = pfd_datas.insert(app.external_app_id.clone(), app) {
                if !self.accept_duplicate("application", &previous.external_app_id) {
                    return Err(SchemaError::DuplicateApplication(previous.external_app_id));
                }
            }
        }

        counter!(TRANSFORMS, "direction" => "to_wire", "scope" => "transaction").increment(1);

        Ok(PfdTransactionWire {
            pfd_datas,
            extra_fields: ui.extra_fields.clone(),
        })
    }

    /// Builds the wire form of a single UI-form application.
    pub fn to_wire_app(&self, ui: &AppUi) -> Result<AppWire> {
        let mut pfds = IndexMap::with_capacity(ui.pfds.len());

        for PfdEntry { pfd } in &ui.pfds {
            if let Some(previous) = pfds.insert(pfd.pfd_id.clone(), pfd.clone()) {
                if !self.accept_duplicate("pfd", &previous.pfd_id) {
                    return Err(SchemaError::DuplicatePfd {
                        app_id: ui.external_app_id.clone(),
                        pfd_id: previous.pfd_id,
                    });
                }
            }
        }

        counter!(TRANSFORMS, "direction" => "to_wire", "scope" => "application").increment(1);

        Ok(AppWire {
            external_app_id: ui.external_app_id.clone(),
            pfds,
            extra_fields: ui.extra_fields.clone(),
        })
    }

    pub fn to_ui_form(&self, wire: &PfdTransactionWire) -> PfdTransactionUi {
        to_ui_form(wire)
    }

    pub fn to_ui_app(&self, wire: &AppWire) -> AppUi {
        to_ui_app(wire)
    }

    /// Returns whether a repeated key may replace the earlier entry.
    fn accept_duplicate(&self, kind: &'static str, key: &str) -> bool {
        counter!(DUPLICATE_KEYS, "kind" => kind).increment(1);

        match self.policy {
            DuplicateKeyPolicy::Overwrite => {
                tracing::warn!(kind, key = %key, "Duplicate key in UI form, keeping the last entry");
                true
            }
            DuplicateKeyPolicy::Reject => {
                tracing::debug!(kind, key = %key, "Duplicate key in UI form rejected");
                false
            }
        }
    }
}

/// Builds the UI form of a wire-form transaction.
///
/// Applications and PFDs are listed in the iteration order of their maps,
/// which is the order they appeared in the decoded document.
pub fn to_ui_form(wire: &PfdTransactionWire) -> PfdTransactionUi {
    let pfd_datas = wire
        .pfd_datas
        .iter()
        .map(|(key, app)| {
            if *key != app.external_app_id {
                tracing::warn!(
                    key = %key,
                    external_app_id = %app.external_app_id,
                    "Application key does not match its externalAppID"
                );
            }
            AppEntry {
                apps: to_ui_app(app),
            }
        })
        .collect();

    counter!(TRANSFORMS, "direction" => "to_ui", "scope" => "transaction").increment(1);

    PfdTransactionUi {
        pfd_datas,
        extra_fields: wire.extra_fields.clone(),
    }
}

/// Builds the UI form of a single wire-form application.
pub fn to_ui_app(wire: &AppWire) -> AppUi {
    let pfds = wire
        .pfds
        .iter()
        .map(|(key, pfd)| {
            if *key != pfd.pfd_id {
                tracing::warn!(
                    external_app_id = %wire.external_app_id,
                    key = %key,
                    pfd_id = %pfd.pfd_id,
                    "PFD key does not match its pfdID"
                );
            }
            PfdEntry { pfd: pfd.clone() }
        })
        .collect();

    counter!(TRANSFORMS, "direction" => "to_ui", "scope" => "application").increment(1);

    AppUi {
        external_app_id: wire.external_app_id.clone(),
        pfds,
        extra_fields: wire.extra_fields.clone(),
    }
}

impl From<&PfdTransactionWire> for PfdTransactionUi {
    fn from(wire: &PfdTransactionWire) -> Self {
        to_ui_form(wire)
    }
}

impl From<&AppWire> for AppUi {
    fn from(wire: &AppWire) -> Self {
        to_ui_app(wire)
    }
}
