//! Form constraints checked on the UI form before it is submitted.
//!
//! These mirror the limits of the PFD form schema: every application needs a
//! non-empty `externalAppID` and between [`MIN_PFDS`] and [`MAX_PFDS`] PFDs,
//! each with a non-empty `pfdID`. `allowedDelay` and `cachingTime` live in the
//! pass-through fields and are checked to be numbers here; every other typed
//! field is enforced by decoding.

use crate::errors::ValidationError;
use crate::model::{AppUi, PfdTransactionUi};
use serde_json::Value as JsonValue;

pub const MIN_PFDS: usize = 1;
pub const MAX_PFDS: usize = 10;

/// Application fields the form declares as numbers. `null` counts as unset.
const NUMBER_FIELDS: [&str; 2] = ["allowedDelay", "cachingTime"];

impl PfdTransactionUi {
    /// Returns the first constraint violation, if any.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (position, entry) in self.pfd_datas.iter().enumerate() {
            validate_app(&entry.apps, position)?;
        }
        Ok(())
    }
}

impl AppUi {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_app(self, 0)
    }
}

fn validate_app(app: &AppUi, position: usize) -> Result<(), ValidationError> {
    if app.external_app_id.trim().is_empty() {
        return Err(ValidationError::EmptyExternalAppId(position));
    }

    for field in NUMBER_FIELDS {
        match app.extra_fields.get(field) {
            None | Some(JsonValue::Null) | Some(JsonValue::Number(_)) => {}
            Some(_) => {
                return Err(ValidationError::NotANumber {
                    app_id: app.external_app_id.clone(),
                    field,
                });
            }
        }
    }

    let count = app.pfds.len();
    if count < MIN_PFDS {
        return Err(ValidationError::NoPfds(app.external_app_id.clone()));
    }
    if count > MAX_PFDS {
        return Err(ValidationError::TooManyPfds {
            app_id: app.external_app_id.clone(),
            count,
            max: MAX_PFDS,
        });
    }

    for (position, entry) in app.pfds.iter().enumerate() {
        if entry.pfd.pfd_id.trim().is_empty() {
            return Err(ValidationError::EmptyPfdId {
                app_id: app.external_app_id.clone(),
                position,
            });
        }
    }

    Ok(())
}
