//! PFD transaction schema handling
//!
//! The AF API and the schema-driven form renderer disagree on the shape of a
//! packet flow description (PFD) transaction. The API indexes applications by
//! external application ID and PFDs by PFD ID:
//!
//! ```json
//! { "pfdDatas": { "app1": { "externalAppID": "app1", "pfds": { "pfd1": { "pfdID": "pfd1" } } } } }
//! ```
//!
//! The renderer can only generate repeatable field groups from arrays, so the
//! form binds to:
//!
//! ```json
//! { "pfdDatas": [ { "apps": { "externalAppID": "app1", "pfds": [ { "pfd": { "pfdID": "pfd1" } } ] } } ] }
//! ```
//!
//! This crate is the only place where both shapes exist:
//!
//! - [`model`]: typed wire-form and UI-form documents. Unknown fields pass
//!   through untouched.
//! - [`transform`]: the conversions, for whole transactions and for single
//!   applications, with an explicit [`DuplicateKeyPolicy`].
//! - [`validate`]: the form constraints, checked before a submit.
//! - [`edit`]: copy-then-replace field edits addressed by form keys.
//!
//! # Example
//!
//! ```
//! use pfd::{Document, PfdTransactionWire, SchemaTransformer, to_ui_form};
//!
//! let wire = PfdTransactionWire::from_slice(br#"{
//!     "afServiceId": "s1",
//!     "pfdDatas": {"app1": {"externalAppID": "app1", "pfds": {"pfd1": {"pfdID": "pfd1"}}}}
//! }"#).unwrap();
//!
//! let ui = to_ui_form(&wire);
//! assert_eq!(ui.pfd_datas[0].apps.pfds[0].pfd.pfd_id, "pfd1");
//!
//! let back = SchemaTransformer::default().to_wire_form(&ui).unwrap();
//! assert_eq!(back, wire);
//! ```

pub mod edit;
pub mod errors;
pub mod metrics_defs;
pub mod model;
pub mod transform;
pub mod validate;

pub use edit::{FieldAssignment, FieldPath, with_field, with_fields};
pub use errors::{Result, SchemaError, ValidationError};
pub use model::{
    AppEntry, AppUi, AppWire, Document, ExternalAppId, Pfd, PfdEntry, PfdId, PfdTransactionUi,
    PfdTransactionWire,
};
pub use transform::{DuplicateKeyPolicy, SchemaTransformer, to_ui_app, to_ui_form};
