//! PFD management transactions of the AF API.
//!
//! The API speaks the wire form only. The `*_form` workflows run the schema
//! transformer at the boundary so that callers editing a transaction in the
//! form renderer never see the keyed maps.

use crate::client::{AfClient, Api, Created};
use crate::errors::Result;
use http::Method;
use pfd::{AppUi, AppWire, Document, PfdTransactionUi, PfdTransactionWire, SchemaTransformer};

const TRANSACTION: &str = "pfd transaction";
const APPLICATION: &str = "pfd application";

impl AfClient {
    pub async fn list_transactions(&self) -> Result<Vec<PfdTransactionWire>> {
        let url = self.endpoint(Api::Af, &["pfd", "transactions"])?;
        self.get_list(TRANSACTION, url, None).await
    }

    pub async fn get_transaction(&self, tid: &str) -> Result<PfdTransactionWire> {
        let url = self.endpoint(Api::Af, &["pfd", "transactions", tid])?;
        let body = self.get(TRANSACTION, url).await?.bytes().await?;
        Ok(PfdTransactionWire::from_slice(&body)?)
    }

    /// Creates a transaction. The new transaction ID is the last segment of
    /// the returned `Location`.
    pub async fn create_transaction(&self, transaction: &PfdTransactionWire) -> Result<Created> {
        let url = self.endpoint(Api::Af, &["pfd", "transactions"])?;
        let created = self.create(TRANSACTION, url, transaction).await?;
        tracing::info!(
            tid = ?created.id(),
            applications = transaction.pfd_datas.len(),
            "Created PFD transaction"
        );
        Ok(created)
    }

    /// Replaces a transaction.
    pub async fn update_transaction(&self, tid: &str, transaction: &PfdTransactionWire) -> Result<()> {
        let url = self.endpoint(Api::Af, &["pfd", "transactions", tid])?;
        self.modify(TRANSACTION, Method::PUT, url, transaction).await
    }

    pub async fn delete_transaction(&self, tid: &str) -> Result<()> {
        let url = self.endpoint(Api::Af, &["pfd", "transactions", tid])?;
        self.delete(TRANSACTION, url).await
    }

    pub async fn get_application(&self, tid: &str, app_id: &str) -> Result<AppWire> {
        let url = self.application_url(tid, app_id)?;
        let body = self.get(APPLICATION, url).await?.bytes().await?;
        Ok(AppWire::from_slice(&body)?)
    }

    /// Replaces one application of a transaction.
    pub async fn update_application(&self, tid: &str, app_id: &str, app: &AppWire) -> Result<()> {
        let url = self.application_url(tid, app_id)?;
        self.modify(APPLICATION, Method::PUT, url, app).await
    }

    pub async fn delete_application(&self, tid: &str, app_id: &str) -> Result<()> {
        let url = self.application_url(tid, app_id)?;
        self.delete(APPLICATION, url).await
    }

    /// Fetches a transaction and returns it in the UI form.
    pub async fn fetch_transaction_form(&self, tid: &str) -> Result<PfdTransactionUi> {
        let wire = self.get_transaction(tid).await?;
        Ok(pfd::to_ui_form(&wire))
    }

    /// Validates a UI-form transaction, converts it and submits it.
    ///
    /// Without `tid` the transaction is created and the `Created` outcome is
    /// returned; with `tid` the existing transaction is replaced.
    pub async fn submit_transaction_form(
        &self,
        transformer: &SchemaTransformer,
        tid: Option<&str>,
        form: &PfdTransactionUi,
    ) -> Result<Option<Created>> {
        form.validate()?;
        let wire = transformer.to_wire_form(form)?;

        match tid {
            None => self.create_transaction(&wire).await.map(Some),
            Some(tid) => {
                self.update_transaction(tid, &wire).await?;
                Ok(None)
            }
        }
    }

    /// Fetches one application and returns it in the UI form.
    pub async fn fetch_application_form(&self, tid: &str, app_id: &str) -> Result<AppUi> {
        let wire = self.get_application(tid, app_id).await?;
        Ok(pfd::to_ui_app(&wire))
    }

    /// Validates a UI-form application, converts it and submits it.
    pub async fn submit_application_form(
        &self,
        transformer: &SchemaTransformer,
        tid: &str,
        app_id: &str,
        form: &AppUi,
    ) -> Result<()> {
        form.validate()?;
        let wire = transformer.to_wire_app(form)?;
        if wire.external_app_id != app_id {
            tracing::warn!(
                app_id,
                external_app_id = %wire.external_app_id,
                "Submitting application under a different ID than its externalAppID"
            );
        }
        self.update_application(tid, app_id, &wire).await
    }

    fn application_url(&self, tid: &str, app_id: &str) -> Result<url::Url> {
        self.endpoint(Api::Af, &["pfd", "transactions", tid, "applications", app_id])
    }
}
