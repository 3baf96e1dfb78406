//! Traffic influence subscriptions of the AF API.

use crate::client::{AfClient, Api, Created};
use crate::errors::Result;
use crate::types::Subscription;
use http::Method;

const RESOURCE: &str = "subscription";

impl AfClient {
    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        let url = self.endpoint(Api::Af, &["subscriptions"])?;
        self.get_list(RESOURCE, url, None).await
    }

    pub async fn get_subscription(&self, id: &str) -> Result<Subscription> {
        let url = self.endpoint(Api::Af, &["subscriptions", id])?;
        self.get_json(RESOURCE, url).await
    }

    /// Creates a subscription. The new ID is the last segment of the
    /// returned `Location`.
    pub async fn create_subscription(&self, subscription: &Subscription) -> Result<Created> {
        let url = self.endpoint(Api::Af, &["subscriptions"])?;
        let created = self.create(RESOURCE, url, subscription).await?;
        tracing::info!(id = ?created.id(), "Created subscription");
        Ok(created)
    }

    /// Replaces a subscription.
    pub async fn update_subscription(&self, id: &str, subscription: &Subscription) -> Result<()> {
        let url = self.endpoint(Api::Af, &["subscriptions", id])?;
        self.modify(RESOURCE, Method::PUT, url, subscription).await
    }

    /// Updates the fields present in `subscription`.
    pub async fn patch_subscription(&self, id: &str, subscription: &Subscription) -> Result<()> {
        let url = self.endpoint(Api::Af, &["subscriptions", id])?;
        self.modify(RESOURCE, Method::PATCH, url, subscription).await
    }

    pub async fn delete_subscription(&self, id: &str) -> Result<()> {
        let url = self.endpoint(Api::Af, &["subscriptions", id])?;
        self.delete(RESOURCE, url).await
    }
}
