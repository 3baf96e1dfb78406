//! User-plane functions of the CUPS API.

use crate::client::{AfClient, Api, Created};
use crate::errors::Result;
use crate::types::Userplane;
use http::Method;

const RESOURCE: &str = "userplane";

impl AfClient {
    pub async fn list_userplanes(&self) -> Result<Vec<Userplane>> {
        let url = self.endpoint(Api::Cups, &["userplanes"])?;
        self.get_list(RESOURCE, url, Some("userplanes")).await
    }

    pub async fn get_userplane(&self, id: &str) -> Result<Userplane> {
        let url = self.endpoint(Api::Cups, &["userplanes", id])?;
        self.get_json(RESOURCE, url).await
    }

    pub async fn create_userplane(&self, userplane: &Userplane) -> Result<Created> {
        let url = self.endpoint(Api::Cups, &["userplanes"])?;
        let created = self.create(RESOURCE, url, userplane).await?;
        tracing::info!(id = ?created.id(), "Created userplane");
        Ok(created)
    }

    pub async fn patch_userplane(&self, id: &str, userplane: &Userplane) -> Result<()> {
        let url = self.endpoint(Api::Cups, &["userplanes", id])?;
        self.modify(RESOURCE, Method::PATCH, url, userplane).await
    }

    pub async fn delete_userplane(&self, id: &str) -> Result<()> {
        let url = self.endpoint(Api::Cups, &["userplanes", id])?;
        self.delete(RESOURCE, url).await
    }
}
