// Component endpoints
//
// All component paths are page-scoped: `pages/{page}/components[/{id}]`.

use tracing::debug;

use crate::client::StatuspageClient;
use crate::error::Error;
use crate::models::{Component, ComponentEnvelope, ComponentRequest};

const COMPONENTS: &str = "components";

impl StatuspageClient {
    /// `GET pages/{page}/components/{id}`
    pub async fn get_component(&self, page: &str, id: &str) -> Result<Component, Error> {
        debug!(page, id, "reading component");
        self.get(&["pages", page, COMPONENTS, id]).await
    }

    /// `GET pages/{page}/components/{id}`, status only. 404 is `Ok(false)`.
    pub async fn component_exists(&self, page: &str, id: &str) -> Result<bool, Error> {
        debug!(page, id, "checking component");
        match self.get_status(&["pages", page, COMPONENTS, id]).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// `POST pages/{page}/components` with `{ "component": {...} }`
    pub async fn create_component(
        &self,
        page: &str,
        body: &ComponentRequest,
    ) -> Result<Component, Error> {
        debug!(page, "creating component");
        self.post(&["pages", page, COMPONENTS], &ComponentEnvelope { component: body })
            .await
    }

    /// `PATCH pages/{page}/components/{id}` with `{ "component": {...} }`
    pub async fn update_component(
        &self,
        page: &str,
        id: &str,
        body: &ComponentRequest,
    ) -> Result<Component, Error> {
        debug!(page, id, "updating component");
        self.patch(
            &["pages", page, COMPONENTS, id],
            &ComponentEnvelope { component: body },
        )
        .await
    }

    /// `DELETE pages/{page}/components/{id}`
    pub async fn delete_component(&self, page: &str, id: &str) -> Result<(), Error> {
        debug!(page, id, "deleting component");
        self.delete(&["pages", page, COMPONENTS, id]).await
    }
}
