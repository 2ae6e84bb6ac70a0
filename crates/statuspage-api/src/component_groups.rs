// Component group endpoints
//
// Same page-scoped layout as components, under `component-groups`.

use tracing::debug;

use crate::client::StatuspageClient;
use crate::error::Error;
use crate::models::{ComponentGroup, ComponentGroupEnvelope, ComponentGroupRequest};

const COMPONENT_GROUPS: &str = "component-groups";

impl StatuspageClient {
    /// `GET pages/{page_id}/component-groups/{id}`
    pub async fn get_component_group(
        &self,
        page_id: &str,
        id: &str,
    ) -> Result<ComponentGroup, Error> {
        debug!(page_id, id, "reading component group");
        self.get(&["pages", page_id, COMPONENT_GROUPS, id]).await
    }

    /// `GET pages/{page_id}/component-groups/{id}`, status only. 404 is `Ok(false)`.
    pub async fn component_group_exists(&self, page_id: &str, id: &str) -> Result<bool, Error> {
        debug!(page_id, id, "checking component group");
        match self.get_status(&["pages", page_id, COMPONENT_GROUPS, id]).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// `POST pages/{page_id}/component-groups` with `{ "component_group": {...} }`
    pub async fn create_component_group(
        &self,
        page_id: &str,
        body: &ComponentGroupRequest,
    ) -> Result<ComponentGroup, Error> {
        debug!(page_id, "creating component group");
        self.post(
            &["pages", page_id, COMPONENT_GROUPS],
            &ComponentGroupEnvelope {
                component_group: body,
            },
        )
        .await
    }

    /// `PATCH pages/{page_id}/component-groups/{id}`
    pub async fn update_component_group(
        &self,
        page_id: &str,
        id: &str,
        body: &ComponentGroupRequest,
    ) -> Result<ComponentGroup, Error> {
        debug!(page_id, id, "updating component group");
        self.patch(
            &["pages", page_id, COMPONENT_GROUPS, id],
            &ComponentGroupEnvelope {
                component_group: body,
            },
        )
        .await
    }

    /// `DELETE pages/{page_id}/component-groups/{id}`
    pub async fn delete_component_group(&self, page_id: &str, id: &str) -> Result<(), Error> {
        debug!(page_id, id, "deleting component group");
        self.delete(&["pages", page_id, COMPONENT_GROUPS, id]).await
    }
}
