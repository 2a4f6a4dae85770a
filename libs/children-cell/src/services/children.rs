use std::sync::Arc;

use reqwest::Method;
use tracing::debug;

use shared_gateway::ApiGateway;

use crate::models::{Child, ChildrenError};

/// Bearer-authenticated listing of the guardian's children, used to
/// populate the child selector rows of the booking flow.
pub struct ChildrenService {
    gateway: Arc<ApiGateway>,
}

impl ChildrenService {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    pub async fn fetch_children(&self, token: Option<&str>) -> Result<Vec<Child>, ChildrenError> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ChildrenError::NotAuthenticated),
        };

        debug!("Fetching children for the authenticated guardian");

        let children: Vec<Child> = self
            .gateway
            .request(Method::GET, "/children/", Some(token), None)
            .await?;

        Ok(children)
    }
}
