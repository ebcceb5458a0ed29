//! Stateless request builder and response parser for the Clockify API.
//!
//! # Design
//! `ClockifyClient` holds only its configuration and carries no mutable
//! state between calls. Each catalogue operation is split into `build_*`
//! methods that produce an `HttpRequest` and `parse_*` methods that consume
//! an `HttpResponse`. Nothing here touches the network; see `Clockify` for
//! the composition with a transport.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ClockifyConfig;
use crate::error::{ClockifyError, Result};
use crate::http::{ApiBase, HttpMethod, HttpRequest, HttpResponse};
use crate::routes::Route;
use crate::types::{Client, MembershipsUpdate, NewClient, NewProject, Project, ProjectUpdate, User};

pub const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Debug, Clone)]
pub struct ClockifyClient {
    config: ClockifyConfig,
}

impl ClockifyClient {
    pub fn new(config: ClockifyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClockifyConfig {
        &self.config
    }

    /// Assemble a request against `base + path`.
    ///
    /// The body is only attached for POST, PUT and PATCH; for other verbs it
    /// is dropped.
    pub fn build_request(
        &self,
        method: HttpMethod,
        base: ApiBase,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> HttpRequest {
        let url = format!("{}{}", self.config.base_url(base), path);
        let mut headers = vec![(API_KEY_HEADER.to_string(), self.config.api_key().to_string())];

        let body = match body {
            Some(body) if method.carries_body() => {
                headers.push(("content-type".to_string(), "application/json".to_string()));
                Some(body.to_string())
            }
            Some(_) => {
                debug!(%method, %url, "dropping body on a method that does not carry one");
                None
            }
            None => None,
        };

        debug!(%method, %url, "built request");
        HttpRequest {
            method,
            url,
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers,
            body,
        }
    }

    fn build_route(&self, route: Route<'_>, query: &[(&str, &str)], body: Option<&Value>) -> HttpRequest {
        self.build_request(route.method(), route.base(), &route.path(), query, body)
    }

    fn build_route_with<B: Serialize>(&self, route: Route<'_>, input: &B) -> Result<HttpRequest> {
        let body = serde_json::to_value(input).map_err(|e| ClockifyError::Serialization(e.to_string()))?;
        Ok(self.build_route(route, &[], Some(&body)))
    }

    pub fn build_create_project(&self, workspace_id: &str, input: &NewProject) -> Result<HttpRequest> {
        self.build_route_with(Route::CreateProject { workspace_id }, input)
    }

    pub fn build_get_project(&self, workspace_id: &str, project_id: &str) -> HttpRequest {
        self.build_route(
            Route::GetProject {
                workspace_id,
                project_id,
            },
            &[],
            None,
        )
    }

    pub fn build_update_project(
        &self,
        workspace_id: &str,
        project_id: &str,
        input: &ProjectUpdate,
    ) -> Result<HttpRequest> {
        self.build_route_with(
            Route::UpdateProject {
                workspace_id,
                project_id,
            },
            input,
        )
    }

    pub fn build_close_project(&self, workspace_id: &str, project_id: &str) -> HttpRequest {
        self.build_route(
            Route::CloseProject {
                workspace_id,
                project_id,
            },
            &[],
            None,
        )
    }

    pub fn build_reopen_project(&self, workspace_id: &str, project_id: &str) -> HttpRequest {
        self.build_route(
            Route::ReopenProject {
                workspace_id,
                project_id,
            },
            &[],
            None,
        )
    }

    pub fn build_set_project_members(
        &self,
        workspace_id: &str,
        project_id: &str,
        input: &MembershipsUpdate,
    ) -> Result<HttpRequest> {
        self.build_route_with(
            Route::SetProjectMemberships {
                workspace_id,
                project_id,
            },
            input,
        )
    }

    /// One page of the workspace user list. Pages are 1-based.
    pub fn build_list_users_page(&self, workspace_id: &str, page: u32) -> HttpRequest {
        let page = page.to_string();
        self.build_route(Route::ListUsers { workspace_id }, &[("page", &page)], None)
    }

    pub fn build_find_user_by_email(&self, workspace_id: &str, email: &str) -> HttpRequest {
        self.build_route(
            Route::ListUsers { workspace_id },
            &[("email", email), ("memberships", "NONE")],
            None,
        )
    }

    pub fn build_find_clients(&self, workspace_id: &str, name: &str) -> HttpRequest {
        self.build_route(Route::ListClients { workspace_id }, &[("name", name)], None)
    }

    pub fn build_create_client(&self, workspace_id: &str, input: &NewClient) -> Result<HttpRequest> {
        self.build_route_with(Route::CreateClient { workspace_id }, input)
    }

    /// Decode a response body as JSON. An empty body decodes to `Null`.
    pub fn parse_json(&self, response: HttpResponse) -> Result<Value> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| ClockifyError::Deserialization(e.to_string()))
    }

    pub fn parse_as<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T> {
        let value = self.parse_json(response)?;
        serde_json::from_value(value).map_err(|e| ClockifyError::Deserialization(e.to_string()))
    }

    pub fn parse_project(&self, response: HttpResponse) -> Result<Project> {
        self.parse_as(response)
    }

    pub fn parse_users(&self, response: HttpResponse) -> Result<Vec<User>> {
        self.parse_as(response)
    }

    pub fn parse_clients(&self, response: HttpResponse) -> Result<Vec<Client>> {
        self.parse_as(response)
    }

    pub fn parse_client(&self, response: HttpResponse) -> Result<Client> {
        self.parse_as(response)
    }

    /// First user of an email lookup. The server filter is a substring
    /// match, so this is not necessarily an exact address match.
    pub fn parse_find_user_by_email(&self, email: &str, response: HttpResponse) -> Result<User> {
        self.parse_users(response)?
            .into_iter()
            .next()
            .ok_or_else(|| ClockifyError::UserNotFound {
                email: email.to_string(),
            })
    }

    /// The server filters clients by substring; keep only the exact,
    /// case-sensitive match.
    pub fn parse_find_client_by_name(&self, name: &str, response: HttpResponse) -> Result<Client> {
        self.parse_clients(response)?
            .into_iter()
            .find(|client| client.name == name)
            .ok_or_else(|| ClockifyError::ClientNotFound {
                name: name.to_string(),
            })
    }
}

/// Map non-success status codes to `HttpRequest`, keeping the raw body.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ClockifyError::HttpRequest {
        status: response.status,
        body: response.body.clone(),
    })
}

/// `existing` followed by any of `added` not already present, first
/// occurrence wins.
pub fn merge_member_ids<I, S>(existing: Vec<String>, added: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut members: Vec<String> = Vec::with_capacity(existing.len());
    for id in existing.into_iter().chain(added.into_iter().map(Into::into)) {
        if !members.contains(&id) {
            members.push(id);
        }
    }
    members
}
