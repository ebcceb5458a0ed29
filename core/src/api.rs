//! The endpoint catalogue: Clockify operations over a live transport.
//!
//! # Design
//! `Clockify` composes the stateless `ClockifyClient` with a `Transport`.
//! Every operation is build, send, parse; the few composite ones (user
//! pagination, project updates that merge a fetched project, membership
//! additions) chain those steps. No state survives between calls.

use serde_json::Value;
use tracing::{info, warn};

use crate::client::{merge_member_ids, ClockifyClient};
use crate::color::ColorStrategy;
use crate::config::ClockifyConfig;
use crate::error::{ClockifyError, Result};
use crate::http::{ApiBase, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{
    Client, Membership, MembershipsUpdate, NewClient, NewProject, Project, ProjectUpdate, User,
};

/// Upper bound on pages fetched by `list_users`.
pub const MAX_PAGES: u32 = 1000;

#[derive(Debug, Clone)]
pub struct Clockify<T = UreqTransport> {
    client: ClockifyClient,
    transport: T,
    colors: ColorStrategy,
}

impl Clockify<UreqTransport> {
    pub fn new(config: ClockifyConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> Clockify<T> {
    pub fn with_transport(config: ClockifyConfig, transport: T) -> Self {
        Self {
            client: ClockifyClient::new(config),
            transport,
            colors: ColorStrategy::default(),
        }
    }

    /// How `create_project` picks a color.
    pub fn with_color_strategy(mut self, colors: ColorStrategy) -> Self {
        self.colors = colors;
        self
    }

    pub fn client(&self) -> &ClockifyClient {
        &self.client
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.transport.send(&request)
    }

    /// Generic dispatch: one round-trip to `base + path`, decoded as JSON.
    pub fn execute(
        &self,
        method: HttpMethod,
        base: ApiBase,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let request = self.client.build_request(method, base, path, query, body);
        self.client.parse_json(self.send(request)?)
    }

    /// Create a project with one active membership per user.
    pub fn create_project<I, S>(
        &self,
        workspace_id: &str,
        name: &str,
        client_id: Option<&str>,
        user_ids: I,
    ) -> Result<Project>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let input = NewProject {
            name: name.to_string(),
            client_id: client_id.map(str::to_string),
            is_public: false,
            billable: true,
            color: self.colors.pick(),
            memberships: user_ids.into_iter().map(Membership::active_project).collect(),
        };
        info!(workspace_id, name, members = input.memberships.len(), "creating project");
        let request = self.client.build_create_project(workspace_id, &input)?;
        self.client.parse_project(self.send(request)?)
    }

    pub fn get_project(&self, workspace_id: &str, project_id: &str) -> Result<Project> {
        let request = self.client.build_get_project(workspace_id, project_id);
        self.client.parse_project(self.send(request)?)
    }

    /// Fetch the project, apply `change` to a copy of its fields and PUT it
    /// back.
    fn update_project(
        &self,
        workspace_id: &str,
        project_id: &str,
        change: impl FnOnce(ProjectUpdate) -> ProjectUpdate,
    ) -> Result<Project> {
        let current = self.get_project(workspace_id, project_id)?;
        let update = change(ProjectUpdate::from(&current));
        let request = self.client.build_update_project(workspace_id, project_id, &update)?;
        self.client.parse_project(self.send(request)?)
    }

    pub fn archive_project(&self, workspace_id: &str, project_id: &str) -> Result<Project> {
        info!(workspace_id, project_id, "archiving project");
        self.update_project(workspace_id, project_id, |update| update.archived(true))
    }

    pub fn restore_project(&self, workspace_id: &str, project_id: &str) -> Result<Project> {
        info!(workspace_id, project_id, "restoring project");
        self.update_project(workspace_id, project_id, |update| update.archived(false))
    }

    pub fn update_project_name(&self, workspace_id: &str, project_id: &str, name: &str) -> Result<Project> {
        info!(workspace_id, project_id, name, "renaming project");
        self.update_project(workspace_id, project_id, |update| update.renamed(name))
    }

    /// Archive through the unversioned `/archive` endpoint.
    pub fn close_project(&self, workspace_id: &str, project_id: &str) -> Result<Value> {
        info!(workspace_id, project_id, "closing project");
        let request = self.client.build_close_project(workspace_id, project_id);
        self.client.parse_json(self.send(request)?)
    }

    /// Restore through the unversioned `/restore` endpoint.
    pub fn reopen_project(&self, workspace_id: &str, project_id: &str) -> Result<Value> {
        info!(workspace_id, project_id, "reopening project");
        let request = self.client.build_reopen_project(workspace_id, project_id);
        self.client.parse_json(self.send(request)?)
    }

    pub fn list_project_members(&self, workspace_id: &str, project_id: &str) -> Result<Vec<String>> {
        Ok(self.get_project(workspace_id, project_id)?.member_ids())
    }

    /// Replace the project's member set.
    pub fn set_project_members<I, S>(&self, workspace_id: &str, project_id: &str, user_ids: I) -> Result<Project>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let input = MembershipsUpdate::for_users(user_ids);
        info!(workspace_id, project_id, members = input.memberships.len(), "setting project members");
        let request = self.client.build_set_project_members(workspace_id, project_id, &input)?;
        self.client.parse_project(self.send(request)?)
    }

    /// Add `user_id` to the project. Adding an existing member leaves the set
    /// unchanged.
    pub fn add_project_member(&self, workspace_id: &str, project_id: &str, user_id: &str) -> Result<Project> {
        let existing = self.list_project_members(workspace_id, project_id)?;
        let members = merge_member_ids(existing, [user_id]);
        self.set_project_members(workspace_id, project_id, members)
    }

    /// Every user in the workspace, walking pages until one comes back empty.
    pub fn list_users(&self, workspace_id: &str) -> Result<Vec<User>> {
        let mut users = Vec::new();
        for page in 1..=MAX_PAGES {
            let request = self.client.build_list_users_page(workspace_id, page);
            let batch = self.client.parse_users(self.send(request)?)?;
            if batch.is_empty() {
                return Ok(users);
            }
            users.extend(batch);
        }
        warn!(workspace_id, limit = MAX_PAGES, "user pagination never returned an empty page");
        Err(ClockifyError::PageLimitExceeded { limit: MAX_PAGES })
    }

    /// Look a user up by email. The server matches `email` as a substring,
    /// so the first user it returns wins even if its address is longer.
    pub fn find_user_by_email(&self, workspace_id: &str, email: &str) -> Result<User> {
        let request = self.client.build_find_user_by_email(workspace_id, email);
        self.client.parse_find_user_by_email(email, self.send(request)?)
    }

    pub fn find_client_by_name(&self, workspace_id: &str, name: &str) -> Result<Client> {
        let request = self.client.build_find_clients(workspace_id, name);
        self.client.parse_find_client_by_name(name, self.send(request)?)
    }

    pub fn create_client(&self, workspace_id: &str, name: &str) -> Result<Client> {
        info!(workspace_id, name, "creating client");
        let input = NewClient { name: name.to_string() };
        let request = self.client.build_create_client(workspace_id, &input)?;
        self.client.parse_client(self.send(request)?)
    }
}
