use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_status: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub workspace_id: String,
    pub client_id: Option<String>,
    pub color: Option<String>,
    pub billable: bool,
    pub public: bool,
    pub archived: bool,
    pub memberships: Vec<Membership>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub workspace_id: String,
    pub archived: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub name: String,
    pub client_id: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub billable: bool,
    pub color: Option<String>,
    #[serde(default)]
    pub memberships: Vec<Membership>,
}

/// PUT body. Fields Clockify accepts but the mock does not track (rates,
/// estimates, memberships) are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub name: Option<String>,
    pub client_id: Option<String>,
    pub is_public: Option<bool>,
    pub billable: Option<bool>,
    pub color: Option<String>,
    pub archived: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateMemberships {
    pub memberships: Vec<Membership>,
}

#[derive(Deserialize)]
pub struct CreateClient {
    pub name: String,
}

#[derive(Deserialize)]
pub struct UserQuery {
    pub page: Option<usize>,
    #[serde(rename = "page-size")]
    pub page_size: Option<usize>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct ClientQuery {
    pub name: Option<String>,
}

/// Error payload in the shape Clockify uses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
    pub code: u16,
}

type ApiError = (StatusCode, Json<ApiMessage>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ApiMessage {
            message: message.into(),
            code: status.as_u16(),
        }),
    )
}

/// Initial contents of the mock.
#[derive(Clone, Debug, Default)]
pub struct Seed {
    pub api_key: String,
    /// Users keyed by workspace id.
    pub users: HashMap<String, Vec<User>>,
    pub clients: Vec<Client>,
}

impl Seed {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Add `users` to the workspace `workspace_id`.
    pub fn with_users(mut self, workspace_id: impl Into<String>, users: Vec<User>) -> Self {
        self.users.entry(workspace_id.into()).or_default().extend(users);
        self
    }

    pub fn with_clients(mut self, clients: Vec<Client>) -> Self {
        self.clients = clients;
        self
    }
}

/// `count` users named `user{n}` with `user{n}@example.com` addresses.
pub fn generate_users(count: usize) -> Vec<User> {
    (0..count)
        .map(|n| User {
            id: new_id(),
            email: format!("user{n}@example.com"),
            name: format!("user{n}"),
            status: "ACTIVE".to_string(),
        })
        .collect()
}

#[derive(Default)]
struct Store {
    projects: HashMap<String, Project>,
    users: HashMap<String, Vec<User>>,
    clients: Vec<Client>,
}

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
    db: Arc<RwLock<Store>>,
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()[..24].to_string()
}

pub fn app(seed: Seed) -> Router {
    let state = AppState {
        api_key: seed.api_key.into(),
        db: Arc::new(RwLock::new(Store {
            projects: HashMap::new(),
            users: seed.users,
            clients: seed.clients,
        })),
    };
    Router::new()
        .route("/api/v1/workspaces/{ws}/projects", post(create_project))
        .route(
            "/api/v1/workspaces/{ws}/projects/{id}",
            get(get_project).put(update_project),
        )
        .route(
            "/api/v1/workspaces/{ws}/projects/{id}/memberships",
            patch(set_memberships),
        )
        .route("/api/workspaces/{ws}/projects/{id}/archive", post(archive_project))
        .route("/api/workspaces/{ws}/projects/{id}/restore", post(restore_project))
        .route("/api/v1/workspaces/{ws}/users", get(list_users))
        .route(
            "/api/v1/workspaces/{ws}/clients",
            get(list_clients).post(create_client),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

pub async fn run(listener: TcpListener, seed: Seed) -> Result<(), std::io::Error> {
    axum::serve(listener, app(seed)).await
}

async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let presented = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());
    if presented != Some(&*state.api_key) {
        debug!(uri = %request.uri(), "rejecting request without a valid api key");
        return api_error(StatusCode::UNAUTHORIZED, "Full authentication is required").into_response();
    }
    next.run(request).await
}

fn project_not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "Project doesn't belong to Workspace")
}

fn project_mut<'a>(store: &'a mut Store, ws: &str, id: &str) -> Result<&'a mut Project, ApiError> {
    store
        .projects
        .get_mut(id)
        .filter(|p| p.workspace_id == ws)
        .ok_or_else(project_not_found)
}

async fn create_project(
    State(state): State<AppState>,
    Path(ws): Path<String>,
    Json(input): Json<CreateProject>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let mut store = state.db.write().await;
    if store
        .projects
        .values()
        .any(|p| p.workspace_id == ws && p.name == input.name)
    {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Project with that name already exists",
        ));
    }
    let project = Project {
        id: new_id(),
        name: input.name,
        workspace_id: ws,
        client_id: input.client_id,
        color: input.color,
        billable: input.billable,
        public: input.is_public,
        archived: false,
        memberships: input.memberships,
    };
    info!(id = %project.id, name = %project.name, "created project");
    store.projects.insert(project.id.clone(), project.clone());
    Ok((StatusCode::CREATED, Json(project)))
}

async fn get_project(
    State(state): State<AppState>,
    Path((ws, id)): Path<(String, String)>,
) -> Result<Json<Project>, ApiError> {
    let store = state.db.read().await;
    store
        .projects
        .get(&id)
        .filter(|p| p.workspace_id == ws)
        .cloned()
        .map(Json)
        .ok_or_else(project_not_found)
}

async fn update_project(
    State(state): State<AppState>,
    Path((ws, id)): Path<(String, String)>,
    Json(input): Json<UpdateProject>,
) -> Result<Json<Project>, ApiError> {
    let mut store = state.db.write().await;
    let project = project_mut(&mut store, &ws, &id)?;
    if let Some(name) = input.name {
        project.name = name;
    }
    if let Some(client_id) = input.client_id {
        project.client_id = Some(client_id);
    }
    if let Some(public) = input.is_public {
        project.public = public;
    }
    if let Some(billable) = input.billable {
        project.billable = billable;
    }
    if let Some(color) = input.color {
        project.color = Some(color);
    }
    if let Some(archived) = input.archived {
        project.archived = archived;
    }
    Ok(Json(project.clone()))
}

async fn set_memberships(
    State(state): State<AppState>,
    Path((ws, id)): Path<(String, String)>,
    Json(input): Json<UpdateMemberships>,
) -> Result<Json<Project>, ApiError> {
    let mut store = state.db.write().await;
    let project = project_mut(&mut store, &ws, &id)?;
    project.memberships = input
        .memberships
        .into_iter()
        .map(|m| Membership {
            membership_type: m.membership_type.or_else(|| Some("PROJECT".to_string())),
            membership_status: m.membership_status.or_else(|| Some("ACTIVE".to_string())),
            ..m
        })
        .collect();
    Ok(Json(project.clone()))
}

async fn set_archived(state: AppState, ws: String, id: String, archived: bool) -> Result<Json<Project>, ApiError> {
    let mut store = state.db.write().await;
    let project = project_mut(&mut store, &ws, &id)?;
    project.archived = archived;
    Ok(Json(project.clone()))
}

async fn archive_project(
    State(state): State<AppState>,
    Path((ws, id)): Path<(String, String)>,
) -> Result<Json<Project>, ApiError> {
    set_archived(state, ws, id, true).await
}

async fn restore_project(
    State(state): State<AppState>,
    Path((ws, id)): Path<(String, String)>,
) -> Result<Json<Project>, ApiError> {
    set_archived(state, ws, id, false).await
}

async fn list_users(
    State(state): State<AppState>,
    Path(ws): Path<String>,
    Query(query): Query<UserQuery>,
) -> Json<Vec<User>> {
    let store = state.db.read().await;
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    let needle = query.email.map(|e| e.to_lowercase());
    let users = store
        .users
        .get(&ws)
        .into_iter()
        .flatten()
        .filter(|u| {
            needle
                .as_deref()
                .map_or(true, |n| u.email.to_lowercase().contains(n))
        })
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();
    Json(users)
}

async fn list_clients(
    State(state): State<AppState>,
    Path(ws): Path<String>,
    Query(query): Query<ClientQuery>,
) -> Json<Vec<Client>> {
    let store = state.db.read().await;
    let needle = query.name.map(|n| n.to_lowercase());
    let clients = store
        .clients
        .iter()
        .filter(|c| c.workspace_id == ws)
        .filter(|c| {
            needle
                .as_deref()
                .map_or(true, |n| c.name.to_lowercase().contains(n))
        })
        .cloned()
        .collect();
    Json(clients)
}

async fn create_client(
    State(state): State<AppState>,
    Path(ws): Path<String>,
    Json(input): Json<CreateClient>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let mut store = state.db.write().await;
    if store
        .clients
        .iter()
        .any(|c| c.workspace_id == ws && c.name == input.name)
    {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Client with name already exists",
        ));
    }
    let client = Client {
        id: new_id(),
        name: input.name,
        workspace_id: ws,
        archived: false,
    };
    info!(id = %client.id, name = %client.name, "created client");
    store.clients.push(client.clone());
    Ok((StatusCode::CREATED, Json(client)))
}
