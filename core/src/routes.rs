//! The fixed table of Clockify routes the catalogue uses.
//!
//! Each route knows its verb, which base URL it lives under and how to render
//! its path. The base choice is part of the table: the remote API serves some
//! endpoints only under `/api` and the rest under `/api/v1`.

use crate::http::{ApiBase, HttpMethod};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    CreateProject { workspace_id: &'a str },
    GetProject { workspace_id: &'a str, project_id: &'a str },
    UpdateProject { workspace_id: &'a str, project_id: &'a str },
    CloseProject { workspace_id: &'a str, project_id: &'a str },
    ReopenProject { workspace_id: &'a str, project_id: &'a str },
    SetProjectMemberships { workspace_id: &'a str, project_id: &'a str },
    ListUsers { workspace_id: &'a str },
    ListClients { workspace_id: &'a str },
    CreateClient { workspace_id: &'a str },
}

impl Route<'_> {
    pub fn method(&self) -> HttpMethod {
        match self {
            Route::GetProject { .. } | Route::ListUsers { .. } | Route::ListClients { .. } => {
                HttpMethod::Get
            }
            Route::UpdateProject { .. } => HttpMethod::Put,
            Route::SetProjectMemberships { .. } => HttpMethod::Patch,
            Route::CreateProject { .. }
            | Route::CloseProject { .. }
            | Route::ReopenProject { .. }
            | Route::CreateClient { .. } => HttpMethod::Post,
        }
    }

    pub fn base(&self) -> ApiBase {
        match self {
            Route::CloseProject { .. } | Route::ReopenProject { .. } => ApiBase::Stable,
            _ => ApiBase::Versioned,
        }
    }

    /// Path relative to the base URL, identifiers substituted.
    pub fn path(&self) -> String {
        match self {
            Route::CreateProject { workspace_id } => format!("/workspaces/{workspace_id}/projects"),
            Route::GetProject {
                workspace_id,
                project_id,
            }
            | Route::UpdateProject {
                workspace_id,
                project_id,
            } => format!("/workspaces/{workspace_id}/projects/{project_id}"),
            Route::CloseProject {
                workspace_id,
                project_id,
            } => format!("/workspaces/{workspace_id}/projects/{project_id}/archive"),
            Route::ReopenProject {
                workspace_id,
                project_id,
            } => format!("/workspaces/{workspace_id}/projects/{project_id}/restore"),
            Route::SetProjectMemberships {
                workspace_id,
                project_id,
            } => format!("/workspaces/{workspace_id}/projects/{project_id}/memberships"),
            Route::ListUsers { workspace_id } => format!("/workspaces/{workspace_id}/users"),
            Route::ListClients { workspace_id } | Route::CreateClient { workspace_id } => {
                format!("/workspaces/{workspace_id}/clients")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_routes_render_ids() {
        let route = Route::GetProject {
            workspace_id: "ws1",
            project_id: "p1",
        };
        assert_eq!(route.path(), "/workspaces/ws1/projects/p1");
        assert_eq!(route.method(), HttpMethod::Get);
        assert_eq!(route.base(), ApiBase::Versioned);
    }

    #[test]
    fn membership_patch_route() {
        let route = Route::SetProjectMemberships {
            workspace_id: "ws1",
            project_id: "p1",
        };
        assert_eq!(route.path(), "/workspaces/ws1/projects/p1/memberships");
        assert_eq!(route.method(), HttpMethod::Patch);
    }

    #[test]
    fn archive_and_restore_live_under_stable_base() {
        let close = Route::CloseProject {
            workspace_id: "ws1",
            project_id: "p1",
        };
        let reopen = Route::ReopenProject {
            workspace_id: "ws1",
            project_id: "p1",
        };
        assert_eq!(close.base(), ApiBase::Stable);
        assert_eq!(reopen.base(), ApiBase::Stable);
        assert_eq!(close.path(), "/workspaces/ws1/projects/p1/archive");
        assert_eq!(reopen.path(), "/workspaces/ws1/projects/p1/restore");
    }

    #[test]
    fn everything_else_is_versioned() {
        let routes = [
            Route::CreateProject { workspace_id: "w" },
            Route::UpdateProject {
                workspace_id: "w",
                project_id: "p",
            },
            Route::ListUsers { workspace_id: "w" },
            Route::ListClients { workspace_id: "w" },
            Route::CreateClient { workspace_id: "w" },
        ];
        assert!(routes.iter().all(|r| r.base() == ApiBase::Versioned));
    }
}
