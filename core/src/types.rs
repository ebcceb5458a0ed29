//! Request and response payloads for the Clockify API.
//!
//! # Design
//! Only the fields the catalogue reads or writes are typed. Anything else the
//! server sends is kept in a flattened `extra` map, so a fetched object can be
//! handed back to callers without losing data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MEMBERSHIP_STATUS_ACTIVE: &str = "ACTIVE";
pub const MEMBERSHIP_TYPE_PROJECT: &str = "PROJECT";

/// A user's membership in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_status: Option<String>,
}

impl Membership {
    /// Bare `{userId}` entry, as the memberships PATCH expects.
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            hourly_rate: None,
            target_id: None,
            membership_type: None,
            membership_status: None,
        }
    }

    /// An active project membership, as sent when creating a project.
    pub fn active_project(user_id: impl Into<String>) -> Self {
        Self {
            membership_status: Some(MEMBERSHIP_STATUS_ACTIVE.to_string()),
            membership_type: Some(MEMBERSHIP_TYPE_PROJECT.to_string()),
            ..Self::user(user_id)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default)]
    pub billable: bool,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Value>,
    #[serde(default)]
    pub memberships: Vec<Membership>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// User ids of every membership, in server order.
    pub fn member_ids(&self) -> Vec<String> {
        self.memberships.iter().map(|m| m.user_id.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /workspaces/{ws}/projects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub is_public: bool,
    pub billable: bool,
    pub color: String,
    pub memberships: Vec<Membership>,
}

/// Body of `PUT /workspaces/{ws}/projects/{id}`. Built from a fetched project
/// so the update does not reset fields the caller did not mean to touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub is_public: bool,
    pub billable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Value>,
    pub memberships: Vec<Membership>,
    pub archived: bool,
}

impl From<&Project> for ProjectUpdate {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            client_id: project.client_id.clone(),
            is_public: project.public,
            billable: project.billable,
            color: project.color.clone(),
            estimate: project.estimate.clone(),
            hourly_rate: project.hourly_rate.clone(),
            memberships: project.memberships.clone(),
            archived: project.archived,
        }
    }
}

impl ProjectUpdate {
    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Body of `PATCH /workspaces/{ws}/projects/{id}/memberships`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipsUpdate {
    pub memberships: Vec<Membership>,
}

impl MembershipsUpdate {
    pub fn for_users<I, S>(user_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            memberships: user_ids.into_iter().map(Membership::user).collect(),
        }
    }
}

/// Body of `POST /workspaces/{ws}/clients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fetched_project() -> Project {
        serde_json::from_value(json!({
            "id": "p1",
            "name": "Website",
            "color": "#03A9F4",
            "clientId": "c1",
            "billable": true,
            "public": true,
            "archived": false,
            "hourlyRate": {"amount": 5000, "currency": "USD"},
            "estimate": {"estimate": "PT0S", "type": "AUTO"},
            "memberships": [
                {"userId": "u1", "membershipType": "PROJECT", "membershipStatus": "ACTIVE"}
            ],
            "workspaceId": "ws1",
            "duration": "PT3H"
        }))
        .unwrap()
    }

    #[test]
    fn active_project_membership_serializes_camel_case() {
        let value = serde_json::to_value(Membership::active_project("u1")).unwrap();
        assert_eq!(
            value,
            json!({"userId": "u1", "membershipType": "PROJECT", "membershipStatus": "ACTIVE"})
        );
    }

    #[test]
    fn bare_membership_only_has_user_id() {
        let value = serde_json::to_value(Membership::user("u9")).unwrap();
        assert_eq!(value, json!({"userId": "u9"}));
    }

    #[test]
    fn project_keeps_unknown_fields() {
        let project = fetched_project();
        assert_eq!(project.extra["workspaceId"], "ws1");
        let back = serde_json::to_value(&project).unwrap();
        assert_eq!(back["duration"], "PT3H");
        assert_eq!(back["hourlyRate"]["amount"], 5000);
    }

    #[test]
    fn project_update_copies_fetched_fields() {
        let update = ProjectUpdate::from(&fetched_project()).archived(true);
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["name"], "Website");
        assert_eq!(body["clientId"], "c1");
        assert_eq!(body["isPublic"], true);
        assert_eq!(body["billable"], true);
        assert_eq!(body["color"], "#03A9F4");
        assert_eq!(body["hourlyRate"], json!({"amount": 5000, "currency": "USD"}));
        assert_eq!(body["memberships"][0]["userId"], "u1");
        assert_eq!(body["archived"], true);
        assert!(body.get("workspaceId").is_none());
    }

    #[test]
    fn project_defaults_missing_optional_fields() {
        let project: Project = serde_json::from_value(json!({"id": "p2", "name": "Bare"})).unwrap();
        assert!(!project.billable);
        assert!(project.memberships.is_empty());
        assert!(project.client_id.is_none());
    }

    #[test]
    fn memberships_update_lists_user_ids() {
        let body = serde_json::to_value(MembershipsUpdate::for_users(["a", "b"])).unwrap();
        assert_eq!(body, json!({"memberships": [{"userId": "a"}, {"userId": "b"}]}));
    }
}
