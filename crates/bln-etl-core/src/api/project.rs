//! Project and file records.

use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// A project on the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Project {
    /// Platform id; `None` for a project not yet created.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Whether the project is publicly listed.
    pub is_open: Option<bool>,
    /// Contact address.
    pub contact: Option<String>,
    /// How to reach the contact.
    pub contact_method: Option<String>,
    /// Caller's role, for projects returned by
    /// [`Client::user_projects`](super::Client::user_projects).
    pub user_role: Option<String>,
    /// Creation timestamp, or the update timestamp when the server omits it.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
    #[serde(skip)]
    pub(crate) files: Option<Vec<ProjectFile>>,
}

impl Project {
    /// Creates an unsaved project record.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Short identifier for display and directory names.
    ///
    /// # Examples
    ///
    /// ```
    /// use bln_etl_core::api::Project;
    ///
    /// let mut project = Project::new("Wildfire Tracker Data Export");
    /// assert_eq!(project.slug(), "wildfire-tracker-dat");
    ///
    /// project.id = Some("UHJvamVjdDo5YjQ3ZDVkZC1hYmNk".to_string());
    /// assert_eq!(project.slug(), "wildfire-tracker-dat-UHJvamVjdDo5YjQ");
    /// ```
    #[must_use]
    pub fn slug(&self) -> String {
        let mut slug: String = self
            .name
            .chars()
            .take(20)
            .collect::<String>()
            .to_lowercase()
            .replace(' ', "-");
        if let Some(id) = self.id.as_deref().filter(|id| !id.is_empty()) {
            slug.push('-');
            slug.extend(id.chars().take(15));
        }
        slug
    }

    /// Files cached by the last fetch, if any.
    #[must_use]
    pub fn cached_files(&self) -> Option<&[ProjectFile]> {
        self.files.as_deref()
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<BLN Project: {}>", self.slug())
    }
}

/// A file stored in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectFile {
    /// Owning project id.
    pub project_id: String,
    /// File name.
    pub name: String,
}

impl fmt::Display for ProjectFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Optional fields for [`Client::create_project`](super::Client::create_project).
///
/// Serialized in camelCase, as the platform expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Contact address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// How to reach the contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_method: Option<String>,
    /// Whether the project is publicly listed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
}

/// Whether [`Client::project_files`](super::Client::project_files) may
/// reuse a previous fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Return the cached list when the project already has one.
    #[default]
    UseCache,
    /// Always query the platform and replace the cache.
    Refresh,
}

/// Project node as returned by the platform.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectNode {
    id: Option<String>,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_open: Option<bool>,
    #[serde(default)]
    contact: Option<String>,
    #[serde(default)]
    contact_method: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl ProjectNode {
    pub(crate) fn into_project(self, user_role: Option<String>) -> Project {
        Project {
            id: self.id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            is_open: self.is_open,
            contact: self.contact,
            contact_method: self.contact_method,
            user_role,
            created_at: self.created_at.or_else(|| self.updated_at.clone()),
            updated_at: self.updated_at,
            files: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slug_without_id() {
        assert_eq!(Project::new("Foo Bar").slug(), "foo-bar");
    }

    #[test]
    fn test_slug_truncates_name_and_id() {
        let mut project = Project::new("A Very Long Project Name Indeed");
        project.id = Some("0123456789abcdefghij".into());
        assert_eq!(project.slug(), "a-very-long-project--0123456789abcde");
    }

    #[test]
    fn test_display() {
        assert_eq!(Project::new("Demo").to_string(), "<BLN Project: demo>");
        let file = ProjectFile {
            project_id: "p".into(),
            name: "data.csv".into(),
        };
        assert_eq!(file.to_string(), "data.csv");
    }

    #[test]
    fn test_node_created_at_falls_back_to_updated_at() {
        let node: ProjectNode = serde_json::from_value(json!({
            "id": "abc",
            "name": "Demo",
            "contactMethod": "EMAIL",
            "isOpen": true,
            "updatedAt": "2021-01-02T00:00:00",
        }))
        .unwrap();
        let project = node.into_project(Some("ADMIN".into()));

        assert_eq!(project.created_at.as_deref(), Some("2021-01-02T00:00:00"));
        assert_eq!(project.updated_at.as_deref(), Some("2021-01-02T00:00:00"));
        assert_eq!(project.contact_method.as_deref(), Some("EMAIL"));
        assert_eq!(project.is_open, Some(true));
        assert_eq!(project.user_role.as_deref(), Some("ADMIN"));
        assert_eq!(project.description, "");
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = ProjectMeta {
            contact_method: Some("EMAIL".into()),
            is_open: Some(false),
            ..ProjectMeta::default()
        };
        assert_eq!(
            serde_json::to_value(&meta).unwrap(),
            json!({"contactMethod": "EMAIL", "isOpen": false})
        );
    }
}
