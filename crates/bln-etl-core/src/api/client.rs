//! GraphQL operations against the platform.

use crate::Error;
use crate::Result;
use crate::api::config::ApiConfig;
use crate::api::project::FetchPolicy;
use crate::api::project::Project;
use crate::api::project::ProjectFile;
use crate::api::project::ProjectMeta;
use crate::api::project::ProjectNode;
use crate::api::queries;
use crate::api::transport::GraphQlRequest;
use crate::api::transport::HttpTransport;
use crate::api::transport::Transport;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use std::path::Path;

/// Platform client.
///
/// Each client owns its token; there is no process-wide state.
///
/// # Examples
///
/// ```no_run
/// use bln_etl_core::api::Client;
/// use bln_etl_core::api::FetchPolicy;
///
/// let client = Client::from_env(None)?;
/// for mut project in client.user_projects()? {
///     let files = client.project_files(&mut project, FetchPolicy::UseCache)?;
///     println!("{project}: {} files", files.len());
/// }
/// # Ok::<(), bln_etl_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Client<T = HttpTransport> {
    config: ApiConfig,
    transport: T,
}

impl Client<HttpTransport> {
    /// Creates a client that talks HTTP to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.endpoint())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Resolves settings with [`ApiConfig::resolve`] and creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when no token is available.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        Self::new(ApiConfig::resolve(token)?)
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client over an arbitrary transport.
    pub const fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Client settings.
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Projects the caller has a role on, with
    /// [`user_role`](Project::user_role) set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the server reports errors and
    /// [`Error::UnexpectedResponse`] when the payload lacks the expected
    /// shape.
    pub fn user_projects(&self) -> Result<Vec<Project>> {
        let data = self.execute(&GraphQlRequest::new(queries::USER_PROJECTS))?;

        edges(&data, "/user/effectiveProjectRoles/edges")?
            .iter()
            .map(|edge| -> Result<Project> {
                let role = edge
                    .pointer("/node/role")
                    .and_then(Value::as_str)
                    .map(ToString::to_string);
                let node = field(edge, "/node/project")?;
                Ok(project_node(node)?.into_project(role))
            })
            .collect()
    }

    /// All publicly listed projects.
    ///
    /// # Errors
    ///
    /// Same as [`user_projects`](Self::user_projects).
    pub fn open_projects(&self) -> Result<Vec<Project>> {
        let data = self.execute(&GraphQlRequest::new(queries::OPEN_PROJECTS))?;

        edges(&data, "/openProjects/edges")?
            .iter()
            .map(|edge| -> Result<Project> {
                Ok(project_node(field(edge, "/node")?)?.into_project(None))
            })
            .collect()
    }

    /// Fetches one project; `None` when no node has this id.
    ///
    /// # Errors
    ///
    /// Same as [`user_projects`](Self::user_projects).
    pub fn project(&self, id: &str) -> Result<Option<Project>> {
        let request = GraphQlRequest::new(queries::PROJECT).with_variables(json!({ "id": id }));
        let data = self.execute(&request)?;

        match data.get("node") {
            None | Some(Value::Null) => Ok(None),
            Some(node) => Ok(Some(project_node(node)?.into_project(None))),
        }
    }

    /// Creates a project named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the mutation reports an error, plus the
    /// errors of [`user_projects`](Self::user_projects).
    pub fn create_project(&self, name: &str, meta: &ProjectMeta) -> Result<Project> {
        #[derive(Serialize)]
        struct Input<'a> {
            name: &'a str,
            #[serde(flatten)]
            meta: &'a ProjectMeta,
        }

        let input = serde_json::to_value(Input { name, meta })?;
        let request = GraphQlRequest::new(queries::CREATE_PROJECT)
            .with_operation("CreateProject")
            .with_variables(json!({ "input": input }));
        let data = self.execute(&request)?;

        let created = mutation_result(&data, "createProject")?;
        let project = project_node(field(created, "/ok")?)?.into_project(None);
        tracing::info!(id = ?project.id, name = %project.name, "created project");
        Ok(project)
    }

    /// Files stored in `project`.
    ///
    /// With [`FetchPolicy::UseCache`], a list fetched earlier for this
    /// project is returned without a request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for a project without an id, plus the
    /// errors of [`user_projects`](Self::user_projects).
    pub fn project_files<'p>(
        &self,
        project: &'p mut Project,
        policy: FetchPolicy,
    ) -> Result<&'p [ProjectFile]> {
        if policy == FetchPolicy::Refresh || project.files.is_none() {
            let id = project.id.clone().ok_or_else(|| {
                Error::Configuration(format!("project {:?} has no id", project.name))
            })?;
            project.files = Some(self.fetch_files(&id)?);
        }
        Ok(project.files.as_deref().unwrap_or_default())
    }

    /// Deletes one file from its project.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the mutation reports an error.
    pub fn delete_file(&self, file: &ProjectFile) -> Result<()> {
        let request = GraphQlRequest::new(queries::DELETE_FILE)
            .with_operation("DeleteFile")
            .with_variables(json!({
                "input": {
                    "fileName": file.name,
                    "projectId": file.project_id,
                }
            }));
        let data = self.execute(&request)?;
        mutation_result(&data, "deleteFile")?;

        tracing::info!(project = %file.project_id, file = %file.name, "deleted file");
        Ok(())
    }

    /// Uploads `paths` to a project, one at a time.
    ///
    /// Each file gets a pre-signed URI from the platform and is then PUT to
    /// it under its base name.
    ///
    /// # Errors
    ///
    /// Stops at the first failing file. Files uploaded before it stay
    /// uploaded.
    pub fn upload_files<P: AsRef<Path>>(&self, project_id: &str, paths: &[P]) -> Result<()> {
        for path in paths {
            let path = path.as_ref();
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| {
                    Error::Configuration(format!("not an uploadable file: {}", path.display()))
                })?;

            let request = GraphQlRequest::new(queries::CREATE_FILE_UPLOAD_URI)
                .with_operation("CreateFileUploadUri")
                .with_variables(json!({
                    "input": {
                        "fileName": file_name,
                        "projectId": project_id,
                    }
                }));
            let data = self.execute(&request)?;
            let uri = mutation_result(&data, "createFileUploadUri")?
                .pointer("/ok/uri")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    Error::UnexpectedResponse("createFileUploadUri returned no uri".into())
                })?;

            self.transport.put_file(uri, path)?;
            tracing::info!(project = project_id, file = file_name, "uploaded file");
        }
        Ok(())
    }

    fn fetch_files(&self, project_id: &str) -> Result<Vec<ProjectFile>> {
        #[derive(Deserialize)]
        struct FileNode {
            name: String,
        }

        let request =
            GraphQlRequest::new(queries::PROJECT_FILES).with_variables(json!({ "id": project_id }));
        let data = self.execute(&request)?;
        let files = field(&data, "/node/files")?;

        let nodes = Vec::<FileNode>::deserialize(files)
            .map_err(|e| Error::UnexpectedResponse(format!("bad files list: {e}")))?;
        Ok(nodes
            .into_iter()
            .map(|node| ProjectFile {
                project_id: project_id.to_string(),
                name: node.name,
            })
            .collect())
    }

    /// Posts `request` and returns its `data` object.
    fn execute(&self, request: &GraphQlRequest) -> Result<Value> {
        let mut response = self.transport.post(self.config.token(), request)?;

        if let Some(errors) = response.get("errors") {
            return Err(Error::api(error_messages(errors)));
        }

        match response.get_mut("data").map(Value::take) {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(Error::UnexpectedResponse("response has no data".into())),
        }
    }
}

fn error_messages(errors: &Value) -> Vec<String> {
    match errors {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.get("message")
                    .and_then(Value::as_str)
                    .map_or_else(|| item.to_string(), ToString::to_string)
            })
            .collect(),
        other => vec![other.to_string()],
    }
}

fn field<'a>(value: &'a Value, pointer: &str) -> Result<&'a Value> {
    value
        .pointer(pointer)
        .filter(|v| !v.is_null())
        .ok_or_else(|| Error::UnexpectedResponse(format!("missing {pointer}")))
}

fn edges<'a>(data: &'a Value, pointer: &str) -> Result<&'a Vec<Value>> {
    field(data, pointer)?
        .as_array()
        .ok_or_else(|| Error::UnexpectedResponse(format!("{pointer} is not a list")))
}

fn project_node(node: &Value) -> Result<ProjectNode> {
    ProjectNode::deserialize(node)
        .map_err(|e| Error::UnexpectedResponse(format!("bad project node: {e}")))
}

/// Returns the payload of mutation `name`, raising its `err` field.
fn mutation_result<'a>(data: &'a Value, name: &str) -> Result<&'a Value> {
    let payload = field(data, &format!("/{name}"))?;
    match payload.get("err") {
        None | Some(Value::Null) => Ok(payload),
        Some(Value::String(message)) => Err(Error::api([message.as_str()])),
        Some(other) => Err(Error::api([other.to_string()])),
    }
}
