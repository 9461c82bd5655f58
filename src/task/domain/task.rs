//! Task record and its validated field set.

use super::{TaskId, TaskValidationError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const NAME: &str = "name";
const DESCRIPTION: &str = "description";
const STATUS: &str = "status";

/// Validated mutable fields of a task, not yet bound to a stored document.
///
/// This is the only way task data reaches a store adapter: the store itself
/// accepts any document shape, so the shape is enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaskFields {
    name: String,
    description: Option<String>,
    status: String,
}

impl TaskFields {
    /// Creates a validated field set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::EmptyName`] when the name is empty after
    /// trimming.
    pub fn new(
        name: impl Into<String>,
        status: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        let label: String = name.into();
        if label.trim().is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        Ok(Self {
            name: label,
            description: None,
            status: status.into(),
        })
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builds a field set from an untyped JSON object.
    ///
    /// `name` and `status` must be strings, `description` must be a string or
    /// absent/`null`. Any other keys, including `_id`, are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] when a required field is missing, a
    /// field has the wrong type, or the name is empty.
    pub fn from_mapping(fields: &Map<String, Value>) -> Result<Self, TaskValidationError> {
        let name = required_string(fields, NAME)?;
        let status = required_string(fields, STATUS)?;
        let description = optional_string(fields, DESCRIPTION)?;

        let validated = Self::new(name, status)?;
        Ok(match description {
            Some(text) => validated.with_description(text),
            None => validated,
        })
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the task status.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Renders the fields as a store document. An absent description is
    /// written as an explicit `null` so updates overwrite it.
    #[must_use]
    pub fn to_document(&self) -> Map<String, Value> {
        let mut document = Map::new();
        document.insert(NAME.to_owned(), Value::String(self.name.clone()));
        document.insert(
            DESCRIPTION.to_owned(),
            self.description.clone().map_or(Value::Null, Value::String),
        );
        document.insert(STATUS.to_owned(), Value::String(self.status.clone()));
        document
    }
}

fn required_string(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<String, TaskValidationError> {
    optional_string(fields, field)?.ok_or(TaskValidationError::MissingField(field))
}

fn optional_string(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, TaskValidationError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(TaskValidationError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

/// A persisted task document with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Task {
    #[serde(rename = "_id")]
    id: TaskId,
    name: String,
    description: Option<String>,
    status: String,
}

impl Task {
    /// Binds validated fields to a stored identifier.
    #[must_use]
    pub fn new(id: TaskId, fields: TaskFields) -> Self {
        let TaskFields {
            name,
            description,
            status,
        } = fields;
        Self {
            id,
            name,
            description,
            status,
        }
    }

    /// Reconstructs a task from a stored document.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] when the document no longer carries
    /// the required task fields.
    pub fn from_document(
        id: TaskId,
        document: &Map<String, Value>,
    ) -> Result<Self, TaskValidationError> {
        TaskFields::from_mapping(document).map(|fields| Self::new(id, fields))
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the task status.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the mutable fields of this task.
    #[must_use]
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
        }
    }
}
