use crate::errors::SchemaError;
use crate::violation::SchemaViolation;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// A directory of `<name>.json` schema documents
#[derive(Debug, Clone)]
pub struct SchemaStore {
    dir: PathBuf,
}

impl SchemaStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SchemaStore { dir: dir.into() }
    }

    /// The schemas shipped with this crate
    pub fn bundled() -> Self {
        SchemaStore::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schemas"))
    }

    pub fn schema_path(&self, schema_name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", schema_name))
    }

    /// Read and parse a schema document
    pub fn load_schema(&self, schema_name: &str) -> Result<Value, SchemaError> {
        let path = self.schema_path(schema_name);
        let is_plain_name = !schema_name.is_empty()
            && !schema_name.contains(['/', '\\'])
            && schema_name != ".."
            && schema_name != ".";
        if !is_plain_name || !path.is_file() {
            return Err(SchemaError::NotFound {
                name: schema_name.to_string(),
                path,
            });
        }

        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|source| SchemaError::Parse {
            name: schema_name.to_string(),
            source,
        })
    }

    /// Every violation of `schema_name` by `object`, ordered by path.
    ///
    /// Violations sharing a path keep the order the validator reported them in.
    pub fn violations(
        &self,
        object: &Value,
        schema_name: &str,
    ) -> Result<Vec<SchemaViolation>, SchemaError> {
        let schema = self.load_schema(schema_name)?;

        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema)
            .map_err(|e| SchemaError::InvalidSchema {
                name: schema_name.to_string(),
                message: e.to_string(),
            })?;

        let mut violations: Vec<SchemaViolation> = match compiled.validate(object) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| {
                    SchemaViolation::from_pointer(&error.instance_path.to_string(), error.to_string())
                })
                .collect(),
        };
        violations.sort_by(|a, b| a.path.cmp(&b.path));

        debug!(
            "Validated against schema {}: {} violation(s)",
            schema_name,
            violations.len()
        );
        Ok(violations)
    }

    /// Formatted violations; empty when `object` conforms
    pub fn validate(&self, object: &Value, schema_name: &str) -> Result<Vec<String>, SchemaError> {
        Ok(self
            .violations(object, schema_name)?
            .iter()
            .map(ToString::to_string)
            .collect())
    }
}

/// Validate against one of the bundled schemas
pub fn validate_object(object: &Value, schema_name: &str) -> Result<Vec<String>, SchemaError> {
    SchemaStore::bundled().validate(object, schema_name)
}
