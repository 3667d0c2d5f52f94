//! The fixed providers schema
//!
//! Every document is checked against this schema as a whole before any
//! entry is interpreted, so a structurally invalid document is never
//! partially accepted.

use std::path::Path;

use jsonschema::Validator;
use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::{Error, Result};

/// Raw JSON Schema for providers documents.
pub const PROVIDERS_SCHEMA: &str = include_str!("../schema/providers.schema.json");

static VALIDATOR: OnceCell<Validator> = OnceCell::new();

fn validator() -> Result<&'static Validator> {
    VALIDATOR.get_or_try_init(|| {
        let schema: Value = serde_json::from_str(PROVIDERS_SCHEMA).map_err(|e| Error::Schema {
            message: e.to_string(),
        })?;
        jsonschema::validator_for(&schema).map_err(|e| Error::Schema {
            message: e.to_string(),
        })
    })
}

/// Collect every schema violation in `document`.
///
/// Returns an empty list when the document conforms.
pub fn violations(document: &Value) -> Result<Vec<String>> {
    let validator = validator()?;
    Ok(validator
        .iter_errors(document)
        .map(|error| error.to_string())
        .collect())
}

/// Validate a document read from `path`, failing with every violation found.
pub fn validate(path: &Path, document: &Value) -> Result<()> {
    let violations = violations(document)?;
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::SchemaViolation {
            path: path.to_path_buf(),
            violations,
        })
    }
}
