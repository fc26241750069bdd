//! Central schema registry for all text2odp types.
//!
//! The `SchemaRegistry` builds JSON Schemas from odp-core types at construction
//! time using [`schemars::schema_for!`] and provides validation via `jsonschema`.

use std::collections::HashMap;

use odp_core::enums::Stage;
use schemars::schema_for;
use serde::de::DeserializeOwned;

use crate::error::SchemaError;

/// Central store of all JSON Schemas in text2odp.
///
/// Stage outputs are registered under their [`Stage`] name (`scenario`,
/// `graph`, `odp`); persisted records under their snake-case type name.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a registry containing the three stage-output schemas and the
    /// persisted record schemas.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on any `schemars`-generated
    /// schema, which `schemars` output never does.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Stage outputs (3) ---
        register!(
            schemas,
            Stage::Scenario.as_str(),
            odp_core::entities::ScenarioAndCqs
        );
        register!(
            schemas,
            Stage::Graph.as_str(),
            odp_core::entities::ConceptRelationGraph
        );
        register!(schemas, Stage::Odp.as_str(), odp_core::entities::OdpArtifact);

        // --- Persisted records (4) ---
        register!(schemas, "paper", odp_core::entities::PaperRecord);
        register!(schemas, "evaluation", odp_core::entities::EvaluationResult);
        register!(
            schemas,
            "artifact_record",
            odp_core::entities::ArtifactRecord
        );
        register!(schemas, "paper_failure", odp_core::entities::PaperFailure);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                schema: name.to_string(),
                errors,
            })
        }
    }

    /// Validate `instance` against `name`, then deserialize it into `T`.
    ///
    /// # Errors
    ///
    /// Any error from [`Self::validate`], or `SchemaError::Deserialize` if
    /// the validated value still does not fit `T`.
    pub fn parse<T: DeserializeOwned>(
        &self,
        name: &str,
        instance: serde_json::Value,
    ) -> Result<T, SchemaError> {
        self.validate(name, &instance)?;
        serde_json::from_value(instance).map_err(|source| SchemaError::Deserialize {
            schema: name.to_string(),
            source,
        })
    }

    /// Validate and deserialize the output of a generation stage.
    ///
    /// # Errors
    ///
    /// Same as [`Self::parse`].
    pub fn parse_stage<T: DeserializeOwned>(
        &self,
        stage: Stage,
        instance: serde_json::Value,
    ) -> Result<T, SchemaError> {
        self.parse(stage.as_str(), instance)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
