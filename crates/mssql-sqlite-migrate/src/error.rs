//! Error types for the conversion library.

use thiserror::Error;

/// Main error type for conversion operations.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema extraction produced an inconsistent table description
    #[error("Schema extraction failed: {0}")]
    SchemaExtraction(String),

    /// Source type token outside the supported vocabulary.
    ///
    /// Fatal: schema translation cannot proceed without a type mapping,
    /// and a silent fallback would corrupt the target schema.
    #[error("Unsupported source data type [{type_name}]")]
    UnsupportedType { type_name: String },

    /// A value could not be coerced into its target category.
    ///
    /// Scoped to a single row; the remaining rows of the table continue.
    #[error("Unsupported value coercion for column [{column}]: {detail}")]
    UnsupportedCoercion { column: String, detail: String },

    /// No valid insertion order exists for the schema's foreign keys.
    #[error("Cyclic foreign key dependency, tables left unplaced: {}", tables.join(", "))]
    CyclicDependency { tables: Vec<String> },

    /// Index metadata from the source catalog did not parse.
    ///
    /// The affected index is skipped; table creation proceeds without it.
    #[error("Malformed key descriptor [{part}] in index [{index}]")]
    MalformedIndexDescriptor { index: String, part: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl MigrateError {
    /// Create an UnsupportedType error for the given type token.
    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        MigrateError::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    /// Create an UnsupportedCoercion error with column context.
    pub fn unsupported_coercion(column: impl Into<String>, detail: impl Into<String>) -> Self {
        MigrateError::UnsupportedCoercion {
            column: column.into(),
            detail: detail.into(),
        }
    }

    /// Create a MalformedIndexDescriptor error.
    pub fn malformed_index(index: impl Into<String>, part: impl Into<String>) -> Self {
        MigrateError::MalformedIndexDescriptor {
            index: index.into(),
            part: part.into(),
        }
    }

    /// Whether this error aborts the whole conversion run.
    ///
    /// Per-row coercion failures and unparseable indexes are recoverable;
    /// everything structural is not.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            MigrateError::UnsupportedCoercion { .. } | MigrateError::MalformedIndexDescriptor { .. }
        )
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        // Add error chain for wrapped errors
        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
