use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use crate::error::AppError;

/// Unique constraints the schema declares, mapped to (entity, field).
const UNIQUE_CONSTRAINTS: &[(&str, &str, &str)] = &[("users_email_key", "user", "email")];

/// Converts diesel errors into structured `AppError` variants.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        match kind {
            DatabaseErrorKind::UniqueViolation => {
                let known = info.constraint_name().and_then(|name| {
                    UNIQUE_CONSTRAINTS
                        .iter()
                        .find(|(constraint, _, _)| *constraint == name)
                });

                match known {
                    Some((_, entity, field)) => AppError::Duplicate {
                        entity: entity.to_string(),
                        field: field.to_string(),
                        value: info
                            .details()
                            .and_then(Self::detail_value)
                            .unwrap_or_default(),
                    },
                    None => AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::anyhow!("Unique constraint violation: {}", info.message()),
                    },
                }
            }
            DatabaseErrorKind::ForeignKeyViolation | DatabaseErrorKind::CheckViolation => {
                AppError::Validation {
                    field: info
                        .column_name()
                        .or(info.constraint_name())
                        .unwrap_or("unknown")
                        .to_string(),
                    reason: info.message().to_string(),
                }
            }
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::anyhow!("Database error: {}", info.message()),
            },
        }
    }

    /// Extract `value` from Postgres details like `Key (email)=(value) already exists.`
    fn detail_value(details: &str) -> Option<String> {
        let start = details.find(")=(")? + 3;
        let end = details[start..].rfind(')')? + start;
        Some(details[start..end].to_string())
    }
}
