use axum::http::StatusCode;
use serde::Serialize;
use validator::{Validate, ValidationErrors};

/// Body of a 422 response
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub field_errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct FieldError {
    /// Wire (camelCase) name, or `body` for struct-level rules
    pub field: String,
    pub message: String,
}

impl From<ValidationErrors> for ValidationErrorResponse {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let field = wire_name(&field);
                errors.iter().map(move |error| FieldError {
                    field: field.clone(),
                    message: error
                        .message
                        .as_ref()
                        .map(|cow| cow.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field)),
                })
            })
            .collect();
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        let summary = field_errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            error: summary,
            field_errors,
        }
    }
}

fn wire_name(field: &str) -> String {
    if field == "__all__" {
        return "body".to_string();
    }

    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

/// Run the payload's `validator` rules, turning failures into a 422 body
pub fn validate_and_respond<T>(payload: &T) -> Result<(), (StatusCode, ValidationErrorResponse)>
where
    T: Validate,
{
    payload.validate().map_err(|errors| {
        tracing::warn!(%errors, "Request body failed validation");
        (StatusCode::UNPROCESSABLE_ENTITY, errors.into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{CreateCompanyRequest, UpdateJobRequest};

    #[test]
    fn test_valid_payload_passes() {
        let request = CreateCompanyRequest {
            handle: "c1".to_string(),
            name: "C1".to_string(),
            description: "Desc1".to_string(),
            num_employees: Some(1),
            logo_url: None,
        };

        assert!(validate_and_respond(&request).is_ok());
    }

    #[test]
    fn test_invalid_payload_lists_wire_fields() {
        let request = CreateCompanyRequest {
            handle: "bad handle".to_string(),
            name: String::new(),
            description: "Desc1".to_string(),
            num_employees: Some(-1),
            logo_url: None,
        };

        let (status, response) = validate_and_respond(&request).unwrap_err();

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields: Vec<_> = response
            .field_errors
            .iter()
            .map(|e| e.field.as_str())
            .collect();
        assert_eq!(fields, vec!["handle", "name", "numEmployees"]);
        assert!(response.error.contains("name cannot be empty"));
    }

    #[test]
    fn test_struct_level_rule_reported_against_body() {
        let patch = UpdateJobRequest {
            salary: Some(Some(-5)),
            ..Default::default()
        };

        let (_, response) = validate_and_respond(&patch).unwrap_err();

        assert_eq!(response.field_errors.len(), 1);
        assert_eq!(response.field_errors[0].field, "body");
        assert_eq!(response.error, "salary cannot be negative");
    }

    #[test]
    fn test_wire_name() {
        assert_eq!(wire_name("logo_url"), "logoUrl");
        assert_eq!(wire_name("handle"), "handle");
        assert_eq!(wire_name("__all__"), "body");
    }
}
