use actix_web::HttpResponse;
use serde::Serialize;
use tracing::warn;

/// JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: None,
        }
    }
}

/// Creates a configured JsonConfig with standardized error handling for the entire project
///
/// Rule violations report each offending field; missing fields, wrong JSON
/// types and unreadable payloads report the deserializer's message. All are 400.
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default()
        .error_handler(|err, _req| {
            let error_response = match err {
                actix_web_validator::Error::Validate(validation_errors) => {
                    let mut fields = serde_json::Map::new();
                    for (field, errors) in validation_errors.field_errors() {
                        let messages: Vec<String> = errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| format!("Validation error in field: {}", field))
                            })
                            .collect();
                        fields.insert(
                            field.to_string(),
                            serde_json::json!({"errors": messages})
                        );
                    }

                    ErrorResponse {
                        message: "Validation failed".to_string(),
                        fields: Some(serde_json::Value::Object(fields)),
                    }
                }
                other => ErrorResponse::message(format!("Invalid request body: {}", other)),
            };

            warn!("Rejected request body: {}", error_response.message);
            actix_web::error::InternalError::from_response(
                "",
                HttpResponse::BadRequest().json(error_response)
            ).into()
        })
}
