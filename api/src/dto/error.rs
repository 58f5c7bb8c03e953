use actix_web::http::StatusCode;
use ns_core::errors::ValidationError;
pub use ns_shared::errors::ErrorResponse;

// Extension trait for ErrorResponse to add actix-web specific methods
pub trait ErrorResponseExt {
    fn to_response(&self, status: StatusCode) -> actix_web::HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self, status: StatusCode) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(status).json(self)
    }
}

/// Fold `validator` derive failures into the domain's field list
///
/// Fields are reported in name order so responses are stable.
pub fn into_validation_error(errors: validator::ValidationErrors) -> ValidationError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                (field.clone(), message)
            })
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut error = ValidationError::default();
    for (field, message) in fields {
        error.push(field, message);
    }
    error
}
