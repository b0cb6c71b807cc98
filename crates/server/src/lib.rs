use api_types::response::ErrorMessage;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use engine::EngineError;
use sea_orm::DbErr;

pub use server::{ServerState, router, run_with_listener};

mod expenses;
mod server;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{DailyExpenseQuery, ExpenseNew, ExpenseUpdate, ExpenseView};
    }

    pub mod response {
        pub use api_types::response::{ErrorMessage, Message, MessageWithData};
    }
}

pub enum ServerError {
    Engine(EngineError),
    /// A store failure with the message shown to the client.
    Store(&'static str, DbErr),
    MalformedBody(String),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidId(_)
        | EngineError::InvalidName(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidDate(_) => StatusCode::BAD_REQUEST,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => {
            if other.is_validation() {
                tracing::debug!("rejected request: {other}");
            }
            other.to_string()
        }
    }
}

/// Attach a client-facing message to store failures, leaving other errors as they are.
pub(crate) fn store_failure(message: &'static str) -> impl FnOnce(EngineError) -> ServerError {
    move |err| match err {
        EngineError::Database(db_err) => ServerError::Store(message, db_err),
        other => ServerError::Engine(other),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            ServerError::Engine(err) => (
                status_for_engine_error(&err),
                message_for_engine_error(err),
                None,
            ),
            ServerError::Store(message, db_err) => {
                tracing::error!("database error: {db_err}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string(), None)
            }
            ServerError::MalformedBody(detail) => {
                tracing::debug!("malformed body: {detail}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Invalid input".to_string(),
                    Some(detail),
                )
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err, None),
        };

        (status, Json(ErrorMessage { message, error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::MalformedBody(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_400() {
        for err in [
            EngineError::InvalidId("x".to_string()),
            EngineError::InvalidName("x".to_string()),
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InvalidDate("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn engine_database_maps_to_500() {
        let err = EngineError::Database(DbErr::Custom("boom".to_string()));
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_failure_keeps_non_database_errors() {
        let err = store_failure("Could not create expense")(EngineError::KeyNotFound(
            "x".to_string(),
        ));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = store_failure("Could not create expense")(EngineError::Database(
            DbErr::Custom("boom".to_string()),
        ));
        assert!(matches!(err, ServerError::Store("Could not create expense", _)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn malformed_body_maps_to_422() {
        let res = ServerError::MalformedBody("bad json".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
