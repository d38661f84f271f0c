use gailou_client::api::Error as ApiError;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] pub ApiError);

impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let Error(err) = self;
        match &err {
            ApiError::Unknown(_) => tracing::error!("returning error to client: {err}"),
            _ => tracing::info!("returning error to client: {err}"),
        }
        (
            err.status_code(),
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            err.contents(),
        )
            .into_response()
    }
}
