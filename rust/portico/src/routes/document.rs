use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
};
use utoipa::ToSchema;

use crate::{
    AuthenticatedUser, DocumentStorage, MessageResponse, PorticoError, PorticoState,
    DOCUMENT_FILE_NAME,
};

#[derive(ToSchema)]
/// A `multipart/form-data` payload with the new API description in `file`
pub struct UploadRequest {
    pub file: Vec<u8>,
}

#[utoipa::path(
  post,
  path = "/upload",
  request_body(content = UploadRequest, content_type = "multipart/form-data"),
  responses(
    (status = 200, description = "The API description was replaced", body = MessageResponse),
    (status = 400, description = "No file in the request", body = MessageResponse),
    (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    (status = 500, description = "The file could not be stored", body = MessageResponse)
  ),
  security(("bearer" = []))
)]
pub async fn upload_document(
    State(PorticoState { documents, .. }): State<PorticoState>,
    user: AuthenticatedUser,
    mut form_data: Multipart,
) -> Result<MessageResponse, PorticoError> {
    while let Some(field) = form_data.next_field().await? {
        let name = field.name().map(String::from);

        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("unnamed").to_string();
                let contents = field.bytes().await?;

                documents.replace(contents).await?;
                info!("{} replaced the API description with {}", user.email, file_name);

                return Ok(MessageResponse {
                    message: "File uploaded successfully".into(),
                });
            }
            Some(name) => warn!("Unexpected multipart content: {name}"),
            _ => warn!("Skipping unnamed multipart content"),
        }
    }

    Err(PorticoError::NoFileUploaded)
}

#[utoipa::path(
  get,
  path = "/swagger.yaml",
  params(
    ("v" = Option<String>, Query, description = "Cache-busting marker; ignored")
  ),
  responses(
    (status = 200, description = "The current API description", body = String, content_type = "application/yaml"),
    (status = 404, description = "Nothing has been uploaded yet", body = ErrorResponse)
  )
)]
pub async fn serve_document(
    State(PorticoState { documents, .. }): State<PorticoState>,
) -> Result<impl IntoResponse, PorticoError> {
    let contents = documents
        .read()
        .await?
        .ok_or(PorticoError::DocumentNotFound)?;
    let mime = mime_guess::from_path(DOCUMENT_FILE_NAME).first_or_octet_stream();

    Ok((
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CACHE_CONTROL,
                "no-cache, no-store, must-revalidate".to_string(),
            ),
            (header::PRAGMA, "no-cache".to_string()),
            (header::EXPIRES, "0".to_string()),
        ],
        contents,
    ))
}
