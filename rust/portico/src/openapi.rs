use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use crate::{
    routes::{SecureResponse, UploadRequest, UserInfoResponse},
    ErrorResponse, MessageResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::ping,
        crate::routes::github_login,
        crate::routes::github_callback,
        crate::routes::secure_route,
        crate::routes::user_info,
        crate::routes::upload_document,
        crate::routes::serve_document
    ),
    components(
        schemas(ErrorResponse),
        schemas(MessageResponse),
        schemas(SecureResponse),
        schemas(UserInfoResponse),
        schemas(UploadRequest)
    ),
    modifiers(&BearerScheme)
)]
pub struct OpenApiDocs;

/// Registers the `bearer` scheme the authenticated routes refer to.
struct BearerScheme;

impl Modify for BearerScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
