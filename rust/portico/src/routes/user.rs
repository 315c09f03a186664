use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{AuthenticatedUser, MessageResponse};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UserInfoResponse {
    pub email: String,
}

impl IntoResponse for UserInfoResponse {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SecureResponse {
    pub message: String,
    pub email: String,
}

impl IntoResponse for SecureResponse {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

#[utoipa::path(
  get,
  path = "/ping",
  responses(
    (status = 200, description = "The service is up", body = MessageResponse)
  )
)]
pub async fn ping() -> MessageResponse {
    MessageResponse {
        message: "pong".into(),
    }
}

#[utoipa::path(
  get,
  path = "/secure",
  responses(
    (status = 200, description = "The bearer token is valid", body = SecureResponse),
    (status = 401, description = "Missing or invalid token", body = ErrorResponse)
  ),
  security(("bearer" = []))
)]
pub async fn secure_route(user: AuthenticatedUser) -> SecureResponse {
    SecureResponse {
        message: "Welcome!".into(),
        email: user.email,
    }
}

#[utoipa::path(
  get,
  path = "/user",
  responses(
    (status = 200, description = "The logged in user", body = UserInfoResponse),
    (status = 401, description = "Missing or invalid token", body = ErrorResponse)
  ),
  security(("bearer" = []))
)]
pub async fn user_info(user: AuthenticatedUser) -> UserInfoResponse {
    UserInfoResponse { email: user.email }
}
