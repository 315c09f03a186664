use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    generate_oauth_state, oauth_state_cookie, primary_verified_email, PorticoState,
    OAUTH_STATE_COOKIE,
};

const INVALID_STATE: &str = "Invalid OAuth state";

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CallbackQuery {
    /// Authorization code issued by GitHub
    pub code: Option<String>,
    /// The state handed out by `/auth/github`
    pub state: Option<String>,
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

#[utoipa::path(
  get,
  path = "/auth/github",
  responses(
    (status = 302, description = "Redirect to the GitHub authorization page")
  )
)]
pub async fn github_login(State(state): State<PorticoState>, jar: CookieJar) -> (CookieJar, Response) {
    let oauth_state = generate_oauth_state();
    let location = state.identity.authorize_url(&oauth_state);

    debug!("Redirecting to {}", location);

    (jar.add(oauth_state_cookie(oauth_state)), found(&location))
}

#[utoipa::path(
  get,
  path = "/auth/github/callback",
  params(CallbackQuery),
  responses(
    (status = 302, description = "Redirect to the frontend with either `token` or `message`")
  )
)]
pub async fn github_callback(
    State(state): State<PorticoState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> (CookieJar, Response) {
    let expected_state = jar
        .get(OAUTH_STATE_COOKIE)
        .map(|cookie| cookie.value().to_string());
    let jar = jar.remove(Cookie::build(OAUTH_STATE_COOKIE).path("/auth"));

    let location = match complete_login(&state, expected_state, query).await {
        Ok(token) => state
            .config
            .frontend_page("login-success", &[("token", token.as_str())]),
        Err(message) => {
            warn!("Login rejected: {}", message);
            state
                .config
                .frontend_page("login-error", &[("message", message.as_str())])
        }
    };

    (jar, found(&location))
}

async fn complete_login(
    state: &PorticoState,
    expected_state: Option<String>,
    query: CallbackQuery,
) -> Result<String, String> {
    match (expected_state, query.state) {
        (Some(expected), Some(received)) if expected == received => (),
        _ => return Err(INVALID_STATE.into()),
    }

    let code = query
        .code
        .ok_or_else(|| String::from("OAuth exchange failed"))?;

    let emails = state
        .identity
        .account_emails(&code)
        .await
        .map_err(|failure| failure.message().to_string())?;

    let domain = &state.config.allowed_domain;
    let email = primary_verified_email(&emails)
        .filter(|email| email.ends_with(&format!("@{}", domain)))
        .ok_or_else(|| format!("Access restricted to @{} users", domain))?;

    info!("Issuing session token for {}", email);

    state
        .keys
        .issue(email)
        .map_err(|error| format!("{}", error))
}
