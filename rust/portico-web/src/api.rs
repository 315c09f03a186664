use leptos::window;
use portico_core::{CoreError, Endpoints, UserProfile};
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Headers, Request, RequestInit, RequestMode, Response};

#[derive(Deserialize, Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

fn js_error(value: JsValue) -> CoreError {
    CoreError::Network(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

fn authorized_request(
    method: &str,
    url: &str,
    token: &str,
    body: Option<&JsValue>,
) -> Result<Request, CoreError> {
    let headers = Headers::new().map_err(js_error)?;
    headers
        .set("Authorization", &format!("Bearer {}", token))
        .map_err(js_error)?;

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    opts.set_headers(&headers);
    if let Some(body) = body {
        opts.set_body(body);
    }

    Request::new_with_str_and_init(url, &opts).map_err(js_error)
}

async fn send(request: Request) -> Result<Response, CoreError> {
    let value = JsFuture::from(window().fetch_with_request(&request))
        .await
        .map_err(js_error)?;

    value.dyn_into::<Response>().map_err(js_error)
}

async fn read_json<T>(response: &Response) -> Result<T, CoreError>
where
    T: for<'de> Deserialize<'de>,
{
    let json = JsFuture::from(response.json().map_err(js_error)?)
        .await
        .map_err(js_error)?;

    serde_wasm_bindgen::from_value(json)
        .map_err(|error| CoreError::Network(format!("Failed to deserialize JSON: {}", error)))
}

async fn get_json<T>(url: &str, token: &str) -> Result<T, CoreError>
where
    T: for<'de> Deserialize<'de>,
{
    let response = send(authorized_request("GET", url, token, None)?).await?;

    if !response.ok() {
        return Err(CoreError::Network(format!(
            "{} responded with {}",
            url,
            response.status()
        )));
    }

    read_json(&response).await
}

pub async fn fetch_profile(endpoints: &Endpoints, token: &str) -> Result<UserProfile, CoreError> {
    let profile: UserProfile = get_json(&endpoints.profile(), token).await?;
    debug!("Loaded profile for {}", profile.email);
    Ok(profile)
}

pub async fn access_secure(endpoints: &Endpoints, token: &str) -> Result<String, CoreError> {
    let response: MessageResponse = get_json(&endpoints.secure(), token).await?;
    Ok(response.message)
}

/// Sends `file` as the `file` field of a multipart form. A rejection that
/// carries a `{message}` body is reported verbatim.
pub async fn upload_document(endpoints: &Endpoints, token: &str, file: File) -> Result<(), CoreError> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("file", &file, &file.name())
        .map_err(js_error)?;

    let body: &JsValue = form.as_ref();
    let response = send(authorized_request("POST", &endpoints.upload(), token, Some(body))?).await?;

    if response.ok() {
        info!("Uploaded {}", file.name());
        return Ok(());
    }

    match read_json::<MessageResponse>(&response).await {
        Ok(body) => Err(CoreError::UploadRejected(body.message)),
        Err(_) => Err(CoreError::Network(format!(
            "Upload responded with {}",
            response.status()
        ))),
    }
}
