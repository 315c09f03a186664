use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Serves the built web application. Unknown paths get `index.html` so the
/// login redirects (`/login-success`, `/login-error`) land in the app.
pub fn ui_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}
