use url::form_urlencoded;

/// What the authorization server handed back in the page's query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectCapture {
    Token(String),
    Error(String),
    /// `token` or `message` was present but empty.
    Blank,
}

impl RedirectCapture {
    /// Reads `token` (preferred) or `message` from a query string. The
    /// leading `?` is optional and empty values are ignored.
    pub fn parse(query: &str) -> Option<Self> {
        let query = query.trim_start_matches('?');
        let mut token = None;
        let mut message = None;
        let mut blank = false;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "token" => &mut token,
                "message" => &mut message,
                _ => continue,
            };

            if value.is_empty() {
                blank = true;
            } else if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        token
            .map(RedirectCapture::Token)
            .or_else(|| message.map(RedirectCapture::Error))
            .or(blank.then_some(RedirectCapture::Blank))
    }
}
