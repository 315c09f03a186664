use serde::{Deserialize, Serialize};

use crate::{check_token, Clock, CoreError, Endpoints, RedirectCapture, TokenStore};

pub const SECURE_ROUTE_DENIED: &str = "Access Denied";
pub const UPLOAD_FAILED: &str = "Upload failed";

/// Tags an outbound request so that only the newest response of each kind
/// is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileState {
    Loading(RequestId),
    Ready(UserProfile),
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn {
        token: String,
        profile: ProfileState,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The page loaded with the given query string.
    Started { query: String },
    LoginRequested,
    LogoutRequested,
    ProfileResolved {
        request: RequestId,
        result: Result<UserProfile, CoreError>,
    },
    SecureRequested,
    SecureResolved {
        request: RequestId,
        result: Result<String, CoreError>,
    },
    UploadRequested { file_selected: bool },
    UploadResolved {
        request: RequestId,
        result: Result<(), CoreError>,
    },
    NoticeDismissed,
}

/// Work the host has to carry out on behalf of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Swap the visible URL without navigating.
    ReplaceUrl(String),
    /// Leave the application for another page.
    Navigate(String),
    FetchProfile { request: RequestId, token: String },
    FetchSecure { request: RequestId, token: String },
    /// Send the selected file to the upload endpoint.
    Upload { request: RequestId, token: String },
    ReloadViewer { url: String },
    ResetFileInput,
    Alert(String),
}

/// The login session of one browser tab.
///
/// All changes go through [Session::apply], which returns the side effects
/// the host must perform. Token and profile are always updated together.
pub struct Session<S, C> {
    store: S,
    clock: C,
    endpoints: Endpoints,
    state: SessionState,
    notice: Option<String>,
    viewer_version: u64,
    next_request: u64,
    pending_secure: Option<RequestId>,
    pending_upload: Option<RequestId>,
    started: bool,
}

impl<S, C> Session<S, C>
where
    S: TokenStore,
    C: Clock,
{
    pub fn new(store: S, clock: C, endpoints: Endpoints) -> Self {
        Session {
            store,
            clock,
            endpoints,
            state: SessionState::LoggedOut,
            notice: None,
            viewer_version: 0,
            next_request: 0,
            pending_secure: None,
            pending_upload: None,
            started: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            SessionState::LoggedIn { token, .. } => Some(token),
            SessionState::LoggedOut => None,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match &self.state {
            SessionState::LoggedIn {
                profile: ProfileState::Ready(profile),
                ..
            } => Some(profile),
            _ => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// The login error reported by the authorization server, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn viewer_version(&self) -> u64 {
        self.viewer_version
    }

    pub fn document_url(&self) -> String {
        self.endpoints.document(self.viewer_version)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Checks the session token. An undecodable or expired token is purged
    /// and the session is logged out.
    ///
    /// A token freshly handed over by the authorization server is trusted on
    /// start; it is checked again before every authenticated request.
    pub fn is_valid(&mut self) -> bool {
        self.validated_token().is_some()
    }

    pub fn apply(&mut self, event: SessionEvent) -> Vec<Effect> {
        match event {
            SessionEvent::Started { query } => self.start(&query),
            SessionEvent::LoginRequested => vec![Effect::Navigate(self.endpoints.login())],
            SessionEvent::LogoutRequested => {
                self.log_out();
                vec![]
            }
            SessionEvent::ProfileResolved { request, result } => {
                self.resolve_profile(request, result);
                vec![]
            }
            SessionEvent::SecureRequested => match self.validated_token() {
                Some(token) => {
                    let request = self.issue_request();
                    self.pending_secure = Some(request);
                    vec![Effect::FetchSecure { request, token }]
                }
                None => vec![Effect::Alert(SECURE_ROUTE_DENIED.into())],
            },
            SessionEvent::SecureResolved { request, result } => {
                if self.pending_secure != Some(request) {
                    debug!("Dropping stale secure route response {:?}", request);
                    return vec![];
                }
                self.pending_secure = None;

                match result {
                    Ok(message) => vec![Effect::Alert(message)],
                    Err(error) => {
                        warn!("Secure route request failed: {}", error);
                        vec![Effect::Alert(SECURE_ROUTE_DENIED.into())]
                    }
                }
            }
            SessionEvent::UploadRequested { file_selected } => {
                if !file_selected {
                    return vec![];
                }

                match self.validated_token() {
                    Some(token) => {
                        let request = self.issue_request();
                        self.pending_upload = Some(request);
                        vec![Effect::Upload { request, token }]
                    }
                    None => vec![Effect::Alert(UPLOAD_FAILED.into()), Effect::ResetFileInput],
                }
            }
            SessionEvent::UploadResolved { request, result } => {
                if self.pending_upload != Some(request) {
                    debug!("Dropping stale upload response {:?}", request);
                    return vec![];
                }
                self.pending_upload = None;

                match result {
                    Ok(()) => {
                        self.viewer_version += 1;
                        info!("Document replaced, viewer at version {}", self.viewer_version);
                        vec![
                            Effect::ReloadViewer {
                                url: self.document_url(),
                            },
                            Effect::ResetFileInput,
                        ]
                    }
                    Err(CoreError::UploadRejected(message)) => {
                        vec![Effect::Alert(message), Effect::ResetFileInput]
                    }
                    Err(error) => {
                        warn!("Upload failed: {}", error);
                        vec![Effect::Alert(UPLOAD_FAILED.into()), Effect::ResetFileInput]
                    }
                }
            }
            SessionEvent::NoticeDismissed => {
                self.notice = None;
                vec![]
            }
        }
    }

    fn start(&mut self, query: &str) -> Vec<Effect> {
        if self.started {
            return vec![];
        }
        self.started = true;

        // A token persisted by an earlier visit may have expired since.
        self.validated_token();

        let mut effects = Vec::new();

        match RedirectCapture::parse(query) {
            Some(RedirectCapture::Token(token)) => {
                self.store.write(&token);
                effects.push(Effect::ReplaceUrl("/".into()));
            }
            Some(RedirectCapture::Error(message)) => {
                warn!("{}", CoreError::AuthRedirect(message.clone()));
                self.notice = Some(message);
                effects.push(Effect::ReplaceUrl("/".into()));
            }
            Some(RedirectCapture::Blank) => {
                debug!("Ignoring an empty login redirect");
                effects.push(Effect::ReplaceUrl("/".into()));
            }
            None => (),
        }

        if let Some(token) = self.store.read() {
            let request = self.issue_request();
            self.state = SessionState::LoggedIn {
                token: token.clone(),
                profile: ProfileState::Loading(request),
            };
            effects.push(Effect::FetchProfile { request, token });
        }

        effects
    }

    fn resolve_profile(&mut self, request: RequestId, result: Result<UserProfile, CoreError>) {
        match &mut self.state {
            SessionState::LoggedIn { profile, .. } if *profile == ProfileState::Loading(request) => {
                *profile = match result {
                    Ok(user) => ProfileState::Ready(user),
                    Err(error) => {
                        warn!("Failed to load the user profile: {}", error);
                        ProfileState::Unavailable
                    }
                };
            }
            _ => debug!("Dropping stale profile response {:?}", request),
        }
    }

    fn validated_token(&mut self) -> Option<String> {
        let token = match &self.state {
            SessionState::LoggedIn { token, .. } => token.clone(),
            SessionState::LoggedOut => self.store.read()?,
        };

        match check_token(&token, &self.clock) {
            Ok(_) => Some(token),
            Err(error) => {
                info!("Discarding session token: {}", error);
                self.log_out();
                None
            }
        }
    }

    fn log_out(&mut self) {
        self.store.clear();
        self.state = SessionState::LoggedOut;
        self.pending_secure = None;
        self.pending_upload = None;
    }

    fn issue_request(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }
}

#[cfg(test)]
pub mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::{Effect, ProfileState, Session, SessionEvent, SessionState, UserProfile};
    use crate::{
        storage::tests::MemoryTokenStore, token::tests::token_with_claims, Clock, CoreError,
        Endpoints, FixedClock, TokenStore,
    };

    const NOW: f64 = 1_700_000_000.0;

    struct SharedClock(Rc<Cell<f64>>);

    impl Clock for SharedClock {
        fn unix_seconds(&self) -> f64 {
            self.0.get()
        }
    }

    fn session(store: &MemoryTokenStore) -> Session<MemoryTokenStore, FixedClock> {
        Session::new(store.clone(), FixedClock(NOW), Endpoints::default())
    }

    fn started(store: &MemoryTokenStore, query: &str) -> (Session<MemoryTokenStore, FixedClock>, Vec<Effect>) {
        let mut session = session(store);
        let effects = session.apply(SessionEvent::Started {
            query: query.into(),
        });
        (session, effects)
    }

    fn profile_request(effects: &[Effect]) -> super::RequestId {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::FetchProfile { request, .. } => Some(*request),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn it_captures_a_token_from_the_redirect() {
        let store = MemoryTokenStore::default();
        let (session, effects) = started(&store, "?token=abc123");

        assert_eq!(session.token(), Some("abc123"));
        assert_eq!(store.read().as_deref(), Some("abc123"));
        assert!(effects.contains(&Effect::ReplaceUrl("/".into())));
        assert_eq!(
            effects
                .iter()
                .filter(|effect| matches!(effect, Effect::FetchProfile { token, .. } if token == "abc123"))
                .count(),
            1
        );
    }

    #[test]
    fn it_only_starts_once() {
        let store = MemoryTokenStore::default();
        let (mut session, _) = started(&store, "?token=abc123");

        let effects = session.apply(SessionEvent::Started {
            query: "?token=abc123".into(),
        });

        assert!(effects.is_empty());
    }

    #[test]
    fn it_surfaces_a_login_error_as_a_dismissible_notice() {
        let store = MemoryTokenStore::default();
        let (mut session, effects) = started(&store, "?message=Access%20restricted");

        assert_eq!(effects, vec![Effect::ReplaceUrl("/".into())]);
        assert_eq!(session.notice(), Some("Access restricted"));
        assert_eq!(session.state(), &SessionState::LoggedOut);

        session.apply(SessionEvent::NoticeDismissed);
        assert_eq!(session.notice(), None);
    }

    #[test]
    fn it_resumes_a_persisted_token_without_touching_the_url() {
        let token = token_with_claims(r#"{"email":"dev@example.com"}"#);
        let store = MemoryTokenStore::with_token(&token);
        let (session, effects) = started(&store, "");

        assert_eq!(effects.len(), 1);
        assert!(matches!(&effects[0], Effect::FetchProfile { token: fetched, .. } if *fetched == token));
        assert!(session.is_logged_in());
    }

    #[test]
    fn it_purges_an_expired_token() {
        let token = token_with_claims(&format!(r#"{{"exp": {}}}"#, NOW as i64 - 1));
        let store = MemoryTokenStore::with_token(&token);
        let mut session = session(&store);

        assert!(!session.is_valid());
        assert_eq!(store.read(), None);
        assert_eq!(session.state(), &SessionState::LoggedOut);
    }

    #[test]
    fn it_keeps_a_token_without_expiry() {
        let token = token_with_claims(r#"{"sub":"42"}"#);
        let store = MemoryTokenStore::with_token(&token);
        let mut session = session(&store);

        assert!(session.is_valid());
        assert!(session.is_valid());
        assert_eq!(store.read(), Some(token));
    }

    #[test]
    fn it_does_not_resume_an_expired_persisted_token() {
        let token = token_with_claims(&format!(r#"{{"exp": {}}}"#, NOW as i64 - 60));
        let store = MemoryTokenStore::with_token(&token);
        let (session, effects) = started(&store, "");

        assert!(effects.is_empty());
        assert!(!session.is_logged_in());
        assert_eq!(store.read(), None);
    }

    #[test]
    fn it_applies_the_profile_and_clears_it_with_the_token() {
        let store = MemoryTokenStore::default();
        let (mut session, effects) = started(&store, "?token=abc123");
        let request = profile_request(&effects);

        session.apply(SessionEvent::ProfileResolved {
            request,
            result: Ok(UserProfile {
                email: "dev@example.com".into(),
            }),
        });
        assert_eq!(
            session.profile().map(|profile| profile.email.as_str()),
            Some("dev@example.com")
        );

        session.apply(SessionEvent::LogoutRequested);
        assert_eq!(session.token(), None);
        assert_eq!(session.profile(), None);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn it_keeps_the_session_when_the_profile_fails_to_load() {
        let store = MemoryTokenStore::default();
        let (mut session, effects) = started(&store, "?token=abc123");
        let request = profile_request(&effects);

        let effects = session.apply(SessionEvent::ProfileResolved {
            request,
            result: Err(CoreError::Network("connection refused".into())),
        });

        assert!(effects.is_empty());
        assert_eq!(
            session.state(),
            &SessionState::LoggedIn {
                token: "abc123".into(),
                profile: ProfileState::Unavailable
            }
        );
    }

    #[test]
    fn it_ignores_a_profile_that_arrives_after_logout() {
        let store = MemoryTokenStore::default();
        let (mut session, effects) = started(&store, "?token=abc123");
        let request = profile_request(&effects);

        session.apply(SessionEvent::LogoutRequested);
        session.apply(SessionEvent::ProfileResolved {
            request,
            result: Ok(UserProfile {
                email: "late@example.com".into(),
            }),
        });

        assert_eq!(session.state(), &SessionState::LoggedOut);
    }

    #[test]
    fn it_navigates_to_the_login_endpoint() {
        let store = MemoryTokenStore::default();
        let mut session = session(&store);

        assert_eq!(
            session.apply(SessionEvent::LoginRequested),
            vec![Effect::Navigate("http://127.0.0.1:8000/auth/github".into())]
        );
    }

    #[test]
    fn it_applies_only_the_latest_secure_route_response() {
        let token = token_with_claims(r#"{"email":"dev@example.com"}"#);
        let store = MemoryTokenStore::with_token(&token);
        let (mut session, _) = started(&store, "");

        let first = session.apply(SessionEvent::SecureRequested);
        let second = session.apply(SessionEvent::SecureRequested);
        let (first, second) = match (&first[..], &second[..]) {
            ([Effect::FetchSecure { request: a, .. }], [Effect::FetchSecure { request: b, .. }]) => (*a, *b),
            _ => panic!("expected secure route requests"),
        };

        assert!(session
            .apply(SessionEvent::SecureResolved {
                request: first,
                result: Ok("stale".into()),
            })
            .is_empty());
        assert_eq!(
            session.apply(SessionEvent::SecureResolved {
                request: second,
                result: Ok("Welcome!".into()),
            }),
            vec![Effect::Alert("Welcome!".into())]
        );
    }

    #[test]
    fn it_reports_a_denied_secure_route() {
        let token = token_with_claims("{}");
        let store = MemoryTokenStore::with_token(&token);
        let (mut session, _) = started(&store, "");

        let request = match &session.apply(SessionEvent::SecureRequested)[..] {
            [Effect::FetchSecure { request, .. }] => *request,
            _ => panic!("expected a secure route request"),
        };

        assert_eq!(
            session.apply(SessionEvent::SecureResolved {
                request,
                result: Err(CoreError::Network("401".into())),
            }),
            vec![Effect::Alert("Access Denied".into())]
        );
    }

    #[test]
    fn it_ignores_an_upload_without_a_file() {
        let token = token_with_claims("{}");
        let store = MemoryTokenStore::with_token(&token);
        let (mut session, _) = started(&store, "");

        assert!(session
            .apply(SessionEvent::UploadRequested {
                file_selected: false
            })
            .is_empty());
    }

    #[test]
    fn it_bumps_the_viewer_version_after_an_upload() {
        let token = token_with_claims("{}");
        let store = MemoryTokenStore::with_token(&token);
        let (mut session, _) = started(&store, "");
        assert_eq!(session.document_url(), "http://127.0.0.1:8000/swagger.yaml?v=0");

        let request = match &session.apply(SessionEvent::UploadRequested {
            file_selected: true,
        })[..]
        {
            [Effect::Upload { request, token: sent }] if *sent == token => *request,
            _ => panic!("expected an upload"),
        };

        assert_eq!(
            session.apply(SessionEvent::UploadResolved {
                request,
                result: Ok(()),
            }),
            vec![
                Effect::ReloadViewer {
                    url: "http://127.0.0.1:8000/swagger.yaml?v=1".into()
                },
                Effect::ResetFileInput
            ]
        );
        assert_eq!(session.viewer_version(), 1);
    }

    #[test]
    fn it_surfaces_upload_failures() {
        let token = token_with_claims("{}");
        let store = MemoryTokenStore::with_token(&token);
        let (mut session, _) = started(&store, "");

        let mut upload = |result: Result<(), CoreError>| {
            let request = match &session.apply(SessionEvent::UploadRequested {
                file_selected: true,
            })[..]
            {
                [Effect::Upload { request, .. }] => *request,
                _ => panic!("expected an upload"),
            };
            session.apply(SessionEvent::UploadResolved { request, result })
        };

        assert_eq!(
            upload(Err(CoreError::UploadRejected("No file uploaded".into()))),
            vec![Effect::Alert("No file uploaded".into()), Effect::ResetFileInput]
        );
        assert_eq!(
            upload(Err(CoreError::Network("timed out".into()))),
            vec![Effect::Alert("Upload failed".into()), Effect::ResetFileInput]
        );
        assert_eq!(session.viewer_version(), 0);
    }

    #[test]
    fn it_refuses_authenticated_requests_once_the_token_expires() {
        let token = token_with_claims(&format!(r#"{{"exp": {}}}"#, NOW as i64 + 10));
        let store = MemoryTokenStore::with_token(&token);
        let now = Rc::new(Cell::new(NOW));
        let mut session = Session::new(store.clone(), SharedClock(now.clone()), Endpoints::default());

        session.apply(SessionEvent::Started {
            query: String::new(),
        });
        assert!(session.is_logged_in());

        now.set(NOW + 20.0);

        assert_eq!(
            session.apply(SessionEvent::SecureRequested),
            vec![Effect::Alert("Access Denied".into())]
        );
        assert!(!session.is_logged_in());
        assert_eq!(session.profile(), None);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn it_reports_an_upload_refused_for_an_expired_token() {
        let token = token_with_claims(&format!(r#"{{"exp": {}}}"#, NOW as i64 + 10));
        let store = MemoryTokenStore::with_token(&token);
        let now = Rc::new(Cell::new(NOW));
        let mut session = Session::new(store.clone(), SharedClock(now.clone()), Endpoints::default());

        session.apply(SessionEvent::Started {
            query: String::new(),
        });
        now.set(NOW + 20.0);

        assert_eq!(
            session.apply(SessionEvent::UploadRequested { file_selected: true }),
            vec![Effect::Alert("Upload failed".into()), Effect::ResetFileInput]
        );
        assert!(!session.is_logged_in());
        assert_eq!(session.viewer_version(), 0);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn it_strips_an_empty_redirect_from_the_url() {
        let store = MemoryTokenStore::default();
        let (session, effects) = started(&store, "?token=");

        assert_eq!(effects, vec![Effect::ReplaceUrl("/".into())]);
        assert!(!session.is_logged_in());
        assert_eq!(session.notice(), None);
        assert_eq!(store.read(), None);
    }
}
