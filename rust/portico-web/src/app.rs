use leptos::{html::Input, *};
use portico_core::{CoreError, Effect, Endpoints, Session, SessionEvent, DEFAULT_API_URL};
use web_sys::File;

use crate::{
    api,
    browser::{self, BrowserClock},
    generator::SwaggerGenerator,
    storage::BrowserTokenStore,
    tabs::{Tab, TabControl},
    viewer::ApiViewer,
};

type BrowserSession = Session<BrowserTokenStore, BrowserClock>;

fn configured_endpoints() -> Endpoints {
    let base = option_env!("PORTICO_API_URL").unwrap_or(DEFAULT_API_URL);

    Endpoints::new(base).unwrap_or_else(|error| {
        warn!("Ignoring PORTICO_API_URL {}: {}", base, error);
        Endpoints::default()
    })
}

/// The one place the session is mutated. Events go through
/// [`Session::apply`] and the effects it returns are carried out here.
#[derive(Clone, Copy)]
pub struct SessionHandle {
    session: RwSignal<BrowserSession>,
    viewer_url: RwSignal<String>,
    file_input: NodeRef<Input>,
}

impl SessionHandle {
    pub fn new(endpoints: Endpoints) -> Self {
        let session = Session::new(BrowserTokenStore, BrowserClock, endpoints);

        SessionHandle {
            viewer_url: create_rw_signal(session.document_url()),
            session: create_rw_signal(session),
            file_input: create_node_ref(),
        }
    }

    pub fn dispatch(self, event: SessionEvent) {
        let effects = self
            .session
            .try_update(|session| session.apply(event))
            .unwrap_or_default();

        for effect in effects {
            self.run(effect);
        }
    }

    fn endpoints(self) -> Endpoints {
        self.session
            .with_untracked(|session| session.endpoints().clone())
    }

    fn selected_file(self) -> Option<File> {
        self.file_input.get_untracked()?.files()?.get(0)
    }

    fn run(self, effect: Effect) {
        match effect {
            Effect::ReplaceUrl(path) => browser::replace_url(&path),
            Effect::Navigate(url) => browser::navigate(&url),
            Effect::FetchProfile { request, token } => {
                let endpoints = self.endpoints();
                spawn_local(async move {
                    let result = api::fetch_profile(&endpoints, &token).await;
                    self.dispatch(SessionEvent::ProfileResolved { request, result });
                });
            }
            Effect::FetchSecure { request, token } => {
                let endpoints = self.endpoints();
                spawn_local(async move {
                    let result = api::access_secure(&endpoints, &token).await;
                    self.dispatch(SessionEvent::SecureResolved { request, result });
                });
            }
            Effect::Upload { request, token } => {
                let endpoints = self.endpoints();
                let file = self.selected_file();
                spawn_local(async move {
                    let result = match file {
                        Some(file) => api::upload_document(&endpoints, &token, file).await,
                        None => Err(CoreError::UploadRejected("No file selected".into())),
                    };
                    self.dispatch(SessionEvent::UploadResolved { request, result });
                });
            }
            Effect::ReloadViewer { url } => self.viewer_url.set(url),
            Effect::ResetFileInput => {
                if let Some(input) = self.file_input.get_untracked() {
                    input.set_value("");
                }
            }
            Effect::Alert(message) => browser::alert(&message),
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let handle = SessionHandle::new(configured_endpoints());
    handle.dispatch(SessionEvent::Started {
        query: browser::current_query(),
    });

    let tabs = vec![
        Tab::new("docs", "API Docs", move || view! { <ApiDocs handle=handle /> }),
        Tab::new("generator", "Swagger Generator", || view! { <SwaggerGenerator /> }),
    ];

    view! {
        <div class="app">
            <Header handle=handle />
            <NoticeBanner handle=handle />
            <TabControl tabs=tabs default_tab="docs" />
        </div>
    }
}

#[component]
fn Header(handle: SessionHandle) -> impl IntoView {
    let session = handle.session;
    let logged_in = move || session.with(|session| session.is_logged_in());
    let email = move || session.with(|session| session.profile().map(|profile| profile.email.clone()));

    view! {
        <header class="app-header">
            <h1>"Swagger API Docs"</h1>
            <Show
                when=logged_in
                fallback=move || view! {
                    <button class="primary" on:click=move |_| handle.dispatch(SessionEvent::LoginRequested)>
                        "Login with GitHub"
                    </button>
                }
            >
                <div class="account">
                    {move || email().map(|email| view! { <span class="email">{email}</span> })}
                    <button on:click=move |_| handle.dispatch(SessionEvent::SecureRequested)>
                        "Access Secure Route"
                    </button>
                    <button on:click=move |_| handle.dispatch(SessionEvent::LogoutRequested)>
                        "Logout"
                    </button>
                </div>
            </Show>
        </header>
    }
}

/// Login failures reported by the OAuth redirect.
#[component]
fn NoticeBanner(handle: SessionHandle) -> impl IntoView {
    let notice = move || handle.session.with(|session| session.notice().map(String::from));

    move || {
        notice().map(|notice| {
            view! {
                <div class="notice" role="alert">
                    <span>{notice}</span>
                    <button class="dismiss" on:click=move |_| handle.dispatch(SessionEvent::NoticeDismissed)>
                        "×"
                    </button>
                </div>
            }
        })
    }
}

#[component]
fn ApiDocs(handle: SessionHandle) -> impl IntoView {
    let logged_in = move || handle.session.with(|session| session.is_logged_in());
    let file_input = handle.file_input;
    let on_change = move |_| {
        handle.dispatch(SessionEvent::UploadRequested {
            file_selected: handle.selected_file().is_some(),
        })
    };

    view! {
        <div class="api-docs">
            <Show when=logged_in>
                <label class="upload">
                    "Upload API description "
                    <input type="file" accept=".yaml,.yml,.json" node_ref=file_input on:change=on_change />
                </label>
            </Show>
            <ApiViewer url=handle.viewer_url />
        </div>
    }
}
