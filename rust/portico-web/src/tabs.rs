use std::rc::Rc;

use leptos::*;

#[derive(Clone)]
pub struct Tab {
    pub id: &'static str,
    pub title: &'static str,
    pub content: Rc<dyn Fn() -> View>,
}

impl Tab {
    pub fn new<F, V>(id: &'static str, title: &'static str, content: F) -> Self
    where
        F: Fn() -> V + 'static,
        V: IntoView,
    {
        Tab {
            id,
            title,
            content: Rc::new(move || content().into_view()),
        }
    }
}

/// Every pane stays mounted; switching tabs only toggles `active`, so the
/// viewer and the generator keep their state.
#[component]
pub fn TabControl(tabs: Vec<Tab>, default_tab: &'static str) -> impl IntoView {
    let (active_tab, set_active_tab) = create_signal(default_tab);
    let panes = tabs.clone();

    view! {
        <div class="tab-control">
            <div class="tab-header">
                {tabs
                    .into_iter()
                    .map(|tab| {
                        let id = tab.id;
                        view! {
                            <button
                                class="tab-button"
                                class:active=move || active_tab.get() == id
                                on:click=move |_| set_active_tab.set(id)
                            >
                                {tab.title}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="tab-content">
                {panes
                    .into_iter()
                    .map(|tab| {
                        let id = tab.id;
                        view! {
                            <div class="tab-pane" class:active=move || active_tab.get() == id>
                                {(tab.content)()}
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
