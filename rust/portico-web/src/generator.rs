use leptos::*;
use portico_core::{assemble_document, CoreError, ParameterEntries};

use crate::browser::alert;

const INVALID_RESPONSE_EXAMPLE: &str = "Invalid response JSON";

/// Builds a minimal Swagger 2.0 document from `key:description` query
/// parameters and an example JSON response.
#[component]
pub fn SwaggerGenerator() -> impl IntoView {
    let entries = create_rw_signal(ParameterEntries::default());
    let (response_example, set_response_example) = create_signal(String::new());
    let (generated, set_generated) = create_signal(String::new());

    let generate = move |_| {
        let result = entries.with_untracked(|entries| {
            assemble_document(entries.as_slice(), &response_example.get_untracked())
        });

        match result {
            Ok(document) => set_generated.set(document),
            Err(CoreError::MalformedResponseExample(reason)) => {
                warn!("Rejected response example: {}", reason);
                alert(INVALID_RESPONSE_EXAMPLE);
            }
            Err(error) => {
                error!("{}", error);
                alert(&error.to_string());
            }
        }
    };

    view! {
        <div class="generator">
            <h2>"Swagger Generator"</h2>
            <div class="generator-columns">
                <div class="generator-inputs">
                    <section class="card">
                        <h3>"Request parameters"</h3>
                        <For
                            each=move || 0..entries.with(ParameterEntries::len)
                            key=|index| *index
                            children=move |index| view! { <ParameterRow entries=entries index=index /> }
                        />
                        <button class="dashed" on:click=move |_| entries.update(ParameterEntries::push_blank)>
                            "+ Add parameter"
                        </button>
                    </section>
                    <section class="card">
                        <h3>"Response example"</h3>
                        <textarea
                            rows="6"
                            placeholder="Paste an example JSON response"
                            prop:value=move || response_example.get()
                            on:input=move |ev| set_response_example.set(event_target_value(&ev))
                        ></textarea>
                    </section>
                    <button class="primary" on:click=generate>"Generate Swagger"</button>
                </div>
                <section class="card generator-output">
                    <h3>"Generated Swagger"</h3>
                    <textarea rows="20" readonly=true prop:value=move || generated.get()></textarea>
                </section>
            </div>
        </div>
    }
}

#[component]
fn ParameterRow(entries: RwSignal<ParameterEntries>, index: usize) -> impl IntoView {
    let value = move || {
        entries.with(|entries| entries.as_slice().get(index).cloned().unwrap_or_default())
    };

    view! {
        <div class="parameter-row">
            <input
                type="text"
                placeholder="key:value"
                prop:value=value
                on:input=move |ev| entries.update(|entries| entries.set(index, event_target_value(&ev)))
            />
            <Show when=move || entries.with(ParameterEntries::can_remove)>
                <button class="remove" title="Remove parameter" on:click=move |_| entries.update(|entries| entries.remove(index))>
                    "−"
                </button>
            </Show>
        </div>
    }
}
