//! Create and edit pages for the built-in CRUD screens

use gymdash::forms::FormValues;
use gymdash::screens::{self, Screen};
use leptos::prelude::*;
use leptos::web_sys;
use leptos_router::hooks::use_params_map;

use crate::api;
use crate::components::form::GenericUpdateForm;

fn go_home() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/");
    }
}

/// Landing page linking every screen's create form
#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div class="p-8">
            <h2 class="text-2xl font-bold mb-6">"Dashboard"</h2>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                {screens::ALL.into_iter().map(|screen| view! {
                    <a
                        href=format!("/{}/new", screen.name())
                        class="block p-6 bg-white rounded-lg shadow hover:shadow-md transition-shadow"
                    >
                        <h3 class="text-lg font-semibold text-gray-800">{screen.title()}</h3>
                        <p class="text-sm text-gray-500">{format!("New {}", screen.title().to_lowercase())}</p>
                    </a>
                }).collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn ScreenCreate(screen: Screen) -> impl IntoView {
    let (error, set_error) = signal(Option::<String>::None);
    let (saving, set_saving) = signal(false);
    let (edited, set_edited) = signal(false);

    let on_submit = Callback::new(move |values: FormValues| {
        set_saving.set(true);
        set_error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            match api::create_record(screen.resource(), &values).await {
                Ok(()) => go_home(),
                Err(e) => {
                    set_error.set(Some(e));
                    set_saving.set(false);
                }
            }
        });
    });

    view! {
        <div class="p-8 max-w-4xl">
            <div class="flex items-center gap-3 mb-6">
                <h2 class="text-2xl font-bold">{format!("New {}", screen.title())}</h2>
                <Show when=move || edited.get()>
                    <span class="px-2 py-0.5 text-xs text-amber-700 bg-amber-100 rounded">"Unsaved changes"</span>
                </Show>
            </div>
            <SaveError error=error />
            <GenericUpdateForm
                schema=screen.schema()
                on_submit=on_submit
                on_change=Callback::new(move |_: FormValues| set_edited.set(true))
                on_cancel=Callback::new(move |_| go_home())
                submit_label="Create"
                busy=saving
            />
        </div>
    }
}

#[component]
pub fn ScreenEdit(screen: Screen) -> impl IntoView {
    let params = use_params_map();
    let record_id = move || params.read().get("id").unwrap_or_default();

    let (record, set_record) = signal(Option::<FormValues>::None);
    let (error, set_error) = signal(Option::<String>::None);
    let (saving, set_saving) = signal(false);

    // Load existing record
    Effect::new(move |_| {
        let id = record_id();
        // Skip if id is empty (params not ready yet)
        if id.is_empty() {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match api::get_record(screen.resource(), &id).await {
                Ok(values) => set_record.set(Some(values)),
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let on_submit = Callback::new(move |values: FormValues| {
        let id = record_id();
        set_saving.set(true);
        set_error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            match api::update_record(screen.resource(), &id, &values).await {
                Ok(()) => go_home(),
                Err(e) => {
                    set_error.set(Some(e));
                    set_saving.set(false);
                }
            }
        });
    });

    view! {
        <div class="p-8 max-w-4xl">
            <h2 class="text-2xl font-bold mb-6">{format!("Edit {}", screen.title())}</h2>
            <SaveError error=error />
            {move || match record.get() {
                Some(values) => view! {
                    <GenericUpdateForm
                        schema=screen.schema()
                        initial=values
                        on_submit=on_submit
                        on_cancel=Callback::new(move |_| go_home())
                        busy=saving
                    />
                }.into_any(),
                None => view! {
                    <div class="text-sm text-gray-500">"Loading..."</div>
                }.into_any(),
            }}
        </div>
    }
}

#[component]
fn SaveError(error: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        {move || error.get().map(|e| view! {
            <div class="mb-4 p-4 bg-red-50 border border-red-200 rounded-md text-sm text-red-700">{e}</div>
        })}
    }
}
