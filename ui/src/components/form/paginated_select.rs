//! Search-as-you-type select over a remote collection

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use gymdash::forms::render::is_all_sentinel;
use gymdash::forms::{
    Delay, FieldDescriptor, FieldKind, FieldValue, PaginatedSelectAdapter, PaginationConfig,
    PaginationState,
};
use leptos::prelude::*;
use leptos::web_sys;

use super::fields::{border_class, commit, is_disabled, text_of, touch, FieldError, FieldLabel};
use super::FormSignal;
use crate::api::RestFetcher;

/// Browser timer for the search debounce
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooDelay;

#[async_trait(?Send)]
impl Delay for GlooDelay {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

type RestAdapter = PaginatedSelectAdapter<RestFetcher, GlooDelay>;

/// Distance from the bottom of the list, in pixels, that triggers the next page
const LOAD_MORE_THRESHOLD: i32 = 24;

#[component]
pub fn PaginatedSelect(form: FormSignal, field: FieldDescriptor) -> impl IntoView {
    let name = field.name.clone();
    let config = match &field.kind {
        FieldKind::SelectPagination(config) => config.clone(),
        _ => PaginationConfig::new(field.name.clone()),
    };
    let all_label = config.all_label.clone();

    let adapter = StoredValue::new_local(Rc::new(RestAdapter::new(RestFetcher, GlooDelay, config)));
    let state = RwSignal::new(PaginationState::default());
    let (open, set_open) = signal(false);
    let (query, set_query) = signal(String::new());

    // Copy adapter state into the reactive signal
    let sync = move || {
        if let Some(snapshot) = adapter.try_with_value(|a| a.state()) {
            state.set(snapshot);
        }
    };

    let load_initial = move || {
        let a = adapter.get_value();
        state.update(|s| s.is_loading = true);
        wasm_bindgen_futures::spawn_local(async move {
            a.load_initial().await;
            sync();
        });
    };

    let load_more = move || {
        if state.with_untracked(|s| s.is_loading || !s.has_more) {
            return;
        }
        let a = adapter.get_value();
        state.update(|s| s.is_loading = true);
        wasm_bindgen_futures::spawn_local(async move {
            a.load_more().await;
            sync();
        });
    };

    let search = move |term: String| {
        set_query.set(term.clone());
        let a = adapter.get_value();
        wasm_bindgen_futures::spawn_local(async move {
            a.search(term).await;
            sync();
        });
    };

    on_cleanup(move || {
        adapter.try_with_value(|a| a.cancel());
    });

    let name_for_pick = name.clone();
    let pick = move |value: String| {
        let committed = if is_all_sentinel(&value) {
            FieldValue::Null
        } else {
            FieldValue::text(value)
        };
        commit(form, &name_for_pick, committed);
        touch(form, &name_for_pick);
        set_open.set(false);
    };

    let name_for_label = name.clone();
    let all_label_for_display = all_label.clone();
    let selected_label = move || {
        let value = text_of(form, &name_for_label);
        if value.is_empty() {
            return all_label_for_display.clone();
        }
        state.with(|s| {
            s.items
                .iter()
                .find(|o| o.value == value)
                .map(|o| o.label.clone())
                .unwrap_or(value)
        })
    };

    let on_scroll = move |ev: web_sys::Event| {
        let list = event_target::<web_sys::HtmlElement>(&ev);
        if list.scroll_top() + list.client_height() >= list.scroll_height() - LOAD_MORE_THRESHOLD {
            load_more();
        }
    };

    let name_for_class = name.clone();
    let name_for_disabled = name.clone();
    let name_for_blur = name.clone();

    view! {
        <div class="relative mb-4">
            <FieldLabel form=form name=name.clone() label=field.label.clone() />
            <button
                type="button"
                class=move || format!(
                    "w-full px-3 py-2 text-sm text-left border rounded-md bg-white focus:outline-none focus:ring-2 disabled:bg-gray-100 {}",
                    border_class(form, &name_for_class)
                )
                disabled=move || is_disabled(form, &name_for_disabled)
                on:click=move |_| {
                    let opening = !open.get_untracked();
                    set_open.set(opening);
                    if opening {
                        load_initial();
                    } else {
                        touch(form, &name_for_blur);
                    }
                }
            >
                {selected_label}
            </button>
            <Show when=move || open.get()>
                <div class="absolute z-10 mt-1 w-full bg-white border border-gray-200 rounded-md shadow-lg">
                    <input
                        type="text"
                        class="w-full px-3 py-2 text-sm border-b border-gray-200 focus:outline-none"
                        placeholder="Search..."
                        prop:value=move || query.get()
                        on:input=move |ev| search(event_target_value(&ev))
                    />
                    <ul class="max-h-60 overflow-y-auto" on:scroll=on_scroll>
                        <li
                            class="px-3 py-2 text-sm text-gray-500 hover:bg-gray-100 cursor-pointer"
                            on:click={
                                let pick = pick.clone();
                                move |_| pick(String::new())
                            }
                        >
                            {all_label.clone()}
                        </li>
                        <For
                            each=move || state.get().items
                            key=|opt| opt.value.clone()
                            children={
                                let pick = pick.clone();
                                move |opt| {
                                    let pick = pick.clone();
                                    let value = opt.value.clone();
                                    view! {
                                        <li
                                            class="px-3 py-2 text-sm text-gray-700 hover:bg-blue-50 cursor-pointer"
                                            on:click=move |_| pick(value.clone())
                                        >
                                            {opt.label}
                                        </li>
                                    }
                                }
                            }
                        />
                        <Show when=move || state.with(|s| s.is_loading)>
                            <li class="px-3 py-2 text-xs text-gray-400">"Loading..."</li>
                        </Show>
                        <Show when=move || state.with(|s| !s.is_loading && s.items.is_empty())>
                            <li class="px-3 py-2 text-xs text-gray-400">"No results"</li>
                        </Show>
                    </ul>
                </div>
            </Show>
            <FieldError form=form name=name.clone() />
        </div>
    }
}
