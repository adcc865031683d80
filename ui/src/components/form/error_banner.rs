use leptos::prelude::*;

use super::FormSignal;

/// Aggregate list of the errors currently visible in the form
#[component]
pub fn ErrorBanner(form: FormSignal) -> impl IntoView {
    let messages = move || {
        form.with(|f| {
            f.visible_errors()
                .into_iter()
                .map(|e| e.message.clone())
                .collect::<Vec<_>>()
        })
    };
    let has_errors = move || !messages().is_empty();

    view! {
        <Show when=has_errors>
            <div class="mb-6 p-4 bg-red-50 border border-red-200 rounded-md">
                <p class="text-sm font-medium text-red-800 mb-2">"Please fix the following:"</p>
                <ul class="list-disc list-inside text-sm text-red-700 space-y-1">
                    {move || messages().into_iter().map(|msg| view! { <li>{msg}</li> }).collect_view()}
                </ul>
            </div>
        </Show>
    }
}
