//! Generic create/update form
//!
//! Renders any [`FormSchema`] section by section and owns the
//! [`FormStateController`] behind it. The parent hears back only through the
//! callbacks: `on_submit` with values that passed validation, `on_cancel`,
//! and optionally `on_change` after every committed edit.

use gymdash::forms::{FormListener, FormSchema, FormSection, FormStateController, FormValues, SubmitOutcome};
use leptos::prelude::*;

use super::error_banner::ErrorBanner;
use super::fields::FieldWidget;
use super::FormSignal;

/// Forwards controller change events to the parent component
struct ChangeForwarder(Callback<FormValues>);

impl FormListener for ChangeForwarder {
    fn on_form_data_change(&mut self, values: &FormValues) {
        self.0.run(values.clone());
    }
}

#[component]
pub fn GenericUpdateForm(
    schema: FormSchema,
    #[prop(optional)] initial: FormValues,
    on_submit: Callback<FormValues>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
    #[prop(optional)] on_change: Option<Callback<FormValues>>,
    #[prop(optional, into)] submit_label: Option<String>,
    /// Disables the footer while the parent is saving
    #[prop(optional, into)]
    busy: Signal<bool>,
) -> impl IntoView {
    let sections = schema.sections.clone();
    let controller = match FormStateController::new(schema, initial) {
        Ok(controller) => controller,
        Err(e) => {
            log::error!("Invalid form schema: {}", e);
            return view! {
                <div class="p-4 bg-red-50 border border-red-200 rounded-md text-sm text-red-700">
                    {format!("This form cannot be displayed: {}", e)}
                </div>
            }
            .into_any();
        }
    };
    let controller = match on_change {
        Some(callback) => controller.with_listener(ChangeForwarder(callback)),
        None => controller,
    };
    let form: FormSignal = RwSignal::new_local(controller);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match form.try_update(|f| f.submit()) {
            Some(SubmitOutcome::Submitted(values)) => on_submit.run(values),
            Some(SubmitOutcome::Rejected(errors)) => {
                log::debug!("Submit rejected with {} errors", errors.len());
            }
            None => {}
        }
    };

    let cancel = move |_: leptos::ev::MouseEvent| {
        form.update(|f| f.cancel());
        if let Some(callback) = on_cancel {
            callback.run(());
        }
    };

    let has_changes = move || form.with(|f| f.has_changes());
    let submit_label = submit_label.unwrap_or_else(|| "Save".to_string());

    view! {
        <form class="space-y-6" on:submit=submit novalidate=true>
            <ErrorBanner form=form />
            {sections.into_iter().map(|section| view! { <SectionCard form=form section=section /> }).collect_view()}
            <div class="flex justify-end gap-3 pt-4 border-t border-gray-200">
                <button
                    type="button"
                    class="px-4 py-2 text-sm text-gray-600 hover:text-gray-800 disabled:opacity-50"
                    disabled=move || busy.get() || !has_changes()
                    on:click=move |_| form.update(|f| f.reset())
                >
                    "Reset"
                </button>
                <button
                    type="button"
                    class="px-4 py-2 text-sm text-gray-700 bg-white border border-gray-300 rounded-md hover:bg-gray-50 disabled:opacity-50"
                    disabled=move || busy.get()
                    on:click=cancel
                >
                    "Cancel"
                </button>
                <button
                    type="submit"
                    class="px-4 py-2 text-sm text-white bg-blue-600 rounded-md hover:bg-blue-700 disabled:opacity-50"
                    disabled=move || busy.get()
                >
                    {move || if busy.get() { "Saving...".to_string() } else { submit_label.clone() }}
                </button>
            </div>
        </form>
    }
    .into_any()
}

#[component]
fn SectionCard(form: FormSignal, section: FormSection) -> impl IntoView {
    let header = section.header;
    view! {
        <div class="bg-white rounded-lg shadow p-6">
            <div class="flex items-center gap-2 mb-1">
                {header.icon.map(|icon| view! { <span class=format!("icon icon-{}", icon)></span> })}
                <h2 class="text-lg font-semibold text-gray-800">{header.title}</h2>
            </div>
            {header.description.map(|d| view! { <p class="text-sm text-gray-500 mb-4">{d}</p> })}
            <div class="grid grid-cols-1 md:grid-cols-2 gap-x-6 mt-4">
                {section.fields.into_iter().map(|field| view! {
                    <FieldWidget form=form field=field />
                }).collect_view()}
            </div>
        </div>
    }
}
