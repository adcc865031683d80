//! Scalar field widgets
//!
//! Text-like inputs, textareas, selects, radios and switches, plus the
//! [`FieldWidget`] dispatcher that picks a widget from the field kind.

use gymdash::forms::render::label_raised;
use gymdash::forms::{CharacterCounter, FieldDescriptor, FieldValue, SelectOption, WidgetKind};
use leptos::prelude::*;

use super::image_field::ImageDropZone;
use super::meal_items::MealItemsEditor;
use super::paginated_select::PaginatedSelect;
use super::FormSignal;

// ============================================================================
// Dispatcher
// ============================================================================

/// Renders the widget matching `field.kind`
#[component]
pub fn FieldWidget(form: FormSignal, field: FieldDescriptor) -> impl IntoView {
    match WidgetKind::for_field(&field.kind) {
        WidgetKind::Input(input_type) => {
            view! { <FieldInput form=form field=field input_type=input_type /> }.into_any()
        }
        WidgetKind::TextArea => view! { <TextAreaField form=form field=field /> }.into_any(),
        WidgetKind::Select => view! { <SelectField form=form field=field /> }.into_any(),
        WidgetKind::Radio => view! { <RadioField form=form field=field /> }.into_any(),
        WidgetKind::Switch => view! { <SwitchField form=form field=field /> }.into_any(),
        WidgetKind::PaginatedSelect => {
            view! { <PaginatedSelect form=form field=field /> }.into_any()
        }
        WidgetKind::ImageDrop => view! { <ImageDropZone form=form field=field /> }.into_any(),
        WidgetKind::RepeatableGroup => {
            view! { <MealItemsEditor form=form field=field /> }.into_any()
        }
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

pub(super) fn commit(form: FormSignal, name: &str, value: FieldValue) {
    form.update(|f| {
        if let Err(e) = f.set_field_value(name, value) {
            log::warn!("Dropped change for {}: {}", name, e);
        }
    });
}

pub(super) fn touch(form: FormSignal, name: &str) {
    form.update(|f| {
        if let Err(e) = f.set_field_touched(name) {
            log::warn!("Dropped blur for {}: {}", name, e);
        }
    });
}

pub(super) fn text_of(form: FormSignal, name: &str) -> String {
    form.with(|f| f.value(name).map(|v| v.as_text().into_owned()).unwrap_or_default())
}

pub(super) fn is_disabled(form: FormSignal, name: &str) -> bool {
    form.with(|f| f.field(name).map(|d| d.disabled).unwrap_or(false))
}

pub(super) fn border_class(form: FormSignal, name: &str) -> &'static str {
    if form.with(|f| f.visible_error(name).is_some()) {
        "border-red-500 focus:ring-red-500"
    } else {
        "border-gray-300 focus:ring-blue-500"
    }
}

/// Label with a required marker that follows `required_when`
#[component]
pub fn FieldLabel(form: FormSignal, name: String, label: String) -> impl IntoView {
    let required = move || form.with(|f| f.is_required(&name));
    view! {
        <label class="block text-sm font-medium text-gray-700 mb-1">
            {label}
            <Show when=required>
                <span class="text-red-500 ml-0.5">"*"</span>
            </Show>
        </label>
    }
}

/// Inline message under a field, shown only once the error is visible
#[component]
pub fn FieldError(form: FormSignal, name: String) -> impl IntoView {
    let message = move || form.with(|f| f.visible_error(&name).map(String::from));
    view! {
        {move || message().map(|msg| view! {
            <p class="mt-1 text-xs text-red-600">{msg}</p>
        })}
    }
}

#[component]
fn FieldHint(hint: Option<String>) -> impl IntoView {
    hint.map(|h| view! { <p class="mt-1 text-xs text-gray-500">{h}</p> })
}

// ============================================================================
// Text-like inputs
// ============================================================================

/// Text, email, password, number, date and url inputs with a floating label
#[component]
pub fn FieldInput(form: FormSignal, field: FieldDescriptor, input_type: &'static str) -> impl IntoView {
    let name = field.name.clone();
    let (focused, set_focused) = signal(false);
    let placeholder = field.placeholder.clone().unwrap_or_default();

    let name_for_value = name.clone();
    let name_for_input = name.clone();
    let name_for_blur = name.clone();
    let name_for_status = name.clone();
    let name_for_class = name.clone();
    let name_for_disabled = name.clone();
    let name_for_label = name.clone();

    let raised = move || {
        let has_value = !text_of(form, &name_for_label).is_empty();
        label_raised(focused.get(), has_value)
    };
    let required = {
        let name = name.clone();
        move || form.with(|f| f.is_required(&name))
    };
    let status = move || form.with(|f| f.field_status(&name_for_status));
    let status_class = status.clone();

    view! {
        <div class="relative mb-4">
            <input
                type=input_type
                id=name.clone()
                class=move || format!(
                    "peer w-full px-3 pt-5 pb-2 text-sm border rounded-md focus:outline-none focus:ring-2 disabled:bg-gray-100 {}",
                    border_class(form, &name_for_class)
                )
                placeholder=move || if focused.get() { placeholder.clone() } else { String::new() }
                disabled=move || is_disabled(form, &name_for_disabled)
                prop:value=move || text_of(form, &name_for_value)
                on:focus=move |_| set_focused.set(true)
                on:input=move |ev| commit(form, &name_for_input, FieldValue::text(event_target_value(&ev)))
                on:blur=move |_| {
                    set_focused.set(false);
                    touch(form, &name_for_blur);
                }
            />
            <label
                for=name.clone()
                class=move || if raised() {
                    "absolute left-3 top-1 text-xs text-gray-500 transition-all"
                } else {
                    "absolute left-3 top-3.5 text-sm text-gray-400 transition-all"
                }
            >
                {field.label.clone()}
                <Show when=required>
                    <span class="text-red-500 ml-0.5">"*"</span>
                </Show>
            </label>
            <span class=move || format!("absolute right-3 top-3.5 text-sm {}", status_class().css_class())>
                {move || status().glyph()}
            </span>
            <FieldHint hint=field.hint.clone() />
            <FieldError form=form name=name.clone() />
        </div>
    }
}

// ============================================================================
// TextArea
// ============================================================================

/// Multi-line input with a live character counter
#[component]
pub fn TextAreaField(form: FormSignal, field: FieldDescriptor) -> impl IntoView {
    let name = field.name.clone();
    let rows = match &field.kind {
        gymdash::forms::FieldKind::Textarea { rows } => rows.unwrap_or(4),
        _ => 4,
    };
    let max_length = field.validation.max_length;

    let name_for_value = name.clone();
    let name_for_input = name.clone();
    let name_for_blur = name.clone();
    let name_for_class = name.clone();
    let name_for_disabled = name.clone();
    let name_for_counter = name.clone();

    let counter = move || CharacterCounter::new(&text_of(form, &name_for_counter), max_length);
    let counter_class = counter.clone();

    view! {
        <div class="mb-4">
            <FieldLabel form=form name=name.clone() label=field.label.clone() />
            <textarea
                rows=rows.to_string()
                class=move || format!(
                    "w-full px-3 py-2 text-sm border rounded-md focus:outline-none focus:ring-2 disabled:bg-gray-100 {}",
                    border_class(form, &name_for_class)
                )
                placeholder=field.placeholder.clone().unwrap_or_default()
                disabled=move || is_disabled(form, &name_for_disabled)
                prop:value=move || text_of(form, &name_for_value)
                on:input=move |ev| commit(form, &name_for_input, FieldValue::text(event_target_value(&ev)))
                on:blur=move |_| touch(form, &name_for_blur)
            />
            <div class="flex justify-between">
                <FieldError form=form name=name.clone() />
                <span class=move || if counter_class().is_over() {
                    "ml-auto text-xs text-red-600"
                } else {
                    "ml-auto text-xs text-gray-400"
                }>
                    {move || counter().label()}
                </span>
            </div>
        </div>
    }
}

// ============================================================================
// Select / Radio
// ============================================================================

/// Static dropdown
#[component]
pub fn SelectField(form: FormSignal, field: FieldDescriptor) -> impl IntoView {
    let name = field.name.clone();
    let options: Vec<SelectOption> = field.kind.options().map(<[_]>::to_vec).unwrap_or_default();

    let name_for_value = name.clone();
    let name_for_change = name.clone();
    let name_for_blur = name.clone();
    let name_for_class = name.clone();
    let name_for_disabled = name.clone();

    view! {
        <div class="mb-4">
            <FieldLabel form=form name=name.clone() label=field.label.clone() />
            <select
                class=move || format!(
                    "w-full px-3 py-2 text-sm border rounded-md bg-white focus:outline-none focus:ring-2 {}",
                    border_class(form, &name_for_class)
                )
                disabled=move || is_disabled(form, &name_for_disabled)
                prop:value=move || text_of(form, &name_for_value)
                on:change=move |ev| commit(form, &name_for_change, FieldValue::text(event_target_value(&ev)))
                on:blur=move |_| touch(form, &name_for_blur)
            >
                <option value="">{field.placeholder.clone().unwrap_or_else(|| "-- Select --".to_string())}</option>
                {options.into_iter().map(|opt| view! {
                    <option value=opt.value.clone()>{opt.label}</option>
                }).collect_view()}
            </select>
            <FieldError form=form name=name.clone() />
        </div>
    }
}

/// Radio group; committing a choice also marks the field touched
#[component]
pub fn RadioField(form: FormSignal, field: FieldDescriptor) -> impl IntoView {
    let name = field.name.clone();
    let options: Vec<SelectOption> = field.kind.options().map(<[_]>::to_vec).unwrap_or_default();

    view! {
        <div class="mb-4">
            <FieldLabel form=form name=name.clone() label=field.label.clone() />
            <div class="flex flex-wrap gap-4">
                {options.into_iter().map(|opt| {
                    let name_for_checked = name.clone();
                    let name_for_change = name.clone();
                    let name_for_disabled = name.clone();
                    let value = opt.value.clone();
                    let value_for_checked = opt.value.clone();
                    view! {
                        <label class="inline-flex items-center gap-2 text-sm text-gray-700">
                            <input
                                type="radio"
                                name=name.clone()
                                value=opt.value.clone()
                                disabled=move || is_disabled(form, &name_for_disabled)
                                prop:checked=move || text_of(form, &name_for_checked) == value_for_checked
                                on:change=move |_| {
                                    commit(form, &name_for_change, FieldValue::text(value.clone()));
                                    touch(form, &name_for_change);
                                }
                            />
                            {opt.label}
                        </label>
                    }
                }).collect_view()}
            </div>
            <FieldError form=form name=name.clone() />
        </div>
    }
}

// ============================================================================
// Switch
// ============================================================================

/// Boolean toggle; checked only on submit
#[component]
pub fn SwitchField(form: FormSignal, field: FieldDescriptor) -> impl IntoView {
    let name = field.name.clone();
    let name_for_checked = name.clone();
    let name_for_change = name.clone();
    let name_for_disabled = name.clone();

    let checked = move || form.with(|f| f.value(&name_for_checked).map(FieldValue::as_bool).unwrap_or(false));

    view! {
        <div class="mb-4 flex items-center justify-between">
            <FieldLabel form=form name=name.clone() label=field.label.clone() />
            <label class="relative inline-flex items-center cursor-pointer">
                <input
                    type="checkbox"
                    class="sr-only peer"
                    disabled=move || is_disabled(form, &name_for_disabled)
                    prop:checked=checked
                    on:change=move |ev| commit(form, &name_for_change, FieldValue::Bool(event_target_checked(&ev)))
                />
                <div class="w-11 h-6 bg-gray-200 rounded-full peer-checked:bg-blue-600 after:content-[''] after:absolute after:top-0.5 after:left-0.5 after:bg-white after:rounded-full after:h-5 after:w-5 after:transition-all peer-checked:after:translate-x-5"></div>
            </label>
        </div>
        <FieldError form=form name=name.clone() />
    }
}
