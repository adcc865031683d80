//! Image picker with drag-and-drop and live preview

use gymdash::forms::messages::human_size;
use gymdash::forms::{FieldDescriptor, FieldKind, FileUpload, ImageConstraints};
use leptos::prelude::*;
use leptos::web_sys;
use wasm_bindgen_futures::JsFuture;

use super::fields::{is_disabled, FieldError, FieldLabel};
use super::FormSignal;

/// Read a browser file into an upload the controller can check
async fn read_upload(file: web_sys::File) -> Result<FileUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", file.name(), e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(FileUpload::new(file.name(), file.type_(), bytes))
}

fn accept_attr(constraints: &ImageConstraints) -> String {
    constraints.allowed_types.join(",")
}

fn constraint_hint(constraints: &ImageConstraints) -> String {
    let kinds: Vec<String> = constraints
        .allowed_types
        .iter()
        .map(|t| t.trim_start_matches("image/").to_uppercase())
        .collect();
    format!("{} up to {}", kinds.join(", "), human_size(constraints.max_file_size))
}

#[component]
pub fn ImageDropZone(form: FormSignal, field: FieldDescriptor) -> impl IntoView {
    let name = field.name.clone();
    let constraints = match &field.kind {
        FieldKind::Image(constraints) => constraints.clone(),
        _ => ImageConstraints::default(),
    };
    let (dragging, set_dragging) = signal(false);

    let name_for_pick = name.clone();
    let pick = move |file: web_sys::File| {
        let name = name_for_pick.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match read_upload(file).await {
                Ok(upload) => form.update(|f| {
                    if let Err(e) = f.set_field_file(&name, upload) {
                        log::warn!("Dropped file for {}: {}", name, e);
                    }
                }),
                Err(e) => log::error!("{}", e),
            }
        });
    };

    let pick_for_input = pick.clone();
    let on_input = move |ev: web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            pick_for_input(file);
        }
        // Let the same file be picked again after a removal
        input.set_value("");
    };

    let name_for_drop = name.clone();
    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        if is_disabled(form, &name_for_drop) {
            return;
        }
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            pick(file);
        }
    };

    let name_for_preview = name.clone();
    let preview = move || form.with(|f| f.preview(&name_for_preview).map(String::from));
    let has_preview = {
        let preview = preview.clone();
        move || preview().is_some()
    };

    let name_for_remove = name.clone();
    let remove = move || {
        form.update(|f| {
            if let Err(e) = f.remove_field_file(&name_for_remove) {
                log::warn!("Failed to clear {}: {}", name_for_remove, e);
            }
        });
    };

    let name_for_disabled = name.clone();
    let input_id = format!("{}-file", name);

    view! {
        <div class="mb-4">
            <FieldLabel form=form name=name.clone() label=field.label.clone() />
            <label
                for=input_id.clone()
                class=move || if dragging.get() {
                    "flex flex-col items-center justify-center h-40 border-2 border-dashed border-blue-500 bg-blue-50 rounded-md cursor-pointer"
                } else {
                    "flex flex-col items-center justify-center h-40 border-2 border-dashed border-gray-300 rounded-md cursor-pointer hover:bg-gray-50"
                }
                on:dragover=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    set_dragging.set(true);
                }
                on:dragleave=move |_| set_dragging.set(false)
                on:drop=on_drop
            >
                {move || match preview() {
                    Some(src) => view! {
                        <img src=src class="max-h-36 object-contain" alt="preview" />
                    }.into_any(),
                    None => view! {
                        <span class="text-sm text-gray-500">"Drop an image or click to browse"</span>
                    }.into_any(),
                }}
            </label>
            <input
                id=input_id
                type="file"
                class="hidden"
                accept=accept_attr(&constraints)
                disabled=move || is_disabled(form, &name_for_disabled)
                on:change=on_input
            />
            <div class="flex items-center justify-between mt-1">
                <p class="text-xs text-gray-500">{constraint_hint(&constraints)}</p>
                <Show when=has_preview>
                    <button
                        type="button"
                        class="text-xs text-red-600 hover:underline"
                        on:click={
                            let remove = remove.clone();
                            move |_| remove()
                        }
                    >
                        "Remove"
                    </button>
                </Show>
            </div>
            <FieldError form=form name=name.clone() />
        </div>
    }
}
