//! Editor for repeatable bilingual items (meal items)

use gymdash::forms::{FieldDescriptor, FieldKind, Locale, RepeatableGroupConfig, RepeatableGroupItem};
use leptos::prelude::*;

use super::fields::{is_disabled, FieldError, FieldLabel};
use super::FormSignal;

fn item_error_path(name: &str, index: usize, locale: Locale) -> String {
    let suffix = match locale {
        Locale::Primary => "en",
        Locale::Secondary => "ar",
    };
    format!("{}[{}].description.{}", name, index, suffix)
}

#[component]
pub fn MealItemsEditor(form: FormSignal, field: FieldDescriptor) -> impl IntoView {
    let name = field.name.clone();
    let config = match &field.kind {
        FieldKind::RepeatableGroup(config) => config.clone(),
        _ => RepeatableGroupConfig::default(),
    };

    let name_for_items = name.clone();
    let items = move || {
        form.with(|f| {
            f.value(&name_for_items)
                .and_then(|v| v.as_items())
                .map(<[_]>::to_vec)
                .unwrap_or_default()
        })
    };
    let count = {
        let items = items.clone();
        move || items().len()
    };

    let name_for_add = name.clone();
    let name_for_disabled = name.clone();

    view! {
        <div class="mb-4">
            <FieldLabel form=form name=name.clone() label=field.label.clone() />
            <div class="space-y-3">
                <For
                    each=move || items().into_iter().enumerate()
                    key=|(idx, item): &(usize, RepeatableGroupItem)| {
                        (*idx, item.description.primary.clone(), item.description.secondary.clone())
                    }
                    children={
                        let name = name.clone();
                        let config = config.clone();
                        move |(idx, item)| {
                            let can_remove = count.clone();
                            view! {
                                <ItemRow
                                    form=form
                                    name=name.clone()
                                    config=config.clone()
                                    index=idx
                                    item=item
                                    removable=Signal::derive(move || can_remove() > 1)
                                />
                            }
                        }
                    }
                />
            </div>
            <button
                type="button"
                class="mt-3 px-3 py-1.5 text-sm text-blue-600 border border-blue-600 rounded-md hover:bg-blue-50 disabled:opacity-50"
                disabled=move || is_disabled(form, &name_for_disabled)
                on:click=move |_| {
                    form.update(|f| {
                        if let Err(e) = f.add_group_item(&name_for_add) {
                            log::warn!("Failed to add item to {}: {}", name_for_add, e);
                        }
                    });
                }
            >
                {format!("+ Add {}", config.item_label.to_lowercase())}
            </button>
            <FieldError form=form name=name.clone() />
        </div>
    }
}

#[component]
fn ItemRow(
    form: FormSignal,
    name: String,
    config: RepeatableGroupConfig,
    index: usize,
    item: RepeatableGroupItem,
    removable: Signal<bool>,
) -> impl IntoView {
    let edit = {
        let name = name.clone();
        move |locale: Locale, text: String| {
            form.update(|f| {
                if let Err(e) = f.update_group_item(&name, index, locale, text) {
                    log::warn!("Failed to edit {}[{}]: {}", name, index, e);
                }
            });
        }
    };
    let edit_secondary = edit.clone();

    let name_for_remove = name.clone();
    let error_for = move |locale: Locale| {
        let path = item_error_path(&name, index, locale);
        move || {
            form.with(|f| {
                f.visible_errors()
                    .into_iter()
                    .find(|e| e.field == path)
                    .map(|e| e.message.clone())
            })
        }
    };
    let primary_error = error_for(Locale::Primary);
    let secondary_error = error_for(Locale::Secondary);

    view! {
        <div class="p-3 border border-gray-200 rounded-md">
            <div class="flex items-center justify-between mb-2">
                <span class="text-xs font-semibold text-gray-500 uppercase">
                    {format!("{} {}", config.item_label, index + 1)}
                </span>
                <Show when=move || removable.get()>
                    {
                        let name = name_for_remove.clone();
                        view! {
                            <button
                                type="button"
                                class="text-xs text-red-600 hover:underline"
                                on:click=move |_| {
                                    form.update(|f| {
                                        if let Err(e) = f.remove_group_item(&name, index) {
                                            log::warn!("Failed to remove {}[{}]: {}", name, index, e);
                                        }
                                    });
                                }
                            >
                                "Remove"
                            </button>
                        }
                    }
                </Show>
            </div>
            <div class="grid grid-cols-2 gap-3">
                <div>
                    <input
                        type="text"
                        class="w-full px-3 py-2 text-sm border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                        placeholder=config.primary_label.clone()
                        prop:value=item.description.primary.clone()
                        on:change=move |ev| edit(Locale::Primary, event_target_value(&ev))
                    />
                    {move || primary_error().map(|msg| view! { <p class="mt-1 text-xs text-red-600">{msg}</p> })}
                </div>
                <div>
                    <input
                        type="text"
                        dir="rtl"
                        class="w-full px-3 py-2 text-sm border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                        placeholder=config.secondary_label.clone()
                        prop:value=item.description.secondary.clone()
                        on:change=move |ev| edit_secondary(Locale::Secondary, event_target_value(&ev))
                    />
                    {move || secondary_error().map(|msg| view! { <p class="mt-1 text-xs text-red-600">{msg}</p> })}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_error_path_matches_validator() {
        assert_eq!(item_error_path("mealItems", 0, Locale::Primary), "mealItems[0].description.en");
        assert_eq!(item_error_path("mealItems", 2, Locale::Secondary), "mealItems[2].description.ar");
    }
}
