//! Schema-driven form widgets
//!
//! Every widget reads from and writes to one shared
//! [`FormStateController`](gymdash::forms::FormStateController) held in a
//! local signal; none of them keeps its own copy of the value.

pub mod error_banner;
pub mod fields;
pub mod generic_form;
pub mod image_field;
pub mod meal_items;
pub mod paginated_select;

use gymdash::forms::FormStateController;
use leptos::prelude::*;

/// Shared controller handle passed down to every widget
pub type FormSignal = RwSignal<FormStateController, LocalStorage>;

pub use generic_form::GenericUpdateForm;
