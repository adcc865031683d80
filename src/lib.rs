//! # Gymdash - schema-driven forms for the gym dashboard
//!
//! Every CRUD screen of the dashboard (members, blogs, meals, exercises,
//! categories) is rendered from a declarative [`forms::FormSchema`]. This crate
//! holds the engine behind those screens and stays free of any UI toolkit so
//! it compiles both natively and to wasm.
//!
//! ## Quick Start
//!
//! ```rust
//! use gymdash::forms::{FieldValue, FormStateController, FormValues};
//! use gymdash::screens::Screen;
//!
//! let mut form = FormStateController::new(Screen::Categories.schema(), FormValues::new())?;
//! form.set_field_value("nameEn", FieldValue::text("Cardio"))?;
//! assert!(!form.submit().is_submitted());
//! # Ok::<(), gymdash::forms::FormError>(())
//! ```
//!
//! ## Layout
//!
//! - **forms**: schema, validation, state controller, paginated selects, repeatable lists
//! - **screens**: the built-in screen schemas
//! - **config / cli / commands**: the native `gymdash` tool (feature `native`)

pub mod forms;
pub mod screens;

#[cfg(feature = "native")]
pub mod cli;
#[cfg(feature = "native")]
pub mod commands;
#[cfg(feature = "native")]
pub mod config;
