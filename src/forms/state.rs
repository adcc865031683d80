//! Form state controller
//!
//! Single owner of the mutable state of one rendered form. Widgets read from
//! it and report interactions through its methods; the owning page hears
//! back through a [`FormListener`] and the [`SubmitOutcome`] of
//! [`FormStateController::submit`].

use std::collections::{BTreeMap, BTreeSet};

use super::error::FormError;
use super::render::{validates_on_blur, FieldStatus};
use super::repeatable::RepeatableList;
use super::schema::{FieldDescriptor, FieldKind, FormSchema};
use super::validation::{
    validate_all, validate_field_in, validate_image_file, FormValidator, ValidationError,
};
use super::value::{FieldValue, FileUpload, FormValues, Locale};

/// Events emitted to the page that owns the form
pub trait FormListener {
    /// After every committed value change, with the full value mapping
    fn on_form_data_change(&mut self, _values: &FormValues) {}

    /// When a submit attempt passes validation
    fn on_submit(&mut self, _values: &FormValues) {}

    /// On explicit cancel; no validation runs
    fn on_cancel(&mut self) {}
}

/// Result of a submit attempt
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Validation passed; these values were handed to the listener
    Submitted(FormValues),
    /// Validation failed; errors are now stored and visible
    Rejected(Vec<ValidationError>),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

pub struct FormStateController {
    schema: FormSchema,
    initial: FormValues,
    values: FormValues,
    touched: BTreeSet<String>,
    errors: Vec<ValidationError>,
    show_all_errors: bool,
    previews: BTreeMap<String, String>,
    listener: Option<Box<dyn FormListener>>,
    form_validator: Option<Box<FormValidator>>,
    /// Last output of the whole-form validator, kept inside `errors`
    form_errors: Vec<ValidationError>,
}

impl FormStateController {
    /// Validate the schema and seed state from `initial`
    pub fn new(schema: FormSchema, initial: FormValues) -> Result<Self, FormError> {
        schema.validate()?;
        let values = schema.seed_values(&initial);
        let previews = initial_previews(&schema, &values);
        Ok(Self {
            schema,
            initial: values.clone(),
            values,
            touched: BTreeSet::new(),
            errors: Vec::new(),
            show_all_errors: false,
            previews,
            listener: None,
            form_validator: None,
            form_errors: Vec::new(),
        })
    }

    pub fn with_listener(mut self, listener: impl FormListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn with_form_validator<V>(mut self, validator: V) -> Self
    where
        V: Fn(&FormValues) -> Vec<ValidationError> + 'static,
    {
        self.form_validator = Some(Box::new(validator));
        self
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.schema.field(name)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    pub fn touched(&self) -> &BTreeSet<String> {
        &self.touched
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn show_all_errors(&self) -> bool {
        self.show_all_errors
    }

    pub fn has_changes(&self) -> bool {
        self.values != self.initial
    }

    /// Error message for `name`, if it should be displayed
    pub fn visible_error(&self, name: &str) -> Option<&str> {
        if !(self.show_all_errors || self.touched.contains(name)) {
            return None;
        }
        self.errors
            .iter()
            .find(|e| e.field == name)
            .map(|e| e.message.as_str())
    }

    /// Errors for the aggregate banner
    pub fn visible_errors(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| self.show_all_errors || self.touched.contains(field_root(&e.field)))
            .collect()
    }

    /// Trailing glyph state of a field
    pub fn field_status(&self, name: &str) -> FieldStatus {
        let has_value = self.values.get(name).map(|v| !v.is_empty()).unwrap_or(false);
        FieldStatus::from_flags(has_value, self.visible_error(name).is_some())
    }

    /// Preview URL of an image field: a freshly picked file or the stored URL
    pub fn preview(&self, name: &str) -> Option<&str> {
        self.previews.get(name).map(String::as_str)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.schema
            .field(name)
            .map(|f| f.is_required(&self.values))
            .unwrap_or(false)
    }

    // ------------------------------------------------------------------------
    // Mutation entry points
    // ------------------------------------------------------------------------

    /// Commit a value; disabled fields ignore the call.
    ///
    /// Files go through [`set_field_file`](Self::set_field_file), so a file
    /// breaking the image constraints is never stored.
    pub fn set_field_value(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        if let FieldValue::File(file) = value {
            return self.set_field_file(name, file).map(|_| ());
        }
        let field = self.require_field(name)?;
        if field.disabled {
            tracing::debug!(field = name, "Ignoring change to disabled field");
            return Ok(());
        }
        let revalidate = self.should_show(name);

        self.values.insert(name.to_string(), value);
        if revalidate {
            self.validate_one(name);
        }
        self.revalidate_dependents(name);
        self.refresh_form_errors();
        self.notify_change();
        Ok(())
    }

    /// Mark a field touched and validate it alone
    pub fn set_field_touched(&mut self, name: &str) -> Result<(), FormError> {
        let field = self.require_field(name)?;
        let on_blur = validates_on_blur(&field.kind);
        self.touched.insert(name.to_string());
        if on_blur {
            self.validate_one(name);
        }
        Ok(())
    }

    /// Check and commit a picked file.
    ///
    /// Returns `Ok(false)` when the file breaks the field's constraints; the
    /// error is stored and the previous value stays in place.
    pub fn set_field_file(&mut self, name: &str, file: FileUpload) -> Result<bool, FormError> {
        let field = self.require_field(name)?;
        let constraints = match &field.kind {
            FieldKind::Image(constraints) => constraints.clone(),
            _ => return Err(FormError::NotAFileField(name.to_string())),
        };
        if field.disabled {
            return Ok(false);
        }

        self.touched.insert(name.to_string());
        if let Some(message) = validate_image_file(&constraints, &file) {
            tracing::debug!(field = name, file = %file.name, "Rejected file: {}", message);
            self.put_error(name, Some(message));
            return Ok(false);
        }

        self.previews.insert(name.to_string(), file.data_url());
        self.values.insert(name.to_string(), FieldValue::File(file));
        self.put_error(name, None);
        self.refresh_form_errors();
        self.notify_change();
        Ok(true)
    }

    /// Clear both the committed file and its preview
    pub fn remove_field_file(&mut self, name: &str) -> Result<(), FormError> {
        let field = self.require_field(name)?;
        if !matches!(field.kind, FieldKind::Image(_)) {
            return Err(FormError::NotAFileField(name.to_string()));
        }
        if field.disabled {
            return Ok(());
        }
        self.previews.remove(name);
        self.values.insert(name.to_string(), FieldValue::Null);
        if self.should_show(name) {
            self.validate_one(name);
        }
        self.refresh_form_errors();
        self.notify_change();
        Ok(())
    }

    pub fn add_group_item(&mut self, name: &str) -> Result<(), FormError> {
        self.edit_group(name, |list| {
            list.add();
            true
        })
        .map(|_| ())
    }

    /// Returns false when the item is the last one or out of range
    pub fn remove_group_item(&mut self, name: &str, index: usize) -> Result<bool, FormError> {
        self.edit_group(name, |list| list.remove(index))
    }

    pub fn update_group_item(
        &mut self,
        name: &str,
        index: usize,
        locale: Locale,
        text: impl Into<String>,
    ) -> Result<bool, FormError> {
        let text = text.into();
        self.edit_group(name, move |list| list.update(index, locale, text))
    }

    /// Toggle a field's static `required` flag (caller-derived behaviour)
    pub fn set_required(&mut self, name: &str, required: bool) -> Result<(), FormError> {
        self.schema
            .field_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?
            .required = required;
        if self.should_show(name) {
            self.validate_one(name);
        }
        Ok(())
    }

    /// Toggle a field's `disabled` flag; disabling clears its error
    pub fn set_disabled(&mut self, name: &str, disabled: bool) -> Result<(), FormError> {
        self.schema
            .field_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?
            .disabled = disabled;
        if disabled {
            self.clear_errors_for(name);
        } else if self.should_show(name) {
            self.validate_one(name);
        }
        Ok(())
    }

    /// Validate everything; hand values to the listener only when clean
    pub fn submit(&mut self) -> SubmitOutcome {
        let names: Vec<String> = self.schema.fields().map(|f| f.name.clone()).collect();
        self.touched.extend(names);
        self.show_all_errors = true;

        let mut errors = validate_all(&self.schema, &self.values, None);
        self.form_errors = self.run_form_validator();
        errors.extend(self.form_errors.iter().cloned());
        if errors.is_empty() {
            self.errors.clear();
            tracing::debug!(fields = self.values.len(), "Form submitted");
            if let Some(listener) = self.listener.as_mut() {
                listener.on_submit(&self.values);
            }
            SubmitOutcome::Submitted(self.values.clone())
        } else {
            tracing::debug!(errors = errors.len(), "Form submission rejected");
            self.errors = errors.clone();
            SubmitOutcome::Rejected(errors)
        }
    }

    pub fn cancel(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener.on_cancel();
        }
    }

    /// Back to the initial data with no touched fields, errors or previews
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.touched.clear();
        self.errors.clear();
        self.form_errors.clear();
        self.show_all_errors = false;
        self.previews = initial_previews(&self.schema, &self.values);
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn require_field(&self, name: &str) -> Result<&FieldDescriptor, FormError> {
        self.schema
            .field(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    fn should_show(&self, name: &str) -> bool {
        self.show_all_errors || self.touched.contains(name)
    }

    fn validate_one(&mut self, name: &str) {
        let Some(field) = self.schema.field(name) else {
            return;
        };
        match &field.kind {
            FieldKind::RepeatableGroup(config) => {
                let items = self
                    .values
                    .get(name)
                    .and_then(FieldValue::as_items)
                    .unwrap_or(&[]);
                let errors =
                    super::validation::validate_repeatable_items(field, config, items);
                self.clear_errors_for(name);
                self.errors.extend(errors);
            }
            _ => {
                let message = self
                    .values
                    .get(name)
                    .and_then(|value| validate_field_in(field, value, &self.values));
                self.put_error(name, message);
            }
        }
    }

    /// Re-check visible fields whose `required_when` depends on `name`
    fn revalidate_dependents(&mut self, name: &str) {
        let dependents: Vec<String> = self
            .schema
            .fields()
            .filter(|f| {
                f.required_when
                    .as_ref()
                    .map(|c| c.field == name)
                    .unwrap_or(false)
            })
            .map(|f| f.name.clone())
            .filter(|n| self.should_show(n))
            .collect();
        for dependent in dependents {
            self.validate_one(&dependent);
        }
    }

    /// Replace the error entry of one field, keeping the others in place
    fn put_error(&mut self, name: &str, message: Option<String>) {
        match (self.errors.iter().position(|e| e.field == name), message) {
            (Some(pos), Some(message)) => self.errors[pos].message = message,
            (Some(pos), None) => {
                self.errors.remove(pos);
            }
            (None, Some(message)) => self.errors.push(ValidationError::new(name, message)),
            (None, None) => {}
        }
    }

    fn clear_errors_for(&mut self, name: &str) {
        self.errors.retain(|e| field_root(&e.field) != name);
    }

    fn edit_group<F>(&mut self, name: &str, edit: F) -> Result<bool, FormError>
    where
        F: FnOnce(&mut RepeatableList) -> bool,
    {
        let field = self.require_field(name)?;
        if !matches!(field.kind, FieldKind::RepeatableGroup(_)) {
            return Err(FormError::NotARepeatableGroup(name.to_string()));
        }
        if field.disabled {
            return Ok(false);
        }

        let items = self
            .values
            .get(name)
            .and_then(FieldValue::as_items)
            .map(<[_]>::to_vec)
            .unwrap_or_default();
        let mut list = RepeatableList::new(items);
        if !edit(&mut list) {
            return Ok(false);
        }
        self.values
            .insert(name.to_string(), FieldValue::Items(list.into_items()));
        if self.show_all_errors {
            self.validate_one(name);
        }
        self.refresh_form_errors();
        self.notify_change();
        Ok(true)
    }

    fn run_form_validator(&self) -> Vec<ValidationError> {
        self.form_validator
            .as_ref()
            .map(|validator| validator(&self.values))
            .unwrap_or_default()
    }

    /// Re-run the whole-form validator once errors are on display, so its
    /// entries follow the values instead of waiting for the next submit
    fn refresh_form_errors(&mut self) {
        if !self.show_all_errors || self.form_validator.is_none() {
            return;
        }
        let stale = std::mem::take(&mut self.form_errors);
        self.errors.retain(|e| !stale.contains(e));
        self.form_errors = self.run_form_validator();
        self.errors.extend(self.form_errors.iter().cloned());
    }

    fn notify_change(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener.on_form_data_change(&self.values);
        }
    }
}

/// Field name an error path belongs to: `mealItems[0].description.en` -> `mealItems`
fn field_root(path: &str) -> &str {
    path.split(|c: char| c == '[' || c == '.').next().unwrap_or(path)
}

/// Stored image URLs double as the initial previews
fn initial_previews(schema: &FormSchema, values: &FormValues) -> BTreeMap<String, String> {
    schema
        .fields()
        .filter(|f| matches!(f.kind, FieldKind::Image(_)))
        .filter_map(|f| match values.get(&f.name) {
            Some(FieldValue::Text(url)) if !url.trim().is_empty() => {
                Some((f.name.clone(), url.clone()))
            }
            Some(FieldValue::File(file)) => Some((f.name.clone(), file.data_url())),
            _ => None,
        })
        .collect()
}
