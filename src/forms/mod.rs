//! Schema-driven form engine
//!
//! Drives every CRUD screen of the dashboard from declarative descriptors:
//! - `schema`: field and section descriptors
//! - `validation`: per-field and whole-form rules
//! - `state`: the controller that owns form state
//! - `pagination`: remote option lists for paginated selects
//! - `repeatable`: nested sub-record lists (meal items)
//! - `render`: widget selection and display state for renderers

pub mod error;
pub mod messages;
pub mod pagination;
pub mod render;
pub mod repeatable;
pub mod schema;
pub mod state;
pub mod validation;
pub mod value;

pub use error::{FetchError, FormError};
pub use pagination::{Delay, Page, PageFetcher, PageQuery, PaginatedSelectAdapter, PaginationState};
pub use render::{CharacterCounter, FieldStatus, WidgetKind};
pub use repeatable::RepeatableList;
pub use schema::*;
pub use state::{FormListener, FormStateController, SubmitOutcome};
pub use validation::{
    validate_all, validate_field, validate_field_in, validate_image_file, FormValidator,
    ValidationError,
};
pub use value::{FieldValue, FileUpload, FormValues, Locale, LocalizedText, RepeatableGroupItem};

#[cfg(feature = "native")]
pub use pagination::TokioDelay;
