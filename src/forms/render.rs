//! Widget selection and display state shared by every renderer

use super::schema::FieldKind;

/// Character ceiling shown by a textarea counter when no `max_length` is set
pub const DEFAULT_TEXTAREA_MAX_LENGTH: usize = 500;

/// Concrete control a field is rendered with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetKind {
    /// Single-line `<input>` with the given HTML type
    Input(&'static str),
    TextArea,
    Select,
    PaginatedSelect,
    Radio,
    Switch,
    ImageDrop,
    RepeatableGroup,
}

impl WidgetKind {
    pub fn for_field(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Text => WidgetKind::Input("text"),
            FieldKind::Email => WidgetKind::Input("email"),
            FieldKind::Password => WidgetKind::Input("password"),
            FieldKind::Number => WidgetKind::Input("number"),
            FieldKind::Date => WidgetKind::Input("date"),
            FieldKind::Url => WidgetKind::Input("url"),
            FieldKind::Textarea { .. } => WidgetKind::TextArea,
            FieldKind::Select { .. } => WidgetKind::Select,
            FieldKind::SelectPagination(_) => WidgetKind::PaginatedSelect,
            FieldKind::Radio { .. } => WidgetKind::Radio,
            FieldKind::Switch => WidgetKind::Switch,
            FieldKind::Image(_) => WidgetKind::ImageDrop,
            FieldKind::RepeatableGroup(_) => WidgetKind::RepeatableGroup,
        }
    }
}

/// Trailing status glyph of an input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldStatus {
    Neutral,
    Valid,
    Invalid,
}

impl FieldStatus {
    pub fn from_flags(has_value: bool, has_error: bool) -> Self {
        match (has_value, has_error) {
            (_, true) => FieldStatus::Invalid,
            (true, false) => FieldStatus::Valid,
            (false, false) => FieldStatus::Neutral,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            FieldStatus::Neutral => "text-gray-400",
            FieldStatus::Valid => "text-green-500",
            FieldStatus::Invalid => "text-red-500",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            FieldStatus::Neutral => "○",
            FieldStatus::Valid => "✓",
            FieldStatus::Invalid => "!",
        }
    }
}

/// Floating label sits above the input when focused or filled
pub fn label_raised(focused: bool, has_value: bool) -> bool {
    focused || has_value
}

/// Switches and sub-lists are only checked on submit
pub fn validates_on_blur(kind: &FieldKind) -> bool {
    !matches!(kind, FieldKind::Switch | FieldKind::RepeatableGroup(_))
}

/// The empty "All" option of a paginated select
pub fn is_all_sentinel(value: &str) -> bool {
    value.is_empty()
}

/// Live `used / max` counter under a textarea
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterCounter {
    pub used: usize,
    pub max: usize,
}

impl CharacterCounter {
    pub fn new(text: &str, max_length: Option<usize>) -> Self {
        Self::with_ceiling(text, max_length, DEFAULT_TEXTAREA_MAX_LENGTH)
    }

    /// `ceiling` is only shown when the field sets no `max_length`
    pub fn with_ceiling(text: &str, max_length: Option<usize>, ceiling: usize) -> Self {
        Self {
            used: text.chars().count(),
            max: max_length.unwrap_or(ceiling),
        }
    }

    pub fn is_over(&self) -> bool {
        self.used > self.max
    }

    pub fn label(&self) -> String {
        format!("{}/{}", self.used, self.max)
    }
}
