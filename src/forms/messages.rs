//! User-facing validation messages
//!
//! English text only. The dashboard shell swaps these for translated strings
//! before display; lookup keys are the message prefixes.

pub fn required(label: &str) -> String {
    format!("{} is required", label)
}

pub fn english_only(label: &str) -> String {
    format!("{} must contain English characters only", label)
}

pub fn arabic_only(label: &str) -> String {
    format!("{} must contain Arabic characters only", label)
}

pub fn invalid_email() -> String {
    "Please enter a valid email address".to_string()
}

pub fn not_a_number(label: &str) -> String {
    format!("{} must be a valid number", label)
}

pub fn below_min(label: &str, min: f64) -> String {
    format!("{} must be at least {}", label, min)
}

pub fn above_max(label: &str, max: f64) -> String {
    format!("{} must be at most {}", label, max)
}

pub fn invalid_format() -> String {
    "Invalid format".to_string()
}

pub fn too_short(label: &str, min: usize) -> String {
    format!("{} must be at least {} characters", label, min)
}

pub fn too_long(label: &str, max: usize) -> String {
    format!("{} must be at most {} characters", label, max)
}

pub fn file_type(allowed: &[String]) -> String {
    format!("Only {} files are allowed", allowed.join(", "))
}

pub fn file_size(max_bytes: u64) -> String {
    format!("File size must not exceed {}", human_size(max_bytes))
}

pub fn group_empty(label: &str) -> String {
    format!("At least one {} is required", label.to_lowercase())
}

pub fn group_text_required(text_label: &str, item_label: &str, position: usize) -> String {
    format!("{} is required for {} {}", text_label, item_label.to_lowercase(), position)
}

/// `1048576` -> `1MB`, `512000` -> `500KB`
pub fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= MB {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{}KB", bytes / KB)
    } else {
        format!("{}B", bytes)
    }
}
