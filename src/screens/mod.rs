//! Built-in CRUD screens of the dashboard
//!
//! Each screen is a [`FormSchema`] plus the REST collection it submits to.

use crate::forms::FormSchema;

pub mod blogs;
pub mod categories;
pub mod exercises;
pub mod meals;
pub mod members;

/// One CRUD screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Members,
    Blogs,
    Meals,
    Exercises,
    Categories,
}

pub const ALL: [Screen; 5] = [
    Screen::Members,
    Screen::Blogs,
    Screen::Meals,
    Screen::Exercises,
    Screen::Categories,
];

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Members => "members",
            Screen::Blogs => "blogs",
            Screen::Meals => "meals",
            Screen::Exercises => "exercises",
            Screen::Categories => "categories",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Members => "Members",
            Screen::Blogs => "Blogs",
            Screen::Meals => "Meals",
            Screen::Exercises => "Exercises",
            Screen::Categories => "Categories",
        }
    }

    /// REST collection the screen reads from and submits to
    pub fn resource(&self) -> &'static str {
        self.name()
    }

    pub fn schema(&self) -> FormSchema {
        match self {
            Screen::Members => members::schema(),
            Screen::Blogs => blogs::schema(),
            Screen::Meals => meals::schema(),
            Screen::Exercises => exercises::schema(),
            Screen::Categories => categories::schema(),
        }
    }
}

/// Look up a screen by its route name (`members`, `meals`, ...)
pub fn by_name(name: &str) -> Option<Screen> {
    ALL.iter().copied().find(|s| s.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_screen_schema_is_valid() {
        for screen in ALL {
            let schema = screen.schema();
            schema
                .validate()
                .unwrap_or_else(|e| panic!("{} schema invalid: {}", screen.name(), e));
            assert!(schema.fields().count() > 0);
        }
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("meals"), Some(Screen::Meals));
        assert_eq!(by_name("nope"), None);
    }

    #[test]
    fn test_schemas_round_trip_through_json() {
        for screen in ALL {
            let schema = screen.schema();
            let json = serde_json::to_string(&schema).unwrap();
            let parsed: FormSchema = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.fields().count(), schema.fields().count(), "{}", screen.name());
        }
    }
}
