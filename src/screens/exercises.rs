//! Exercise screen
//!
//! An exercise is timed or counted: `mode` decides which of `duration` and
//! `repetitions` is required.

use crate::forms::{
    FieldDescriptor, FieldKind, FormSchema, FormSection, ImageConstraints, PaginationConfig,
    SelectOption,
};

pub fn schema() -> FormSchema {
    FormSchema::new(vec![
        FormSection::new(
            "Exercise",
            vec![
                FieldDescriptor::new("nameEn", "Name (English)", FieldKind::Text)
                    .required()
                    .english_only(),
                FieldDescriptor::new("nameAr", "Name (Arabic)", FieldKind::Text)
                    .required()
                    .arabic_only(),
                FieldDescriptor::new(
                    "categoryId",
                    "Category",
                    FieldKind::SelectPagination(PaginationConfig::new("categories")),
                )
                .required(),
                FieldDescriptor::new("videoUrl", "Video URL", FieldKind::Url).placeholder("https://"),
            ],
        )
        .icon("dumbbell"),
        FormSection::new(
            "Volume",
            vec![
                FieldDescriptor::new(
                    "mode",
                    "Measured by",
                    FieldKind::Radio {
                        options: vec![
                            SelectOption::new("duration", "Duration"),
                            SelectOption::new("count", "Repetitions"),
                        ],
                    },
                )
                .required(),
                FieldDescriptor::new("duration", "Duration (seconds)", FieldKind::Number)
                    .required_when("mode", "duration")
                    .range(1.0, 7200.0),
                FieldDescriptor::new("repetitions", "Repetitions", FieldKind::Number)
                    .required_when("mode", "count")
                    .range(1.0, 1000.0),
            ],
        )
        .icon("timer"),
        FormSection::new(
            "Media",
            vec![FieldDescriptor::new(
                "image",
                "Image",
                FieldKind::Image(ImageConstraints::default()),
            )],
        )
        .icon("image"),
    ])
}
