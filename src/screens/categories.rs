use crate::forms::{FieldDescriptor, FieldKind, FormSchema, FormSection, ImageConstraints, SelectOption};

pub fn schema() -> FormSchema {
    FormSchema::new(vec![FormSection::new(
        "Category",
        vec![
            FieldDescriptor::new("nameEn", "Name (English)", FieldKind::Text)
                .required()
                .english_only()
                .length(Some(2), Some(50)),
            FieldDescriptor::new("nameAr", "Name (Arabic)", FieldKind::Text)
                .required()
                .arabic_only()
                .length(Some(2), Some(50)),
            FieldDescriptor::new(
                "type",
                "Used for",
                FieldKind::Select {
                    options: vec![
                        SelectOption::new("exercise", "Exercises"),
                        SelectOption::new("blog", "Blogs"),
                        SelectOption::new("meal", "Meals"),
                    ],
                },
            )
            .required(),
            FieldDescriptor::new("description", "Description", FieldKind::Textarea { rows: None }),
            FieldDescriptor::new("icon", "Icon", FieldKind::Image(ImageConstraints::default())),
        ],
    )
    .icon("folder")])
}
