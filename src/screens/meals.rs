use crate::forms::{
    FieldDescriptor, FieldKind, FormSchema, FormSection, ImageConstraints, RepeatableGroupConfig,
    SelectOption,
};

pub fn schema() -> FormSchema {
    FormSchema::new(vec![
        FormSection::new(
            "Meal",
            vec![
                FieldDescriptor::new("nameEn", "Name (English)", FieldKind::Text)
                    .required()
                    .english_only(),
                FieldDescriptor::new("nameAr", "Name (Arabic)", FieldKind::Text)
                    .required()
                    .arabic_only(),
                FieldDescriptor::new(
                    "type",
                    "Meal type",
                    FieldKind::Select {
                        options: vec![
                            SelectOption::new("breakfast", "Breakfast"),
                            SelectOption::new("lunch", "Lunch"),
                            SelectOption::new("dinner", "Dinner"),
                            SelectOption::new("snack", "Snack"),
                        ],
                    },
                )
                .required(),
                FieldDescriptor::new("calories", "Calories", FieldKind::Number)
                    .required()
                    .range(0.0, 5000.0),
                FieldDescriptor::new("image", "Photo", FieldKind::Image(ImageConstraints::default())),
            ],
        )
        .icon("utensils"),
        FormSection::new(
            "Meal items",
            vec![FieldDescriptor::new(
                "mealItems",
                "Meal items",
                FieldKind::RepeatableGroup(RepeatableGroupConfig {
                    item_label: "Item".to_string(),
                    primary_label: "English description".to_string(),
                    secondary_label: "Arabic description".to_string(),
                }),
            )],
        )
        .icon("list")
        .description("Every item needs a description in both languages"),
    ])
}
