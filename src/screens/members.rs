use crate::forms::{
    FieldDescriptor, FieldKind, FormSchema, FormSection, ImageConstraints, PaginationConfig,
    SelectOption, ValidationRules,
};

pub fn schema() -> FormSchema {
    FormSchema::new(vec![
        FormSection::new(
            "Personal information",
            vec![
                FieldDescriptor::new("name", "Full name", FieldKind::Text)
                    .required()
                    .english_only()
                    .length(Some(3), Some(60)),
                FieldDescriptor::new("email", "Email", FieldKind::Email).required(),
                FieldDescriptor::new("phone", "Phone", FieldKind::Text)
                    .required()
                    .with_rules(ValidationRules {
                        pattern: Some(r"^\+?[0-9]{8,15}$".to_string()),
                        pattern_message: Some("Enter a valid phone number".to_string()),
                        ..Default::default()
                    }),
                FieldDescriptor::new("birthDate", "Date of birth", FieldKind::Date),
                FieldDescriptor::new(
                    "gender",
                    "Gender",
                    FieldKind::Radio {
                        options: vec![
                            SelectOption::new("male", "Male"),
                            SelectOption::new("female", "Female"),
                        ],
                    },
                )
                .required(),
            ],
        )
        .icon("user"),
        FormSection::new(
            "Membership",
            vec![
                FieldDescriptor::new(
                    "planId",
                    "Plan",
                    FieldKind::SelectPagination(PaginationConfig::new("plans")),
                )
                .required(),
                FieldDescriptor::new("weight", "Weight (kg)", FieldKind::Number).range(20.0, 300.0),
                FieldDescriptor::new("height", "Height (cm)", FieldKind::Number).range(80.0, 250.0),
                FieldDescriptor::new("active", "Active", FieldKind::Switch),
            ],
        )
        .icon("id-card")
        .description("Plan and body measurements used for programs"),
        FormSection::new(
            "Account",
            vec![
                FieldDescriptor::new("password", "Password", FieldKind::Password)
                    .length(Some(8), Some(64)),
                FieldDescriptor::new(
                    "avatar",
                    "Profile photo",
                    FieldKind::Image(ImageConstraints::default()),
                ),
            ],
        )
        .icon("lock")
        .description("Leave the password empty to keep the current one"),
    ])
}
