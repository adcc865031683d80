use crate::forms::{
    FieldDescriptor, FieldKind, FormSchema, FormSection, ImageConstraints, PaginationConfig,
};

pub fn schema() -> FormSchema {
    FormSchema::new(vec![
        FormSection::new(
            "Content",
            vec![
                FieldDescriptor::new("titleEn", "Title (English)", FieldKind::Text)
                    .required()
                    .english_only()
                    .length(None, Some(120)),
                FieldDescriptor::new("titleAr", "Title (Arabic)", FieldKind::Text)
                    .required()
                    .arabic_only()
                    .length(None, Some(120)),
                FieldDescriptor::new("contentEn", "Content (English)", FieldKind::Textarea { rows: Some(8) })
                    .required()
                    .english_only()
                    .length(Some(20), Some(5000)),
                FieldDescriptor::new("contentAr", "Content (Arabic)", FieldKind::Textarea { rows: Some(8) })
                    .required()
                    .arabic_only()
                    .length(Some(20), Some(5000)),
            ],
        )
        .icon("file-text"),
        FormSection::new(
            "Publishing",
            vec![
                FieldDescriptor::new(
                    "categoryId",
                    "Category",
                    FieldKind::SelectPagination(PaginationConfig::new("categories")),
                )
                .required(),
                FieldDescriptor::new("cover", "Cover image", FieldKind::Image(ImageConstraints::default()))
                    .required(),
                FieldDescriptor::new("published", "Published", FieldKind::Switch),
            ],
        )
        .icon("send"),
    ])
}
