//! The registered content types and their closed enumerations.

use super::{FieldDef, FieldKind, PartitionDef, ResourceDef};

pub const PROGRAMS: &[&str] = &["mediation", "arbitration", "conciliation", "academy"];
pub const COURSE_TYPES: &[&str] = &["certificate", "diploma", "workshop", "masterclass"];
pub const PARTNER_CATEGORIES: &[&str] = &["strategic", "institutional", "academic", "media"];
pub const NEWS_CATEGORIES: &[&str] = &["news", "press", "event"];
pub const MEDIA_KINDS: &[&str] = &["image", "document", "video"];

const fn text(name: &'static str, required: bool) -> FieldDef {
    FieldDef { name, kind: FieldKind::Text, required }
}

const fn number(name: &'static str) -> FieldDef {
    FieldDef { name, kind: FieldKind::Number, required: false }
}

const fn flag(name: &'static str) -> FieldDef {
    FieldDef { name, kind: FieldKind::Flag, required: false }
}

const fn image(name: &'static str) -> FieldDef {
    FieldDef { name, kind: FieldKind::Image, required: false }
}

const fn text_list(name: &'static str) -> FieldDef {
    FieldDef { name, kind: FieldKind::TextList, required: false }
}

const fn item_list(name: &'static str) -> FieldDef {
    FieldDef { name, kind: FieldKind::ItemList, required: false }
}

pub static RESOURCES: &[ResourceDef] = &[
    ResourceDef {
        path: "academy/courses",
        title_field: "title",
        fields: &[
            text("title", true),
            text("description", false),
            text("duration", false),
            number("price"),
            image("image"),
            text_list("syllabus"),
            item_list("sessions"),
            flag("featured"),
        ],
        partitions: &[
            PartitionDef { field: "program", values: PROGRAMS, multi: false },
            PartitionDef { field: "courseType", values: COURSE_TYPES, multi: false },
        ],
    },
    ResourceDef {
        path: "academy/faculty",
        title_field: "name",
        fields: &[
            text("name", true),
            text("title", false),
            text("bio", false),
            image("photo"),
        ],
        partitions: &[
            PartitionDef { field: "programs", values: PROGRAMS, multi: true },
            PartitionDef { field: "courseTypes", values: COURSE_TYPES, multi: true },
        ],
    },
    ResourceDef {
        path: "team",
        title_field: "name",
        fields: &[
            text("name", true),
            text("role", false),
            text("bio", false),
            image("photo"),
            text("email", false),
        ],
        partitions: &[],
    },
    ResourceDef {
        path: "partners",
        title_field: "name",
        fields: &[
            text("name", true),
            image("logo"),
            text("website", false),
            text("description", false),
        ],
        partitions: &[PartitionDef {
            field: "category",
            values: PARTNER_CATEGORIES,
            multi: false,
        }],
    },
    ResourceDef {
        path: "news",
        title_field: "title",
        fields: &[
            text("title", true),
            text("summary", false),
            text("body", false),
            image("image"),
            text("publishedOn", false),
        ],
        partitions: &[PartitionDef {
            field: "category",
            values: NEWS_CATEGORIES,
            multi: false,
        }],
    },
    ResourceDef {
        path: "testimonials",
        title_field: "author",
        fields: &[
            text("author", true),
            text("quote", true),
            text("role", false),
            text("organization", false),
            image("photo"),
        ],
        partitions: &[],
    },
    ResourceDef {
        path: "awards",
        title_field: "title",
        fields: &[
            text("title", true),
            number("year"),
            text("issuer", false),
            image("image"),
        ],
        partitions: &[],
    },
    ResourceDef {
        path: "signatories",
        title_field: "name",
        fields: &[
            text("name", true),
            text("organization", false),
            text("country", false),
            text("signedOn", false),
        ],
        partitions: &[],
    },
    ResourceDef {
        path: "mediation/fees",
        title_field: "label",
        fields: &[
            text("label", true),
            number("amount"),
            text("currency", false),
            text("notes", false),
        ],
        partitions: &[PartitionDef { field: "program", values: PROGRAMS, multi: false }],
    },
    ResourceDef {
        path: "mediation/rules",
        title_field: "title",
        fields: &[
            text("title", true),
            text("body", false),
            text_list("sections"),
        ],
        partitions: &[PartitionDef { field: "program", values: PROGRAMS, multi: false }],
    },
    ResourceDef {
        path: "mediation/resolution-steps",
        title_field: "title",
        fields: &[
            text("title", true),
            text("description", false),
            // Stored as a plain string; rendering maps it through StepIcon
            text("icon", false),
        ],
        partitions: &[PartitionDef { field: "program", values: PROGRAMS, multi: false }],
    },
    ResourceDef {
        path: "media",
        title_field: "title",
        fields: &[
            text("title", true),
            image("file"),
            text("caption", false),
        ],
        partitions: &[PartitionDef { field: "kind", values: MEDIA_KINDS, multi: false }],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerations_are_nonempty_and_distinct() {
        for values in [PROGRAMS, COURSE_TYPES, PARTNER_CATEGORIES, NEWS_CATEGORIES, MEDIA_KINDS] {
            assert!(!values.is_empty());
            let mut seen = std::collections::HashSet::new();
            for v in values {
                assert!(seen.insert(*v), "duplicate enumeration value {}", v);
            }
        }
    }

    #[test]
    fn test_partition_values_all_lowercase() {
        for def in RESOURCES {
            for p in def.partitions {
                for v in p.values {
                    assert_eq!(*v, v.to_lowercase(), "{}.{}", def.path, p.field);
                }
            }
        }
    }
}
