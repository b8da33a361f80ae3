//! Static catalog of admin-managed content types.
//!
//! Every resource exposed under `/api/content/<path>` is described here once:
//! its payload fields, its title-equivalent field, and the closed partition
//! enumerations that scope it. Handlers, validation, and the admin client are
//! all generic over a `ResourceDef`; adding a content type is a catalog entry,
//! not a new module.

pub mod catalog;
pub mod icon;

pub use catalog::RESOURCES;
pub use icon::StepIcon;

/// Payload field kinds understood by validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form string
    Text,
    /// JSON number
    Number,
    /// JSON boolean
    Flag,
    /// `{url, alt}` object; the binary lives with the external upload host
    Image,
    /// Ordered list of strings
    TextList,
    /// Ordered list of small objects, validated shallowly
    ItemList,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// A discriminator field with a closed value enumeration.
/// `multi` partitions hold a set of memberships rather than a single value.
#[derive(Debug, Clone, Copy)]
pub struct PartitionDef {
    pub field: &'static str,
    pub values: &'static [&'static str],
    pub multi: bool,
}

impl PartitionDef {
    pub fn allows(&self, value: &str) -> bool {
        self.values.contains(&value)
    }
}

/// One admin-managed content type
#[derive(Debug, Clone, Copy)]
pub struct ResourceDef {
    /// Path segment under `/api/content/`, also the stored collection key
    pub path: &'static str,
    /// Field that must be present and non-empty on create
    pub title_field: &'static str,
    pub fields: &'static [FieldDef],
    pub partitions: &'static [PartitionDef],
}

impl ResourceDef {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn partition(&self, field: &str) -> Option<&PartitionDef> {
        self.partitions.iter().find(|p| p.field == field)
    }
}

/// Resolve a wire path segment (e.g. `academy/courses`) to its definition
pub fn lookup(path: &str) -> Option<&'static ResourceDef> {
    let path = path.trim_matches('/');
    RESOURCES.iter().find(|r| r.path == path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_resources() {
        assert!(lookup("partners").is_some());
        assert!(lookup("academy/courses").is_some());
        assert!(lookup("mediation/resolution-steps").is_some());
    }

    #[test]
    fn test_lookup_trims_slashes() {
        assert!(lookup("/partners/").is_some());
    }

    #[test]
    fn test_lookup_unknown_resource() {
        assert!(lookup("academy/unknown").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_course_partitions() {
        let def = lookup("academy/courses").unwrap();
        let program = def.partition("program").unwrap();
        assert!(program.allows("mediation"));
        assert!(!program.allows("not-a-real-program"));
        assert!(!program.multi);
    }

    #[test]
    fn test_faculty_partitions_are_multi() {
        let def = lookup("academy/faculty").unwrap();
        assert!(def.partition("programs").unwrap().multi);
        assert!(def.partition("courseTypes").unwrap().multi);
    }

    #[test]
    fn test_every_resource_declares_its_title_field() {
        for def in RESOURCES {
            let title = def
                .field(def.title_field)
                .unwrap_or_else(|| panic!("{} missing title field", def.path));
            assert!(title.required, "{} title field must be required", def.path);
            assert_eq!(title.kind, FieldKind::Text);
        }
    }

    #[test]
    fn test_paths_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for def in RESOURCES {
            assert!(seen.insert(def.path), "duplicate path {}", def.path);
        }
    }
}
