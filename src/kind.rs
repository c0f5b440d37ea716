//! The fixed set of semantic symbol kinds consumed by the editor.
//!
//! Kinds are a closed enumeration: the editor looks icons up by these exact
//! names, and every theme must supply an entry for each of them. Keeping the
//! set as an enum means an incomplete theme is a constructible, checkable
//! defect rather than a lookup failure at render time.

use std::fmt;

/// A semantic category of symbol that gets its own icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    ClassMethod,
    ComponentVariable,
    ConstantValue,
    ExternalFunction,
    Field,
    GlobalVariable,
    InstanceVariable,
    LocalVariable,
    Parameter,
    Property,
    SystemVariable,
}

impl Kind {
    /// All kinds, in lexicographic order of their names.
    ///
    /// This is the mandated atlas order: iterating `ALL` when packing makes
    /// atlases byte-for-byte reproducible and diffable across runs.
    pub const ALL: [Kind; 11] = [
        Kind::ClassMethod,
        Kind::ComponentVariable,
        Kind::ConstantValue,
        Kind::ExternalFunction,
        Kind::Field,
        Kind::GlobalVariable,
        Kind::InstanceVariable,
        Kind::LocalVariable,
        Kind::Parameter,
        Kind::Property,
        Kind::SystemVariable,
    ];

    /// The kind's name as used in file names and atlas index keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::ClassMethod => "ClassMethod",
            Kind::ComponentVariable => "ComponentVariable",
            Kind::ConstantValue => "ConstantValue",
            Kind::ExternalFunction => "ExternalFunction",
            Kind::Field => "Field",
            Kind::GlobalVariable => "GlobalVariable",
            Kind::InstanceVariable => "InstanceVariable",
            Kind::LocalVariable => "LocalVariable",
            Kind::Parameter => "Parameter",
            Kind::Property => "Property",
            Kind::SystemVariable => "SystemVariable",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_lexicographically_sorted() {
        let names: Vec<&str> = Kind::ALL.iter().map(Kind::as_str).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn all_contains_every_kind_once() {
        assert_eq!(Kind::ALL.len(), 11);
        let mut names: Vec<&str> = Kind::ALL.iter().map(Kind::as_str).collect();
        names.dedup();
        assert_eq!(names.len(), 11);
    }
}
