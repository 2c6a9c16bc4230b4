use std::fmt;

/// Errors which stop the document from being read at all.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("failed to read registry document")]
    Io(#[from] std::io::Error),

    #[error("malformed XML at '{xpath}': {source}")]
    Xml {
        xpath: String,
        #[source]
        source: xml::reader::Error,
    },

    #[error("document has no <registry> root element")]
    MissingRegistryElement,
}

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Category {
    Tag,
    Platform,
    Enumeration,
    EnumerationValue,
    BaseType,
    Handle,
    Bitmask,
    Enum,
    Struct,
    Field,
    Command,
    Parameter,
    Feature,
    Extension,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Tag => "tag",
            Category::Platform => "platform",
            Category::Enumeration => "enumeration",
            Category::EnumerationValue => "enumeration value",
            Category::BaseType => "base type",
            Category::Handle => "handle",
            Category::Bitmask => "bitmask",
            Category::Enum => "enum",
            Category::Struct => "struct",
            Category::Field => "struct member",
            Category::Command => "command",
            Category::Parameter => "command parameter",
            Category::Feature => "feature",
            Category::Extension => "extension",
        })
    }
}

/// Coarse classification of a [`BuildError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A record lacks something the model cannot do without.
    MalformedInput,
    /// A symbolic name or width the model has no mapping for.
    UnresolvableReference,
    /// Two records share a name within one partition.
    DuplicateKey,
}

/// Errors which abort building the [`Registry`](crate::Registry).
///
/// Every variant names the offending record so it can be found in the
/// source document. Missing cross references (an enum without a value set,
/// a bitmask whose `requires` matches nothing) are not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("{category} '{}' is missing '{field}'", display_name(.name))]
    MissingField {
        category: Category,
        /// Name of the record, or of its owner when the record itself is unnamed.
        name: Option<String>,
        field: &'static str,
    },

    #[error("{category} '{name}' has invalid number '{text}'")]
    InvalidNumber {
        category: Category,
        name: String,
        text: String,
    },

    #[error("invalid array dimensions '{text}'")]
    InvalidArrayDimension { text: String },

    #[error("unknown array length constant '{name}'")]
    UnknownArrayConstant { name: String },

    #[error("enumeration '{enumeration}' has unsupported bit width {width}")]
    UnsupportedBitWidth { enumeration: String, width: u32 },

    #[error("duplicate {category} '{name}'")]
    DuplicateKey { category: Category, name: String },
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::MissingField { .. }
            | BuildError::InvalidNumber { .. }
            | BuildError::InvalidArrayDimension { .. } => ErrorKind::MalformedInput,
            BuildError::UnknownArrayConstant { .. } | BuildError::UnsupportedBitWidth { .. } => {
                ErrorKind::UnresolvableReference
            }
            BuildError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
        }
    }

    pub(crate) fn missing(category: Category, name: Option<&str>, field: &'static str) -> Self {
        BuildError::MissingField {
            category,
            name: name.map(String::from),
            field,
        }
    }
}

fn display_name(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or("<unnamed>")
}

/// Either stage of [`load_file`](crate::load_file) failing.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_partition_variants() {
        let missing = BuildError::missing(Category::Command, None, "proto/type");
        assert_eq!(missing.kind(), ErrorKind::MalformedInput);
        assert_eq!(
            missing.to_string(),
            "command '<unnamed>' is missing 'proto/type'"
        );

        let unknown = BuildError::UnknownArrayConstant {
            name: String::from("VK_MAX_SOMETHING"),
        };
        assert_eq!(unknown.kind(), ErrorKind::UnresolvableReference);

        let duplicate = BuildError::DuplicateKey {
            category: Category::Handle,
            name: String::from("VkInstance"),
        };
        assert_eq!(duplicate.kind(), ErrorKind::DuplicateKey);
        assert_eq!(duplicate.to_string(), "duplicate handle 'VkInstance'");
    }
}
