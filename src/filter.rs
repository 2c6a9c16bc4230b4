//! Selection of the registry subset to generate bindings for.

use std::collections::BTreeSet;

use crate::model::*;
use crate::registry::Registry;

/// Allow-lists deciding which features and extensions are enabled.
///
/// Matching is by exact name. An extension is enabled when its author is
/// listed and it either has no platform or its platform is listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Selection {
    pub features: BTreeSet<String>,
    pub authors: BTreeSet<String>,
    pub platforms: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feature(mut self, name: impl Into<String>) -> Self {
        self.features.insert(name.into());
        self
    }

    pub fn author(mut self, name: impl Into<String>) -> Self {
        self.authors.insert(name.into());
        self
    }

    pub fn platform(mut self, name: impl Into<String>) -> Self {
        self.platforms.insert(name.into());
        self
    }

    pub fn with_features<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_authors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_platforms<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platforms.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn is_feature_enabled(&self, feature: &Feature) -> bool {
        self.features.contains(&feature.name)
    }

    pub fn is_extension_enabled(&self, extension: &Extension) -> bool {
        let author = match &extension.author {
            Some(author) => self.authors.contains(author),
            None => false,
        };
        let platform = match &extension.platform {
            Some(platform) => self.platforms.contains(platform),
            None => true,
        };
        author && platform
    }

    /// Collects the enabled features and extensions and every type and
    /// command name they require.
    pub fn apply<'r>(&self, registry: &'r Registry) -> Enabled<'r> {
        let features: Vec<_> = registry
            .features()
            .iter()
            .filter(|f| self.is_feature_enabled(f))
            .collect();
        let extensions: Vec<_> = registry
            .extensions()
            .iter()
            .filter(|e| self.is_extension_enabled(e))
            .collect();

        let mut type_names = BTreeSet::new();
        let mut command_names = BTreeSet::new();
        for (types, commands) in features
            .iter()
            .map(|f| (&f.required_types, &f.required_commands))
            .chain(
                extensions
                    .iter()
                    .map(|e| (&e.required_types, &e.required_commands)),
            )
        {
            type_names.extend(types.iter().cloned());
            command_names.extend(commands.iter().cloned());
        }

        log::debug!(
            "selection enables {} features, {} extensions, {} types, {} commands",
            features.len(),
            extensions.len(),
            type_names.len(),
            command_names.len()
        );

        Enabled {
            registry,
            features,
            extensions,
            type_names,
            command_names,
        }
    }
}

/// The part of a [`Registry`] a [`Selection`] enables.
///
/// Names required by an enabled feature or extension but not declared in
/// the registry are kept in the name sets and simply match nothing.
#[derive(Debug, Clone)]
pub struct Enabled<'r> {
    registry: &'r Registry,
    pub features: Vec<&'r Feature>,
    pub extensions: Vec<&'r Extension>,
    pub type_names: BTreeSet<String>,
    pub command_names: BTreeSet<String>,
}

impl<'r> Enabled<'r> {
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn is_type_enabled(&self, name: &str) -> bool {
        self.type_names.contains(name)
    }

    pub fn is_command_enabled(&self, name: &str) -> bool {
        self.command_names.contains(name)
    }

    pub fn handles(&self) -> impl Iterator<Item = &'r Handle> + '_ {
        self.registry
            .handles()
            .iter()
            .filter(move |h| self.is_type_enabled(&h.name))
    }

    pub fn structs(&self) -> impl Iterator<Item = &'r Struct> + '_ {
        self.registry
            .structs()
            .iter()
            .filter(move |s| self.is_type_enabled(&s.name))
    }

    pub fn bitmasks(&self) -> impl Iterator<Item = &'r Bitmask> + '_ {
        self.registry
            .bitmasks()
            .iter()
            .filter(move |b| self.is_type_enabled(&b.name))
    }

    pub fn base_types(&self) -> impl Iterator<Item = &'r BaseType> + '_ {
        self.registry
            .base_types()
            .iter()
            .filter(move |b| self.is_type_enabled(&b.name))
    }

    /// Enums are required under their declared name (`...FlagBits`).
    pub fn enums(&self) -> impl Iterator<Item = &'r Enum> + '_ {
        self.registry
            .enums()
            .iter()
            .filter(move |e| self.is_type_enabled(&e.declared_name))
    }

    pub fn commands(&self) -> impl Iterator<Item = &'r Command> + '_ {
        self.registry
            .commands()
            .iter()
            .filter(move |c| self.is_command_enabled(&c.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extension(author: Option<&str>, platform: Option<&str>) -> Extension {
        Extension {
            name: String::from("VK_TEST_extension"),
            number: None,
            author: author.map(String::from),
            ext_type: None,
            platform: platform.map(String::from),
            supported: None,
            required_types: Vec::new(),
            required_commands: Vec::new(),
        }
    }

    #[test]
    fn extension_rules() {
        let selection = Selection::new().author("KHR").platform("win32");

        assert!(selection.is_extension_enabled(&extension(Some("KHR"), None)));
        assert!(selection.is_extension_enabled(&extension(Some("KHR"), Some("win32"))));
        assert!(!selection.is_extension_enabled(&extension(Some("KHR"), Some("xlib"))));
        assert!(!selection.is_extension_enabled(&extension(Some("EXT"), None)));
        assert!(!selection.is_extension_enabled(&extension(None, None)));
    }

    #[test]
    fn builders_accumulate() {
        let selection = Selection::new()
            .feature("VK_VERSION_1_0")
            .with_features(vec!["VK_VERSION_1_1", "VK_VERSION_1_0"])
            .with_authors(["KHR", "EXT"])
            .with_platforms(Vec::<String>::new());

        assert_eq!(selection.features.len(), 2);
        assert_eq!(selection.authors.len(), 2);
        assert!(selection.platforms.is_empty());
    }
}
