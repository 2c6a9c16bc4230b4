use std::collections::HashMap;

use log::{debug, info, trace};

use crate::error::{BuildError, Category};
use crate::model::*;
use crate::normalize;
use crate::partition::Partition;
use crate::types::*;

/// API whose declarations are kept unless told otherwise.
pub const DEFAULT_API: &str = "vulkan";

/// Type declarations, partitioned by category.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct Types {
    pub base_types: Partition<BaseType>,
    pub bitmasks: Partition<Bitmask>,
    pub handles: Partition<Handle>,
    /// Keyed by the normalized (`Flags`) name.
    pub enums: Partition<Enum>,
    pub structs: Partition<Struct>,
}

impl Types {
    fn new() -> Self {
        Types {
            base_types: Partition::new(Category::BaseType),
            bitmasks: Partition::new(Category::Bitmask),
            handles: Partition::new(Category::Handle),
            enums: Partition::new(Category::Enum),
            structs: Partition::new(Category::Struct),
        }
    }
}

/// The resolved registry.
///
/// Built from a [`RawRegistry`]; either every record resolves
/// or the build fails with the first [`BuildError`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Registry {
    api: String,
    tags: Partition<Tag>,
    platforms: Partition<Platform>,
    enumerations: Partition<Enumeration>,
    types: Types,
    commands: Partition<Command>,
    features: Partition<Feature>,
    extensions: Partition<Extension>,
}

impl Registry {
    /// Builds the registry for [`DEFAULT_API`].
    pub fn build(raw: &RawRegistry) -> Result<Self, BuildError> {
        Self::build_for_api(raw, DEFAULT_API)
    }

    /// Builds the registry, keeping only declarations belonging to `api`.
    pub fn build_for_api(raw: &RawRegistry, api: &str) -> Result<Self, BuildError> {
        let mut platforms = Partition::new(Category::Platform);
        for p in &raw.platforms {
            platforms.insert(Platform::from_raw(p)?)?;
        }

        let mut tags = Partition::new(Category::Tag);
        for t in &raw.tags {
            tags.insert(Tag::from_raw(t)?)?;
        }

        let mut enumerations = Partition::new(Category::Enumeration);
        for e in &raw.enums {
            enumerations.insert(Enumeration::from_raw(e, api)?)?;
        }

        let mut builder = TypesBuilder {
            api,
            enumerations: &enumerations,
            types: Types::new(),
            bitmask_by_requires: HashMap::new(),
        };
        for t in &raw.types {
            builder.add(t)?;
        }
        // Enums link to bitmasks declared anywhere in the document.
        for t in raw.types.iter().filter(|t| t.category.as_deref() == Some("enum")) {
            if builder.is_for_api(t) {
                builder.add_enum(t)?;
            }
        }
        let types = builder.types;

        let mut commands = Partition::new(Category::Command);
        for c in &raw.commands {
            if let Some(alias) = &c.alias {
                debug!("skipping command alias {:?} -> {}", c.name(), alias);
                continue;
            }
            if !api_matches(c.api.as_deref(), api) {
                debug!("skipping command {:?} for api {:?}", c.name(), c.api);
                continue;
            }
            commands.insert(Command::from_raw(c, api)?)?;
        }

        let mut features = Partition::new(Category::Feature);
        for f in &raw.features {
            features.insert(Feature::from_raw(f, api)?)?;
        }

        let mut extensions = Partition::new(Category::Extension);
        for e in &raw.extensions {
            let extension = Extension::from_raw(e, api)?;
            if extension.is_disabled() {
                debug!("skipping disabled extension {}", extension.name);
                continue;
            }
            extensions.insert(extension)?;
        }

        info!(
            "registry built for {}: {} handles, {} structs, {} enums, {} bitmasks, {} commands, {} features, {} extensions",
            api,
            types.handles.len(),
            types.structs.len(),
            types.enums.len(),
            types.bitmasks.len(),
            commands.len(),
            features.len(),
            extensions.len()
        );

        Ok(Registry {
            api: String::from(api),
            tags,
            platforms,
            enumerations,
            types,
            commands,
            features,
            extensions,
        })
    }

    /// The API the registry was built for.
    pub fn api(&self) -> &str {
        &self.api
    }

    pub fn tags(&self) -> &Partition<Tag> {
        &self.tags
    }

    pub fn platforms(&self) -> &Partition<Platform> {
        &self.platforms
    }

    pub fn enumerations(&self) -> &Partition<Enumeration> {
        &self.enumerations
    }

    pub fn types(&self) -> &Types {
        &self.types
    }

    pub fn base_types(&self) -> &Partition<BaseType> {
        &self.types.base_types
    }

    pub fn bitmasks(&self) -> &Partition<Bitmask> {
        &self.types.bitmasks
    }

    pub fn handles(&self) -> &Partition<Handle> {
        &self.types.handles
    }

    pub fn enums(&self) -> &Partition<Enum> {
        &self.types.enums
    }

    pub fn structs(&self) -> &Partition<Struct> {
        &self.types.structs
    }

    /// Commands, aliases excluded.
    pub fn commands(&self) -> &Partition<Command> {
        &self.commands
    }

    pub fn features(&self) -> &Partition<Feature> {
        &self.features
    }

    /// Extensions, disabled ones excluded.
    pub fn extensions(&self) -> &Partition<Extension> {
        &self.extensions
    }

    /// The value set drawn on by `e`, if there is one.
    pub fn enumeration_of(&self, e: &Enum) -> Option<&Enumeration> {
        e.enumeration
            .as_deref()
            .and_then(|name| self.enumerations.get(name))
    }

    /// The first bitmask declaring its bits with `e` (or the enum `e`
    /// aliases).
    pub fn bitmask_for(&self, e: &Enum) -> Option<&Bitmask> {
        let key = e.alias.as_deref().unwrap_or(&e.declared_name);
        self.types
            .bitmasks
            .iter()
            .find(|b| b.requires.as_deref() == Some(key))
    }
}

struct TypesBuilder<'a> {
    api: &'a str,
    enumerations: &'a Partition<Enumeration>,
    types: Types,
    // First bitmask (by document order) naming each bit enum.
    bitmask_by_requires: HashMap<String, usize>,
}

impl<'a> TypesBuilder<'a> {
    fn is_for_api(&self, raw: &RawType) -> bool {
        let matches = api_matches(raw.api.as_deref(), self.api);
        if !matches {
            debug!(
                "skipping {:?} {:?} for api {:?}",
                raw.category,
                raw.name(),
                raw.api
            );
        }
        matches
    }

    /// Adds every category except enums, which are resolved once all
    /// bitmasks are known.
    fn add(&mut self, raw: &RawType) -> Result<(), BuildError> {
        let category = match raw.category.as_deref() {
            Some(category) => category,
            None => return Ok(()),
        };
        if category == "enum" || !self.is_for_api(raw) {
            return Ok(());
        }

        match category {
            "bitmask" => {
                let bitmask = Bitmask::from_raw(raw)?;
                let requires = bitmask.requires.clone();
                let position = self.types.bitmasks.insert(bitmask)?;
                if let Some(requires) = requires {
                    self.bitmask_by_requires.entry(requires).or_insert(position);
                }
            }
            "handle" => {
                self.types.handles.insert(Handle::from_raw(raw)?)?;
            }
            "struct" => {
                self.types.structs.insert(Struct::from_raw(raw, self.api)?)?;
            }
            "basetype" => {
                if raw.type_element.is_some() {
                    self.types.base_types.insert(BaseType::from_raw(raw)?)?;
                } else {
                    debug!("skipping base type {:?} without native type", raw.name());
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn add_enum(&mut self, raw: &RawType) -> Result<(), BuildError> {
        let declared_name = raw
            .name()
            .ok_or_else(|| BuildError::missing(Category::Enum, None, "name"))?;
        let key = raw.alias.as_deref().unwrap_or(declared_name);

        let enumeration = self.enumerations.get(key);
        let mut storage = raw.type_element.as_deref().map(normalize::format_type_name);
        let mut is_bitmask = false;

        let bitmask = self
            .bitmask_by_requires
            .get(key)
            .and_then(|&i| self.types.bitmasks.get_index(i));
        if let Some(bitmask) = bitmask {
            storage = bitmask.storage.clone();
            is_bitmask = true;
        }

        if storage.is_none() {
            if let Some(enumeration) = enumeration.filter(|e| e.is_bitmask) {
                if let Some(width) = enumeration.bit_width {
                    storage = Some(storage_for_width(&enumeration.name, width)?);
                }
            }
        }

        let e = Enum {
            name: declared_name.replace("FlagBits", "Flags"),
            declared_name: String::from(declared_name),
            alias: raw.alias.clone(),
            storage,
            is_bitmask,
            enumeration: enumeration.map(|e| e.name.clone()),
        };
        trace!(
            "enum {} storage {:?} bitmask {} values {:?}",
            e.name,
            e.storage,
            e.is_bitmask,
            e.enumeration
        );
        self.types.enums.insert(e)?;
        Ok(())
    }
}

fn storage_for_width(enumeration: &str, width: u32) -> Result<String, BuildError> {
    match width {
        32 => Ok(String::from("u32")),
        64 => Ok(String::from("u64")),
        _ => Err(BuildError::UnsupportedBitWidth {
            enumeration: String::from(enumeration),
            width,
        }),
    }
}
