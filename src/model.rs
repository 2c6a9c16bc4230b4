//! Resolved registry entities.
//!
//! All of these are built once by [`Registry`](crate::Registry) and never
//! change afterwards. References between entities are kept as names and
//! resolved through the registry on demand.

use std::fmt;

use crate::error::{BuildError, Category};
use crate::normalize::{self, C_CHAR, I8, VOID};
use crate::partition::Named;
use crate::types::*;

/// Whether a record tagged with `api="vulkan,vulkansc"` style lists belongs
/// to `target`. Records without the attribute belong to every API.
pub(crate) fn api_matches(api: Option<&str>, target: &str) -> bool {
    match api {
        Some(list) => list.split(',').any(|a| a.trim() == target),
        None => true,
    }
}

fn split_codes(codes: Option<&str>) -> Vec<String> {
    codes
        .map(|c| {
            c.split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct Tag {
    pub name: String,
    pub author: Option<String>,
    pub contact: Option<String>,
}

impl Tag {
    pub(crate) fn from_raw(raw: &RawTag) -> Result<Self, BuildError> {
        let name = raw
            .name
            .clone()
            .ok_or_else(|| BuildError::missing(Category::Tag, None, "name"))?;
        Ok(Tag {
            name,
            author: raw.author.clone(),
            contact: raw.contact.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct Platform {
    pub name: String,
    pub protect: Option<String>,
    pub comment: Option<String>,
}

impl Platform {
    pub(crate) fn from_raw(raw: &RawPlatform) -> Result<Self, BuildError> {
        let name = raw
            .name
            .clone()
            .ok_or_else(|| BuildError::missing(Category::Platform, None, "name"))?;
        Ok(Platform {
            name,
            protect: raw.protect.clone(),
            comment: raw.comment.clone(),
        })
    }
}

/// An abstract set of named values, the body of an `<enums>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct Enumeration {
    pub name: String,
    pub values: Vec<EnumerationValue>,
    pub is_bitmask: bool,
    /// 32 or 64 for bitmask enumerations which declare it.
    pub bit_width: Option<u32>,
}

impl Enumeration {
    pub(crate) fn from_raw(raw: &RawEnums, api: &str) -> Result<Self, BuildError> {
        let name = raw
            .name
            .clone()
            .ok_or_else(|| BuildError::missing(Category::Enumeration, None, "name"))?;

        let bit_width = match raw.bitwidth.as_deref() {
            Some(text) => Some(text.trim().parse().map_err(|_| BuildError::InvalidNumber {
                category: Category::Enumeration,
                name: name.clone(),
                text: String::from(text),
            })?),
            None => None,
        };

        let values = raw
            .values
            .iter()
            .filter(|v| api_matches(v.api.as_deref(), api))
            .map(|v| EnumerationValue::from_raw(v, &name))
            .collect::<Result<_, _>>()?;

        Ok(Enumeration {
            is_bitmask: raw.kind.as_deref() == Some("bitmask"),
            name,
            values,
            bit_width,
        })
    }

    pub fn value(&self, name: &str) -> Option<&EnumerationValue> {
        self.values.iter().find(|v| v.name == name)
    }

    /// Follows alias values within this enumeration until a literal or bit
    /// value is found.
    ///
    /// Returns `None` for unknown names, values without a value, aliases
    /// leaving the enumeration and alias cycles.
    pub fn resolve(&self, name: &str) -> Option<&EnumValue> {
        let mut current = name;
        // A chain longer than the value count must revisit a value.
        for _ in 0..=self.values.len() {
            match self.value(current)?.value.as_ref()? {
                EnumValue::Alias(target) => current = target.as_str(),
                terminal => return Some(terminal),
            }
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct EnumerationValue {
    pub name: String,
    /// Absent when the document gives neither value, bit nor alias.
    pub value: Option<EnumValue>,
}

impl EnumerationValue {
    fn from_raw(raw: &RawEnumValue, enumeration: &str) -> Result<Self, BuildError> {
        let name = raw.name.clone().ok_or_else(|| {
            BuildError::missing(Category::EnumerationValue, Some(enumeration), "name")
        })?;

        let value = if let Some(value) = &raw.value {
            Some(EnumValue::Literal(value.clone()))
        } else if let Some(bitpos) = &raw.bitpos {
            let bit = bitpos.trim().parse().map_err(|_| BuildError::InvalidNumber {
                category: Category::EnumerationValue,
                name: name.clone(),
                text: bitpos.clone(),
            })?;
            Some(EnumValue::Bit(bit))
        } else {
            raw.alias.clone().map(EnumValue::Alias)
        };

        Ok(EnumerationValue { name, value })
    }
}

/// Value of an enumeration entry as written in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub enum EnumValue {
    /// A literal expression, `0`, `-1`, `(~0U)`, ...
    Literal(String),
    /// A flag bit, `1 << bit`.
    Bit(u32),
    /// Name of another entry. Resolved one hop only; see
    /// [`Enumeration::resolve`].
    Alias(String),
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Literal(text) => f.write_str(text),
            EnumValue::Bit(bit) => write!(f, "1 << {}", bit),
            EnumValue::Alias(name) => f.write_str(name),
        }
    }
}

fn type_name(raw: &RawType, category: Category) -> Result<&str, BuildError> {
    raw.name()
        .ok_or_else(|| BuildError::missing(category, None, "name"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct BaseType {
    pub name: String,
    /// Underlying native type, already mapped.
    pub ty: String,
}

impl BaseType {
    pub(crate) fn from_raw(raw: &RawType) -> Result<Self, BuildError> {
        let name = type_name(raw, Category::BaseType)?;
        let ty = raw
            .type_element
            .as_deref()
            .ok_or_else(|| BuildError::missing(Category::BaseType, Some(name), "type"))?;
        Ok(BaseType {
            name: String::from(name),
            ty: normalize::format_type_name(ty),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct Handle {
    pub name: String,
    pub alias: Option<String>,
    pub parent: Option<String>,
    /// Declared with `VK_DEFINE_HANDLE` rather than the non-dispatchable
    /// macro. Always false on aliases.
    pub dispatchable: bool,
}

impl Handle {
    pub(crate) fn from_raw(raw: &RawType) -> Result<Self, BuildError> {
        let name = type_name(raw, Category::Handle)?;
        Ok(Handle {
            name: String::from(name),
            alias: raw.alias.clone(),
            parent: raw.parent.clone(),
            dispatchable: raw.type_element.as_deref() == Some("VK_DEFINE_HANDLE"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct Bitmask {
    pub name: String,
    pub alias: Option<String>,
    /// Storage type, already mapped (`u32`, `u64`).
    pub storage: Option<String>,
    /// Name of the enum declaring the bits.
    pub requires: Option<String>,
}

impl Bitmask {
    pub(crate) fn from_raw(raw: &RawType) -> Result<Self, BuildError> {
        let name = type_name(raw, Category::Bitmask)?;
        Ok(Bitmask {
            name: String::from(name),
            alias: raw.alias.clone(),
            storage: raw.type_element.as_deref().map(normalize::format_type_name),
            // 64-bit flag types name their bits with `bitvalues`.
            requires: raw.requires.clone().or_else(|| raw.bitvalues.clone()),
        })
    }
}

/// A concrete enum type. Built by the registry, which resolves its storage
/// type and value set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct Enum {
    /// Name with `FlagBits` rewritten to `Flags`.
    pub name: String,
    /// Name as declared in the document.
    pub declared_name: String,
    pub alias: Option<String>,
    pub storage: Option<String>,
    pub is_bitmask: bool,
    /// Name of the linked [`Enumeration`].
    pub enumeration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct Struct {
    pub name: String,
    pub alias: Option<String>,
    /// Members in declaration order.
    pub fields: Vec<Field>,
}

impl Struct {
    pub(crate) fn from_raw(raw: &RawType, api: &str) -> Result<Self, BuildError> {
        let name = type_name(raw, Category::Struct)?;
        let fields = raw
            .members
            .iter()
            .filter(|m| api_matches(m.api.as_deref(), api))
            .map(|m| Field::from_raw(m, name))
            .collect::<Result<_, _>>()?;
        Ok(Struct {
            name: String::from(name),
            alias: raw.alias.clone(),
            fields,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct Field {
    pub name: String,
    pub type_name: String,
    pub pointer_depth: u32,
    pub is_const: bool,
    /// Element count, present only for inline arrays.
    pub array_len: Option<u32>,
    /// Fixed value, e.g. the `sType` a struct must carry.
    pub value: Option<String>,
}

impl Field {
    fn from_raw(raw: &RawMember, owner: &str) -> Result<Self, BuildError> {
        let name = raw
            .name
            .as_deref()
            .ok_or_else(|| BuildError::missing(Category::Field, Some(owner), "name"))?;
        let type_name = raw.type_name.as_deref().ok_or_else(|| {
            BuildError::missing(
                Category::Field,
                Some(format!("{}.{}", owner, name).as_str()),
                "type",
            )
        })?;

        let array_len = if normalize::is_inline_array(&raw.modifiers) {
            Some(normalize::array_length(
                raw.array_size.as_deref(),
                &raw.modifiers,
            )?)
        } else {
            None
        };

        Ok(Field {
            name: normalize::format_field_name(name),
            type_name: normalize::format_type_name(type_name),
            pointer_depth: normalize::pointer_depth(&raw.modifiers),
            is_const: normalize::is_const(&raw.modifiers),
            array_len,
            value: raw.values.clone(),
        })
    }

    pub fn is_inline_array(&self) -> bool {
        self.array_len.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct Command {
    pub name: String,
    /// Always `None` in a built [`Registry`](crate::Registry), which drops
    /// alias declarations instead of storing them as commands.
    pub alias: Option<String>,
    pub return_type: String,
    pub params: Vec<Parameter>,
    pub success_codes: Vec<String>,
    pub error_codes: Vec<String>,
}

impl Command {
    pub(crate) fn from_raw(raw: &RawCommand, api: &str) -> Result<Self, BuildError> {
        let name = raw
            .name()
            .ok_or_else(|| BuildError::missing(Category::Command, None, "name"))?;
        let return_type = raw
            .proto
            .return_type
            .as_deref()
            .ok_or_else(|| BuildError::missing(Category::Command, Some(name), "proto/type"))?;

        let params = raw
            .params
            .iter()
            .filter(|p| api_matches(p.api.as_deref(), api))
            .map(|p| Parameter::from_raw(p, name))
            .collect::<Result<_, _>>()?;

        Ok(Command {
            name: String::from(name),
            alias: raw.alias.clone(),
            return_type: normalize::format_type_name(return_type),
            params,
            success_codes: split_codes(raw.successcodes.as_deref()),
            error_codes: split_codes(raw.errorcodes.as_deref()),
        })
    }
}

/// Nullability of a parameter, from its `optional` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub enum Optionality {
    Required,
    /// The pointer may be null.
    Optional,
    /// Either the pointer may be null or the pointee may be zero, but not
    /// both (`optional="false,true"`).
    SemiOptional,
}

impl Optionality {
    pub fn from_marker(marker: Option<&str>) -> Self {
        match marker {
            Some(m) if m.contains("true") && m.contains("false") => Optionality::SemiOptional,
            Some(m) if m.contains("true") => Optionality::Optional,
            _ => Optionality::Required,
        }
    }
}

/// How a parameter crosses the binding boundary.
///
/// `In`, `Out` and `Ref` pass by reference and consume one level of
/// pointer indirection; `Value` passes the declared type unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub enum ParamPassing {
    In,
    Out,
    Ref,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
    pub pointer_depth: u32,
    pub is_const: bool,
    pub optionality: Optionality,
    /// Name of the companion length parameter, when the parameter is an array.
    pub len: Option<String>,
}

impl Parameter {
    fn from_raw(raw: &RawParam, command: &str) -> Result<Self, BuildError> {
        let name = raw
            .name
            .as_deref()
            .ok_or_else(|| BuildError::missing(Category::Parameter, Some(command), "name"))?;
        let type_name = raw.type_name.as_deref().ok_or_else(|| {
            BuildError::missing(
                Category::Parameter,
                Some(format!("{}.{}", command, name).as_str()),
                "type",
            )
        })?;

        Ok(Parameter {
            name: normalize::format_field_name(name),
            type_name: normalize::format_type_name(type_name),
            pointer_depth: normalize::pointer_depth(&raw.modifiers),
            is_const: normalize::is_const(&raw.modifiers),
            optionality: Optionality::from_marker(raw.optional.as_deref()),
            len: raw.len.clone(),
        })
    }

    pub fn is_array(&self) -> bool {
        self.len.is_some()
    }

    // Pointers to void or to bytes always pass as raw pointers.
    fn points_to_data(&self) -> bool {
        self.pointer_depth > 0
            && self.type_name != VOID
            && self.type_name != C_CHAR
            && self.type_name != I8
    }

    pub fn is_in_parameter(&self) -> bool {
        self.points_to_data()
            && self.optionality == Optionality::Required
            && !self.is_array()
            && self.is_const
    }

    pub fn is_out_parameter(&self) -> bool {
        self.points_to_data()
            && self.optionality == Optionality::Required
            && !self.is_array()
            && !self.is_const
    }

    pub fn is_ref_parameter(&self) -> bool {
        self.points_to_data() && self.optionality == Optionality::SemiOptional
    }

    pub fn passing(&self) -> ParamPassing {
        if self.is_in_parameter() {
            ParamPassing::In
        } else if self.is_out_parameter() {
            ParamPassing::Out
        } else if self.is_ref_parameter() {
            ParamPassing::Ref
        } else {
            ParamPassing::Value
        }
    }

    /// Pointer depth left in the external signature once the passing
    /// qualifier has taken its level.
    pub fn signature_pointer_depth(&self) -> u32 {
        match self.passing() {
            ParamPassing::Value => self.pointer_depth,
            _ => self.pointer_depth - 1,
        }
    }
}

fn required_names(
    requires: &[RawRequire],
    api: &str,
    category: Category,
    owner: &str,
) -> Result<(Vec<String>, Vec<String>), BuildError> {
    let mut types = Vec::new();
    let mut commands = Vec::new();
    for require in requires.iter().filter(|r| api_matches(r.api.as_deref(), api)) {
        for item in &require.types {
            let name = item
                .name
                .clone()
                .ok_or_else(|| BuildError::missing(category, Some(owner), "require/type@name"))?;
            types.push(name);
        }
        for item in &require.commands {
            let name = item.name.clone().ok_or_else(|| {
                BuildError::missing(category, Some(owner), "require/command@name")
            })?;
            commands.push(name);
        }
    }
    Ok((types, commands))
}

/// A core API version and everything it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct Feature {
    pub name: String,
    pub api: Option<String>,
    pub number: Option<String>,
    pub required_types: Vec<String>,
    pub required_commands: Vec<String>,
}

impl Feature {
    pub(crate) fn from_raw(raw: &RawFeature, api: &str) -> Result<Self, BuildError> {
        let name = raw
            .name
            .as_deref()
            .ok_or_else(|| BuildError::missing(Category::Feature, None, "name"))?;
        let (required_types, required_commands) =
            required_names(&raw.requires, api, Category::Feature, name)?;
        Ok(Feature {
            name: String::from(name),
            api: raw.api.clone(),
            number: raw.number.clone(),
            required_types,
            required_commands,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[non_exhaustive]
pub struct Extension {
    pub name: String,
    pub number: Option<String>,
    pub author: Option<String>,
    pub ext_type: Option<String>,
    pub platform: Option<String>,
    pub supported: Option<String>,
    pub required_types: Vec<String>,
    pub required_commands: Vec<String>,
}

impl Extension {
    pub(crate) fn from_raw(raw: &RawExtension, api: &str) -> Result<Self, BuildError> {
        let name = raw
            .name
            .as_deref()
            .ok_or_else(|| BuildError::missing(Category::Extension, None, "name"))?;
        let (required_types, required_commands) =
            required_names(&raw.requires, api, Category::Extension, name)?;
        Ok(Extension {
            name: String::from(name),
            number: raw.number.clone(),
            author: raw.author.clone(),
            ext_type: raw.ext_type.clone(),
            platform: raw.platform.clone(),
            supported: raw.supported.clone(),
            required_types,
            required_commands,
        })
    }

    pub fn is_disabled(&self) -> bool {
        self.supported.as_deref() == Some("disabled")
    }
}

macro_rules! impl_named {
    ($($t:ty),+) => {
        $(
            impl Named for $t {
                fn name(&self) -> &str {
                    &self.name
                }
            }
        )+
    };
}

impl_named!(
    Tag,
    Platform,
    Enumeration,
    BaseType,
    Handle,
    Bitmask,
    Enum,
    Struct,
    Command,
    Feature,
    Extension
);

#[cfg(test)]
mod tests {
    use super::*;

    fn param(
        type_name: &str,
        modifiers: &[&str],
        optional: Option<&str>,
        len: Option<&str>,
    ) -> Parameter {
        let mut raw = RawParam::default();
        raw.name = Some(String::from("pValue"));
        raw.type_name = Some(String::from(type_name));
        raw.modifiers = modifiers.iter().map(|m| String::from(*m)).collect();
        raw.optional = optional.map(String::from);
        raw.len = len.map(String::from);
        Parameter::from_raw(&raw, "vkTest").unwrap()
    }

    #[test]
    fn optionality_markers() {
        assert_eq!(Optionality::from_marker(None), Optionality::Required);
        assert_eq!(Optionality::from_marker(Some("false")), Optionality::Required);
        assert_eq!(Optionality::from_marker(Some("true")), Optionality::Optional);
        assert_eq!(
            Optionality::from_marker(Some("false,true")),
            Optionality::SemiOptional
        );
        assert_eq!(
            Optionality::from_marker(Some("true,false")),
            Optionality::SemiOptional
        );
    }

    #[test]
    fn parameter_passing() {
        let create_info = param("VkInstanceCreateInfo", &["const ", "*"], None, None);
        assert_eq!(create_info.passing(), ParamPassing::In);
        assert_eq!(create_info.signature_pointer_depth(), 0);

        let instance = param("VkInstance", &["*"], None, None);
        assert_eq!(instance.passing(), ParamPassing::Out);

        let count = param("uint32_t", &["*"], Some("false,true"), None);
        assert_eq!(count.passing(), ParamPassing::Ref);
        assert_eq!(count.type_name, "u32");

        let properties = param("VkLayerProperties", &["*"], Some("true"), Some("pPropertyCount"));
        assert_eq!(properties.passing(), ParamPassing::Value);
        assert_eq!(properties.signature_pointer_depth(), 1);

        let name = param("char", &["const ", "*"], None, None);
        assert_eq!(name.passing(), ParamPassing::Value);

        let bytes = param("int8_t", &["const ", "*"], None, None);
        assert_eq!(bytes.type_name, "i8");
        assert_eq!(bytes.passing(), ParamPassing::Value);

        let unsigned_bytes = param("uint8_t", &["const ", "*"], None, None);
        assert_eq!(unsigned_bytes.passing(), ParamPassing::In);

        let data = param("void", &["*", "*"], None, None);
        assert_eq!(data.passing(), ParamPassing::Value);
        assert_eq!(data.signature_pointer_depth(), 2);

        let by_value = param("VkDevice", &[], None, None);
        assert_eq!(by_value.passing(), ParamPassing::Value);
    }

    #[test]
    fn parameter_classes_are_exclusive() {
        let markers = [None, Some("true"), Some("false,true")];
        let modifiers: [&[&str]; 4] = [&[], &["*"], &["const ", "*"], &["const ", "* const*"]];
        let lens = [None, Some("count")];
        for type_name in &["void", "char", "int8_t", "uint32_t", "VkBuffer"] {
            for marker in &markers {
                for m in &modifiers {
                    for len in &lens {
                        let p = param(type_name, m, *marker, *len);
                        let classes = [
                            p.is_in_parameter(),
                            p.is_out_parameter(),
                            p.is_ref_parameter(),
                        ];
                        assert!(classes.iter().filter(|&&c| c).count() <= 1, "{:?}", p);
                    }
                }
            }
        }
    }

    #[test]
    fn enumeration_value_forms() {
        let mut raw = RawEnums::default();
        raw.name = Some(String::from("VkCullModeFlagBits"));
        raw.kind = Some(String::from("bitmask"));
        for (name, value, bitpos, alias) in [
            ("VK_CULL_MODE_NONE", Some("0"), None, None),
            ("VK_CULL_MODE_FRONT_BIT", None, Some("0"), None),
            ("VK_CULL_MODE_FRONT", None, None, Some("VK_CULL_MODE_FRONT_BIT")),
            ("VK_CULL_MODE_FRONT_KHR", None, None, Some("VK_CULL_MODE_FRONT")),
            ("VK_CULL_MODE_RESERVED", None, None, None),
        ] {
            let mut v = RawEnumValue::default();
            v.name = Some(String::from(name));
            v.value = value.map(String::from);
            v.bitpos = bitpos.map(String::from);
            v.alias = alias.map(String::from);
            raw.values.push(v);
        }

        let e = Enumeration::from_raw(&raw, "vulkan").unwrap();
        assert!(e.is_bitmask);
        assert_eq!(e.bit_width, None);
        assert_eq!(e.values.len(), 5);
        assert_eq!(e.values[1].value, Some(EnumValue::Bit(0)));
        assert_eq!(e.values[1].value.as_ref().unwrap().to_string(), "1 << 0");
        assert_eq!(
            e.values[3].value,
            Some(EnumValue::Alias(String::from("VK_CULL_MODE_FRONT")))
        );
        assert_eq!(e.values[4].value, None);

        assert_eq!(e.resolve("VK_CULL_MODE_FRONT_KHR"), Some(&EnumValue::Bit(0)));
        assert_eq!(
            e.resolve("VK_CULL_MODE_NONE"),
            Some(&EnumValue::Literal(String::from("0")))
        );
        assert_eq!(e.resolve("VK_CULL_MODE_RESERVED"), None);
        assert_eq!(e.resolve("VK_CULL_MODE_BACK_BIT"), None);
    }

    #[test]
    fn alias_cycles_do_not_resolve() {
        let mut raw = RawEnums::default();
        raw.name = Some(String::from("VkLoop"));
        for (name, alias) in [("A", "B"), ("B", "A")] {
            let mut v = RawEnumValue::default();
            v.name = Some(String::from(name));
            v.alias = Some(String::from(alias));
            raw.values.push(v);
        }
        let e = Enumeration::from_raw(&raw, "vulkan").unwrap();
        assert_eq!(e.resolve("A"), None);
    }

    #[test]
    fn invalid_bit_width_text() {
        let mut raw = RawEnums::default();
        raw.name = Some(String::from("VkAccessFlagBits2"));
        raw.bitwidth = Some(String::from("wide"));
        let err = Enumeration::from_raw(&raw, "vulkan").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::MalformedInput);
    }

    #[test]
    fn api_lists() {
        assert!(api_matches(None, "vulkan"));
        assert!(api_matches(Some("vulkan"), "vulkan"));
        assert!(api_matches(Some("vulkansc,vulkan"), "vulkan"));
        assert!(!api_matches(Some("vulkansc"), "vulkan"));
    }
}
