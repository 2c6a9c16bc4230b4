//! Mapping of raw C type tokens to the names and shapes used by the model.
//!
//! Every structural record ([`Field`](crate::Field),
//! [`Parameter`](crate::Parameter)) derives its shape through these
//! functions, so a mapping change has exactly one place to go.

use crate::error::BuildError;

/// Name `void` is mapped to.
pub const VOID: &str = "c_void";

/// Name `char` is mapped to.
pub const C_CHAR: &str = "c_char";

/// Name `int8_t` is mapped to.
pub const I8: &str = "i8";

/// Number of `*` characters across all modifier tokens.
pub fn pointer_depth<S: AsRef<str>>(modifiers: &[S]) -> u32 {
    modifiers
        .iter()
        .flat_map(|m| m.as_ref().chars())
        .filter(|&c| c == '*')
        .count() as u32
}

/// Whether any modifier token contains `const`.
pub fn is_const<S: AsRef<str>>(modifiers: &[S]) -> bool {
    modifiers.iter().any(|m| m.as_ref().contains("const"))
}

/// Whether the declaration is a fixed size array, `float matrix[3][4]`.
pub fn is_inline_array<S: AsRef<str>>(modifiers: &[S]) -> bool {
    modifiers.iter().any(|m| m.as_ref().contains('['))
}

/// Number of elements of an inline array.
///
/// A symbolic `size` (the `<enum>` inside a member) is looked up with
/// [`array_constant`]; otherwise every bracketed literal in `modifiers` is
/// multiplied together. Modifiers without brackets give 0.
pub fn array_length<S: AsRef<str>>(size: Option<&str>, modifiers: &[S]) -> Result<u32, BuildError> {
    if let Some(name) = size {
        return array_constant(name).ok_or_else(|| BuildError::UnknownArrayConstant {
            name: String::from(name),
        });
    }

    let text: String = modifiers.iter().map(|m| m.as_ref()).collect();
    let invalid = || BuildError::InvalidArrayDimension { text: text.clone() };

    let mut length = None;
    let mut rest = text.as_str();
    while let Some(open) = rest.find('[') {
        let inner = &rest[open + 1..];
        let close = inner.find(']').ok_or_else(invalid)?;
        let dimension: u32 = inner[..close].trim().parse().map_err(|_| invalid())?;
        length = Some(
            length
                .unwrap_or(1u32)
                .checked_mul(dimension)
                .ok_or_else(invalid)?,
        );
        rest = &inner[close + 1..];
    }

    Ok(length.unwrap_or(0))
}

/// Value of a named array size constant.
pub fn array_constant(name: &str) -> Option<u32> {
    Some(match name {
        "VK_MAX_PHYSICAL_DEVICE_NAME_SIZE" => 256,
        "VK_UUID_SIZE" => 16,
        "VK_LUID_SIZE" | "VK_LUID_SIZE_KHR" => 8,
        "VK_MAX_EXTENSION_NAME_SIZE" => 256,
        "VK_MAX_DESCRIPTION_SIZE" => 256,
        "VK_MAX_MEMORY_TYPES" => 32,
        "VK_MAX_MEMORY_HEAPS" => 16,
        "VK_MAX_DEVICE_GROUP_SIZE" | "VK_MAX_DEVICE_GROUP_SIZE_KHR" => 32,
        "VK_MAX_DRIVER_NAME_SIZE" | "VK_MAX_DRIVER_NAME_SIZE_KHR" => 256,
        "VK_MAX_DRIVER_INFO_SIZE" | "VK_MAX_DRIVER_INFO_SIZE_KHR" => 256,
        "VK_MAX_GLOBAL_PRIORITY_SIZE"
        | "VK_MAX_GLOBAL_PRIORITY_SIZE_KHR"
        | "VK_MAX_GLOBAL_PRIORITY_SIZE_EXT" => 16,
        "VK_MAX_SHADER_MODULE_IDENTIFIER_SIZE_EXT" => 32,
        "VK_MAX_PIPELINE_BINARY_KEY_SIZE_KHR" => 32,
        "VK_MAX_VIDEO_AV1_REFERENCES_PER_FRAME_KHR" => 7,
        "VK_MAX_VIDEO_VP9_REFERENCES_PER_FRAME_KHR" => 3,
        "VK_MAX_PHYSICAL_DEVICE_DATA_GRAPH_OPERATION_SET_NAME_SIZE_ARM" => 128,
        _ => return None,
    })
}

/// Maps C and platform type names to their Rust spelling.
///
/// `*FlagBits*` names become `*Flags*`, anything else unknown passes
/// through.
pub fn format_type_name(raw: &str) -> String {
    let mapped = match raw {
        "void" => VOID,
        "char" => C_CHAR,
        "int" => "c_int",
        "float" => "f32",
        "double" => "f64",
        "uint8_t" => "u8",
        "int8_t" => I8,
        "uint16_t" => "u16",
        "int16_t" => "i16",
        "uint32_t" => "u32",
        "int32_t" => "i32",
        "uint64_t" => "u64",
        "int64_t" => "i64",
        "size_t" => "usize",
        "VkBool32" => "Bool32",
        "VkFlags" | "VkSampleMask" => "u32",
        "VkFlags64" | "VkDeviceSize" | "VkDeviceAddress" => "u64",
        "DWORD" => "u32",
        "HANDLE" | "HINSTANCE" | "HWND" | "HMONITOR" => "*mut c_void",
        "LPCWSTR" => "*const u16",
        "SECURITY_ATTRIBUTES" => VOID,
        other => return other.replace("FlagBits", "Flags"),
    };
    String::from(mapped)
}

/// Renames identifiers which are Rust keywords.
pub fn format_field_name(raw: &str) -> String {
    match raw {
        "type" => String::from("ty"),
        // Not allowed as raw identifiers.
        "self" | "Self" | "super" | "crate" => format!("{}_", raw),
        "as" | "async" | "await" | "box" | "break" | "const" | "continue" | "dyn" | "else"
        | "enum" | "extern" | "false" | "fn" | "for" | "if" | "impl" | "in" | "let" | "loop"
        | "match" | "mod" | "move" | "mut" | "pub" | "ref" | "return" | "static" | "struct"
        | "trait" | "true" | "try" | "unsafe" | "use" | "where" | "while" | "yield" => {
            format!("r#{}", raw)
        }
        other => String::from(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_and_const_tokens() {
        let tokens = ["const ", "* const*"];
        assert_eq!(pointer_depth(&tokens), 2);
        assert!(is_const(&tokens));
        assert!(!is_inline_array(&tokens));

        let empty: [&str; 0] = [];
        assert_eq!(pointer_depth(&empty), 0);
        assert!(!is_const(&empty));
    }

    #[test]
    fn literal_dimensions_multiply() {
        assert_eq!(array_length(None, &["[4]", "[4]"]), Ok(16));
        assert_eq!(array_length(None, &["[3][4]"]), Ok(12));
        assert_eq!(array_length(None, &["[2]"]), Ok(2));
        assert_eq!(array_length::<&str>(None, &[]), Ok(0));
    }

    #[test]
    fn symbolic_dimensions() {
        assert_eq!(array_length(Some("VK_UUID_SIZE"), &["[", "]"]), Ok(16));
        assert_eq!(
            array_length(Some("VK_MAX_PHYSICAL_DEVICE_NAME_SIZE"), &["[", "]"]),
            Ok(256)
        );
        assert_eq!(
            array_length(Some("VK_NOT_A_CONSTANT"), &["[", "]"]),
            Err(BuildError::UnknownArrayConstant {
                name: String::from("VK_NOT_A_CONSTANT")
            })
        );
    }

    #[test]
    fn malformed_dimensions() {
        assert!(array_length(None, &["[", "]"]).is_err());
        assert!(array_length(None, &["[4"]).is_err());
        assert!(array_length(None, &["[x]"]).is_err());
    }

    #[test]
    fn type_names() {
        assert_eq!(format_type_name("uint32_t"), "u32");
        assert_eq!(format_type_name("char"), C_CHAR);
        assert_eq!(format_type_name("void"), VOID);
        assert_eq!(format_type_name("VkDeviceSize"), "u64");
        assert_eq!(format_type_name("HWND"), "*mut c_void");
        assert_eq!(
            format_type_name("VkPipelineStageFlagBits2"),
            "VkPipelineStageFlags2"
        );
        assert_eq!(format_type_name("VkInstance"), "VkInstance");
    }

    #[test]
    fn field_names() {
        assert_eq!(format_field_name("type"), "ty");
        assert_eq!(format_field_name("ref"), "r#ref");
        assert_eq!(format_field_name("self"), "self_");
        assert_eq!(format_field_name("sType"), "sType");
        assert_eq!(format_field_name("object"), "object");
    }
}
