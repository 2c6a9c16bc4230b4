use std::io::Read;
use std::path::Path;

use xml::reader::XmlEvent;

use crate::error::ParseError;
use crate::types::*;

type XmlEvents<R> = xml::reader::Events<R>;
type XmlAttribute = xml::attribute::OwnedAttribute;

//--------------------------------------------------------------------------------------------------
struct ParseCtx<R: Read> {
    events: XmlEvents<R>,
    xpath: String,
}

impl<R: Read> ParseCtx<R> {
    fn next_event(&mut self) -> Result<Option<XmlEvent>, ParseError> {
        match self.events.next() {
            Some(Ok(event)) => Ok(Some(event)),
            Some(Err(source)) => Err(ParseError::Xml {
                xpath: self.xpath.clone(),
                source,
            }),
            None => Ok(None),
        }
    }

    fn push_element(&mut self, name: &str) {
        self.xpath.push('/');
        self.xpath.push_str(name);
    }

    fn pop_element(&mut self) {
        if let Some(separator_pos) = self.xpath.rfind('/') {
            self.xpath.truncate(separator_pos);
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Attributes the model has no use for are skipped.
macro_rules! match_attributes {
    ($a:ident in $attributes:expr, $($p:pat => $e:expr),+) => {
        for $a in $attributes {
            let n = $a.name.local_name.as_str();
            match n {
                $(
                    $p => $e,
                )+
                _ => {}
            }
        }
    };
}

// Elements without a matching arm are consumed whole.
macro_rules! match_elements {
    ($ctx:expr, $($p:pat => $e:expr),+) => {
        while let Some(e) = $ctx.next_event()? {
            match e {
                XmlEvent::StartElement { name, .. } => {
                    let name = name.local_name.as_str();
                    $ctx.push_element(name);
                    match name {
                        $(
                            $p => $e,
                        )+
                        _ => consume_current_element($ctx)?,
                    }
                }
                XmlEvent::EndElement { .. } => {
                    $ctx.pop_element();
                    break;
                }
                _ => {}
            }
        }
    };

    ($ctx:expr, $attributes:ident, $($p:pat => $e:expr),+) => {
        while let Some(e) = $ctx.next_event()? {
            match e {
                XmlEvent::StartElement { name, $attributes, .. } => {
                    let name = name.local_name.as_str();
                    $ctx.push_element(name);
                    match name {
                        $(
                            $p => $e,
                        )+
                        _ => consume_current_element($ctx)?,
                    }
                }
                XmlEvent::EndElement { .. } => {
                    $ctx.pop_element();
                    break;
                }
                _ => {}
            }
        }
    };
}

// Like `match_elements!`, additionally collecting each run of non-blank text
// between the children into `$text`.
macro_rules! match_elements_collect_text {
    ($ctx:expr, $text:ident, $($p:pat => $e:expr),+) => {
        while let Some(e) = $ctx.next_event()? {
            match e {
                XmlEvent::Characters(text) => $text.push(text),
                XmlEvent::StartElement { name, .. } => {
                    let name = name.local_name.as_str();
                    $ctx.push_element(name);
                    match name {
                        $(
                            $p => $e,
                        )+
                        _ => consume_current_element($ctx)?,
                    }
                }
                XmlEvent::EndElement { .. } => {
                    $ctx.pop_element();
                    break;
                }
                _ => {}
            }
        }
    };

    ($ctx:expr, $attributes:ident, $text:ident, $($p:pat => $e:expr),+) => {
        while let Some(e) = $ctx.next_event()? {
            match e {
                XmlEvent::Characters(text) => $text.push(text),
                XmlEvent::StartElement { name, $attributes, .. } => {
                    let name = name.local_name.as_str();
                    $ctx.push_element(name);
                    match name {
                        $(
                            $p => $e,
                        )+
                        _ => consume_current_element($ctx)?,
                    }
                }
                XmlEvent::EndElement { .. } => {
                    $ctx.pop_element();
                    break;
                }
                _ => {}
            }
        }
    };
}

//--------------------------------------------------------------------------------------------------
/// Reads the Vulkan XML file into raw records.
pub fn parse_file(path: &Path) -> Result<RawRegistry, ParseError> {
    let file = std::io::BufReader::new(std::fs::File::open(path)?);
    let parser = xml::reader::ParserConfig::new().create_reader(file);
    parse_xml(parser.into_iter())
}

/// Reads the Vulkan XML document from a stream into raw records.
pub fn parse_stream<T: Read>(stream: T) -> Result<RawRegistry, ParseError> {
    let parser = xml::reader::ParserConfig::new().create_reader(stream);
    parse_xml(parser.into_iter())
}

fn parse_xml<R: Read>(events: XmlEvents<R>) -> Result<RawRegistry, ParseError> {
    let mut ctx = ParseCtx {
        events,
        xpath: String::new(),
    };

    let mut result = None;

    {
        let ctx = &mut ctx;
        match_elements! {ctx,
            "registry" => result = Some(parse_registry(ctx)?)
        }
    }

    result.ok_or(ParseError::MissingRegistryElement)
}

fn parse_registry<R: Read>(ctx: &mut ParseCtx<R>) -> Result<RawRegistry, ParseError> {
    let mut registry = RawRegistry::default();

    match_elements! {ctx, attributes,
        "platforms" => match_elements!{ctx, attributes,
            "platform" => registry.platforms.push(parse_platform(ctx, attributes)?)
        },
        "tags" => match_elements!{ctx, attributes,
            "tag" => registry.tags.push(parse_tag(ctx, attributes)?)
        },
        "types" => match_elements!{ctx, attributes,
            "type" => registry.types.push(parse_type(ctx, attributes)?)
        },
        "enums" => registry.enums.push(parse_enums(ctx, attributes)?),
        "commands" => match_elements!{ctx, attributes,
            "command" => registry.commands.push(parse_command(ctx, attributes)?)
        },
        "feature" => registry.features.push(parse_feature(ctx, attributes)?),
        "extensions" => match_elements!{ctx, attributes,
            "extension" => registry.extensions.push(parse_extension(ctx, attributes)?)
        }
    }

    Ok(registry)
}

fn parse_platform<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: Vec<XmlAttribute>,
) -> Result<RawPlatform, ParseError> {
    let mut platform = RawPlatform::default();

    match_attributes! {a in attributes,
        "name"    => platform.name    = Some(a.value),
        "protect" => platform.protect = Some(a.value),
        "comment" => platform.comment = Some(a.value)
    }

    consume_current_element(ctx)?;
    Ok(platform)
}

fn parse_tag<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: Vec<XmlAttribute>,
) -> Result<RawTag, ParseError> {
    let mut tag = RawTag::default();

    match_attributes! {a in attributes,
        "name"    => tag.name    = Some(a.value),
        "author"  => tag.author  = Some(a.value),
        "contact" => tag.contact = Some(a.value)
    }

    consume_current_element(ctx)?;
    Ok(tag)
}

fn parse_type<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: Vec<XmlAttribute>,
) -> Result<RawType, ParseError> {
    let mut ty = RawType::default();
    let mut text = Vec::new();

    match_attributes! {a in attributes,
        "category"  => ty.category       = Some(a.value),
        "name"      => ty.name_attribute = Some(a.value),
        "requires"  => ty.requires       = Some(a.value),
        "bitvalues" => ty.bitvalues      = Some(a.value),
        "alias"     => ty.alias          = Some(a.value),
        "parent"    => ty.parent         = Some(a.value),
        "api"       => ty.api            = Some(a.value)
    }

    match_elements_collect_text! {ctx, attributes, text,
        "member" => ty.members.push(parse_member(ctx, attributes)?),
        "name" => ty.name_element = Some(parse_text_element(ctx)?),
        "type" => {
            let inner = parse_text_element(ctx)?;
            // Function pointer types name every parameter type; the first is the return type.
            if ty.type_element.is_none() {
                ty.type_element = Some(inner);
            }
        }
    }

    ty.text = text;
    Ok(ty)
}

fn parse_member<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: Vec<XmlAttribute>,
) -> Result<RawMember, ParseError> {
    let mut member = RawMember::default();
    let mut modifiers = Vec::new();

    match_attributes! {a in attributes,
        "optional" => member.optional = Some(a.value),
        "len"      => member.len      = Some(a.value),
        "values"   => member.values   = Some(a.value),
        "api"      => member.api      = Some(a.value)
    }

    match_elements_collect_text! {ctx, modifiers,
        "type" => member.type_name = Some(parse_text_element(ctx)?),
        "name" => member.name = Some(parse_text_element(ctx)?),
        "enum" => member.array_size = Some(parse_text_element(ctx)?)
    }

    member.modifiers = modifiers;
    Ok(member)
}

fn parse_enums<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: Vec<XmlAttribute>,
) -> Result<RawEnums, ParseError> {
    let mut enums = RawEnums::default();

    match_attributes! {a in attributes,
        "name"     => enums.name     = Some(a.value),
        "type"     => enums.kind     = Some(a.value),
        "bitwidth" => enums.bitwidth = Some(a.value)
    }

    match_elements! {ctx, attributes,
        "enum" => enums.values.push(parse_enum_value(ctx, attributes)?)
    }

    Ok(enums)
}

fn parse_enum_value<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: Vec<XmlAttribute>,
) -> Result<RawEnumValue, ParseError> {
    let mut value = RawEnumValue::default();

    match_attributes! {a in attributes,
        "name"    => value.name    = Some(a.value),
        "type"    => value.kind    = Some(a.value),
        "value"   => value.value   = Some(a.value),
        "bitpos"  => value.bitpos  = Some(a.value),
        "alias"   => value.alias   = Some(a.value),
        "api"     => value.api     = Some(a.value),
        "comment" => value.comment = Some(a.value)
    }

    consume_current_element(ctx)?;
    Ok(value)
}

fn parse_command<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: Vec<XmlAttribute>,
) -> Result<RawCommand, ParseError> {
    let mut command = RawCommand::default();

    match_attributes! {a in attributes,
        "name"         => command.name_attribute = Some(a.value),
        "alias"        => command.alias          = Some(a.value),
        "api"          => command.api            = Some(a.value),
        "successcodes" => command.successcodes   = Some(a.value),
        "errorcodes"   => command.errorcodes     = Some(a.value)
    }

    match_elements! {ctx, attributes,
        "proto" => command.proto = parse_proto(ctx)?,
        "param" => command.params.push(parse_param(ctx, attributes)?)
    }

    Ok(command)
}

fn parse_proto<R: Read>(ctx: &mut ParseCtx<R>) -> Result<RawProto, ParseError> {
    let mut proto = RawProto::default();

    match_elements! {ctx,
        "type" => proto.return_type = Some(parse_text_element(ctx)?),
        "name" => proto.name = Some(parse_text_element(ctx)?)
    }

    Ok(proto)
}

fn parse_param<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: Vec<XmlAttribute>,
) -> Result<RawParam, ParseError> {
    let mut param = RawParam::default();
    let mut modifiers = Vec::new();

    match_attributes! {a in attributes,
        "optional" => param.optional = Some(a.value),
        "len"      => param.len      = Some(a.value),
        "api"      => param.api      = Some(a.value)
    }

    match_elements_collect_text! {ctx, modifiers,
        "type" => param.type_name = Some(parse_text_element(ctx)?),
        "name" => param.name = Some(parse_text_element(ctx)?)
    }

    param.modifiers = modifiers;
    Ok(param)
}

fn parse_feature<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: Vec<XmlAttribute>,
) -> Result<RawFeature, ParseError> {
    let mut feature = RawFeature::default();

    match_attributes! {a in attributes,
        "api"    => feature.api    = Some(a.value),
        "name"   => feature.name   = Some(a.value),
        "number" => feature.number = Some(a.value)
    }

    match_elements! {ctx, attributes,
        "require" => feature.requires.push(parse_require(ctx, attributes)?)
    }

    Ok(feature)
}

fn parse_extension<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: Vec<XmlAttribute>,
) -> Result<RawExtension, ParseError> {
    let mut extension = RawExtension::default();

    match_attributes! {a in attributes,
        "name"      => extension.name      = Some(a.value),
        "number"    => extension.number    = Some(a.value),
        "type"      => extension.ext_type  = Some(a.value),
        "author"    => extension.author    = Some(a.value),
        "supported" => extension.supported = Some(a.value),
        "platform"  => extension.platform  = Some(a.value)
    }

    match_elements! {ctx, attributes,
        "require" => extension.requires.push(parse_require(ctx, attributes)?)
    }

    Ok(extension)
}

fn parse_require<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: Vec<XmlAttribute>,
) -> Result<RawRequire, ParseError> {
    let mut require = RawRequire::default();

    match_attributes! {a in attributes,
        "api"       => require.api       = Some(a.value),
        "feature"   => require.feature   = Some(a.value),
        "extension" => require.extension = Some(a.value)
    }

    match_elements! {ctx, attributes,
        "type" => require.types.push(parse_require_item(ctx, attributes)?),
        "command" => require.commands.push(parse_require_item(ctx, attributes)?)
    }

    Ok(require)
}

fn parse_require_item<R: Read>(
    ctx: &mut ParseCtx<R>,
    attributes: Vec<XmlAttribute>,
) -> Result<RawRequireItem, ParseError> {
    let mut item = RawRequireItem::default();

    match_attributes! {a in attributes,
        "name" => item.name = Some(a.value)
    }

    consume_current_element(ctx)?;
    Ok(item)
}

fn consume_current_element<R: Read>(ctx: &mut ParseCtx<R>) -> Result<(), ParseError> {
    let mut depth = 1;
    while let Some(e) = ctx.next_event()? {
        match e {
            XmlEvent::StartElement { name, .. } => {
                ctx.push_element(name.local_name.as_str());
                depth += 1;
            }
            XmlEvent::EndElement { .. } => {
                depth -= 1;
                ctx.pop_element();
                if depth == 0 {
                    break;
                }
            }
            _ => (),
        }
    }
    Ok(())
}

fn parse_text_element<R: Read>(ctx: &mut ParseCtx<R>) -> Result<String, ParseError> {
    let mut result = String::new();
    let mut depth = 1;
    while let Some(e) = ctx.next_event()? {
        match e {
            XmlEvent::StartElement { name, .. } => {
                ctx.push_element(name.local_name.as_str());
                depth += 1;
            }
            XmlEvent::Characters(text) => result.push_str(&text),
            XmlEvent::EndElement { .. } => {
                depth -= 1;
                ctx.pop_element();
                if depth == 0 {
                    break;
                }
            }
            _ => (),
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_text_becomes_modifiers() {
        let registry = parse_stream(
            r#"<registry><types>
                <type category="struct" name="VkTransformMatrixKHR">
                    <member><type>float</type> <name>matrix</name>[3][4]</member>
                    <member optional="true">const <type>void</type>* <name>pNext</name></member>
                    <member><type>char</type> <name>deviceName</name>[<enum>VK_UUID_SIZE</enum>]</member>
                </type>
            </types></registry>"#
                .as_bytes(),
        )
        .unwrap();

        let members = &registry.types[0].members;
        assert_eq!(members.len(), 3);
        assert_eq!(members[0].modifiers, ["[3][4]"]);
        assert_eq!(members[1].modifiers, ["const ", "* "]);
        assert_eq!(members[1].optional.as_deref(), Some("true"));
        assert_eq!(members[2].modifiers, ["[", "]"]);
        assert_eq!(members[2].array_size.as_deref(), Some("VK_UUID_SIZE"));
    }

    #[test]
    fn errors_carry_the_element_path() {
        let err = parse_stream("<registry><types><type></types></registry>".as_bytes()).unwrap_err();
        match err {
            ParseError::Xml { xpath, .. } => assert_eq!(xpath, "/registry/types/type"),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
