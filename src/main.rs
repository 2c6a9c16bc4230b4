use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_derive::Serialize;

use vk_bindgen::{BaseType, Bitmask, Command, Enum, Handle, Selection, Struct};

/// Resolve the Vulkan registry and dump the part a selection enables.
#[derive(Debug, Parser)]
#[command(name = "vk-bindgen", version)]
struct Args {
    /// Path to vk.xml.
    xml: PathBuf,

    /// Feature to enable, e.g. VK_VERSION_1_0. May be repeated.
    #[arg(long = "feature")]
    features: Vec<String>,

    /// Extension author to enable, e.g. KHR. May be repeated.
    #[arg(long = "author")]
    authors: Vec<String>,

    /// Platform to enable, e.g. win32. May be repeated.
    #[arg(long = "platform")]
    platforms: Vec<String>,

    #[arg(long, default_value = vk_bindgen::DEFAULT_API)]
    api: String,

    /// Where to write the RON dump. Standard output when absent.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct Dump<'a> {
    api: &'a str,
    selection: &'a Selection,
    features: Vec<&'a str>,
    extensions: Vec<&'a str>,
    base_types: Vec<&'a BaseType>,
    handles: Vec<&'a Handle>,
    bitmasks: Vec<&'a Bitmask>,
    enums: Vec<&'a Enum>,
    structs: Vec<&'a Struct>,
    commands: Vec<&'a Command>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let registry = vk_bindgen::load_file(&args.xml, &args.api)
        .with_context(|| format!("failed to load {}", args.xml.display()))?;

    let selection = Selection::new()
        .with_features(args.features)
        .with_authors(args.authors)
        .with_platforms(args.platforms);
    let enabled = selection.apply(&registry);

    let dump = Dump {
        api: registry.api(),
        selection: &selection,
        features: enabled.features.iter().map(|f| f.name.as_str()).collect(),
        extensions: enabled.extensions.iter().map(|e| e.name.as_str()).collect(),
        base_types: enabled.base_types().collect(),
        handles: enabled.handles().collect(),
        bitmasks: enabled.bitmasks().collect(),
        enums: enabled.enums().collect(),
        structs: enabled.structs().collect(),
        commands: enabled.commands().collect(),
    };

    let text = ron::ser::to_string_pretty(
        &dump,
        ron::ser::PrettyConfig::new().indentor(String::from("\t")),
    )?;

    match &args.output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
