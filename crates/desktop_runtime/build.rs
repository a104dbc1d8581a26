use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

const CATALOG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WindowCatalog {
    schema_version: u32,
    window: Vec<WindowManifest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum WindowKindManifest {
    Standard,
    Multiplexed,
    TransientLink,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WindowManifest {
    id: String,
    title: String,
    kind: WindowKindManifest,
    #[serde(default)]
    minimizable: bool,
    #[serde(default)]
    accepts_input: bool,
    url: Option<String>,
    geometry: GeometryManifest,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GeometryManifest {
    base_width: i32,
    base_height: i32,
    min_width: i32,
    min_height: i32,
    desktop_margin: i32,
    tablet_margin: i32,
    mobile_margin: i32,
}

fn variant_name(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn validate(manifest: &WindowManifest) -> Result<(), String> {
    let id = &manifest.id;
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("window id `{id}` must be a non-empty ascii identifier"));
    }
    match manifest.kind {
        WindowKindManifest::TransientLink => {
            if manifest.url.as_deref().map_or(true, str::is_empty) {
                return Err(format!("transient link `{id}` needs a url"));
            }
            if manifest.minimizable || manifest.accepts_input {
                return Err(format!(
                    "transient link `{id}` cannot be minimizable or accept input"
                ));
            }
        }
        WindowKindManifest::Multiplexed if !manifest.accepts_input => {
            return Err(format!("multiplexed window `{id}` must accept input"));
        }
        _ if manifest.url.is_some() => {
            return Err(format!("only transient links may declare a url (`{id}`)"));
        }
        _ => {}
    }

    let g = &manifest.geometry;
    let all = [
        g.base_width,
        g.base_height,
        g.min_width,
        g.min_height,
        g.desktop_margin,
        g.tablet_margin,
        g.mobile_margin,
    ];
    if all.iter().any(|value| *value < 0) {
        return Err(format!("geometry of `{id}` contains a negative value"));
    }
    if g.min_width > g.base_width || g.min_height > g.base_height {
        return Err(format!("geometry of `{id}` has a minimum larger than its base size"));
    }
    Ok(())
}

fn render_descriptor(out: &mut String, manifest: &WindowManifest) {
    let variant = variant_name(&manifest.id);
    let kind = match manifest.kind {
        WindowKindManifest::Standard => "WindowKind::Standard".to_string(),
        WindowKindManifest::Multiplexed => "WindowKind::Multiplexed".to_string(),
        WindowKindManifest::TransientLink => format!(
            "WindowKind::TransientLink {{ url: {:?} }}",
            manifest.url.as_deref().unwrap_or_default()
        ),
    };
    let g = &manifest.geometry;
    let _ = writeln!(
        out,
        "        WindowId::{variant} => WindowDescriptor {{\n\
         \x20           window_id: WindowId::{variant},\n\
         \x20           title: {title:?},\n\
         \x20           kind: {kind},\n\
         \x20           minimizable: {minimizable},\n\
         \x20           accepts_input: {accepts_input},\n\
         \x20           geometry: GeometrySpec {{\n\
         \x20               base_width: {bw},\n\
         \x20               base_height: {bh},\n\
         \x20               min_width: {mw},\n\
         \x20               min_height: {mh},\n\
         \x20               desktop_margin: {dm},\n\
         \x20               tablet_margin: {tm},\n\
         \x20               mobile_margin: {mm},\n\
         \x20           }},\n\
         \x20       }},",
        title = manifest.title,
        minimizable = manifest.minimizable,
        accepts_input = manifest.accepts_input,
        bw = g.base_width,
        bh = g.base_height,
        mw = g.min_width,
        mh = g.min_height,
        dm = g.desktop_margin,
        tm = g.tablet_margin,
        mm = g.mobile_margin,
    );
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("window_catalog.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: WindowCatalog = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if catalog.schema_version != CATALOG_SCHEMA_VERSION {
        panic!(
            "window catalog schema mismatch in {}: expected {CATALOG_SCHEMA_VERSION} found {}",
            path.display(),
            catalog.schema_version
        );
    }

    let mut seen = BTreeSet::new();
    for manifest in &catalog.window {
        if let Err(err) = validate(manifest) {
            panic!("invalid window catalog entry in {}: {err}", path.display());
        }
        if !seen.insert(manifest.id.clone()) {
            panic!("duplicate window id `{}` in {}", manifest.id, path.display());
        }
    }

    let mut generated = String::from(
        "/// Build-time generated window catalog lookup.\n\
const fn generated_descriptor(window_id: WindowId) -> WindowDescriptor {\n    match window_id {\n",
    );
    for manifest in &catalog.window {
        render_descriptor(&mut generated, manifest);
    }
    generated.push_str("    }\n}\n");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("window_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
