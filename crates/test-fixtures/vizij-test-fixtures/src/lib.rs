use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    grids: HashMap<String, String>,
    #[serde(rename = "ui-data")]
    ui_data: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

/// Read any fixture by path relative to the fixtures root. Grid references
/// stored inside UI records use this form.
pub fn read_relative(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_relative(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod grids {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.grids.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_relative(lookup(&MANIFEST.grids, "grid", name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        super::load_json(lookup(&MANIFEST.grids, "grid", name)?)
    }

    /// Load a grid by the relative path a UI record refers to it with.
    pub fn load_relative<T: DeserializeOwned>(rel: &str) -> Result<T> {
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(resolve_path(lookup(&MANIFEST.grids, "grid", name)?))
    }
}

pub mod ui_data {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.ui_data.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_relative(lookup(&MANIFEST.ui_data, "ui-data", name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        super::load_json(lookup(&MANIFEST.ui_data, "ui-data", name)?)
    }
}
