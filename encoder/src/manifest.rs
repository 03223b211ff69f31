use anyhow::{Context, Result};
use apple_codec::LuaScript;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCRIPT_NAME: &str = "render.lua";
pub const MANIFEST_NAME: &str = "entry_point.json";

/// One entry of the host's plugin manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub script: String,
}

impl EntryPoint {
    pub fn script(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: "script".into(),
            script: SCRIPT_NAME.into(),
        }
    }
}

#[derive(Debug)]
pub struct Artifacts {
    pub script: PathBuf,
    pub manifest: PathBuf,
    pub script_bytes: usize,
}

/// Writes `render.lua` and `entry_point.json` into `dir`.
pub fn write_artifacts(dir: &Path, script: &LuaScript, id: &str) -> Result<Artifacts> {
    let script_path = dir.join(SCRIPT_NAME);
    let manifest_path = dir.join(MANIFEST_NAME);

    let lua = script.render();

    std::fs::write(&script_path, &lua)
        .with_context(|| format!("Couldn't write script: {}", script_path.display()))?;

    let manifest = serde_json::to_string_pretty(&[EntryPoint::script(id)])
        .context("Couldn't serialize manifest")?;

    std::fs::write(&manifest_path, manifest)
        .with_context(|| format!("Couldn't write manifest: {}", manifest_path.display()))?;

    Ok(Artifacts {
        script: script_path,
        manifest: manifest_path,
        script_bytes: lua.len(),
    })
}
