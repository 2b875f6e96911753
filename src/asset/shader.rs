//! Shader assets
//!
//! Configuration is a source file path plus the named uniform-block
//! binding points. Loading reads the source, hands it to the backend for
//! compile + link, and keeps the reflected uniform list for material
//! validation. Block bindings live on the runtime program once loaded, so
//! an editor can rebind without touching the configuration; serialization
//! snapshots the live bindings.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::container::{AnyAsset, Asset, AssetPayload};
use super::context::LoadContext;
use super::kind::AssetKind;
use crate::backend::{ShaderHandle, UniformInfo};
use crate::error::AssetError;
use crate::id::AssetId;

/// Shader asset configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShaderDef {
    /// Path to the combined source file.
    pub filepath: PathBuf,
    /// Named uniform block -> binding point.
    #[serde(rename = "uniformBlocks", default)]
    pub uniform_blocks: BTreeMap<String, u32>,
}

/// A compiled shader program.
#[derive(Debug)]
pub struct ShaderProgram {
    pub handle: ShaderHandle,
    /// Current block bindings (editable while loaded).
    pub uniform_blocks: BTreeMap<String, u32>,
    /// Uniforms reflected at compile time. Empty when the backend does not
    /// support reflection.
    pub uniforms: Vec<UniformInfo>,
}

impl AssetPayload for ShaderDef {
    const KIND: AssetKind = AssetKind::Shader;
    type Runtime = ShaderProgram;

    fn create(
        &self,
        _id: AssetId,
        _name: &str,
        ctx: &mut LoadContext<'_>,
    ) -> Result<Self::Runtime, AssetError> {
        let source = read_source(&self.filepath)?;
        let (handle, uniforms) = ctx
            .backend
            .compile_shader(&source, &self.uniform_blocks)
            .map_err(|e| {
                AssetError::MalformedSource(format!(
                    "compiling '{}': {}",
                    self.filepath.display(),
                    e
                ))
            })?;
        Ok(ShaderProgram {
            handle,
            uniform_blocks: self.uniform_blocks.clone(),
            uniforms,
        })
    }

    fn snapshot(&self, instance: Option<&ShaderProgram>) -> Self {
        match instance {
            Some(program) => ShaderDef {
                filepath: self.filepath.clone(),
                uniform_blocks: program.uniform_blocks.clone(),
            },
            None => self.clone(),
        }
    }

    fn from_any(any: &AnyAsset) -> Option<&Asset<Self>> {
        match any {
            AnyAsset::Shader(a) => Some(a),
            _ => None,
        }
    }

    fn from_any_mut(any: &mut AnyAsset) -> Option<&mut Asset<Self>> {
        match any {
            AnyAsset::Shader(a) => Some(a),
            _ => None,
        }
    }

    fn into_any(asset: Asset<Self>) -> AnyAsset {
        AnyAsset::Shader(asset)
    }
}

fn read_source(path: &Path) -> Result<String, AssetError> {
    fs::read_to_string(path).map_err(|e| AssetError::from_file_read(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::Headless;
    use crate::bank::AssetBank;
    use crate::factory;

    fn shader_with_source(dir: &Path) -> (AssetBank, AssetId) {
        let src = dir.join("basic.glsl");
        fs::write(&src, "void main() {}").unwrap();

        let mut bank = AssetBank::new();
        let mut blocks = BTreeMap::new();
        blocks.insert("Camera".to_string(), 0);
        let id = factory::create_asset(
            &mut bank,
            "basic",
            ShaderDef {
                filepath: src,
                uniform_blocks: blocks,
            },
        )
        .unwrap();
        (bank, id)
    }

    #[test]
    fn test_load_compiles_once_and_memoizes() {
        let dir = tempfile::tempdir().unwrap();
        let (bank, id) = shader_with_source(dir.path());
        let mut backend = Headless::new();

        bank.load::<ShaderDef>(id, &mut backend).unwrap();
        bank.load::<ShaderDef>(id, &mut backend).unwrap();
        bank.load::<ShaderDef>(id, &mut backend).unwrap();
        assert_eq!(backend.shaders_compiled, 1);

        let shader = bank.get::<ShaderDef>(id).unwrap();
        assert!(shader.is_loaded());
        assert!(shader.instance().is_some());
    }

    #[test]
    fn test_missing_source_leaves_asset_unloaded() {
        let mut bank = AssetBank::new();
        let id = factory::create_asset(
            &mut bank,
            "broken",
            ShaderDef {
                filepath: PathBuf::from("/nonexistent/void.glsl"),
                uniform_blocks: BTreeMap::new(),
            },
        )
        .unwrap();

        let mut backend = Headless::new();
        let err = bank.load::<ShaderDef>(id, &mut backend).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
        assert_eq!(backend.shaders_compiled, 0);
        assert!(!bank.get::<ShaderDef>(id).unwrap().is_loaded());
    }

    #[test]
    fn test_unload_then_reload_recompiles() {
        let dir = tempfile::tempdir().unwrap();
        let (bank, id) = shader_with_source(dir.path());
        let mut backend = Headless::new();

        bank.load::<ShaderDef>(id, &mut backend).unwrap();
        bank.get_mut::<ShaderDef>(id).unwrap().unload();
        // unload is idempotent
        bank.get_mut::<ShaderDef>(id).unwrap().unload();
        bank.load::<ShaderDef>(id, &mut backend).unwrap();
        assert_eq!(backend.shaders_compiled, 2);
    }

    #[test]
    fn test_payload_mutation_invalidates_instance() {
        let dir = tempfile::tempdir().unwrap();
        let (bank, id) = shader_with_source(dir.path());
        let mut backend = Headless::new();

        bank.load::<ShaderDef>(id, &mut backend).unwrap();
        {
            let mut shader = bank.get_mut::<ShaderDef>(id).unwrap();
            shader.payload_mut().uniform_blocks.insert("Lights".to_string(), 1);
            assert!(!shader.is_loaded());
        }
        bank.load::<ShaderDef>(id, &mut backend).unwrap();
        assert_eq!(backend.shaders_compiled, 2);
    }

    #[test]
    fn test_snapshot_prefers_live_block_bindings() {
        let dir = tempfile::tempdir().unwrap();
        let (bank, id) = shader_with_source(dir.path());
        let mut backend = Headless::new();
        bank.load::<ShaderDef>(id, &mut backend).unwrap();

        {
            let mut shader = bank.get_mut::<ShaderDef>(id).unwrap();
            let program = shader.instance_mut().unwrap();
            program.uniform_blocks.insert("Camera".to_string(), 3);
        }

        let shader = bank.get::<ShaderDef>(id).unwrap();
        let snap = shader.snapshot_payload();
        assert_eq!(snap.uniform_blocks.get("Camera"), Some(&3));
        // configuration itself untouched
        assert_eq!(shader.payload().uniform_blocks.get("Camera"), Some(&0));
    }
}
