//! Texture assets
//!
//! Two kinds share one runtime type: a plain 2D texture, and a cubemap
//! built by converting an equirectangular 2D source at load time. The
//! backend owns decoding and upload; the asset only keeps the handle.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::container::{AnyAsset, Asset, AssetPayload};
use super::context::LoadContext;
use super::kind::AssetKind;
use crate::backend::TextureHandle;
use crate::error::AssetError;
use crate::id::AssetId;

/// 2D texture configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Texture2dDef {
    /// Path to the source image file.
    pub filepath: PathBuf,
}

/// Cubemap configuration. The source is an equirectangular 2D image,
/// converted to six faces by the backend at load time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CubemapDef {
    /// Path to the equirectangular source image file.
    pub filepath: PathBuf,
}

/// An uploaded GPU texture (either kind).
#[derive(Debug)]
pub struct GpuTexture {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}

fn decode(path: &Path, ctx: &mut LoadContext<'_>) -> Result<crate::backend::ImageData, AssetError> {
    // Classify a missing file before the backend sees it
    if !path.exists() {
        return Err(AssetError::NotFound(format!(
            "image file '{}' does not exist",
            path.display()
        )));
    }
    ctx.backend
        .decode_image(path)
        .map_err(|e| AssetError::MalformedSource(format!("decoding '{}': {}", path.display(), e)))
}

impl AssetPayload for Texture2dDef {
    const KIND: AssetKind = AssetKind::Texture2d;
    type Runtime = GpuTexture;

    fn create(
        &self,
        _id: AssetId,
        _name: &str,
        ctx: &mut LoadContext<'_>,
    ) -> Result<Self::Runtime, AssetError> {
        let image = decode(&self.filepath, ctx)?;
        let handle = ctx.backend.create_texture_2d(&image).map_err(|e| {
            AssetError::MalformedSource(format!("uploading '{}': {}", self.filepath.display(), e))
        })?;
        Ok(GpuTexture {
            handle,
            width: image.width,
            height: image.height,
        })
    }

    fn snapshot(&self, _instance: Option<&GpuTexture>) -> Self {
        // No live-editable fields
        self.clone()
    }

    fn from_any(any: &AnyAsset) -> Option<&Asset<Self>> {
        match any {
            AnyAsset::Texture2d(a) => Some(a),
            _ => None,
        }
    }

    fn from_any_mut(any: &mut AnyAsset) -> Option<&mut Asset<Self>> {
        match any {
            AnyAsset::Texture2d(a) => Some(a),
            _ => None,
        }
    }

    fn into_any(asset: Asset<Self>) -> AnyAsset {
        AnyAsset::Texture2d(asset)
    }
}

impl AssetPayload for CubemapDef {
    const KIND: AssetKind = AssetKind::Cubemap;
    type Runtime = GpuTexture;

    fn create(
        &self,
        _id: AssetId,
        _name: &str,
        ctx: &mut LoadContext<'_>,
    ) -> Result<Self::Runtime, AssetError> {
        let image = decode(&self.filepath, ctx)?;
        let handle = ctx.backend.create_cubemap(&image).map_err(|e| {
            AssetError::MalformedSource(format!("converting '{}': {}", self.filepath.display(), e))
        })?;
        Ok(GpuTexture {
            handle,
            width: image.width,
            height: image.height,
        })
    }

    fn snapshot(&self, _instance: Option<&GpuTexture>) -> Self {
        self.clone()
    }

    fn from_any(any: &AnyAsset) -> Option<&Asset<Self>> {
        match any {
            AnyAsset::Cubemap(a) => Some(a),
            _ => None,
        }
    }

    fn from_any_mut(any: &mut AnyAsset) -> Option<&mut Asset<Self>> {
        match any {
            AnyAsset::Cubemap(a) => Some(a),
            _ => None,
        }
    }

    fn into_any(asset: Asset<Self>) -> AnyAsset {
        AnyAsset::Cubemap(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::Headless;
    use crate::bank::AssetBank;
    use crate::factory;

    #[test]
    fn test_texture_load_decodes_and_uploads_once() {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("stone.png");
        std::fs::write(&img, [0u8; 4]).unwrap();

        let mut bank = AssetBank::new();
        let id = factory::create_asset(&mut bank, "stone", Texture2dDef { filepath: img }).unwrap();

        let mut backend = Headless::new();
        bank.load::<Texture2dDef>(id, &mut backend).unwrap();
        bank.load::<Texture2dDef>(id, &mut backend).unwrap();
        assert_eq!(backend.images_decoded, 1);
        assert_eq!(backend.textures_created, 1);
    }

    #[test]
    fn test_cubemap_goes_through_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("sky.hdr");
        std::fs::write(&img, [0u8; 4]).unwrap();

        let mut bank = AssetBank::new();
        let id = factory::create_asset(&mut bank, "sky", CubemapDef { filepath: img }).unwrap();

        let mut backend = Headless::new();
        bank.load::<CubemapDef>(id, &mut backend).unwrap();
        assert_eq!(backend.cubemaps_created, 1);
        assert_eq!(backend.textures_created, 0);
    }

    #[test]
    fn test_get_instance_loads_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("stone.png");
        std::fs::write(&img, [0u8; 4]).unwrap();

        let mut bank = AssetBank::new();
        let id = factory::create_asset(&mut bank, "stone", Texture2dDef { filepath: img }).unwrap();

        let mut backend = Headless::new();
        {
            let mut ctx = LoadContext::new(&bank, &mut backend);
            let mut texture = bank.get_mut::<Texture2dDef>(id).unwrap();
            assert!(texture.get_instance(&mut ctx).is_some());
            // second access hits the cached instance
            assert!(texture.get_instance(&mut ctx).is_some());
        }
        assert_eq!(backend.images_decoded, 1);
    }

    #[test]
    fn test_get_instance_is_none_after_failed_load() {
        let mut bank = AssetBank::new();
        let id = factory::create_asset(
            &mut bank,
            "ghost",
            Texture2dDef {
                filepath: PathBuf::from("/nonexistent/ghost.png"),
            },
        )
        .unwrap();

        let mut backend = Headless::new();
        let mut ctx = LoadContext::new(&bank, &mut backend);
        let mut texture = bank.get_mut::<Texture2dDef>(id).unwrap();
        assert!(texture.get_instance(&mut ctx).is_none());
        assert!(!texture.is_loaded());
    }

    #[test]
    fn test_missing_image_is_not_found() {
        let mut bank = AssetBank::new();
        let id = factory::create_asset(
            &mut bank,
            "ghost",
            Texture2dDef {
                filepath: PathBuf::from("/nonexistent/ghost.png"),
            },
        )
        .unwrap();

        let mut backend = Headless::new();
        let err = bank.load::<Texture2dDef>(id, &mut backend).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
        assert!(!bank.get::<Texture2dDef>(id).unwrap().is_loaded());
    }
}
