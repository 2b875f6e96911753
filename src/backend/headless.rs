//! Headless construction backend
//!
//! A `RenderBackend` with no GPU behind it: handles are fabricated from a
//! counter and every construction call is tallied. Used by tooling that
//! needs to validate a project without a window, and by tests that assert
//! lazy-load behavior (an unmutated asset must hit the backend exactly
//! once).

use std::collections::BTreeMap;
use std::path::Path;

use super::{
    BackendError, ImageData, MaterialHandle, MeshHandle, RenderBackend, ShaderHandle, SubMeshData,
    TextureHandle, UniformInfo,
};
use crate::asset::uniform::UniformValue;

/// No-GPU backend with per-operation call counters.
#[derive(Debug, Default)]
pub struct Headless {
    next_handle: u64,
    pub images_decoded: usize,
    pub models_parsed: usize,
    pub shaders_compiled: usize,
    pub textures_created: usize,
    pub cubemaps_created: usize,
    pub meshes_created: usize,
    pub materials_created: usize,
}

impl Headless {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl RenderBackend for Headless {
    fn decode_image(&mut self, _path: &Path) -> Result<ImageData, BackendError> {
        self.images_decoded += 1;
        // 1x1 opaque white placeholder
        Ok(ImageData {
            width: 1,
            height: 1,
            pixels: vec![255, 255, 255, 255],
        })
    }

    fn load_model(&mut self, _path: &Path) -> Result<Vec<SubMeshData>, BackendError> {
        self.models_parsed += 1;
        // Single-triangle placeholder sub-mesh
        Ok(vec![SubMeshData {
            name: "submesh_0".to_string(),
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            uvs: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            indices: vec![0, 1, 2],
        }])
    }

    fn compile_shader(
        &mut self,
        _source: &str,
        _uniform_blocks: &BTreeMap<String, u32>,
    ) -> Result<(ShaderHandle, Vec<UniformInfo>), BackendError> {
        self.shaders_compiled += 1;
        // No reflection without a compiler; callers skip uniform validation
        Ok((ShaderHandle(self.next()), Vec::new()))
    }

    fn create_texture_2d(&mut self, _image: &ImageData) -> Result<TextureHandle, BackendError> {
        self.textures_created += 1;
        Ok(TextureHandle(self.next()))
    }

    fn create_cubemap(&mut self, _equirect: &ImageData) -> Result<TextureHandle, BackendError> {
        self.cubemaps_created += 1;
        Ok(TextureHandle(self.next()))
    }

    fn create_mesh(&mut self, _mesh: &SubMeshData) -> Result<MeshHandle, BackendError> {
        self.meshes_created += 1;
        Ok(MeshHandle(self.next()))
    }

    fn create_material(
        &mut self,
        _shader: ShaderHandle,
        _uniforms: &BTreeMap<String, UniformValue>,
        _textures: &[(String, TextureHandle)],
    ) -> Result<MaterialHandle, BackendError> {
        self.materials_created += 1;
        Ok(MaterialHandle(self.next()))
    }
}
