//! Construction backend
//!
//! The asset layer never talks to a graphics API directly. Everything that
//! decodes a source file or builds a GPU-side object goes through the
//! [`RenderBackend`] trait, and the asset layer only keeps the opaque
//! handles it gets back. This keeps the bank/project code free of any
//! renderer dependency and lets tests run against [`headless::Headless`].

pub mod headless;

use std::collections::BTreeMap;
use std::path::Path;

use crate::asset::uniform::{UniformType, UniformValue};

/// Opaque handle to a compiled shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u64);

/// Opaque handle to a GPU texture (2D or cubemap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Opaque handle to an uploaded mesh (vertex + index buffers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Opaque handle to a material-bound runtime object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

/// Decoded image pixels, RGBA8, row-major.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// One sub-mesh parsed out of a 3D-model container file.
#[derive(Debug, Clone, Default)]
pub struct SubMeshData {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// A uniform reflected out of a compiled shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformInfo {
    pub name: String,
    pub ty: UniformType,
}

/// Error from the construction backend (decode or build failure).
///
/// The asset layer folds these into
/// [`AssetError::MalformedSource`](crate::error::AssetError::MalformedSource).
#[derive(Debug)]
pub struct BackendError(pub String);

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BackendError {}

/// External construction services consumed by asset `Create()` hooks.
///
/// Implementations own the graphics API and the decoder libraries; the
/// asset layer calls these synchronously on the loading thread and caches
/// the returned handles inside the asset containers.
pub trait RenderBackend {
    /// Decode an image file into a pixel buffer.
    fn decode_image(&mut self, path: &Path) -> Result<ImageData, BackendError>;

    /// Parse a 3D-model container file into its sub-meshes.
    fn load_model(&mut self, path: &Path) -> Result<Vec<SubMeshData>, BackendError>;

    /// Compile and link shader source, returning the program handle and the
    /// uniforms reflected from it. An empty reflection list means the
    /// backend does not support reflection; callers skip validation then.
    fn compile_shader(
        &mut self,
        source: &str,
        uniform_blocks: &BTreeMap<String, u32>,
    ) -> Result<(ShaderHandle, Vec<UniformInfo>), BackendError>;

    /// Upload decoded pixels as a 2D texture.
    fn create_texture_2d(&mut self, image: &ImageData) -> Result<TextureHandle, BackendError>;

    /// Convert an equirectangular 2D image into a cubemap texture.
    fn create_cubemap(&mut self, equirect: &ImageData) -> Result<TextureHandle, BackendError>;

    /// Upload one sub-mesh as GPU buffers.
    fn create_mesh(&mut self, mesh: &SubMeshData) -> Result<MeshHandle, BackendError>;

    /// Build a material-bound runtime object from a shader plus its uniform
    /// defaults and resolved texture bindings.
    fn create_material(
        &mut self,
        shader: ShaderHandle,
        uniforms: &BTreeMap<String, UniformValue>,
        textures: &[(String, TextureHandle)],
    ) -> Result<MaterialHandle, BackendError>;
}
