//! Typed asset containers and the bank-level sum type
//!
//! An [`Asset<P>`] pairs the persisted configuration of one asset (its
//! payload) with the lazily constructed runtime object that configuration
//! describes. The container enforces the load-state invariant: the runtime
//! instance is either absent or fully constructed, never half-built, and a
//! failed construction leaves the asset unloaded.
//!
//! [`AnyAsset`] is the closed sum over the six concrete containers. The
//! bank stores `AnyAsset` and the per-kind dispatch (load, serialize,
//! typed projection) is a plain match on it - no trait objects, no
//! downcasting.

use log::error;

use super::context::LoadContext;
use super::kind::AssetKind;
use super::material::MaterialDef;
use super::mesh::MeshDef;
use super::scene::SceneDef;
use super::shader::ShaderDef;
use super::texture::{CubemapDef, Texture2dDef};
use crate::error::AssetError;
use crate::id::AssetId;

/// Configuration payload of one asset kind.
///
/// Implemented by the six concrete payload types. `Runtime` is the object
/// the payload knows how to construct through the backend; `snapshot` is
/// the uniform "current effective field values" hook the serializer calls
/// regardless of load state, so live in-memory edits are captured on save
/// instead of stale configuration.
pub trait AssetPayload: Sized {
    /// The kind tag this payload serializes under.
    const KIND: AssetKind;

    /// The runtime object constructed from this payload.
    type Runtime: std::fmt::Debug;

    /// Construct the runtime object. Resolves any asset references against
    /// the bank in `ctx` (recursively loading them) and calls out to the
    /// construction backend. A missing or mismatched reference is fatal for
    /// this load.
    fn create(
        &self,
        id: AssetId,
        name: &str,
        ctx: &mut LoadContext<'_>,
    ) -> Result<Self::Runtime, AssetError>;

    /// Effective field values right now: the configuration itself when
    /// unloaded, the live instance's current values when loaded.
    fn snapshot(&self, instance: Option<&Self::Runtime>) -> Self;

    /// Project a bank entry onto this payload's container.
    fn from_any(any: &AnyAsset) -> Option<&Asset<Self>>;

    /// Mutable projection of a bank entry.
    fn from_any_mut(any: &mut AnyAsset) -> Option<&mut Asset<Self>>;

    /// Wrap a typed container for storage in the bank.
    fn into_any(asset: Asset<Self>) -> AnyAsset;
}

/// A typed asset: identity, name, payload, and the lazily built instance.
#[derive(Debug)]
pub struct Asset<P: AssetPayload> {
    id: AssetId,
    name: String,
    payload: P,
    instance: Option<P::Runtime>,
}

impl<P: AssetPayload> Asset<P> {
    /// Wrap a payload under an existing identity (factory and file-load
    /// paths both come through here; neither constructs the instance).
    pub fn new(id: AssetId, name: impl Into<String>, payload: P) -> Self {
        Self {
            id,
            name: name.into(),
            payload,
            instance: None,
        }
    }

    pub fn id(&self) -> AssetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> AssetKind {
        P::KIND
    }

    /// Whether the runtime instance is currently constructed.
    pub fn is_loaded(&self) -> bool {
        self.instance.is_some()
    }

    /// Read access to the configuration payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Mutable access to the configuration payload.
    ///
    /// Unloads first: the cached instance was built from the old field
    /// values, so any mutation invalidates it. The next `load` rebuilds
    /// from the edited configuration.
    pub fn payload_mut(&mut self) -> &mut P {
        self.unload();
        &mut self.payload
    }

    /// Construct the runtime instance if it isn't already.
    ///
    /// No-op when loaded. On failure the error is logged with this asset's
    /// id and the asset stays unloaded; the error never propagates past the
    /// caller as a panic.
    pub fn load(&mut self, ctx: &mut LoadContext<'_>) -> Result<(), AssetError> {
        if self.instance.is_some() {
            return Ok(());
        }
        match self.payload.create(self.id, &self.name, ctx) {
            Ok(runtime) => {
                self.instance = Some(runtime);
                Ok(())
            }
            Err(e) => {
                error!("asset {} ('{}') failed to load: {}", self.id, self.name, e);
                Err(e)
            }
        }
    }

    /// Load if needed, then return the instance.
    ///
    /// Returns `None` when construction failed (the failure has already
    /// been logged); callers must check.
    pub fn get_instance(&mut self, ctx: &mut LoadContext<'_>) -> Option<&P::Runtime> {
        if self.instance.is_none() {
            let _ = self.load(ctx);
        }
        self.instance.as_ref()
    }

    /// The constructed instance, if any. Does not trigger a load.
    pub fn instance(&self) -> Option<&P::Runtime> {
        self.instance.as_ref()
    }

    /// Mutable instance access, e.g. for live uniform edits from an editor.
    pub fn instance_mut(&mut self) -> Option<&mut P::Runtime> {
        self.instance.as_mut()
    }

    /// Drop the instance. Idempotent.
    pub fn unload(&mut self) {
        self.instance = None;
    }

    /// Effective field values for serialization (live instance wins).
    pub fn snapshot_payload(&self) -> P {
        self.payload.snapshot(self.instance.as_ref())
    }
}

/// A bank entry: one of the six concrete asset containers.
#[derive(Debug)]
pub enum AnyAsset {
    Shader(Asset<ShaderDef>),
    Texture2d(Asset<Texture2dDef>),
    Cubemap(Asset<CubemapDef>),
    Material(Asset<MaterialDef>),
    Mesh(Asset<MeshDef>),
    Scene(Asset<SceneDef>),
}

impl AnyAsset {
    pub fn kind(&self) -> AssetKind {
        match self {
            AnyAsset::Shader(_) => AssetKind::Shader,
            AnyAsset::Texture2d(_) => AssetKind::Texture2d,
            AnyAsset::Cubemap(_) => AssetKind::Cubemap,
            AnyAsset::Material(_) => AssetKind::Material,
            AnyAsset::Mesh(_) => AssetKind::Mesh,
            AnyAsset::Scene(_) => AssetKind::Scene,
        }
    }

    pub fn id(&self) -> AssetId {
        match self {
            AnyAsset::Shader(a) => a.id(),
            AnyAsset::Texture2d(a) => a.id(),
            AnyAsset::Cubemap(a) => a.id(),
            AnyAsset::Material(a) => a.id(),
            AnyAsset::Mesh(a) => a.id(),
            AnyAsset::Scene(a) => a.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AnyAsset::Shader(a) => a.name(),
            AnyAsset::Texture2d(a) => a.name(),
            AnyAsset::Cubemap(a) => a.name(),
            AnyAsset::Material(a) => a.name(),
            AnyAsset::Mesh(a) => a.name(),
            AnyAsset::Scene(a) => a.name(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        match self {
            AnyAsset::Shader(a) => a.is_loaded(),
            AnyAsset::Texture2d(a) => a.is_loaded(),
            AnyAsset::Cubemap(a) => a.is_loaded(),
            AnyAsset::Material(a) => a.is_loaded(),
            AnyAsset::Mesh(a) => a.is_loaded(),
            AnyAsset::Scene(a) => a.is_loaded(),
        }
    }

    /// Kind-dispatched lazy load.
    pub fn load(&mut self, ctx: &mut LoadContext<'_>) -> Result<(), AssetError> {
        match self {
            AnyAsset::Shader(a) => a.load(ctx),
            AnyAsset::Texture2d(a) => a.load(ctx),
            AnyAsset::Cubemap(a) => a.load(ctx),
            AnyAsset::Material(a) => a.load(ctx),
            AnyAsset::Mesh(a) => a.load(ctx),
            AnyAsset::Scene(a) => a.load(ctx),
        }
    }

    /// Kind-dispatched unload. Idempotent.
    pub fn unload(&mut self) {
        match self {
            AnyAsset::Shader(a) => a.unload(),
            AnyAsset::Texture2d(a) => a.unload(),
            AnyAsset::Cubemap(a) => a.unload(),
            AnyAsset::Material(a) => a.unload(),
            AnyAsset::Mesh(a) => a.unload(),
            AnyAsset::Scene(a) => a.unload(),
        }
    }
}
