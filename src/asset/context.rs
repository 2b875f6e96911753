//! Load context
//!
//! Everything a `create` hook needs while constructing a runtime instance:
//! the bank to resolve references against, the construction backend, and
//! the chain of identities currently being resolved. The chain is what
//! turns a reference cycle into a clean `CycleDetected` error instead of
//! unbounded recursion - dependency resolution is synchronous and
//! recursive, so an id reappearing in its own chain can only mean a cycle
//! in the content.

use log::error;

use super::container::{AnyAsset, AssetPayload};
use super::refs::AssetRef;
use crate::backend::{RenderBackend, TextureHandle};
use crate::bank::AssetBank;
use crate::error::AssetError;
use crate::id::AssetId;

/// Borrowed context threaded through a `Load()` call chain.
pub struct LoadContext<'a> {
    bank: &'a AssetBank,
    /// The external construction services (GPU uploads, decoders).
    pub backend: &'a mut dyn RenderBackend,
    resolving: Vec<AssetId>,
}

impl<'a> LoadContext<'a> {
    pub fn new(bank: &'a AssetBank, backend: &'a mut dyn RenderBackend) -> Self {
        Self {
            bank,
            backend,
            resolving: Vec::new(),
        }
    }

    /// The bank this load chain resolves against.
    pub fn bank(&self) -> &AssetBank {
        self.bank
    }

    fn enter(&mut self, id: AssetId) -> Result<(), AssetError> {
        if self.resolving.contains(&id) {
            error!(
                "dependency cycle: asset {} reappears in its own resolution chain {:?}",
                id, self.resolving
            );
            return Err(AssetError::CycleDetected(id));
        }
        self.resolving.push(id);
        Ok(())
    }

    fn leave(&mut self) {
        self.resolving.pop();
    }

    /// Recursively load the asset a reference points at.
    ///
    /// Fatal-for-this-load errors: the sentinel reference, a missing id, a
    /// kind mismatch, a cycle, or the dependency's own construction
    /// failure. On success the target is loaded and can be resolved
    /// immediately for its instance data.
    pub fn load_dependency<P: AssetPayload>(&mut self, r: AssetRef) -> Result<(), AssetError> {
        let id = check_ref(r)?;
        let cell = self.bank.cell(id)?;
        self.enter(id)?;
        let result = (|| {
            let mut any = cell.try_borrow_mut().map_err(|_| reentered(id))?;
            let found = any.kind();
            match P::from_any_mut(&mut any) {
                Some(asset) => asset.load(self),
                None => {
                    error!("asset {} is a {}, expected {}", id, found, P::KIND);
                    Err(AssetError::TypeMismatch {
                        id,
                        expected: P::KIND,
                        found,
                    })
                }
            }
        })();
        self.leave();
        result
    }

    /// Load a texture dependency that may be either texture kind.
    ///
    /// Material texture slots accept 2D textures and cubemaps alike; both
    /// runtime instances expose the same opaque handle, which is returned
    /// once the dependency is loaded.
    pub fn load_texture_dependency(&mut self, r: AssetRef) -> Result<TextureHandle, AssetError> {
        let id = check_ref(r)?;
        let cell = self.bank.cell(id)?;
        self.enter(id)?;
        let result = (|| {
            let mut any = cell.try_borrow_mut().map_err(|_| reentered(id))?;
            let found = any.kind();
            match &mut *any {
                AnyAsset::Texture2d(a) => {
                    a.load(self)?;
                    a.instance()
                        .map(|t| t.handle)
                        .ok_or_else(|| not_constructed(id))
                }
                AnyAsset::Cubemap(a) => {
                    a.load(self)?;
                    a.instance()
                        .map(|t| t.handle)
                        .ok_or_else(|| not_constructed(id))
                }
                _ => {
                    error!("asset {} is a {}, expected a texture", id, found);
                    Err(AssetError::TypeMismatch {
                        id,
                        expected: crate::asset::AssetKind::Texture2d,
                        found,
                    })
                }
            }
        })();
        self.leave();
        result
    }

    /// Untyped load of a bank entry, dispatched on its kind.
    pub fn load_entry(&mut self, id: AssetId) -> Result<(), AssetError> {
        let cell = self.bank.cell(id)?;
        self.enter(id)?;
        let result = (|| {
            let mut any = cell.try_borrow_mut().map_err(|_| reentered(id))?;
            any.load(self)
        })();
        self.leave();
        result
    }
}

fn check_ref(r: AssetRef) -> Result<AssetId, AssetError> {
    if r.is_none() {
        error!("cannot load a dependency through the invalid reference");
        return Err(AssetError::InvalidReference(
            "dependency reference holds the invalid id".to_string(),
        ));
    }
    Ok(r.id())
}

fn reentered(id: AssetId) -> AssetError {
    error!("asset {} re-entered while its own load is in progress", id);
    AssetError::CycleDetected(id)
}

fn not_constructed(id: AssetId) -> AssetError {
    AssetError::InvalidReference(format!("asset {} loaded without an instance", id))
}
