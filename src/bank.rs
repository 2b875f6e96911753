//! Asset Bank - identity registry for assets
//!
//! The bank owns the identity -> asset mapping and identity generation.
//! Entries sit behind `Rc<RefCell<...>>` so a load in progress (which
//! holds one entry mutably) can still resolve its dependencies through the
//! same bank; a re-borrow of the same entry is reported as a dependency
//! cycle instead of panicking.
//!
//! Deleting an entry does not cascade: references held by other assets
//! simply stop resolving, which surfaces as a logged `NotFound` on their
//! next access.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

use log::error;

use crate::asset::{AnyAsset, Asset, AssetPayload, LoadContext};
use crate::backend::RenderBackend;
use crate::error::AssetError;
use crate::id::AssetId;

/// Registry mapping identity to asset, plus the identity counter.
#[derive(Debug)]
pub struct AssetBank {
    assets: HashMap<AssetId, Rc<RefCell<AnyAsset>>>,
    /// Next id handed out by `generate_id`; always past every id seen.
    next_id: u64,
}

impl Default for AssetBank {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetBank {
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
            // 0 is the invalid sentinel
            next_id: 1,
        }
    }

    /// Hand out a fresh, previously unused identity.
    pub fn generate_id(&mut self) -> AssetId {
        let id = AssetId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register an asset under its own id.
    ///
    /// Fails (logged, bank unchanged) for the invalid sentinel or an id
    /// that is already taken. Registering an id at or past the internal
    /// counter bumps the counter, so ids read back from files never
    /// collide with later `generate_id` calls.
    pub fn register(&mut self, asset: AnyAsset) -> Result<(), AssetError> {
        let id = asset.id();
        if id.is_none() {
            error!("cannot register asset '{}' under the invalid id", asset.name());
            return Err(AssetError::InvalidReference(format!(
                "asset '{}' has the invalid id",
                asset.name()
            )));
        }
        if self.assets.contains_key(&id) {
            error!("asset {} is already registered", id);
            return Err(AssetError::Duplicate(format!(
                "asset {} is already registered",
                id
            )));
        }
        self.next_id = self.next_id.max(id.raw() + 1);
        self.assets.insert(id, Rc::new(RefCell::new(asset)));
        Ok(())
    }

    pub fn contains(&self, id: AssetId) -> bool {
        self.assets.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Iterate over registered ids (arbitrary order).
    pub fn ids(&self) -> impl Iterator<Item = AssetId> + '_ {
        self.assets.keys().copied()
    }

    /// The shared cell for an entry. Crate-internal: load chains clone the
    /// `Rc` so they can borrow entries while the caller also holds one.
    pub(crate) fn cell(&self, id: AssetId) -> Result<Rc<RefCell<AnyAsset>>, AssetError> {
        self.assets.get(&id).cloned().ok_or_else(|| {
            error!("asset {} is not registered", id);
            AssetError::NotFound(format!("asset {} is not registered", id))
        })
    }

    /// Untyped read access to an entry.
    pub fn entry(&self, id: AssetId) -> Result<Ref<'_, AnyAsset>, AssetError> {
        let cell = self.assets.get(&id).ok_or_else(|| {
            error!("asset {} is not registered", id);
            AssetError::NotFound(format!("asset {} is not registered", id))
        })?;
        cell.try_borrow().map_err(|_| {
            error!("asset {} is locked by a load in progress", id);
            AssetError::CycleDetected(id)
        })
    }

    /// Untyped mutable access to an entry.
    pub fn entry_mut(&self, id: AssetId) -> Result<RefMut<'_, AnyAsset>, AssetError> {
        let cell = self.assets.get(&id).ok_or_else(|| {
            error!("asset {} is not registered", id);
            AssetError::NotFound(format!("asset {} is not registered", id))
        })?;
        cell.try_borrow_mut().map_err(|_| {
            error!("asset {} is locked by a load in progress", id);
            AssetError::CycleDetected(id)
        })
    }

    /// Typed read access to an entry.
    ///
    /// Fails (logged) when the id is absent or registered as a different
    /// kind than requested.
    pub fn get<P: AssetPayload>(&self, id: AssetId) -> Result<Ref<'_, Asset<P>>, AssetError> {
        let any = self.entry(id)?;
        let found = any.kind();
        Ref::filter_map(any, P::from_any).map_err(|_| {
            error!("asset {} is a {}, expected {}", id, found, P::KIND);
            AssetError::TypeMismatch {
                id,
                expected: P::KIND,
                found,
            }
        })
    }

    /// Typed mutable access to an entry.
    pub fn get_mut<P: AssetPayload>(&self, id: AssetId) -> Result<RefMut<'_, Asset<P>>, AssetError> {
        let any = self.entry_mut(id)?;
        let found = any.kind();
        RefMut::filter_map(any, P::from_any_mut).map_err(|_| {
            error!("asset {} is a {}, expected {}", id, found, P::KIND);
            AssetError::TypeMismatch {
                id,
                expected: P::KIND,
                found,
            }
        })
    }

    /// Trigger the lazy load of a typed asset.
    pub fn load<P: AssetPayload>(
        &self,
        id: AssetId,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), AssetError> {
        let mut ctx = LoadContext::new(self, backend);
        ctx.load_dependency::<P>(crate::asset::AssetRef::new(id))
    }

    /// Trigger the lazy load of an entry, dispatched on its kind.
    pub fn load_entry(
        &self,
        id: AssetId,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), AssetError> {
        let mut ctx = LoadContext::new(self, backend);
        ctx.load_entry(id)
    }

    /// Remove an entry. Returns whether something was removed. Dependents
    /// are not touched; their references dangle until next resolve.
    pub fn remove(&mut self, id: AssetId) -> bool {
        self.assets.remove(&id).is_some()
    }

    /// Remove every entry. The identity counter keeps its position.
    pub fn clear(&mut self) {
        self.assets.clear();
    }
}
