//! Asset references
//!
//! A reference between assets is the target's identity plus a lookup - a
//! relation, never a pointer. References serialize as the bare id so files
//! stay terse and stable, and they only turn into live objects when
//! resolved against a bank, which is allowed to fail (missing id, wrong
//! kind). A dangling reference is an error at resolve time, not a crash.

use std::cell::{Ref, RefMut};

use log::error;
use serde::{Deserialize, Serialize};

use super::container::{Asset, AssetPayload};
use crate::bank::AssetBank;
use crate::error::AssetError;
use crate::id::AssetId;

/// A weak, serializable reference to an asset by identity.
///
/// Default is the invalid sentinel; persists as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(AssetId);

impl AssetRef {
    /// The "no asset" reference.
    pub const NONE: AssetRef = AssetRef(AssetId::NONE);

    pub const fn new(id: AssetId) -> Self {
        AssetRef(id)
    }

    pub const fn id(self) -> AssetId {
        self.0
    }

    /// Whether this reference holds the invalid sentinel.
    pub const fn is_none(self) -> bool {
        self.0.is_none()
    }

    /// Resolve against a bank as the given payload kind.
    ///
    /// The single integration point between "a file says asset 7 depends on
    /// asset 3" and obtaining asset 3's live container. Fails with
    /// `InvalidReference` for the sentinel, `NotFound` / `TypeMismatch`
    /// from the bank otherwise.
    pub fn resolve<'b, P: AssetPayload>(
        self,
        bank: &'b AssetBank,
    ) -> Result<Ref<'b, Asset<P>>, AssetError> {
        if self.is_none() {
            error!("cannot resolve the invalid asset reference");
            return Err(AssetError::InvalidReference(
                "reference holds the invalid id".to_string(),
            ));
        }
        bank.get::<P>(self.0)
    }

    /// Mutable variant of [`resolve`](Self::resolve).
    pub fn resolve_mut<'b, P: AssetPayload>(
        self,
        bank: &'b AssetBank,
    ) -> Result<RefMut<'b, Asset<P>>, AssetError> {
        if self.is_none() {
            error!("cannot resolve the invalid asset reference");
            return Err(AssetError::InvalidReference(
                "reference holds the invalid id".to_string(),
            ));
        }
        bank.get_mut::<P>(self.0)
    }
}

impl From<AssetId> for AssetRef {
    fn from(id: AssetId) -> Self {
        AssetRef(id)
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
