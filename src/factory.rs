//! Asset factory
//!
//! The in-memory authoring path: allocate a fresh identity, wrap the
//! payload, register it. Distinct from the project's file-driven path,
//! which registers assets under the identity recorded in the file instead
//! of generating a new one.

use crate::asset::{Asset, AssetPayload};
use crate::bank::AssetBank;
use crate::error::AssetError;
use crate::id::AssetId;

/// Create a brand-new asset in the bank and return its identity.
pub fn create_asset<P: AssetPayload>(
    bank: &mut AssetBank,
    name: &str,
    payload: P,
) -> Result<AssetId, AssetError> {
    let id = bank.generate_id();
    bank.register(P::into_any(Asset::new(id, name, payload)))?;
    Ok(id)
}
