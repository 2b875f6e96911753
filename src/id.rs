//! Asset Identity
//!
//! Every asset carries a stable `AssetId` that survives loads, unloads, and
//! round-trips through the on-disk project. References between assets are
//! stored as bare ids, never as pointers, so a half-loaded project stays
//! consistent: a reference to a missing asset is an error at resolve time,
//! not a dangling pointer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for an asset.
///
/// Ids are unique within one [`AssetBank`](crate::bank::AssetBank); the bank
/// hands them out from a monotonic counter that is seeded past any id it has
/// seen, so ids read back from project files never collide with freshly
/// generated ones.
///
/// Serializes as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(u64);

impl AssetId {
    /// The reserved "no asset" value. Never registered in a bank.
    pub const NONE: AssetId = AssetId(0);

    /// Wrap a raw id value.
    pub const fn new(raw: u64) -> Self {
        AssetId(raw)
    }

    /// The raw integer value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whether this is the invalid sentinel.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
