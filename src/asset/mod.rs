//! Typed assets and lazy instantiation
//!
//! Every loadable resource is an [`Asset<P>`]: a stable identity, a name,
//! a configuration payload, and a lazily constructed runtime instance.
//! Cross-asset references are identities ([`AssetRef`]), resolved against
//! a bank on demand; the reference graph is persisted, the object graph is
//! rebuilt lazily from it.
//!
//! ## Lazy instantiation protocol
//!
//! ```text
//! Unloaded --load()--> Loaded --unload()--> Unloaded
//!     ^                                        |
//!     +---- payload_mut() (field mutation) ----+
//! ```
//!
//! `load()` runs the payload's `create` hook: resolve every reference
//! against the bank (recursively loading dependencies), call the
//! construction backend, cache the result. Any failure is logged with the
//! asset's id and leaves the asset unloaded.

mod container;
mod context;
mod kind;
mod refs;

pub mod material;
pub mod mesh;
pub mod scene;
pub mod shader;
pub mod texture;
pub mod uniform;

pub use container::{AnyAsset, Asset, AssetPayload};
pub use context::LoadContext;
pub use kind::AssetKind;
pub use refs::AssetRef;
