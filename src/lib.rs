//! quarry - content asset management for a small 3D engine
//!
//! Gives every loadable resource (shader, texture, material, mesh, scene)
//! a stable identity, resolves cross-asset references lazily, memoizes
//! expensive construction, and persists the whole graph as a directory of
//! JSON files. Three views of the same data stay consistent: the in-memory
//! object graph, the identity space, and the on-disk files.
//!
//! ## Layout
//!
//! - [`id`] - stable asset identities
//! - [`asset`] - typed containers, references, lazy instantiation
//! - [`bank`] - the identity -> asset registry
//! - [`factory`] - in-memory authoring of new assets
//! - [`file`] - the on-disk JSON format and per-kind dispatch
//! - [`project`] - a directory of asset files backing one bank
//! - [`backend`] - the opaque construction services (GPU, decoders)
//!
//! Everything is single-threaded and synchronous: a `load` call blocks
//! until the dependency chain it triggers completes or fails, and every
//! failure is logged and returned, never thrown past the asset layer.
//!
//! ## Example
//!
//! ```no_run
//! use quarry::asset::shader::ShaderDef;
//! use quarry::asset::material::MaterialDef;
//! use quarry::asset::AssetRef;
//! use quarry::backend::headless::Headless;
//! use quarry::project::Project;
//!
//! let mut project = Project::new("demo", "assets");
//! let shader = project
//!     .create_asset("shaders/basic", "basic", ShaderDef::default())
//!     .unwrap();
//! let material = project
//!     .create_asset(
//!         "materials/rock",
//!         "rock",
//!         MaterialDef { shader: AssetRef::new(shader), ..Default::default() },
//!     )
//!     .unwrap();
//!
//! // Lazy: nothing is constructed until first access
//! let mut backend = Headless::new();
//! project.load_asset(material, &mut backend).unwrap();
//! ```

pub mod asset;
pub mod backend;
pub mod bank;
pub mod error;
pub mod factory;
pub mod file;
pub mod id;
pub mod project;

pub use asset::{AnyAsset, Asset, AssetKind, AssetPayload, AssetRef, LoadContext};
pub use bank::AssetBank;
pub use error::AssetError;
pub use id::AssetId;
pub use project::Project;
