//! Project - filesystem-backed asset bank
//!
//! A project ties a bank to a directory: one JSON file per asset, arbitrary
//! subdirectory nesting, file extension determines the asset kind. The
//! project keeps the identity <-> path association 1:1 and implements bulk
//! save/load across the tree.
//!
//! Loading a project populates configuration only; runtime instances stay
//! lazy and are built on first access through `load_asset` or the bank.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use serde::Serialize;

use crate::asset::{AssetKind, AssetPayload};
use crate::backend::RenderBackend;
use crate::bank::AssetBank;
use crate::error::AssetError;
use crate::factory;
use crate::file;
use crate::id::AssetId;

/// A named directory of asset files backing one bank.
#[derive(Debug)]
pub struct Project {
    name: String,
    root: PathBuf,
    bank: AssetBank,
    /// identity -> project-relative file path (1:1 with `ids`)
    paths: HashMap<AssetId, PathBuf>,
    /// project-relative file path -> identity
    ids: HashMap<PathBuf, AssetId>,
}

impl Project {
    /// Create an empty project over a root directory. Does not touch the
    /// filesystem until the first save.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            bank: AssetBank::new(),
            paths: HashMap::new(),
            ids: HashMap::new(),
        }
    }

    /// Open a project directory, loading every recognized asset file.
    pub fn open(name: impl Into<String>, root: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let mut project = Self::new(name, root);
        project.load_all()?;
        Ok(project)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn bank(&self) -> &AssetBank {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut AssetBank {
        &mut self.bank
    }

    /// The identity registered at a project-relative path.
    pub fn id_at(&self, rel: impl AsRef<Path>) -> Option<AssetId> {
        self.ids.get(rel.as_ref()).copied()
    }

    /// The project-relative path of a registered identity.
    pub fn path_of(&self, id: AssetId) -> Option<&Path> {
        self.paths.get(&id).map(|p| p.as_path())
    }

    /// Typed access to an asset by id (delegates to the bank).
    pub fn get_asset<P: AssetPayload>(
        &self,
        id: AssetId,
    ) -> Result<std::cell::Ref<'_, crate::asset::Asset<P>>, AssetError> {
        self.bank.get::<P>(id)
    }

    /// Typed access to an asset by its project-relative path.
    pub fn get_asset_at<P: AssetPayload>(
        &self,
        rel: impl AsRef<Path>,
    ) -> Result<std::cell::Ref<'_, crate::asset::Asset<P>>, AssetError> {
        let rel = rel.as_ref();
        let id = self.id_at(rel).ok_or_else(|| {
            error!("no asset is registered at '{}'", rel.display());
            AssetError::NotFound(format!("no asset is registered at '{}'", rel.display()))
        })?;
        self.bank.get::<P>(id)
    }

    /// Create a brand-new asset, record its path, and persist it.
    ///
    /// The canonical extension for the asset kind is enforced on the given
    /// path (appended when missing, replacing a wrong one).
    pub fn create_asset<P>(
        &mut self,
        rel: impl AsRef<Path>,
        name: &str,
        payload: P,
    ) -> Result<AssetId, AssetError>
    where
        P: AssetPayload + Serialize,
    {
        let rel = with_canonical_extension(rel.as_ref(), P::KIND);
        if self.ids.contains_key(&rel) {
            error!("path '{}' already holds an asset", rel.display());
            return Err(AssetError::Duplicate(format!(
                "path '{}' already holds an asset",
                rel.display()
            )));
        }
        let id = factory::create_asset(&mut self.bank, name, payload)?;
        self.paths.insert(id, rel.clone());
        self.ids.insert(rel, id);
        self.save_asset(id)?;
        Ok(id)
    }

    /// Serialize one asset (effective field values) to its recorded path.
    ///
    /// Parent directories are created as needed; an existing file is
    /// overwritten without merging.
    pub fn save_asset(&self, id: AssetId) -> Result<(), AssetError> {
        let rel = self.paths.get(&id).ok_or_else(|| {
            error!("asset {} has no path in project '{}'", id, self.name);
            AssetError::NotFound(format!("asset {} has no path in this project", id))
        })?;
        let json = file::to_json(&*self.bank.entry(id)?)?;
        let abs = self.root.join(rel);
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AssetError::Io(format!("creating '{}': {}", parent.display(), e)))?;
        }
        fs::write(&abs, json)
            .map_err(|e| AssetError::Io(format!("writing '{}': {}", abs.display(), e)))?;
        Ok(())
    }

    /// Save every registered asset. Per-asset failures are logged and
    /// skipped; returns how many were written.
    pub fn save_all(&self) -> usize {
        let mut saved = 0;
        for id in self.paths.keys().copied() {
            match self.save_asset(id) {
                Ok(()) => saved += 1,
                Err(e) => error!("project '{}': saving asset {}: {}", self.name, id, e),
            }
        }
        saved
    }

    /// Register one asset file: derive the kind from the extension, parse
    /// it, and register it under the identity recorded in the file.
    pub fn add_asset(&mut self, rel: impl AsRef<Path>) -> Result<AssetId, AssetError> {
        let rel = rel.as_ref().to_path_buf();
        let kind = kind_of(&rel)?;
        if self.ids.contains_key(&rel) {
            error!("path '{}' already holds an asset", rel.display());
            return Err(AssetError::Duplicate(format!(
                "path '{}' already holds an asset",
                rel.display()
            )));
        }
        let abs = self.root.join(&rel);
        let text = fs::read_to_string(&abs).map_err(|e| AssetError::from_file_read(&abs, e))?;
        let any = file::from_json(kind, &text)
            .map_err(|e| AssetError::MalformedSource(format!("'{}': {}", rel.display(), e)))?;
        let id = any.id();
        // registration also seeds the id counter past this id
        self.bank.register(any)?;
        self.paths.insert(id, rel.clone());
        self.ids.insert(rel, id);
        Ok(id)
    }

    /// Drop everything and reload the whole directory tree.
    ///
    /// Files with unrecognized extensions are skipped with a warning;
    /// per-file parse failures are logged and do not abort the load.
    /// Returns how many assets were registered.
    pub fn load_all(&mut self) -> Result<usize, AssetError> {
        self.bank.clear();
        self.paths.clear();
        self.ids.clear();

        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| {
                AssetError::Io(format!("creating '{}': {}", self.root.display(), e))
            })?;
            return Ok(0);
        }

        let mut files = Vec::new();
        collect_files(&self.root, Path::new(""), &mut files)?;
        // deterministic load order
        files.sort();

        let mut loaded = 0;
        for rel in files {
            if kind_of(&rel).is_err() {
                warn!(
                    "project '{}': skipping '{}' (unrecognized extension)",
                    self.name,
                    rel.display()
                );
                continue;
            }
            match self.add_asset(&rel) {
                Ok(_) => loaded += 1,
                Err(e) => error!("project '{}': loading '{}': {}", self.name, rel.display(), e),
            }
        }
        info!(
            "project '{}': loaded {} assets from '{}'",
            self.name,
            loaded,
            self.root.display()
        );
        Ok(loaded)
    }

    /// Trigger the lazy build of one asset's runtime instance.
    pub fn load_asset(
        &self,
        id: AssetId,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), AssetError> {
        self.bank.load_entry(id, backend)
    }

    /// Remove an asset from the bank, the path maps, and the disk.
    pub fn remove_asset(&mut self, id: AssetId) -> Result<(), AssetError> {
        let rel = self.paths.remove(&id).ok_or_else(|| {
            error!("asset {} has no path in project '{}'", id, self.name);
            AssetError::NotFound(format!("asset {} has no path in this project", id))
        })?;
        self.ids.remove(&rel);
        self.bank.remove(id);
        let abs = self.root.join(&rel);
        if abs.exists() {
            fs::remove_file(&abs)
                .map_err(|e| AssetError::Io(format!("removing '{}': {}", abs.display(), e)))?;
        }
        Ok(())
    }
}

/// Derive the asset kind from a path's extension.
fn kind_of(rel: &Path) -> Result<AssetKind, AssetError> {
    rel.extension()
        .and_then(|e| e.to_str())
        .and_then(AssetKind::from_extension)
        .ok_or_else(|| {
            AssetError::MalformedSource(format!(
                "'{}' has no recognized asset extension",
                rel.display()
            ))
        })
}

fn with_canonical_extension(rel: &Path, kind: AssetKind) -> PathBuf {
    let mut rel = rel.to_path_buf();
    match rel.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext == kind.extension() => {}
        _ => {
            rel.set_extension(kind.extension());
        }
    }
    rel
}

/// Recursively collect project-relative file paths under `dir`.
fn collect_files(dir: &Path, rel: &Path, out: &mut Vec<PathBuf>) -> Result<(), AssetError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AssetError::Io(format!("reading '{}': {}", dir.display(), e)))?;
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        let child_rel = rel.join(entry.file_name());
        if path.is_dir() {
            collect_files(&path, &child_rel, out)?;
        } else {
            out.push(child_rel);
        }
    }
    Ok(())
}
