//! GeneratedTree entity - the files one scenario execution produced
//!
//! Keys are workspace-relative paths normalized to forward slashes. Each
//! entry remembers which module and provider emitted it, so that two
//! providers writing the same path can be told apart from a module
//! refining a file its dependency already emitted.

use std::collections::BTreeMap;

use crate::domain::value_objects::TreeDigest;

/// One generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    content: String,
    module_id: String,
    provider: String,
}

impl GeneratedFile {
    pub fn new(
        content: impl Into<String>,
        module_id: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            module_id: module_id.into(),
            provider: provider.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }
}

/// Two providers emitted the same path with different content
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("path '{path}' generated by providers '{first}' and '{second}' with different content")]
pub struct TreeConflict {
    pub path: String,
    pub first: String,
    pub second: String,
}

/// Relative path -> generated file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedTree {
    files: BTreeMap<String, GeneratedFile>,
}

impl GeneratedTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file.
    ///
    /// A later write from the same provider replaces the earlier one (the
    /// same thing happens on disk). A write from a different provider is
    /// only accepted when the content is identical.
    pub fn insert(&mut self, path: &str, file: GeneratedFile) -> Result<(), TreeConflict> {
        let key = normalize_path(path);
        if let Some(existing) = self.files.get(&key) {
            if existing.provider != file.provider && existing.content != file.content {
                return Err(TreeConflict {
                    path: key,
                    first: existing.provider.clone(),
                    second: file.provider,
                });
            }
        }
        self.files.insert(key, file);
        Ok(())
    }

    /// Join another tree into this one with the same rules as [`insert`].
    ///
    /// [`insert`]: GeneratedTree::insert
    pub fn merge(&mut self, other: GeneratedTree) -> Result<(), TreeConflict> {
        for (path, file) in other.files {
            self.insert(&path, file)?;
        }
        Ok(())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(&normalize_path(path))
    }

    pub fn get(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.get(&normalize_path(path))
    }

    pub fn content(&self, path: &str) -> Option<&str> {
        self.get(path).map(GeneratedFile::content)
    }

    pub fn remove(&mut self, path: &str) -> Option<GeneratedFile> {
        self.files.remove(&normalize_path(path))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GeneratedFile)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Digest over every path and content, in path order
    pub fn digest(&self) -> TreeDigest {
        TreeDigest::from_entries(
            self.files
                .iter()
                .map(|(path, file)| (path.as_str(), file.content.as_str())),
        )
    }
}

/// Normalize a relative path for comparison: forward slashes, no `./`
/// segments, no empty segments, and `..` folded into its parent.
///
/// A leading `..` that has no parent to fold into is kept; such paths
/// are rejected when written to a workspace.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}
