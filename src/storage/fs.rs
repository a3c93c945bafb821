//! Filesystem-backed document storage

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::document::{Document, WorkspaceEntry};
use crate::storage::{generate, Storage, StorageError};

/// File extension of persisted documents
pub const DOCUMENT_EXT: &str = "prompt";

/// Stores documents as pretty-printed JSON `.prompt` files inside a
/// workspace directory.
#[derive(Debug, Clone, Default)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        Self
    }
}

/// Append the document extension unless the name already carries it
fn with_document_ext(name: &str) -> String {
    let suffix = format!(".{DOCUMENT_EXT}");
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

fn sibling_path(path: &Path, new_name: &str) -> Result<PathBuf, StorageError> {
    let parent = path.parent().ok_or_else(|| StorageError::InvalidPath {
        path: path.to_path_buf(),
    })?;
    Ok(parent.join(with_document_ext(new_name)))
}

impl Storage for FsStorage {
    fn list_workspace_entries(&self, workspace: &Path) -> Vec<WorkspaceEntry> {
        if !workspace.exists() {
            if let Err(e) = fs::create_dir_all(workspace) {
                tracing::warn!("Failed to create workspace {}: {}", workspace.display(), e);
                return Vec::new();
            }
        }

        let Ok(entries) = fs::read_dir(workspace) else {
            return Vec::new();
        };

        let suffix = format!(".{DOCUMENT_EXT}");
        let mut items: Vec<WorkspaceEntry> = entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                let name = entry.file_name().to_str()?.to_string();
                let is_file = path.is_file();
                // Only document files are listed; directories always are
                if is_file && !name.ends_with(&suffix) {
                    return None;
                }
                Some(WorkspaceEntry {
                    name,
                    path: path.to_string_lossy().to_string(),
                    is_file,
                })
            })
            .collect();

        // Directories first, then files, alphabetically
        items.sort_by(|a, b| match (a.is_file, b.is_file) {
            (false, true) => std::cmp::Ordering::Less,
            (true, false) => std::cmp::Ordering::Greater,
            _ => a.name.cmp(&b.name),
        });
        items
    }

    fn create_document(&self, workspace: &Path, name: &str) -> Result<PathBuf, StorageError> {
        let path = workspace.join(with_document_ext(name));
        let content = serde_json::to_string_pretty(&Document::default())?;
        fs::write(&path, content).map_err(|e| StorageError::io(&path, e))?;
        tracing::info!("Created document: {}", path.display());
        Ok(path)
    }

    fn load_document(&self, path: &Path) -> Result<Document, StorageError> {
        let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
        // Missing collections come back as empty via serde defaults
        let document = serde_json::from_str(&content)?;
        Ok(document)
    }

    fn save_document(&self, path: &Path, document: &Document) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(document)?;
        fs::write(path, content).map_err(|e| StorageError::io(path, e))?;
        Ok(())
    }

    fn rename_document(&self, old_path: &Path, new_name: &str) -> Result<PathBuf, StorageError> {
        let new_path = sibling_path(old_path, new_name)?;
        fs::rename(old_path, &new_path).map_err(|e| StorageError::io(old_path, e))?;
        Ok(new_path)
    }

    fn delete_document(&self, path: &Path) -> Result<(), StorageError> {
        fs::remove_file(path).map_err(|e| StorageError::io(path, e))
    }

    fn copy_document(&self, path: &Path, new_name: &str) -> Result<PathBuf, StorageError> {
        let new_path = sibling_path(path, new_name)?;
        fs::copy(path, &new_path).map_err(|e| StorageError::io(path, e))?;
        Ok(new_path)
    }

    fn generate_output_text(&self, document: &Document) -> Result<String, StorageError> {
        Ok(generate::generate_output(document))
    }

    fn read_raw_file(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path).map_err(|e| StorageError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::{BlockMode, TextBlock};

    #[test]
    fn test_create_appends_extension() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new();

        let path = storage.create_document(dir.path(), "notes").unwrap();
        assert!(path.ends_with("notes.prompt"));
        assert!(path.exists());

        // A name that already carries the extension is left alone
        let path = storage.create_document(dir.path(), "plan.prompt").unwrap();
        assert!(path.ends_with("plan.prompt"));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new();
        let path = storage.create_document(dir.path(), "doc").unwrap();

        let mut document = Document::default();
        document.order.push("t1".to_string());
        document.text_blocks.insert(
            "t1".to_string(),
            TextBlock {
                id: "t1".to_string(),
                mode: BlockMode::Normal,
            },
        );
        storage.save_document(&path, &document).unwrap();

        let loaded = storage.load_document(&path).unwrap();
        assert_eq!(loaded, document);
    }

    #[test]
    fn test_load_backfills_missing_collections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.prompt");
        std::fs::write(
            &path,
            r#"{"order":[],"text_boxes":{},"variants":{},"separators":[]}"#,
        )
        .unwrap();

        let loaded = FsStorage::new().load_document(&path).unwrap();
        assert!(loaded.file_blocks.is_empty());
        assert!(loaded.file_block_data.is_empty());
    }

    #[test]
    fn test_load_established_format_document() {
        // Written exactly as existing .prompt files on disk look
        let raw = r#"{
            "order": ["t1", "f1", "s1"],
            "text_boxes": {
                "t1": {"id": "t1", "mode": "normal"}
            },
            "file_boxes": {
                "f1": {"id": "f1", "mode": "disabled", "type": "file"}
            },
            "file_box_data": {
                "f1": {
                    "height": 120,
                    "path_segments": 2,
                    "files": [{"id": "r1", "path": "/src/main.rs", "checked": true}],
                    "title": "sources"
                }
            },
            "variants": {
                "t1": {
                    "height": 80,
                    "current_variant_index": 1,
                    "variants": [
                        {"content": "draft", "title": "v1"},
                        {"content": "final", "title": "v2"}
                    ]
                }
            },
            "separators": [{"id": "s1", "content": "---"}]
        }"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.prompt");
        std::fs::write(&path, raw).unwrap();

        let storage = FsStorage::new();
        let loaded = storage.load_document(&path).unwrap();
        assert_eq!(loaded.order, ["t1", "f1", "s1"]);
        assert_eq!(loaded.text_blocks["t1"].mode, BlockMode::Normal);
        assert_eq!(loaded.file_blocks["f1"].block_type, "file");
        assert_eq!(loaded.file_block_data["f1"].files[0].path, "/src/main.rs");
        assert_eq!(
            loaded.variants["t1"].current_variant().unwrap().content,
            "final"
        );
        assert_eq!(loaded.separators[0].content, "---");

        // Saving keeps the same key set
        storage.save_document(&path, &loaded).unwrap();
        let reloaded = storage.load_document(&path).unwrap();
        assert_eq!(reloaded, loaded);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(r#""text_boxes""#));
        assert!(written.contains(r#""file_boxes""#));
        assert!(written.contains(r#""file_box_data""#));
    }

    #[test]
    fn test_listing_sorts_directories_first_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new();
        storage.create_document(dir.path(), "b").unwrap();
        storage.create_document(dir.path(), "a").unwrap();
        std::fs::write(dir.path().join("stray.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let names: Vec<String> = storage
            .list_workspace_entries(dir.path())
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["sub", "a.prompt", "b.prompt"]);
    }

    #[test]
    fn test_listing_creates_missing_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = dir.path().join("fresh");
        let entries = FsStorage::new().list_workspace_entries(&workspace);
        assert!(entries.is_empty());
        assert!(workspace.is_dir());
    }

    #[test]
    fn test_rename_and_copy() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new();
        let path = storage.create_document(dir.path(), "orig").unwrap();

        let copied = storage.copy_document(&path, "twin").unwrap();
        assert!(copied.ends_with("twin.prompt"));
        assert!(path.exists());
        assert!(copied.exists());

        let renamed = storage.rename_document(&path, "moved").unwrap();
        assert!(renamed.ends_with("moved.prompt"));
        assert!(!path.exists());
    }

    #[test]
    fn test_delete_missing_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FsStorage::new().delete_document(&dir.path().join("gone.prompt"));
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }
}
