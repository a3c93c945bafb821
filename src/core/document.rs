//! Block-based document model for `.prompt` files

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Display/activation mode of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockMode {
    /// Rendered and included in generated output
    #[default]
    Normal,
    /// Rendered but excluded from generated output
    Disabled,
    /// Hidden from output; its variants act as named substitution variables
    Shadow,
}

/// A text block placed in the document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub id: String,
    pub mode: BlockMode,
}

/// A file block placed in the document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileBlock {
    pub id: String,
    pub mode: BlockMode,
    /// Discriminator the on-disk format carries on file blocks
    #[serde(rename = "type", default = "file_block_tag")]
    pub block_type: String,
}

fn file_block_tag() -> String {
    "file".to_string()
}

/// One row inside a file block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: String,
    pub path: String,
    pub checked: bool,
}

/// Layout and file list for a file block, keyed 1:1 with `file_blocks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileBlockData {
    #[serde(default)]
    pub height: u32,
    /// Number of trailing path segments shown; < 1 shows the full path
    #[serde(default = "default_path_segments")]
    pub path_segments: i32,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    /// Block title, used when the block is in shadow mode
    #[serde(default)]
    pub title: String,
}

fn default_path_segments() -> i32 {
    2
}

/// One saved content alternative for a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub content: String,
    pub title: String,
}

/// The variants of a single block and which one is active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSet {
    #[serde(default)]
    pub height: u32,
    pub current_variant_index: usize,
    #[serde(rename = "variants")]
    pub variant_list: Vec<Variant>,
}

impl VariantSet {
    /// The currently selected variant, if the index is in bounds
    pub fn current_variant(&self) -> Option<&Variant> {
        self.variant_list.get(self.current_variant_index)
    }
}

/// A separator line placed in the document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Separator {
    pub id: String,
    pub content: String,
}

/// The persisted unit: an ordered composition of blocks with their variants.
///
/// `order` defines render and generation order; every id in it belongs to
/// exactly one of the block collections. All collections deserialize to empty
/// when absent, so documents written by older versions load without repair.
/// The serde renames keep the on-disk keys of the established `.prompt`
/// format (`text_boxes`, `file_boxes`, `file_box_data`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default, rename = "text_boxes")]
    pub text_blocks: HashMap<String, TextBlock>,
    #[serde(default, rename = "file_boxes")]
    pub file_blocks: HashMap<String, FileBlock>,
    #[serde(default, rename = "file_box_data")]
    pub file_block_data: HashMap<String, FileBlockData>,
    #[serde(default)]
    pub variants: HashMap<String, VariantSet>,
    #[serde(default)]
    pub separators: Vec<Separator>,
}

/// A file or directory inside the workspace listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceEntry {
    pub name: String,
    pub path: String,
    pub is_file: bool,
}

/// Severity of a transient toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// A transient notification shown by the UI, never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}
