//! Flattens a document into its generated output text.
//!
//! Blocks contribute in `order`. A normal text block contributes its current
//! variant with `{{name}}` placeholders substituted from shadow-block
//! variants; a normal file block contributes each checked file as a heading
//! plus fenced code block. Disabled and shadow blocks contribute nothing.

use std::collections::HashMap;

use crate::core::document::{BlockMode, Document, FileBlockData};

/// Truncate a path to its last `segments` components; `< 1` keeps it whole
fn display_path(full_path: &str, segments: i32) -> String {
    if segments < 1 {
        return full_path.to_string();
    }
    let normalized = full_path.replace('\\', "/");
    let parts: Vec<&str> = normalized.split('/').filter(|p| !p.is_empty()).collect();
    if parts.len() <= segments as usize {
        return full_path.to_string();
    }
    parts[parts.len() - segments as usize..].join("/")
}

/// File extension used as the fence language tag; dotfiles count
fn file_extension(path: &str) -> String {
    match path.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Shadow-block variant titles become substitution variable names
fn collect_shadow_vars(document: &Document) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for (id, block) in &document.text_blocks {
        if block.mode != BlockMode::Shadow {
            continue;
        }
        let Some(set) = document.variants.get(id) else {
            continue;
        };
        for variant in &set.variant_list {
            let name = variant.title.trim().to_lowercase().replace(' ', "_");
            if !name.is_empty() {
                vars.insert(name, variant.content.clone());
            }
        }
    }
    vars
}

fn file_block_content(data: &FileBlockData) -> String {
    let mut out = String::new();
    for file in data.files.iter().filter(|f| f.checked && !f.path.is_empty()) {
        let shown = display_path(&file.path, data.path_segments);
        out.push_str(&format!("### {shown}\n"));
        match std::fs::read_to_string(&file.path) {
            Ok(content) => {
                out.push_str(&format!("```{}\n", file_extension(&file.path)));
                out.push_str(&content);
            }
            Err(e) => {
                out.push_str("```\n");
                out.push_str(&format!("[Error reading file: {e}]"));
            }
        }
        out.push_str("\n```\n\n");
    }
    out.trim_end().to_string()
}

/// Generate the flattened output text for a document
pub fn generate_output(document: &Document) -> String {
    let shadow_vars = collect_shadow_vars(document);
    let mut sections: Vec<String> = Vec::new();

    for id in &document.order {
        let mut content = String::new();

        if let Some(block) = document.text_blocks.get(id) {
            if block.mode == BlockMode::Normal {
                if let Some(variant) = document.variants.get(id).and_then(|s| s.current_variant()) {
                    content = variant.content.clone();
                }
                for (name, value) in &shadow_vars {
                    content = content.replace(&format!("{{{{{name}}}}}"), value);
                }
            }
        }

        if let Some(block) = document.file_blocks.get(id) {
            if block.mode == BlockMode::Normal {
                if let Some(data) = document.file_block_data.get(id) {
                    let files = file_block_content(data);
                    if !files.is_empty() {
                        if !content.is_empty() {
                            content.push_str("\n\n");
                        }
                        content.push_str(&files);
                    }
                }
            }
        }

        if !content.is_empty() {
            sections.push(content);
        }
    }

    sections.join("\n\n")
}
