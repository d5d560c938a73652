//
//  gerrit-client
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration file I/O.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads a configuration file, returning `None` when it does not exist.
pub fn read_config_file(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Writes a configuration file, creating parent directories.
///
/// The content goes to a sibling temporary file first and is then renamed
/// into place, so readers never see a partial file.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let staging = path.with_extension("toml.tmp");
    std::fs::write(&staging, content)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    std::fs::rename(&staging, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
