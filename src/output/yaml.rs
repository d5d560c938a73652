//
//  gerrit-client
//  output/yaml.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! YAML output.

use std::io::{self, Write};

use serde::Serialize;

/// Writes YAML to stdout.
pub fn write_yaml<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    write_yaml_to(&mut stdout.lock(), value)
}

pub fn write_yaml_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    let rendered = serde_yaml::to_string(value)?;
    writer.write_all(rendered.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_yaml_to() {
        let mut buf = Vec::new();
        write_yaml_to(&mut buf, &json!({"name": "core", "state": "ACTIVE"})).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("name: core"));
        assert!(text.contains("state: ACTIVE"));
    }
}
