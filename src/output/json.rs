//
//  gerrit-client
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! JSON output.

use std::io::{self, Write};

use serde::Serialize;

/// Writes pretty-printed JSON to stdout.
pub fn write_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    write_json_to(&mut stdout.lock(), value)
}

/// Writes pretty-printed JSON followed by a newline.
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_to() {
        let mut buf = Vec::new();
        write_json_to(&mut buf, &json!({"_number": 3965})).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"_number\": 3965\n}\n");
    }
}
