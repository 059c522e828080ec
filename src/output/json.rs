//
//  cms-client
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! Serializes command results for scripting. Models are written as the API
//! returned them, including any fields kept in their `extra` maps.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`write_json`] | Pretty-printed JSON to stdout |
//! | [`write_json_to`] | Pretty-printed JSON to any writer |

use serde::Serialize;
use std::io::{self, Write};

/// Writes `value` as pretty-printed JSON to stdout.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json_to(&mut handle, value)
}

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
