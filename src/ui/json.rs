//! JSON output utilities for CLI commands.
//!
//! Every command writes NDJSON to stdout: one object per line, each with
//! `event` and `command` fields.

use serde::Serialize;
use serde_json::{Map, Value};
use std::io::{self, Write};

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &Value) -> io::Result<()> {
    let line = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Convenience helper that writes raw JSON value to stdout.
pub fn emit(event: Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}

/// `complete` event carrying every field of `result`
pub fn complete_event<T: Serialize>(command: &str, success: bool, result: &T) -> io::Result<Value> {
    let mut object = Map::new();
    object.insert("event".to_string(), Value::from("complete"));
    object.insert("command".to_string(), Value::from(command));
    object.insert("success".to_string(), Value::from(success));
    match serde_json::to_value(result)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
    {
        Value::Object(fields) => object.extend(fields),
        other => {
            object.insert("data".to_string(), other);
        }
    }
    Ok(Value::Object(object))
}

/// Emit the `complete` event for a command result.
pub fn emit_complete<T: Serialize>(command: &str, success: bool, result: &T) -> io::Result<()> {
    emit(complete_event(command, success, result)?)
}
