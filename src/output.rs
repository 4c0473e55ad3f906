//! JSON rendering shared by the CLI and the HTTP handlers.

use anyhow::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

/// Serializes `value` as JSON indented by four spaces.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Writes `value` to stdout as four-space indented JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = to_pretty_json(value)?;
    debug!(bytes = rendered.len(), "Printing result");
    println!("{rendered}");
    Ok(())
}
