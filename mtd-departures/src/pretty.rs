//! Human-readable JSON rendering.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Render any serialisable value as JSON indented by four spaces.
///
/// Used for CLI output and for the data files under the stop data
/// directory, so both read the same way.
pub fn pretty_print<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(serde::ser::Error::custom)
}
