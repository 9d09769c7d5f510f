//! The shared utility unit: date-time (de)serialization hooks.
//!
//! Generated records route scalar `DateTime<Utc>` members through these four functions so the wire
//! format is the configured chrono format instead of chrono's RFC 3339 default.

use crate::backend::errors::SinkError;
use crate::backend::options::GeneratorOptions;
use crate::backend::rust_emitter::RustEmitter;
use crate::backend::sink::{INDENT, OutputSink};

/// Module name of the utility unit
pub const UTILS_MODULE: &str = "utils";

const UTILS_TEMPLATE: &str = r#"use chrono::{ DateTime, NaiveDateTime, TimeZone, Utc };
use serde::{ Deserialize, Deserializer, Serializer };

const DATETIME_FORMAT: &str = {format};

pub fn serialize_datetime_option<S>(datetime: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match datetime {
        Some(dt) => serializer.serialize_some(&dt.format(DATETIME_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize_datetime_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT)
            .map(|naive| Some(Utc.from_utc_datetime(&naive)))
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub fn serialize_datetime<S>(datetime: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&datetime.format(DATETIME_FORMAT).to_string())
}

pub fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(serde::de::Error::custom)
}
"#;

/// Emit `utils.rs`.
pub fn emit_utils(sink: &mut dyn OutputSink, options: &GeneratorOptions) -> Result<(), SinkError> {
    let source = UTILS_TEMPLATE.replace("{format}", &format!("{:?}", options.datetime_format));
    let mut e = RustEmitter::open(sink, &format!("{}.rs", UTILS_MODULE))?;
    for line in source.lines() {
        let body = line.trim_start_matches(' ');
        let indent = (line.len() - body.len()) / INDENT.len();
        e.line_at(indent, body)?;
    }
    e.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::sink::MemorySink;

    #[test]
    fn test_utils_unit_round_trips_template() {
        let mut sink = MemorySink::new();
        emit_utils(&mut sink, &GeneratorOptions::default()).unwrap();
        let text = sink.unit("utils.rs").unwrap().text();
        assert!(text.contains(r#"const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";"#));
        assert!(text.contains("\n        .map(|naive| Utc.from_utc_datetime(&naive))\n"));
        assert_eq!(text.matches("pub fn ").count(), 4);
    }

    #[test]
    fn test_custom_format_is_quoted() {
        let mut sink = MemorySink::new();
        let options = GeneratorOptions::new().with_datetime_format("%Y\"%m");
        emit_utils(&mut sink, &options).unwrap();
        let text = sink.unit("utils.rs").unwrap().text();
        assert!(text.contains(r#"const DATETIME_FORMAT: &str = "%Y\"%m";"#));
    }
}
