//! Subcommand implementations

use crate::Format;
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use strata_models::{resource_from_json_str_with, resource_from_xml_str_with, Options, Resource};
use tracing::{debug, info};

/// Read a file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Detect the wire format from the first significant character.
pub fn detect_format(source: &str) -> Result<Format> {
    let body = source.trim_start_matches('\u{feff}').trim_start();
    match body.chars().next() {
        Some('{') => Ok(Format::Json),
        Some('<') => Ok(Format::Xml),
        Some(other) => bail!("Cannot detect input format: unexpected leading character {other:?}"),
        None => bail!("Input is empty"),
    }
}

pub fn decode(source: &str, options: &Options) -> Result<Resource> {
    let format = detect_format(source)?;
    debug!(?format, strict = options.is_strict(), "Detected input format");
    let resource = match format {
        Format::Json => resource_from_json_str_with(source, options)?,
        Format::Xml => resource_from_xml_str_with(source, options)?,
    };
    Ok(resource)
}

pub fn encode(resource: &Resource, format: Format, options: &Options) -> Result<String> {
    let text = match format {
        Format::Json if options.pretty => resource.to_json_string_pretty()?,
        Format::Json => resource.to_json_string()?,
        Format::Xml => resource.to_xml_string_with(options)?,
    };
    Ok(text)
}

/// Convert to `to`, or to the other format when `to` is not given.
pub fn convert(source: &str, to: Option<Format>, options: &Options) -> Result<String> {
    let from = detect_format(source)?;
    let to = to.unwrap_or(match from {
        Format::Json => Format::Xml,
        Format::Xml => Format::Json,
    });
    let resource = decode(source, options)?;
    info!(
        resource_type = resource.resource_type(),
        ?from,
        ?to,
        "Converting resource"
    );
    encode(&resource, to, options)
}

/// Decode, re-encode, decode again and confirm both encodings match.
pub fn check(source: &str, options: &Options) -> Result<String> {
    let format = detect_format(source)?;
    let first = decode(source, options)?;
    let encoded = encode(&first, format, options)?;
    let second = decode(&encoded, options).context("Re-encoded output does not decode")?;
    let reencoded = encode(&second, format, options)?;

    if first != second {
        bail!("Decoded model changed after re-encoding");
    }
    if encoded != reencoded {
        bail!("Re-encoding is not stable");
    }

    Ok(format!(
        "{}/{}: ok{}",
        first.resource_type(),
        first.id().unwrap_or("-"),
        if options.is_strict() { " (strict)" } else { "" }
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{"resourceType":"Communication","id":"c1","status":"completed","_priority":{"extension":[{"url":"http://example.org/x","valueBoolean":true}]}}"#;

    #[test]
    fn detects_format_from_leading_character() {
        assert_eq!(detect_format("  {\"a\":1}").unwrap(), Format::Json);
        assert_eq!(detect_format("\u{feff}<?xml version=\"1.0\"?>").unwrap(), Format::Xml);
        assert!(detect_format("").is_err());
        assert!(detect_format("resourceType").is_err());
    }

    #[test]
    fn converts_json_to_xml_and_back() {
        let options = Options::default();
        let xml = convert(JSON, None, &options).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<priority>"));

        let json = convert(&xml, None, &options.with_pretty(false)).unwrap();
        assert_eq!(json, JSON);
    }

    #[test]
    fn check_reports_type_and_id() {
        let summary = check(JSON, &Options::default()).unwrap();
        assert_eq!(summary, "Communication/c1: ok");
    }

    #[test]
    fn strict_check_rejects_unknown_fields() {
        let input = r#"{"resourceType":"Communication","status":"completed","colour":"red"}"#;
        assert!(check(input, &Options::default()).is_ok());
        assert!(check(input, &Options::strict()).is_err());
    }

    #[test]
    fn strict_check_is_named_in_the_summary() {
        assert_eq!(check(JSON, &Options::default()).unwrap(), "Communication/c1: ok");
        assert_eq!(
            check(JSON, &Options::strict()).unwrap(),
            "Communication/c1: ok (strict)"
        );
    }
}
