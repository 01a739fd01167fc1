//! XML marshaling of document trees

use crate::{config::RenderConfig, Error, Result};
use quick_xml::{
    events::{BytesDecl, Event},
    se::Serializer,
    Reader, Writer,
};
use serde::Serialize;

/// Declaration prepended to every rendered message
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Serialize a document tree to UTF-8 XML bytes.
///
/// The tree is serialized compact and then re-emitted event by event through
/// an indenting [`Writer`], which keeps text content on the line of its start
/// tag (`<InstdAmt Ccy="EUR">386.00</InstdAmt>`).
pub fn to_xml<T: Serialize>(document: &T, config: &RenderConfig) -> Result<Vec<u8>> {
    let mut body = String::new();
    document
        .serialize(Serializer::new(&mut body))
        .map_err(|e| Error::Serialization(format!("XML serialization failed: {}", e)))?;

    let mut writer = if config.indent > 0 {
        Writer::new_with_indent(Vec::with_capacity(body.len() * 2), b' ', config.indent)
    } else {
        Writer::new(Vec::with_capacity(body.len() + XML_DECLARATION.len()))
    };

    if config.xml_declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;
    }

    let mut reader = Reader::from_str(&body);
    loop {
        match reader.read_event().map_err(write_error)? {
            Event::Eof => break,
            event => writer.write_event(event).map_err(write_error)?,
        }
    }

    let mut xml = writer.into_inner();
    if config.indent > 0 {
        xml.push(b'\n');
    }
    Ok(xml)
}

fn write_error(e: quick_xml::Error) -> Error {
    Error::Serialization(format!("XML writing failed: {}", e))
}
