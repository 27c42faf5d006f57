//! LeftClick XML parsing.
//!
//! # Responsibilities
//! - Stream through the document with `quick-xml`
//! - Track open elements on a stack
//! - Apply text of the `player_proxy*` elements to a [`ConfigRecord`]
//!
//! # Design Decisions
//! - Element names are matched case-sensitively at any depth; attributes are ignored
//! - Text belongs to the innermost open element; closing restores the parent
//! - Unknown elements and their text are skipped without error; text or elements
//!   outside the single root element are malformed
//! - A failed parse never leaks partial updates: work happens on an owned record

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::config::schema::ConfigRecord;

const ELEM_ENABLED: &[u8] = b"player_proxy";
const ELEM_SERVER: &[u8] = b"player_proxy_server";
const ELEM_PORT: &[u8] = b"player_proxy_port";
const ELEM_BLACKLIST: &[u8] = b"player_proxy_blacklist";

/// Malformed LeftClick document.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Error on byte {position}: {reason}")]
pub struct ParseError {
    /// Byte offset into the input where the problem was detected.
    pub position: u64,
    /// Human-readable reason.
    pub reason: String,
}

impl ParseError {
    fn new(position: u64, reason: impl Into<String>) -> Self {
        Self {
            position,
            reason: reason.into(),
        }
    }
}

/// Parse a complete document into a new record with default values.
///
/// The returned record has `available == false`; the caller decides when a
/// record is published.
pub fn parse(data: &[u8]) -> Result<ConfigRecord, ParseError> {
    parse_onto(ConfigRecord::default(), data)
}

/// Parse a complete document on top of `base`.
///
/// Elements missing from `data` keep the values they had in `base`.
pub fn parse_onto(base: ConfigRecord, data: &[u8]) -> Result<ConfigRecord, ParseError> {
    let mut parser = XmlConfigParser::new(base);
    let mut reader = Reader::from_reader(data);
    let mut buf = Vec::new();

    loop {
        let position = reader.buffer_position() as u64;
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => return Err(ParseError::new(reader.error_position() as u64, e.to_string())),
        };
        let at = |reason: String| ParseError::new(position, reason);

        match event {
            Event::Start(start) => {
                check_attributes(&start).map_err(at)?;
                parser.open(start.name().as_ref()).map_err(at)?;
            }
            Event::Empty(start) => {
                check_attributes(&start).map_err(at)?;
                parser.open(start.name().as_ref()).map_err(at)?;
                parser.close(start.name().as_ref()).map_err(at)?;
            }
            Event::End(end) => parser.close(end.name().as_ref()).map_err(at)?,
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| at(e.to_string()))?;
                parser.text(&text).map_err(at)?;
            }
            Event::CData(cdata) => {
                let text = String::from_utf8(cdata.into_inner().into_owned())
                    .map_err(|e| at(e.to_string()))?;
                parser.text(&text).map_err(at)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    parser.finish(reader.buffer_position() as u64)
}

/// Attributes are ignored, but they still have to be well formed.
fn check_attributes(start: &BytesStart<'_>) -> Result<(), String> {
    for attr in start.attributes() {
        attr.map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Parser state: the stack of open element names plus the record being built.
struct XmlConfigParser {
    stack: Vec<Vec<u8>>,
    root_seen: bool,
    root_closed: bool,
    record: ConfigRecord,
}

impl XmlConfigParser {
    fn new(record: ConfigRecord) -> Self {
        Self {
            stack: Vec::new(),
            root_seen: false,
            root_closed: false,
            record,
        }
    }

    fn open(&mut self, name: &[u8]) -> Result<(), String> {
        if name.is_empty() {
            return Err("Expected an element name after '<'".to_string());
        }
        if self.root_closed {
            return Err(format!(
                "Element '{}' found after the root element was closed",
                String::from_utf8_lossy(name)
            ));
        }
        self.root_seen = true;
        self.stack.push(name.to_vec());
        Ok(())
    }

    fn close(&mut self, name: &[u8]) -> Result<(), String> {
        match self.stack.pop() {
            Some(open) if open == name => {
                self.root_closed = self.stack.is_empty();
                Ok(())
            }
            Some(open) => Err(format!(
                "Element '{}' was closed, but the currently open element is '{}'",
                String::from_utf8_lossy(name),
                String::from_utf8_lossy(&open)
            )),
            None => Err(format!(
                "Element '{}' was closed, no element is currently open",
                String::from_utf8_lossy(name)
            )),
        }
    }

    fn text(&mut self, text: &str) -> Result<(), String> {
        let Some(current) = self.stack.last() else {
            if text.chars().all(char::is_whitespace) {
                return Ok(());
            }
            return Err(if self.root_closed {
                "Text is not allowed after the root element".to_string()
            } else {
                "Document must begin with an element".to_string()
            });
        };

        match current.as_slice() {
            ELEM_ENABLED => match text {
                "ON" => self.record.enabled = true,
                "OFF" => self.record.enabled = false,
                _ => {}
            },
            ELEM_SERVER => self.record.server = Some(text.to_string()),
            ELEM_PORT => self.record.port = Some(text.to_string()),
            ELEM_BLACKLIST => {
                self.record.blacklist = text.split(',').map(str::to_string).collect();
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self, position: u64) -> Result<ConfigRecord, ParseError> {
        if let Some(open) = self.stack.last() {
            return Err(ParseError::new(
                position,
                format!(
                    "Document ended unexpectedly with elements still open, '{}' was the last element opened",
                    String::from_utf8_lossy(open)
                ),
            ));
        }
        if !self.root_seen {
            return Err(ParseError::new(
                position,
                "Document was empty or contained only whitespace",
            ));
        }
        Ok(self.record)
    }
}
