//! Incremental XML walker
//!
//! A thin, forward-only cursor over a quick-xml pull reader that turns the
//! borrowed tokenizer events into owned [`XmlEvent`]s. The walker keeps only
//! the stack of open element names, never the document tree.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::error::{MeshError, ParseError, ParseErrorKind};

/// A single attribute of an element start tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name
    pub name: String,
    /// Unescaped attribute value
    pub value: String,
}

/// Low-level tree event emitted by [`XmlWalker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// An element was opened. Empty elements (`<a/>`) produce a start
    /// immediately followed by an end.
    Start {
        /// Element name
        tag: String,
        /// Attributes in document order
        attributes: Vec<Attribute>,
    },
    /// An element was closed
    End {
        /// Element name
        tag: String,
    },
    /// Character data (entities resolved, CDATA included verbatim).
    /// Whitespace-only runs between elements are emitted as well.
    Text {
        /// Unescaped text
        content: String,
    },
}

/// Forward-only streaming cursor over an XML document
///
/// The walker owns the underlying stream; dropping it releases the stream.
/// Once it has returned an error or reached the end of the document it keeps
/// returning `Ok(None)`.
pub struct XmlWalker<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    open: Vec<String>,
    finished: bool,
}

impl<R: BufRead> XmlWalker<R> {
    /// Create a new walker from a BufRead source
    pub fn new(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        let config = xml_reader.config_mut();
        config.trim_text(false);
        config.expand_empty_elements = true;
        config.check_end_names = true;

        Self {
            reader: xml_reader,
            buf: Vec::with_capacity(4096),
            open: Vec::new(),
            finished: false,
        }
    }

    /// Byte offset of the tokenizer in the input stream
    pub fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Whether the walker has reached the end of input or failed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Get a reference to the underlying stream
    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    /// Consume the walker and return the underlying stream
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Read the next event from the stream
    ///
    /// Declarations, comments, processing instructions and the doctype are
    /// skipped.
    pub fn next_event(&mut self) -> Result<Option<XmlEvent>, MeshError> {
        if self.finished {
            return Ok(None);
        }

        loop {
            self.buf.clear();
            let position = self.reader.buffer_position() as u64;

            let outcome = match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(ref e)) => start_event(e, position).map(Some),
                Ok(Event::End(ref e)) => {
                    utf8(e.name().as_ref(), position).map(|tag| {
                        Some(XmlEvent::End {
                            tag: tag.to_string(),
                        })
                    })
                }
                Ok(Event::Text(ref t)) => t
                    .unescape()
                    .map(|content| {
                        Some(XmlEvent::Text {
                            content: content.into_owned(),
                        })
                    })
                    .map_err(|e| MeshError::from_xml(e, position)),
                Ok(Event::CData(ref c)) => utf8(c, position).map(|content| {
                    Some(XmlEvent::Text {
                        content: content.to_string(),
                    })
                }),
                Ok(Event::Eof) => {
                    self.finished = true;
                    return match self.open.last() {
                        Some(tag) => Err(MeshError::Parse(ParseError::new(
                            position,
                            ParseErrorKind::UnclosedElement(tag.clone()),
                        ))),
                        None => Ok(None),
                    };
                }
                Ok(_) => continue,
                Err(e) => {
                    let position = self.reader.buffer_position() as u64;
                    Err(MeshError::from_xml(e, position))
                }
            };

            return match outcome {
                Ok(Some(event)) => {
                    match &event {
                        XmlEvent::Start { tag, .. } => self.open.push(tag.clone()),
                        XmlEvent::End { .. } => {
                            self.open.pop();
                        }
                        XmlEvent::Text { .. } => {}
                    }
                    Ok(Some(event))
                }
                Ok(None) => continue,
                Err(e) => {
                    self.finished = true;
                    Err(e)
                }
            };
        }
    }
}

impl<R: BufRead> Iterator for XmlWalker<R> {
    type Item = Result<XmlEvent, MeshError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

fn utf8(bytes: &[u8], position: u64) -> Result<&str, MeshError> {
    std::str::from_utf8(bytes)
        .map_err(|e| MeshError::Parse(ParseError::new(position, ParseErrorKind::InvalidUtf8(e))))
}

fn start_event(e: &BytesStart, position: u64) -> Result<XmlEvent, MeshError> {
    let tag = utf8(e.name().as_ref(), position)?.to_string();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| MeshError::from_xml(quick_xml::Error::from(err), position))?;
        let name = utf8(attr.key.as_ref(), position)?.to_string();
        let raw = utf8(&attr.value, position)?;
        let value = quick_xml::escape::unescape(raw)
            .map_err(|err| MeshError::Parse(ParseError::new(position, ParseErrorKind::Escape(err))))?
            .into_owned();
        attributes.push(Attribute { name, value });
    }

    Ok(XmlEvent::Start { tag, attributes })
}
