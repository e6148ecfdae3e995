//! Streaming reader and writer for LaunchBox XML documents.
//!
//! All LaunchBox data documents share one shape: a `LaunchBox` root holding a
//! flat list of record elements, each of which holds one text element per
//! field. The reader walks that shape with quick-xml and hands each field to
//! the caller by name; the writer emits the same shape with two-space
//! indentation.

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::reader::Reader;

use crate::doc::DocumentHandle;
use crate::error::LaunchBoxError;

pub const ROOT_ELEMENT: &str = "LaunchBox";
const XML_HEADER: &str = "<?xml version=\"1.0\" standalone=\"yes\"?>";
const INDENT: &str = "  ";

/// A child element the reader is positioned on.
#[derive(Debug, Clone)]
pub struct Child {
    pub(crate) name: String,
    /// Raw content of the start tag (name and attributes).
    start: String,
    empty: bool,
}

/// An element kept verbatim because the document kind does not interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawElement {
    name: String,
    start: String,
    inner: Option<String>,
}

impl RawElement {
    pub fn name(&self) -> &str {
        &self.name
    }
}

pub struct DocReader<'a> {
    xml: Reader<&'a [u8]>,
    handle: &'a DocumentHandle,
    root_empty: bool,
}

impl<'a> DocReader<'a> {
    pub fn new(text: &'a str, handle: &'a DocumentHandle) -> Self {
        Self {
            xml: Reader::from_str(text),
            handle,
            root_empty: false,
        }
    }

    fn error(&self, message: impl std::fmt::Display) -> LaunchBoxError {
        LaunchBoxError::parse(
            self.handle,
            format!("{message} (at byte {})", self.xml.buffer_position()),
        )
    }

    fn next_event(&mut self) -> Result<Event<'a>, LaunchBoxError> {
        self.xml.read_event().map_err(|e| self.error(e))
    }

    /// Advance to the root element and check its name.
    ///
    /// Returns `false` when the document has no root at all (empty file).
    pub fn read_root(&mut self) -> Result<bool, LaunchBoxError> {
        loop {
            match self.next_event()? {
                Event::Start(e) | Event::Empty(e) if e.name().as_ref() != ROOT_ELEMENT.as_bytes() => {
                    return Err(LaunchBoxError::not_supported(self.handle));
                }
                Event::Start(_) => return Ok(true),
                Event::Empty(_) => {
                    self.root_empty = true;
                    return Ok(true);
                }
                Event::Text(e) if is_blank(&e) => {}
                Event::Text(_) | Event::CData(_) | Event::End(_) => {
                    return Err(LaunchBoxError::not_supported(self.handle));
                }
                Event::Eof => return Ok(false),
                _ => {}
            }
        }
    }

    /// The next child of the current element, or `None` once its end tag is
    /// reached.
    pub fn next_child(&mut self) -> Result<Option<Child>, LaunchBoxError> {
        if std::mem::take(&mut self.root_empty) {
            return Ok(None);
        }
        loop {
            match self.next_event()? {
                Event::Start(e) => return Ok(Some(child(&e, false))),
                Event::Empty(e) => return Ok(Some(child(&e, true))),
                Event::End(_) => return Ok(None),
                Event::Text(e) if is_blank(&e) => {}
                Event::Text(_) | Event::CData(_) => {
                    return Err(self.error("unexpected text between elements"));
                }
                Event::Eof => return Err(self.error("unexpected end of document")),
                Event::Decl(_) | Event::DocType(_) => {
                    return Err(self.error("unexpected declaration inside the document"));
                }
                _ => {}
            }
        }
    }

    /// Read the text content of `child`, which must not contain elements.
    pub fn read_text(&mut self, child: &Child) -> Result<String, LaunchBoxError> {
        if child.empty {
            return Ok(String::new());
        }
        let mut text = String::new();
        loop {
            match self.next_event()? {
                Event::Text(e) => {
                    let unescaped = e.unescape().map_err(|e| self.error(e))?;
                    text.push_str(&unescaped);
                }
                Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
                Event::End(_) => return Ok(text),
                Event::Start(e) | Event::Empty(e) => {
                    return Err(self.error(format!(
                        "unexpected element <{}> inside <{}>",
                        String::from_utf8_lossy(e.name().as_ref()),
                        child.name
                    )));
                }
                Event::Eof => return Err(self.error("unexpected end of document")),
                _ => {}
            }
        }
    }

    /// Read `child` and everything below it without interpreting it.
    pub fn read_raw(&mut self, child: Child) -> Result<RawElement, LaunchBoxError> {
        let inner = if child.empty {
            None
        } else {
            let text = self
                .xml
                .read_text(QName(child.name.as_bytes()))
                .map_err(|e| self.error(e))?;
            Some(text.into_owned())
        };
        Ok(RawElement {
            name: child.name,
            start: child.start,
            inner,
        })
    }

    /// Feed every field of record element `child` to `set`, which may reject
    /// a value.
    pub fn read_fields(
        &mut self,
        child: &Child,
        mut set: impl FnMut(&str, String) -> Result<(), String>,
    ) -> Result<(), LaunchBoxError> {
        if child.empty {
            return Ok(());
        }
        while let Some(field) = self.next_child()? {
            let value = self.read_text(&field)?;
            set(&field.name, value).map_err(|msg| self.error(msg))?;
        }
        Ok(())
    }

    pub fn handle(&self) -> &DocumentHandle {
        self.handle
    }
}

fn child(e: &quick_xml::events::BytesStart<'_>, empty: bool) -> Child {
    Child {
        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
        start: String::from_utf8_lossy(e).into_owned(),
        empty,
    }
}

fn is_blank(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

/// Builds the text of a document in memory.
pub struct DocWriter {
    out: String,
    depth: usize,
}

impl Default for DocWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocWriter {
    pub fn new() -> Self {
        let mut out = String::with_capacity(4096);
        out.push_str(XML_HEADER);
        out.push('\n');
        out.push('<');
        out.push_str(ROOT_ELEMENT);
        out.push_str(">\n");
        Self { out, depth: 1 }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    pub fn start(&mut self, name: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(name);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    pub fn end(&mut self, name: &str) {
        self.depth -= 1;
        self.indent();
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }

    pub fn field(&mut self, name: &str, value: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(name);
        if value.is_empty() {
            self.out.push_str(" />\n");
            return;
        }
        self.out.push('>');
        self.out.push_str(&quick_xml::escape::escape(value));
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }

    pub fn fields<'f>(&mut self, fields: impl IntoIterator<Item = (&'f String, &'f String)>) {
        for (name, value) in fields {
            self.field(name, value);
        }
    }

    pub fn raw(&mut self, element: &RawElement) {
        self.indent();
        self.out.push('<');
        self.out.push_str(&element.start);
        match &element.inner {
            None => self.out.push_str(" />\n"),
            Some(inner) => {
                self.out.push('>');
                self.out.push_str(inner);
                self.out.push_str("</");
                self.out.push_str(&element.name);
                self.out.push_str(">\n");
            }
        }
    }

    pub fn finish(mut self) -> String {
        self.out.push_str("</");
        self.out.push_str(ROOT_ELEMENT);
        self.out.push_str(">\n");
        self.out
    }
}
