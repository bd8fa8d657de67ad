//! Minimal XML element tree read and written with quick-xml events.
//!
//! The placement rules (attributes vs. elements vs. untagged repetition)
//! need random access to an element's attributes and children, so documents
//! are materialized into this small tree instead of being streamed through a
//! serde binding. Messages are metadata-sized; this is never bulk data.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{EncodeError, MalformedMessageError};

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct XmlElement {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(tag: String) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    pub fn with_text(tag: String, text: String) -> Self {
        Self {
            tag,
            text,
            ..Self::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.tag == tag)
    }

    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.tag == tag)
    }
}

fn syntax(err: impl std::fmt::Display) -> MalformedMessageError {
    MalformedMessageError::Syntax(err.to_string())
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, MalformedMessageError> {
    let mut el = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attr in start.attributes() {
        let attr = attr.map_err(syntax)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(syntax)?.into_owned();
        el.attrs.push((key, value));
    }
    Ok(el)
}

/// Parses a whole document into its root element. Processing instructions,
/// comments, and the XML declaration are skipped.
pub(crate) fn parse_document(bytes: &[u8]) -> Result<XmlElement, MalformedMessageError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    loop {
        match reader.read_event().map_err(syntax)? {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let el = element_from_start(&start)?;
                attach(&mut stack, &mut root, el)?;
            }
            Event::End(_) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| syntax("unbalanced closing tag"))?;
                attach(&mut stack, &mut root, el)?;
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text.unescape().map_err(syntax)?);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    top.text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !stack.is_empty() {
        return Err(syntax("unclosed element"));
    }
    root.ok_or(MalformedMessageError::EmptyDocument)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    el: XmlElement,
) -> Result<(), MalformedMessageError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None => {
            if root.is_some() {
                return Err(syntax("multiple root elements"));
            }
            *root = Some(el);
        }
    }
    Ok(())
}

pub(crate) fn write_document(root: &XmlElement) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, root)?;
    Ok(writer.into_inner())
}

fn write_element(writer: &mut Writer<Vec<u8>>, el: &XmlElement) -> Result<(), EncodeError> {
    let mut start = BytesStart::new(el.tag.as_str());
    for (key, value) in &el.attrs {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if el.text.is_empty() && el.children.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| EncodeError::Write(e.to_string()))?;
        return Ok(());
    }
    writer
        .write_event(Event::Start(start))
        .map_err(|e| EncodeError::Write(e.to_string()))?;
    if !el.text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&el.text)))
            .map_err(|e| EncodeError::Write(e.to_string()))?;
    }
    for child in &el.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(el.tag.as_str())))
        .map_err(|e| EncodeError::Write(e.to_string()))
}
