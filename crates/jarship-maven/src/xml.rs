//! Small indented XML writer shared by the POM and metadata writers.

use std::fmt::Display;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use jarship_util::errors::JarshipError;

pub(crate) struct XmlDocument {
    writer: Writer<Vec<u8>>,
}

fn xml_err(e: impl Display) -> JarshipError {
    JarshipError::Generic {
        message: format!("Failed to write XML: {e}"),
    }
}

impl XmlDocument {
    pub(crate) fn new() -> miette::Result<Self> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_err)?;
        Ok(Self { writer })
    }

    pub(crate) fn start(&mut self, name: &str) -> miette::Result<()> {
        self.start_with(name, &[])
    }

    pub(crate) fn start_with(&mut self, name: &str, attributes: &[(&str, &str)]) -> miette::Result<()> {
        let elem = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Start(elem)).map_err(xml_err)?;
        Ok(())
    }

    pub(crate) fn end(&mut self, name: &str) -> miette::Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_err)?;
        Ok(())
    }

    /// `<name>value</name>`, with `value` escaped.
    pub(crate) fn element(&mut self, name: &str, value: &str) -> miette::Result<()> {
        self.start(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(xml_err)?;
        self.end(name)
    }

    /// Like [`element`](Self::element) but skips `None`.
    pub(crate) fn optional(&mut self, name: &str, value: Option<&str>) -> miette::Result<()> {
        match value {
            Some(v) => self.element(name, v),
            None => Ok(()),
        }
    }

    pub(crate) fn finish(self) -> miette::Result<String> {
        let mut bytes = self.writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| xml_err(e).into())
    }
}
