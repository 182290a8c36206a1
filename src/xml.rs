/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::borrow::Cow;

use xml::writer::{EmitterConfig, EventWriter, XmlEvent};

use crate::{element::Element, Error};

pub trait EwsWrite<W> {
    /// Writes the value as XML using the provided writer.
    fn write(&self, writer: &mut EventWriter<W>) -> Result<(), xml::writer::Error>;
}

impl<W: std::io::Write> EwsWrite<W> for Element {
    fn write(&self, writer: &mut EventWriter<W>) -> Result<(), xml::writer::Error> {
        let attributes: Vec<_> = self
            .attributes()
            .iter()
            .map(|(name, value)| (name.as_str(), xml_chars(self.name(), value)))
            .collect();

        let mut builder = XmlEvent::start_element(self.name());
        for (name, value) in &attributes {
            builder = builder.attr(*name, value);
        }
        writer.write(builder)?;

        if let Some(text) = self.text().filter(|text| !text.is_empty()) {
            writer.write(XmlEvent::characters(&xml_chars(self.name(), text)))?;
        }

        for child in self.children() {
            child.write(writer)?;
        }

        writer.write(XmlEvent::end_element())
    }
}

/// Removes characters which XML 1.0 does not allow in a document, such as
/// most C0 control characters.
fn xml_chars<'a>(element_name: &str, value: &'a str) -> Cow<'a, str> {
    if value.chars().all(is_xml_char) {
        return Cow::Borrowed(value);
    }

    log::warn!("dropping characters not allowed in XML from content of `{element_name}`");

    Cow::Owned(value.chars().filter(|c| is_xml_char(*c)).collect())
}

// The `Char` production of XML 1.0; `char` already excludes surrogates.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Creates a writer for document fragments: no XML declaration, and empty
/// elements are written with an explicit end tag.
pub fn fragment_writer<W: std::io::Write>(sink: W) -> EventWriter<W> {
    EmitterConfig::new()
        .write_document_declaration(false)
        .normalize_empty_elements(false)
        .create_writer(sink)
}

/// Writes a value as an XML fragment.
///
/// Namespace prefixes are written as given and no namespace declarations are
/// added.
pub fn write_fragment<W: std::io::Write, X: EwsWrite<W>>(sink: W, body: &X) -> Result<(), Error> {
    let mut writer = fragment_writer(sink);
    body.write(&mut writer)?;

    Ok(())
}

impl Element {
    /// Serializes this element and its descendants as an XML fragment.
    pub fn to_xml_string(&self) -> Result<String, Error> {
        let mut buf = Vec::new();
        write_fragment(&mut buf, self)?;

        Ok(String::from_utf8(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{element::Element, test_utils::assert_serialized_content};

    #[test]
    fn writes_attributes_text_and_children() {
        let mut root = Element::new("t:Body");
        root.set_attr("BodyType", "Text");
        root.set_text("See you there");
        root.add("t:Note", None);

        assert_serialized_content(
            &root,
            r#"<t:Body BodyType="Text">See you there<t:Note></t:Note></t:Body>"#,
        );
    }

    #[test]
    fn empty_text_writes_no_content() {
        let mut root = Element::new("m:Watermark");
        root.set_text("");

        assert_serialized_content(&root, "<m:Watermark></m:Watermark>");
    }

    #[test]
    fn escapes_text_and_attributes() {
        let mut root = Element::new("t:Subject");
        root.set_attr("Title", r#"say "hi""#);
        root.set_text("Fish & Chips");

        let xml = root.to_xml_string().unwrap();

        assert!(xml.contains("Fish &amp; Chips"));
        assert!(!xml.contains(r#""hi""#));
    }

    #[test]
    fn drops_characters_not_allowed_in_xml() {
        let mut root = Element::new("t:Subject");
        root.set_attr("Title", "bell\u{7}\u{FFFF}");
        root.set_text("a\u{1}b c\u{1F}");

        assert_serialized_content(&root, "<t:Subject Title=\"bell\">ab c</t:Subject>");
    }
}
