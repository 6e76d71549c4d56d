//! XML and SVG loading using quick-xml.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

use quarry_core::types::{ContentNode, Element, SvgContainer, XmlContainer};
use quarry_core::VisitableKind;

use crate::error::{ExtractError, ExtractResult};
use crate::{LoadedContainer, Loader};

fn xml_error(reader: &Reader<&[u8]>, message: impl std::fmt::Display) -> ExtractError {
    ExtractError::Xml(format!("at byte {}: {}", reader.buffer_position(), message))
}

fn start_element(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> ExtractResult<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| xml_error(reader, e))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| xml_error(reader, e))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), &'static str> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(ContentNode::Element(element));
            Ok(())
        }
        None if root.is_some() => Err("more than one root element"),
        None => {
            *root = Some(element);
            Ok(())
        }
    }
}

fn push_text(stack: &mut [Element], text: String) {
    if let Some(parent) = stack.last_mut() {
        if !text.trim().is_empty() {
            parent.children.push(ContentNode::Text(text));
        }
    }
}

/// Parse an XML document into a content model root.
///
/// Element names keep their namespace prefixes. Text is trimmed; CDATA is
/// kept verbatim. Comments, processing instructions and the doctype are
/// dropped.
pub fn parse_xml(text: &str) -> ExtractResult<Element> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(start_element(&reader, &start)?),
            Ok(Event::Empty(start)) => {
                let element = start_element(&reader, &start)?;
                attach(&mut stack, &mut root, element).map_err(|e| xml_error(&reader, e))?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| xml_error(&reader, "unexpected closing tag"))?;
                attach(&mut stack, &mut root, element).map_err(|e| xml_error(&reader, e))?;
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(|e| xml_error(&reader, e))?;
                push_text(&mut stack, text.into_owned());
            }
            Ok(Event::CData(data)) => {
                push_text(&mut stack, String::from_utf8_lossy(&data.into_inner()).into_owned());
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(&reader, e)),
        }
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(&reader, format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| xml_error(&reader, "no root element"))
}

fn decode(content: &[u8], source: &Path) -> ExtractResult<String> {
    String::from_utf8(content.to_vec())
        .map_err(|e| ExtractError::Xml(format!("{} is not UTF-8: {}", source.display(), e)))
}

/// Generic XML loader.
#[derive(Debug, Clone, Default)]
pub struct XmlLoader;

impl Loader for XmlLoader {
    fn kind(&self) -> VisitableKind {
        VisitableKind::Xml
    }

    fn extensions(&self) -> &[&str] {
        &["xml"]
    }

    fn load(&self, content: &[u8], source: &Path) -> ExtractResult<LoadedContainer> {
        let root = parse_xml(&decode(content, source)?)?;
        Ok(LoadedContainer::Xml(XmlContainer::new(Some(source.to_path_buf()), root)))
    }

    fn name(&self) -> &str {
        "xml"
    }
}

/// SVG loader. SVG is parsed as XML and searched in the same content model.
#[derive(Debug, Clone, Default)]
pub struct SvgLoader;

impl Loader for SvgLoader {
    fn kind(&self) -> VisitableKind {
        VisitableKind::Svg
    }

    fn extensions(&self) -> &[&str] {
        &["svg"]
    }

    fn load(&self, content: &[u8], source: &Path) -> ExtractResult<LoadedContainer> {
        let root = parse_xml(&decode(content, source)?)?;
        Ok(LoadedContainer::Svg(SvgContainer::new(Some(source.to_path_buf()), root)))
    }

    fn name(&self) -> &str {
        "svg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::PathQuery;

    #[test]
    fn test_parse_xml_structure() {
        let root = parse_xml(
            "<?xml version=\"1.0\"?>\n<!-- header -->\n<doc>\n  \
             <item id=\"a\">one &amp; two</item>\n  \
             <item id=\"b\"/>\n  <code><![CDATA[x < y]]></code>\n</doc>",
        )
        .unwrap();

        assert_eq!(root.name, "doc");
        assert_eq!(root.child_elements().count(), 3);
        let items = PathQuery::parse("//item[@id='a']").unwrap().evaluate(&root);
        assert_eq!(items[0].value, "one & two");
        let code = PathQuery::parse("//code").unwrap().evaluate(&root);
        assert_eq!(code[0].value, "x < y");
    }

    #[test]
    fn test_svg_keeps_prefixes() {
        let loaded = SvgLoader
            .load(
                b"<svg xmlns=\"http://www.w3.org/2000/svg\"><svg:g>\
                  <text x=\"1\">axis</text></svg:g></svg>",
                Path::new("plot.svg"),
            )
            .unwrap();
        let LoadedContainer::Svg(svg) = loaded else {
            panic!("expected an SVG container");
        };
        assert_eq!(svg.root().attribute("xmlns"), Some("http://www.w3.org/2000/svg"));
        let matches = PathQuery::parse("//text").unwrap().evaluate(svg.root());
        assert_eq!(matches[0].location, "/svg[1]/svg:g[1]/text[1]");
    }

    #[test]
    fn test_malformed_xml_is_rejected() {
        assert!(parse_xml("<a><b></a>").is_err());
        assert!(parse_xml("<a>").is_err());
        assert!(parse_xml("").is_err());
        assert!(parse_xml("<a/><b/>").is_err());
        assert!(XmlLoader.load(&[0xff, 0xfe], Path::new("bad.xml")).is_err());
    }
}
