//! XML rendering of results trees.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::Cursor;

use crate::error::{QuarryError, QuarryResult};
use crate::types::{ResultKind, ResultNode, ResultsTree};

const INDENT: usize = 2;

fn element_name(kind: ResultKind) -> &'static str {
    match kind {
        ResultKind::Root => "results",
        ResultKind::ContainerResults => "list",
        ResultKind::Match => "result",
    }
}

fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{FFFE}' | '\u{FFFF}' => false,
        c => c >= ' ',
    }
}

/// Replace characters XML 1.0 forbids with U+FFFD.
fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
            .collect(),
    )
}

fn write_node(writer: &mut Writer<Cursor<Vec<u8>>>, node: &ResultNode) -> quick_xml::Result<()> {
    let name = element_name(node.kind());
    let mut start = BytesStart::new(name);
    for (key, value) in [
        ("source", node.source()),
        ("format", node.format()),
        ("location", node.location()),
    ] {
        if let Some(value) = value {
            start.push_attribute((key, xml_safe(value).as_ref()));
        }
    }

    if node.value().is_none() && node.children().is_empty() {
        return writer.write_event(Event::Empty(start));
    }

    writer.write_event(Event::Start(start))?;
    if let Some(value) = node.value() {
        writer.write_event(Event::Text(BytesText::new(&xml_safe(value))))?;
    }
    for child in node.children() {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))
}

fn write_tree(writer: &mut Writer<Cursor<Vec<u8>>>, tree: &ResultsTree) -> quick_xml::Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    match tree.root() {
        Some(root) => write_node(writer, root),
        None => {
            let empty = BytesStart::new(element_name(ResultKind::Root));
            writer.write_event(Event::Empty(empty))
        }
    }
}

/// Render a tree as an indented UTF-8 XML document.
///
/// A tree without a root renders as an empty `<results/>` element.
pub(super) fn render(tree: &ResultsTree) -> QuarryResult<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', INDENT);
    write_tree(&mut writer, tree).map_err(|e| QuarryError::serialization(e.to_string()))?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| QuarryError::serialization(e.to_string()))
}
