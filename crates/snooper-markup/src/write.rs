//! Tree to text.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::MarkupError;
use crate::node::{MarkupDocument, MarkupNode};

/// Spaces per nesting level in written markup.
pub const INDENT_WIDTH: usize = 4;

pub(crate) fn write_document(document: &MarkupDocument) -> Result<String, MarkupError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH);
    write_node(&mut writer, &document.root)?;
    String::from_utf8(writer.into_inner()).map_err(|err| MarkupError::Write(err.to_string()))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &MarkupNode) -> Result<(), MarkupError> {
    let mut start = BytesStart::new(node.tag_name.as_str());
    for (name, value) in &node.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if node.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    if let Some(text) = &node.text_content {
        emit(writer, Event::Text(BytesText::new(text)))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    emit(writer, Event::End(BytesEnd::new(node.tag_name.as_str())))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), MarkupError> {
    writer
        .write_event(event)
        .map_err(|err| MarkupError::Write(err.to_string()))
}
