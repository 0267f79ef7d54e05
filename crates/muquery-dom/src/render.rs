//! Markup serialization.

use crate::document::{Document, NodeData, NodeId};

/// Void elements per the HTML5 list: no closing tag, no children.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

pub(crate) fn is_void(tag: &str) -> bool {
	VOID_ELEMENTS
		.iter()
		.any(|v| v.eq_ignore_ascii_case(tag))
}

pub(crate) fn render_node(doc: &Document, id: NodeId) -> String {
	let mut out = String::new();
	write_node(doc, id, &mut out);
	out
}

pub(crate) fn render_children(doc: &Document, id: NodeId) -> String {
	let mut out = String::new();
	for &child in doc.children(id) {
		write_node(doc, child, &mut out);
	}
	out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
	match &doc.node(id).data {
		NodeData::Text(text) => out.push_str(&html_escape::encode_text(text)),
		NodeData::Element(el) => {
			// Synthetic container tags (the document root) serialize as
			// their children.
			if el.tag().starts_with('#') {
				for &child in doc.children(id) {
					write_node(doc, child, out);
				}
				return;
			}
			out.push('<');
			out.push_str(el.tag());
			for (name, value) in el.attributes() {
				out.push(' ');
				out.push_str(name);
				out.push_str("=\"");
				out.push_str(&html_escape::encode_double_quoted_attribute(value));
				out.push('"');
			}
			if let Some(style) = el.style_attribute() {
				out.push_str(" style=\"");
				out.push_str(&html_escape::encode_double_quoted_attribute(&style));
				out.push('"');
			}
			if is_void(el.tag()) && doc.children(id).is_empty() {
				out.push_str(" />");
				return;
			}
			out.push('>');
			for &child in doc.children(id) {
				write_node(doc, child, out);
			}
			out.push_str("</");
			out.push_str(el.tag());
			out.push('>');
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_nested_markup_with_attributes() {
		let mut doc = Document::new();
		let root = doc.root();
		let section = doc.create_element("section");
		doc.set_attribute(section, "id", "intro");
		let bg = doc.create_element("div");
		doc.set_attribute(bg, "class", "bg");
		doc.set_style(bg, "display", "none");
		doc.append_child(root, section);
		doc.append_child(section, bg);
		assert_eq!(
			doc.outer_html(root),
			"<section id=\"intro\"><div class=\"bg\" style=\"display: none\"></div></section>"
		);
	}

	#[test]
	fn renders_void_elements_without_closing_tag() {
		let mut doc = Document::new();
		let root = doc.root();
		let br = doc.create_element("br");
		doc.append_child(root, br);
		assert_eq!(doc.inner_html(root), "<br />");
	}

	#[test]
	fn escapes_text_and_attribute_values() {
		let mut doc = Document::new();
		let root = doc.root();
		let p = doc.create_element("p");
		doc.set_attribute(p, "title", "a \"quote\" & more");
		doc.append_child(root, p);
		doc.set_text_content(p, "1 < 2");
		let html = doc.inner_html(root);
		assert!(html.contains("&quot;quote&quot;"));
		assert!(html.contains("1 &lt; 2"));
	}
}
