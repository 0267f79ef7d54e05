//! HTML-subset fragment parser.
//!
//! Best-effort and non-strict: malformed input never errors. Unclosed tags
//! are auto-closed at end of input, stray closing tags are dropped, and a
//! bare `<` that does not open a tag is treated as text. Comments and
//! doctype/processing instructions are skipped. Recovery points are logged
//! at debug level.

use tracing::debug;

use crate::document::{Document, NodeId};
use crate::render;

/// Parses `input` and appends the resulting nodes under `parent`.
pub(crate) fn parse_fragment(doc: &mut Document, parent: NodeId, input: &str) {
	let mut parser = Parser {
		doc,
		input,
		pos: 0,
		stack: Vec::new(),
		fragment_parent: parent,
	};
	parser.run();
}

struct Parser<'a, 'd> {
	doc: &'d mut Document,
	input: &'a str,
	pos: usize,
	/// Open elements with their lowercased tag names.
	stack: Vec<(NodeId, String)>,
	fragment_parent: NodeId,
}

impl Parser<'_, '_> {
	fn run(&mut self) {
		let mut text = String::new();
		while self.pos < self.input.len() {
			let rest = &self.input[self.pos..];
			if let Some(stripped) = rest.strip_prefix('<') {
				if rest.starts_with("<!--") {
					self.flush_text(&mut text);
					self.skip_past("-->", 4);
				} else if rest.starts_with("<!") || rest.starts_with("<?") {
					self.flush_text(&mut text);
					self.skip_past(">", 2);
				} else if rest.starts_with("</") {
					self.flush_text(&mut text);
					self.close_tag();
				} else if stripped.starts_with(|c: char| c.is_ascii_alphabetic()) {
					self.flush_text(&mut text);
					self.open_tag();
				} else {
					// Not a tag; keep the `<` as text.
					text.push('<');
					self.pos += 1;
				}
			} else {
				let next_tag = rest.find('<').unwrap_or(rest.len());
				text.push_str(&rest[..next_tag]);
				self.pos += next_tag;
			}
		}
		self.flush_text(&mut text);
	}

	fn current_parent(&self) -> NodeId {
		self.stack
			.last()
			.map(|(id, _)| *id)
			.unwrap_or(self.fragment_parent)
	}

	fn flush_text(&mut self, text: &mut String) {
		if text.is_empty() {
			return;
		}
		let decoded = html_escape::decode_html_entities(text.as_str()).into_owned();
		let parent = self.current_parent();
		let node = self.doc.create_text_node(decoded);
		self.doc.append_child(parent, node);
		text.clear();
	}

	/// Advances past the next occurrence of `marker`, or to end of input.
	fn skip_past(&mut self, marker: &str, prefix_len: usize) {
		let search_from = self.pos + prefix_len;
		match self.input.get(search_from..).and_then(|s| s.find(marker)) {
			Some(found) => self.pos = search_from + found + marker.len(),
			None => {
				debug!(marker, "unterminated markup construct; dropping rest of input");
				self.pos = self.input.len();
			}
		}
	}

	fn close_tag(&mut self) {
		self.pos += 2; // past "</"
		let tag = self.read_name().to_ascii_lowercase();
		// Skip anything up to the closing angle bracket.
		match self.input[self.pos..].find('>') {
			Some(found) => self.pos += found + 1,
			None => self.pos = self.input.len(),
		}
		match self.stack.iter().rposition(|(_, open)| *open == tag) {
			Some(position) => self.stack.truncate(position),
			None => debug!(tag, "dropping closing tag with no open element"),
		}
	}

	fn open_tag(&mut self) {
		self.pos += 1; // past '<'
		let tag = self.read_name().to_string();
		let element = self.doc.create_element(tag.clone());

		let mut self_closing = false;
		loop {
			self.skip_whitespace();
			match self.peek() {
				None => break,
				Some('>') => {
					self.pos += 1;
					break;
				}
				Some('/') => {
					self.pos += 1;
					if self.peek() == Some('>') {
						self.pos += 1;
						self_closing = true;
						break;
					}
				}
				Some(_) => {
					let name = self.read_attr_name();
					if name.is_empty() {
						// Unparsable character in tag position; skip it.
						self.pos += self.peek().map(char::len_utf8).unwrap_or(1);
						continue;
					}
					let name = name.to_string();
					self.skip_whitespace();
					let value = if self.peek() == Some('=') {
						self.pos += 1;
						self.skip_whitespace();
						self.read_attr_value()
					} else {
						String::new()
					};
					let decoded = html_escape::decode_html_entities(&value).into_owned();
					self.doc.set_attribute(element, &name, &decoded);
				}
			}
		}

		let parent = self.current_parent();
		self.doc.append_child(parent, element);
		if !self_closing && !render::is_void(&tag) {
			self.stack.push((element, tag.to_ascii_lowercase()));
		}
	}

	fn read_name(&mut self) -> &str {
		let start = self.pos;
		while let Some(c) = self.peek() {
			if c.is_ascii_alphanumeric() || c == '-' {
				self.pos += 1;
			} else {
				break;
			}
		}
		&self.input[start..self.pos]
	}

	fn read_attr_name(&mut self) -> &str {
		let start = self.pos;
		while let Some(c) = self.peek() {
			if c.is_whitespace() || c == '=' || c == '/' || c == '>' {
				break;
			}
			self.pos += c.len_utf8();
		}
		&self.input[start..self.pos]
	}

	fn read_attr_value(&mut self) -> String {
		match self.peek() {
			Some(quote @ ('"' | '\'')) => {
				self.pos += 1;
				let start = self.pos;
				let end = self.input[start..]
					.find(quote)
					.map(|found| start + found)
					.unwrap_or(self.input.len());
				let value = self.input[start..end].to_string();
				self.pos = (end + 1).min(self.input.len());
				value
			}
			_ => {
				let start = self.pos;
				while let Some(c) = self.peek() {
					if c.is_whitespace() || c == '>' || c == '/' {
						break;
					}
					self.pos += c.len_utf8();
				}
				self.input[start..self.pos].to_string()
			}
		}
	}

	fn skip_whitespace(&mut self) {
		while let Some(c) = self.peek() {
			if c.is_whitespace() {
				self.pos += c.len_utf8();
			} else {
				break;
			}
		}
	}

	fn peek(&self) -> Option<char> {
		self.input[self.pos..].chars().next()
	}
}
