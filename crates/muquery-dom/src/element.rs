//! Element payload: tag, attributes, inline styles.

/// Data carried by an element node.
///
/// Attributes keep insertion order. The `style` attribute is special-cased
/// into structured declarations so style reads and writes do not reparse the
/// serialized form on every access; it is reserialized when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
	tag: String,
	attrs: Vec<(String, String)>,
	style: Vec<(String, String)>,
}

impl ElementData {
	/// Creates element data for a tag name.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attrs: Vec::new(),
			style: Vec::new(),
		}
	}

	/// Returns the tag name as written.
	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Returns an attribute value.
	///
	/// The `style` attribute is not stored here; see [`ElementData::style_attribute`].
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}

	/// Sets an attribute, replacing any existing value.
	///
	/// Setting `style` routes into the structured style declarations.
	pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();
		if name == "style" {
			self.set_style_attribute(&value);
			return;
		}
		if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
			slot.1 = value;
		} else {
			self.attrs.push((name, value));
		}
	}

	/// Removes an attribute. Returns whether it was present.
	pub fn remove_attribute(&mut self, name: &str) -> bool {
		if name == "style" {
			let had = !self.style.is_empty();
			self.style.clear();
			return had;
		}
		let before = self.attrs.len();
		self.attrs.retain(|(n, _)| n != name);
		self.attrs.len() < before
	}

	/// Returns the ordered attribute list (excluding `style`).
	pub fn attributes(&self) -> &[(String, String)] {
		&self.attrs
	}

	/// Returns the element id attribute, if any.
	pub fn id(&self) -> Option<&str> {
		self.attribute("id")
	}

	/// Returns the raw `class` attribute value, or `""` when absent.
	pub fn class_attribute(&self) -> &str {
		self.attribute("class").unwrap_or("")
	}

	/// Overwrites the raw `class` attribute value.
	///
	/// An empty value removes the attribute rather than leaving `class=""`.
	pub fn set_class_attribute(&mut self, value: impl Into<String>) {
		let value = value.into();
		if value.is_empty() {
			self.remove_attribute("class");
		} else {
			self.set_attribute("class", value);
		}
	}

	/// Whether a whitespace-delimited class token is present.
	pub fn has_class_token(&self, class: &str) -> bool {
		self.class_attribute()
			.split_whitespace()
			.any(|token| token == class)
	}

	/// Returns an inline style declaration value.
	pub fn style(&self, property: &str) -> Option<&str> {
		self.style
			.iter()
			.find(|(p, _)| p == property)
			.map(|(_, v)| v.as_str())
	}

	/// Sets an inline style declaration, replacing any existing value.
	pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
		let property = property.into();
		let value = value.into();
		if let Some(slot) = self.style.iter_mut().find(|(p, _)| *p == property) {
			slot.1 = value;
		} else {
			self.style.push((property, value));
		}
	}

	/// Returns the ordered inline style declarations.
	pub fn styles(&self) -> &[(String, String)] {
		&self.style
	}

	/// Serializes the inline style declarations into attribute form,
	/// or `None` when there are none.
	pub fn style_attribute(&self) -> Option<String> {
		if self.style.is_empty() {
			return None;
		}
		let rendered = self
			.style
			.iter()
			.map(|(p, v)| format!("{}: {}", p, v))
			.collect::<Vec<_>>()
			.join("; ");
		Some(rendered)
	}

	/// Replaces the style declarations by parsing a `style="…"` value.
	///
	/// Declarations without a `:` are dropped silently.
	pub fn set_style_attribute(&mut self, value: &str) {
		self.style.clear();
		for declaration in value.split(';') {
			let declaration = declaration.trim();
			if declaration.is_empty() {
				continue;
			}
			if let Some((property, v)) = declaration.split_once(':') {
				self.style
					.push((property.trim().to_string(), v.trim().to_string()));
			}
		}
	}
}
