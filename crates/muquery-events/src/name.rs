//! Event name parsing: `type[.namespace]`.

/// A parsed event name.
///
/// The substring before the first `.` is the type; everything after it is
/// the namespace, dots included, so multi-segment namespaces survive intact
/// and in order (`"click.a.b"` → type `click`, namespace `a.b`). Either
/// side may be empty: `".slides"` has an empty type and matches any type
/// during removal and triggering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventName {
	event_type: String,
	namespace: String,
}

impl EventName {
	/// Parses a raw event name. Never fails; an input without a dot has an
	/// empty namespace.
	pub fn parse(raw: &str) -> Self {
		match raw.split_once('.') {
			Some((event_type, namespace)) => Self {
				event_type: event_type.to_string(),
				namespace: namespace.to_string(),
			},
			None => Self {
				event_type: raw.to_string(),
				namespace: String::new(),
			},
		}
	}

	/// The bare event type.
	pub fn event_type(&self) -> &str {
		&self.event_type
	}

	/// The dotted namespace, or `""` when none was given.
	pub fn namespace(&self) -> &str {
		&self.namespace
	}
}

impl From<&str> for EventName {
	fn from(raw: &str) -> Self {
		Self::parse(raw)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("click", "click", "")]
	#[case("click.foo", "click", "foo")]
	#[case("click.foo.bar", "click", "foo.bar")]
	#[case(".slides", "", "slides")]
	#[case("keyup.a.b.c", "keyup", "a.b.c")]
	fn parse_splits_on_first_dot(
		#[case] raw: &str,
		#[case] event_type: &str,
		#[case] namespace: &str,
	) {
		let name = EventName::parse(raw);
		assert_eq!(name.event_type(), event_type);
		assert_eq!(name.namespace(), namespace);
	}
}
