//! Nom parsers for the selector grammar.

use nom::{
	IResult, Parser,
	branch::alt,
	bytes::complete::{take_while, take_while1},
	character::complete::{char, multispace0, multispace1},
	combinator::{all_consuming, map, opt},
	multi::{many0, many1, separated_list1},
	sequence::{delimited, pair, preceded},
};

use crate::{
	Combinator, ComplexSelector, CompoundSelector, SelectorError, SelectorList, SimpleSelector,
};

/// Parses a full selector list, requiring all input to be consumed.
pub(crate) fn parse(input: &str) -> Result<SelectorList, SelectorError> {
	let trimmed = input.trim();
	if trimmed.is_empty() {
		return Err(SelectorError::Empty);
	}
	match all_consuming(selector_list).parse(trimmed) {
		Ok((_, list)) => Ok(list),
		Err(_) => Err(SelectorError::Invalid(input.to_string())),
	}
}

/// Parse a CSS identifier (letters, digits, `_`, `-`).
fn identifier(input: &str) -> IResult<&str, &str> {
	take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-').parse(input)
}

/// Parse an attribute value: quoted (either style) or bare.
fn attribute_value(input: &str) -> IResult<&str, String> {
	alt((
		map(
			delimited(char('"'), take_while(|c| c != '"'), char('"')),
			|v: &str| v.to_string(),
		),
		map(
			delimited(char('\''), take_while(|c| c != '\''), char('\'')),
			|v: &str| v.to_string(),
		),
		map(
			take_while1(|c: char| c != ']' && !c.is_whitespace()),
			|v: &str| v.to_string(),
		),
	))
	.parse(input)
}

/// Parse `[name]` or `[name=value]`.
fn attribute_selector(input: &str) -> IResult<&str, SimpleSelector> {
	let (rest, (_, name, _, value, _)) = delimited(
		char('['),
		(
			multispace0,
			identifier,
			multispace0,
			opt(preceded(pair(char('='), multispace0), attribute_value)),
			multispace0,
		),
		char(']'),
	)
	.parse(input)?;
	Ok((
		rest,
		SimpleSelector::Attr {
			name: name.to_string(),
			value,
		},
	))
}

/// Parse one simple selector.
fn simple_selector(input: &str) -> IResult<&str, SimpleSelector> {
	alt((
		map(char('*'), |_| SimpleSelector::Universal),
		map(preceded(char('#'), identifier), |id: &str| {
			SimpleSelector::Id(id.to_string())
		}),
		map(preceded(char('.'), identifier), |class: &str| {
			SimpleSelector::Class(class.to_string())
		}),
		attribute_selector,
		map(identifier, |tag: &str| {
			SimpleSelector::Type(tag.to_string())
		}),
	))
	.parse(input)
}

/// Parse a compound: one or more simple selectors with no space between.
fn compound_selector(input: &str) -> IResult<&str, CompoundSelector> {
	map(many1(simple_selector), |parts| CompoundSelector { parts }).parse(input)
}

/// Parse the combinator between two compounds. `>` binds tighter than the
/// implicit descendant whitespace, so it is tried first.
fn combinator(input: &str) -> IResult<&str, Combinator> {
	alt((
		map(delimited(multispace0, char('>'), multispace0), |_| {
			Combinator::Child
		}),
		map(multispace1, |_| Combinator::Descendant),
	))
	.parse(input)
}

/// Parse a complex selector: compounds joined by combinators.
fn complex_selector(input: &str) -> IResult<&str, ComplexSelector> {
	map(
		pair(compound_selector, many0(pair(combinator, compound_selector))),
		|(first, rest)| ComplexSelector { first, rest },
	)
	.parse(input)
}

/// Parse a comma-separated selector list.
fn selector_list(input: &str) -> IResult<&str, SelectorList> {
	map(
		separated_list1(
			delimited(multispace0, char(','), multispace0),
			complex_selector,
		),
		|alternatives| SelectorList { alternatives },
	)
	.parse(input)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn identifier_stops_at_punctuation() {
		let (rest, name) = identifier("bg.dark").unwrap();
		assert_eq!(name, "bg");
		assert_eq!(rest, ".dark");
	}

	#[test]
	fn compound_collects_adjacent_parts() {
		let (rest, compound) = compound_selector("div.bg#main[data-x=1] .next").unwrap();
		assert_eq!(compound.parts.len(), 4);
		assert_eq!(rest, " .next");
	}

	#[rstest]
	#[case::bare("[data-k=v]")]
	#[case::double_quoted("[data-k=\"v\"]")]
	#[case::single_quoted("[data-k='v']")]
	#[case::padded("[ data-k = v ]")]
	fn attribute_selector_supports_quoting_styles(#[case] input: &str) {
		let (_, parsed) = attribute_selector(input).unwrap();
		assert_eq!(
			parsed,
			SimpleSelector::Attr {
				name: "data-k".to_string(),
				value: Some("v".to_string()),
			}
		);
	}

	#[test]
	fn bare_attribute_has_no_value() {
		let (_, parsed) = attribute_selector("[hidden]").unwrap();
		assert_eq!(
			parsed,
			SimpleSelector::Attr {
				name: "hidden".to_string(),
				value: None,
			}
		);
	}

	#[test]
	fn trailing_combinator_is_rejected() {
		assert!(parse("div >").is_err());
	}
}
