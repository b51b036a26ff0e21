//! Route path patterns.
//!
//! A route path such as `/users/:id/posts/:post` is split into literal and
//! parameter segments with nom parser combinators. The generated component
//! matches paths with an anchored regular expression that has one capture
//! group per parameter; [`RoutePattern::matches`] applies the same regex on
//! the Rust side.

use nom::{
	IResult, Parser,
	branch::alt,
	bytes::complete::{tag, take_while1},
	combinator::map,
	multi::many0,
	sequence::preceded,
};
use regex::Regex;

/// Capture group used for every parameter segment.
const PARAMETER_GROUP: &str = "([^/]+)";

/// A piece of a route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Text matched verbatim
	Literal(String),
	/// `:name`, matches one path segment
	Parameter(String),
}

/// A parsed route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
	path: String,
	segments: Vec<Segment>,
}

/// Parameters captured by a match, in the order they appear in the path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteParams(Vec<(String, String)>);

impl RouteParams {
	/// Value of the parameter `name`. When a name repeats, the last capture
	/// wins, matching object-literal semantics of the generated code.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0
			.iter()
			.rev()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Parse a parameter segment: `:name` up to the next `/`
fn parameter(input: &str) -> IResult<&str, Segment> {
	map(
		preceded(tag(":"), take_while1(|c: char| c != '/')),
		|name: &str| Segment::Parameter(name.to_string()),
	)
	.parse(input)
}

/// Parse a literal run (anything up to the next `:`)
fn literal(input: &str) -> IResult<&str, Segment> {
	map(take_while1(|c: char| c != ':'), |text: &str| {
		Segment::Literal(text.to_string())
	})
	.parse(input)
}

/// A `:` that does not start a parameter (`/a/:/b`, trailing `:`)
fn lone_colon(input: &str) -> IResult<&str, Segment> {
	map(tag(":"), |text: &str| Segment::Literal(text.to_string())).parse(input)
}

fn segments(input: &str) -> IResult<&str, Vec<Segment>> {
	many0(alt((parameter, literal, lone_colon))).parse(input)
}

impl RoutePattern {
	/// Parses a route path. Parsing never fails: text that is not a
	/// parameter is matched literally.
	pub fn parse(path: &str) -> Self {
		let mut parsed = match segments(path) {
			Ok((_, segments)) => segments,
			Err(_) => vec![Segment::Literal(path.to_string())],
		};
		// Adjacent literals come from lone colons; merge them back.
		parsed.dedup_by(|next, prev| match (prev, next) {
			(Segment::Literal(prev), Segment::Literal(next)) => {
				prev.push_str(next);
				true
			}
			_ => false,
		});
		Self {
			path: path.to_string(),
			segments: parsed,
		}
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Whether the path has no parameters and is compared by equality.
	pub fn is_static(&self) -> bool {
		self.segments
			.iter()
			.all(|segment| matches!(segment, Segment::Literal(_)))
	}

	/// Parameter names in order of appearance.
	pub fn param_names(&self) -> Vec<&str> {
		self.segments
			.iter()
			.filter_map(|segment| match segment {
				Segment::Parameter(name) => Some(name.as_str()),
				Segment::Literal(_) => None,
			})
			.collect()
	}

	/// Parameter names that appear more than once.
	pub fn duplicate_params(&self) -> Vec<&str> {
		let names = self.param_names();
		let mut duplicates: Vec<&str> = Vec::new();
		for (index, name) in names.iter().enumerate() {
			if names[..index].contains(name) && !duplicates.contains(name) {
				duplicates.push(name);
			}
		}
		duplicates
	}

	/// Anchored regular expression source matching the whole path.
	pub fn regex_source(&self) -> String {
		let mut source = String::from("^");
		for segment in &self.segments {
			match segment {
				Segment::Literal(text) => source.push_str(&regex::escape(text)),
				Segment::Parameter(_) => source.push_str(PARAMETER_GROUP),
			}
		}
		source.push('$');
		source
	}

	/// Matches a concrete path, returning the captured parameters.
	pub fn matches(&self, path: &str) -> Option<RouteParams> {
		if self.is_static() {
			return (self.path == path).then(RouteParams::default);
		}
		let regex = Regex::new(&self.regex_source()).ok()?;
		let captures = regex.captures(path)?;
		let params = self
			.param_names()
			.into_iter()
			.enumerate()
			.filter_map(|(index, name)| {
				captures
					.get(index + 1)
					.map(|value| (name.to_string(), value.as_str().to_string()))
			})
			.collect();
		Some(RouteParams(params))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_parse_segments() {
		// Act
		let pattern = RoutePattern::parse("/users/:id/posts/:post");

		// Assert
		assert_eq!(
			pattern.segments(),
			&[
				Segment::Literal("/users/".to_string()),
				Segment::Parameter("id".to_string()),
				Segment::Literal("/posts/".to_string()),
				Segment::Parameter("post".to_string()),
			]
		);
		assert_eq!(pattern.param_names(), vec!["id", "post"]);
		assert!(!pattern.is_static());
	}

	#[rstest]
	#[case("/", "^/$")]
	#[case("/about", "^/about$")]
	#[case(":a/:b", "^([^/]+)/([^/]+)$")]
	#[case("/files/:name.json", "^/files/([^/]+)$")]
	#[case("/v1.0/:id", r"^/v1\.0/([^/]+)$")]
	fn test_regex_source(#[case] path: &str, #[case] expected: &str) {
		assert_eq!(RoutePattern::parse(path).regex_source(), expected);
	}

	#[rstest]
	fn test_matches_binds_params_in_order() {
		let pattern = RoutePattern::parse(":a/:b");

		let params = pattern.matches("left/right").unwrap();

		assert_eq!(
			params.iter().collect::<Vec<_>>(),
			vec![("a", "left"), ("b", "right")]
		);
		assert_eq!(params.get("b"), Some("right"));
	}

	#[rstest]
	#[case("/users/:id", "/users/42", true)]
	#[case("/users/:id", "/users/42/edit", false)]
	#[case("/users/:id", "/users/", false)]
	#[case("/about", "/about", true)]
	#[case("/about", "/about/", false)]
	fn test_matches(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
		assert_eq!(RoutePattern::parse(pattern).matches(path).is_some(), expected);
	}

	#[rstest]
	fn test_static_match_has_no_params() {
		let params = RoutePattern::parse("/").matches("/").unwrap();
		assert!(params.is_empty());
	}

	#[rstest]
	fn test_lone_colon_is_literal() {
		let pattern = RoutePattern::parse("/a/:/b");
		assert!(pattern.is_static());
		assert_eq!(
			pattern.segments(),
			&[Segment::Literal("/a/:/b".to_string())]
		);
	}

	#[rstest]
	fn test_duplicate_params() {
		let pattern = RoutePattern::parse("/:id/x/:id/:id");
		assert_eq!(pattern.duplicate_params(), vec!["id"]);
		let params = pattern.matches("/1/x/2/3").unwrap();
		assert_eq!(params.len(), 3);
		assert_eq!(params.get("id"), Some("3"));
	}
}
