//! Reserved tag names.

use std::fmt;

/// Tags with compiler-defined meaning. Every other tag lowers to a generic
/// component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedTag {
	State,
	Props,
	If,
	Loop,
	Slot,
	OnMount,
	Async,
	Switch,
	Router,
	Route,
}

impl ReservedTag {
	/// Looks up a tag name.
	pub fn from_name(name: &str) -> Option<Self> {
		let tag = match name {
			"state" => ReservedTag::State,
			"props" => ReservedTag::Props,
			"if" => ReservedTag::If,
			"loop" => ReservedTag::Loop,
			"slot" => ReservedTag::Slot,
			"onMount" => ReservedTag::OnMount,
			"async" => ReservedTag::Async,
			"switch" => ReservedTag::Switch,
			"Router" | "router" => ReservedTag::Router,
			"route" => ReservedTag::Route,
			_ => return None,
		};
		Some(tag)
	}

	/// Canonical tag name.
	pub fn as_str(&self) -> &'static str {
		match self {
			ReservedTag::State => "state",
			ReservedTag::Props => "props",
			ReservedTag::If => "if",
			ReservedTag::Loop => "loop",
			ReservedTag::Slot => "slot",
			ReservedTag::OnMount => "onMount",
			ReservedTag::Async => "async",
			ReservedTag::Switch => "switch",
			ReservedTag::Router => "Router",
			ReservedTag::Route => "route",
		}
	}
}

impl fmt::Display for ReservedTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Branch tags recognized directly under `<async>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsyncBranch {
	Then,
	Catch,
	Loading,
}

impl AsyncBranch {
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"then" => Some(AsyncBranch::Then),
			"catch" => Some(AsyncBranch::Catch),
			"loading" => Some(AsyncBranch::Loading),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			AsyncBranch::Then => "then",
			AsyncBranch::Catch => "catch",
			AsyncBranch::Loading => "loading",
		}
	}
}

/// Tag of a `switch` case.
pub const CASE_TAG: &str = "case";
