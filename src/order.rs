//! Comparators used to order the elements of a [`Tree`](crate::Tree).
//!
//! Every ordering, equality and search decision inside the tree goes through
//! a single [`Comparator`]. Two elements are "the same element" exactly when
//! the comparator returns [`Ordering::Equal`] for them; no other notion of
//! equality is consulted.
//!
//! Three kinds of comparator are provided:
//!
//! - [`Natural`]: the element type's own [`Ord`] implementation.
//! - Any closure `Fn(&E, &E) -> Ordering`.
//! - [`TokenOrder`]: a fixed table of string orderings selected by a numeric
//!   order code, for trees of words and other tokens.

use std::cmp::Ordering;

use crate::error::{self, Error};

/// A total order over elements of type `E`.
pub trait Comparator<E: ?Sized> {
	/// Compares `a` with `b`.
	fn compare(&self, a: &E, b: &E) -> Ordering;
}

impl<E: ?Sized, F> Comparator<E> for F
where
	F: Fn(&E, &E) -> Ordering,
{
	#[inline]
	fn compare(&self, a: &E, b: &E) -> Ordering {
		self(a, b)
	}
}

/// Orders elements by their [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<E: Ord + ?Sized> Comparator<E> for Natural {
	#[inline]
	fn compare(&self, a: &E, b: &E) -> Ordering {
		a.cmp(b)
	}
}

/// String orderings selected by an order code in `-3..=3`.
///
/// | code | ordering                                            |
/// |------|-----------------------------------------------------|
/// | `0`  | length ascending, then reverse lexicographic        |
/// | `-1` | reverse lexicographic                               |
/// | `1`  | lexicographic                                       |
/// | `-2` | length descending                                   |
/// | `2`  | length ascending                                    |
/// | `-3` | length descending, then reverse lexicographic       |
/// | `3`  | length ascending, then lexicographic                |
///
/// Length is measured in bytes. The pure length orders treat every pair of
/// equally long tokens as equal, so a tree using them keeps at most one
/// token per length.
///
/// # Example
///
/// ```
/// use dendrology::order::TokenOrder;
/// use dendrology::Tree;
///
/// let order = TokenOrder::try_from(3).unwrap();
/// let mut tree = Tree::with_comparator(order);
/// tree.extend(["pear", "fig", "apple", "kiwi"].map(String::from));
///
/// let words: Vec<&str> = tree.iter().map(String::as_str).collect();
/// assert_eq!(words, ["fig", "kiwi", "pear", "apple"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenOrder {
	/// Code `0`.
	LengthThenReverseLexicographic,
	/// Code `-1`.
	ReverseLexicographic,
	/// Code `1`.
	Lexicographic,
	/// Code `-2`.
	ReverseLength,
	/// Code `2`.
	Length,
	/// Code `-3`.
	ReverseLengthThenReverseLexicographic,
	/// Code `3`.
	LengthThenLexicographic,
}

impl TokenOrder {
	/// Returns the numeric order code for this ordering.
	pub fn code(self) -> i32 {
		match self {
			TokenOrder::LengthThenReverseLexicographic => 0,
			TokenOrder::ReverseLexicographic => -1,
			TokenOrder::Lexicographic => 1,
			TokenOrder::ReverseLength => -2,
			TokenOrder::Length => 2,
			TokenOrder::ReverseLengthThenReverseLexicographic => -3,
			TokenOrder::LengthThenLexicographic => 3,
		}
	}

	fn compare_str(self, a: &str, b: &str) -> Ordering {
		let by_length = a.len().cmp(&b.len());
		let lexical = a.cmp(b);
		match self {
			TokenOrder::LengthThenReverseLexicographic => by_length.then(lexical.reverse()),
			TokenOrder::ReverseLexicographic => lexical.reverse(),
			TokenOrder::Lexicographic => lexical,
			TokenOrder::ReverseLength => by_length.reverse(),
			TokenOrder::Length => by_length,
			TokenOrder::ReverseLengthThenReverseLexicographic => {
				by_length.reverse().then(lexical.reverse())
			}
			TokenOrder::LengthThenLexicographic => by_length.then(lexical),
		}
	}
}

impl TryFrom<i32> for TokenOrder {
	type Error = Error;

	fn try_from(code: i32) -> error::Result<Self> {
		match code {
			0 => Ok(TokenOrder::LengthThenReverseLexicographic),
			-1 => Ok(TokenOrder::ReverseLexicographic),
			1 => Ok(TokenOrder::Lexicographic),
			-2 => Ok(TokenOrder::ReverseLength),
			2 => Ok(TokenOrder::Length),
			-3 => Ok(TokenOrder::ReverseLengthThenReverseLexicographic),
			3 => Ok(TokenOrder::LengthThenLexicographic),
			other => Err(Error::InvalidOrderCode(other)),
		}
	}
}

impl<S: AsRef<str> + ?Sized> Comparator<S> for TokenOrder {
	#[inline]
	fn compare(&self, a: &S, b: &S) -> Ordering {
		self.compare_str(a.as_ref(), b.as_ref())
	}
}
