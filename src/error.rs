//! # Error Types for the AVL Tree
//!
//! This module defines the errors surfaced by tree queries and by the
//! rebalancing machinery.
//!
//! ## Error Handling Strategy
//!
//! Lookup-style queries (`retrieve`, `parent`, `children`, `ancestors`,
//! `descendants`) report a missing element to the caller as an explicit
//! `Err` instead of a default value. Mutations never fail on missing keys:
//! inserting a present element updates it and removing an absent element is
//! a no-op.
//!
//! ## Error Flow
//!
//! ```text
//! insert / remove
//!      │
//!      ▼
//! Recursive descent ───► rebalancing table
//!      │                        │
//!      │                        ▼
//!      │            impossible configuration?
//!      │                        │ yes
//!      │                        ▼
//!      │            Err(InvariantViolation) ──► `?` up the call chain
//!      │                                               │
//!      ▼                                               ▼
//! new root installed                     error! event, then panic
//! ```
//!
//! An invariant violation means the tree shape can no longer be trusted,
//! so it is fatal for the mutation that found it. It is never ignored.

use thiserror::Error;

/// Errors that can occur during tree operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// The tree holds no elements.
	///
	/// Returned by `retrieve` and `descendants` when there is no root to
	/// search from.
	#[error("tree is empty")]
	EmptyTree,

	/// No element in the tree compares equal to the one requested.
	///
	/// Returned by `retrieve`, `parent`, `children`, `ancestors` and
	/// `descendants`.
	#[error("key not found in tree")]
	KeyNotFound,

	/// A balance factor or node layout contradicts the AVL invariant.
	///
	/// # Response
	///
	/// Inside `insert` and `remove` this is unrecoverable: the call logs the
	/// error and panics. `check_invariants` returns it so callers can
	/// inspect a broken tree without panicking.
	#[error("AVL invariant violated: {0}")]
	InvariantViolation(String),

	/// A numeric order code outside `-3..=3` was given to `TokenOrder`.
	#[error("order code {0} is not in -3..=3")]
	InvalidOrderCode(i32),
}

/// A Result type alias using our custom Error type.
pub type Result<T> = std::result::Result<T, Error>;
