//! # Dendrology: An AVL Tree with Genealogy Queries
//!
//! This crate provides a height-balanced binary search tree (an AVL tree)
//! ordered by a caller-supplied [`Comparator`], augmented with structural
//! queries: parent and child lookup, ancestor and descendant counts, height,
//! diameter, and shape checks for complete and Fibonacci (minimal AVL)
//! trees.
//!
//! ## Design Overview
//!
//! **Balance Factors**: Each node stores a tri-state balance factor instead of a
//! height. It records whether the left subtree is one level taller, the
//! right subtree is one level taller, or both are equal. Insertion and
//! deletion keep these exact using fixed case tables, without ever
//! recomputing subtree heights.
//!
//! **Owned Subtrees**: Every node is exclusively owned by its parent through
//! a `Box`, and the root by the tree. Recursive insert and remove take a
//! subtree by value and hand back the (possibly rotated) new subtree root
//! along with a flag saying whether its height changed. There are no parent
//! pointers and no shared ownership.
//!
//! **Injected Order**: Every ordering, equality and search decision goes
//! through the tree's comparator. Two elements are the same element exactly
//! when the comparator says they are equal.
//!
//! ### Tree Structure
//!
//! ```text
//!                  ┌──────────────────┐
//!                  │      Tree        │  <- root, len, comparator
//!                  └────────┬─────────┘
//!                           │ Box
//!                           ▼
//!                  ┌──────────────────┐
//!                  │  Node  "d"  (=)  │  <- data + balance factor
//!                  └───┬──────────┬───┘
//!                Box   │          │   Box
//!              ┌───────▼──┐   ┌───▼──────┐
//!              │ "b"  (=) │   │ "f"  (=) │
//!              └─┬──────┬─┘   └─┬──────┬─┘
//!                ▼      ▼       ▼      ▼
//!               "a"    "c"     "e"    "g"
//! ```
//!
//! ## Basic Usage
//!
//! ```
//! use dendrology::Tree;
//!
//! let mut tree = Tree::new();
//! for word in ["d", "b", "f", "a", "c", "e", "g"] {
//!     tree.insert(word);
//! }
//!
//! assert_eq!(tree.len(), 7);
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.parent(&"a").unwrap(), Some(&"b"));
//! assert_eq!(tree.ancestors(&"a").unwrap(), 2);
//! assert!(tree.is_complete());
//!
//! tree.remove(&"d");
//! assert!(!tree.contains(&"d"));
//! ```
//!
//! ## Thread Safety
//!
//! The tree is a plain single-threaded container. Rotations relink several
//! nodes at once, so callers sharing a tree across threads must guard the
//! whole structure with one lock.

use smallvec::SmallVec;
use tracing::trace;

use std::cmp::Ordering;
use std::fmt;
use std::mem;

pub mod error;
pub mod iter;
pub mod order;

use error::Error;
use iter::{Iter, LevelOrder, LevelOrderNodes, Postorder, Preorder};
use order::{Comparator, Natural};

// ---------------------------------------------------------------------------
// Core Tree Structure
// ---------------------------------------------------------------------------

/// An AVL tree storing elements of type `E`, ordered by the comparator `C`.
///
/// The default comparator is [`Natural`], the element type's own [`Ord`].
/// Use [`Tree::with_comparator`] to inject any other total order.
///
/// # Invariants
///
/// After every public operation returns:
/// - For every node, every element in its left subtree compares less and
///   every element in its right subtree compares greater.
/// - For every node, subtree heights differ by at most one, and the node's
///   balance factor encodes the sign of that difference.
/// - `len` equals the number of nodes reachable from `root`.
pub struct Tree<E, C = Natural> {
	/// The top node, or `None` for an empty tree.
	root: Link<E>,

	/// Number of elements stored.
	len: usize,

	/// The total order over elements.
	cmp: C,
}

impl<E: Ord> Tree<E> {
	/// Creates an empty tree ordered by the elements' [`Ord`] implementation.
	///
	/// # Example
	///
	/// ```
	/// use dendrology::Tree;
	///
	/// let tree: Tree<i32> = Tree::new();
	/// assert!(tree.is_empty());
	/// assert_eq!(tree.height(), -1);
	/// ```
	pub fn new() -> Self {
		Tree::with_comparator(Natural)
	}
}

impl<E, C: Default> Default for Tree<E, C> {
	fn default() -> Self {
		Tree::with_comparator(C::default())
	}
}

// ---------------------------------------------------------------------------
// Node Types
// ---------------------------------------------------------------------------

/// Height-difference indicator stored in every node.
///
/// `LeftHigh` means the left subtree is exactly one level taller than the
/// right, `RightHigh` the reverse, and `Balanced` that both are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Balance {
	LeftHigh,
	Balanced,
	RightHigh,
}

/// An owning reference to a subtree; `None` is the empty subtree.
pub(crate) type Link<E> = Option<Box<Node<E>>>;

/// A single tree vertex.
pub(crate) struct Node<E> {
	pub(crate) data: E,
	pub(crate) left: Link<E>,
	pub(crate) right: Link<E>,
	pub(crate) balance: Balance,
}

impl<E> Node<E> {
	fn leaf(data: E) -> Box<Node<E>> {
		Box::new(Node {
			data,
			left: None,
			right: None,
			balance: Balance::Balanced,
		})
	}
}

// ---------------------------------------------------------------------------
// Internal Helper Types
// ---------------------------------------------------------------------------

/// Outcome of inserting into a subtree.
struct Inserted<E> {
	/// The new root of the subtree.
	node: Box<Node<E>>,
	/// Whether the subtree grew one level taller.
	taller: bool,
	/// The element overwritten by an update, if the key was already present.
	replaced: Option<E>,
}

/// Outcome of removing from a subtree.
struct Removed<E> {
	/// The new root of the subtree (`None` if it became empty).
	node: Link<E>,
	/// Whether the subtree became one level shorter.
	shorter: bool,
	/// The element taken out of the tree, if it was found.
	removed: Option<E>,
}

/// A node found by descending from the root, with its parent and depth.
struct Located<'t, E> {
	node: &'t Node<E>,
	parent: Option<&'t Node<E>>,
	depth: usize,
}

// ---------------------------------------------------------------------------
// Tree Implementation: Comparator-Free Operations
// ---------------------------------------------------------------------------

impl<E, C> Tree<E, C> {
	/// Creates an empty tree ordered by `cmp`.
	///
	/// Any closure `Fn(&E, &E) -> Ordering` is a comparator.
	///
	/// # Example
	///
	/// ```
	/// use dendrology::Tree;
	///
	/// let mut tree = Tree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
	/// tree.extend([1, 3, 2]);
	///
	/// let descending: Vec<i32> = tree.iter().copied().collect();
	/// assert_eq!(descending, [3, 2, 1]);
	/// ```
	pub fn with_comparator(cmp: C) -> Self {
		Tree {
			root: None,
			len: 0,
			cmp,
		}
	}

	/// Returns `true` if the tree holds no elements.
	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Returns the number of elements in the tree. O(1).
	pub fn len(&self) -> usize {
		self.len
	}

	/// Removes every element from the tree.
	pub fn clear(&mut self) {
		self.root = None;
		self.len = 0;
	}

	/// Returns the least element, or `None` if the tree is empty.
	pub fn first(&self) -> Option<&E> {
		let mut node = self.root.as_deref()?;
		while let Some(left) = node.left.as_deref() {
			node = left;
		}
		Some(&node.data)
	}

	/// Returns the greatest element, or `None` if the tree is empty.
	pub fn last(&self) -> Option<&E> {
		let mut node = self.root.as_deref()?;
		while let Some(right) = node.right.as_deref() {
			node = right;
		}
		Some(&node.data)
	}

	// -----------------------------------------------------------------------
	// Traversal
	// -----------------------------------------------------------------------

	/// Returns an iterator over the elements in comparator order.
	pub fn iter(&self) -> Iter<'_, E> {
		Iter::new(self.root.as_deref())
	}

	/// Returns an iterator visiting each node before its subtrees.
	pub fn preorder(&self) -> Preorder<'_, E> {
		Preorder::new(self.root.as_deref())
	}

	/// Returns an iterator visiting each node after its subtrees.
	pub fn postorder(&self) -> Postorder<'_, E> {
		Postorder::new(self.root.as_deref())
	}

	/// Returns an iterator visiting nodes level by level, left to right.
	pub fn level_order(&self) -> LevelOrder<'_, E> {
		LevelOrder::new(self.root.as_deref())
	}

	/// Calls `visit` on every element in order (left, node, right).
	///
	/// # Example
	///
	/// ```
	/// use dendrology::Tree;
	///
	/// let tree: Tree<_> = ["b", "a", "c"].into_iter().collect();
	/// let mut seen = String::new();
	/// tree.traverse(|s| seen.push_str(s));
	/// assert_eq!(seen, "abc");
	/// ```
	pub fn traverse<F: FnMut(&E)>(&self, visit: F) {
		self.iter().for_each(visit);
	}

	/// Calls `visit` on every element in pre-order (node, left, right).
	pub fn preorder_traverse<F: FnMut(&E)>(&self, visit: F) {
		self.preorder().for_each(visit);
	}

	/// Calls `visit` on every element in post-order (left, right, node).
	pub fn postorder_traverse<F: FnMut(&E)>(&self, visit: F) {
		self.postorder().for_each(visit);
	}

	// -----------------------------------------------------------------------
	// Shape Queries
	// -----------------------------------------------------------------------

	/// Returns the height of the tree: the number of edges on the longest
	/// root-to-leaf path.
	///
	/// A single node has height 0 and an empty tree has height -1.
	///
	/// Runs in O(log n) by following the taller side at every node.
	pub fn height(&self) -> isize {
		subtree_height(self.root.as_deref())
	}

	/// Returns the number of nodes on the longest path between two nodes.
	///
	/// Computed as `height(left) + height(right) + 3` at the root, with
	/// empty subtrees counting as height -1. In an AVL tree the longest path
	/// always passes through the root. An empty tree has diameter 0 and a
	/// single node diameter 1.
	pub fn diameter(&self) -> usize {
		match self.root.as_deref() {
			None => 0,
			Some(root) => {
				let through_root = subtree_height(root.left.as_deref())
					+ subtree_height(root.right.as_deref())
					+ 3;
				through_root as usize
			}
		}
	}

	/// Returns `true` if the tree has the shape of a minimal AVL tree for
	/// its height (a Fibonacci tree).
	///
	/// This holds when `len() == fib(height + 3) - 1`, the fewest nodes an
	/// AVL tree of that height can have, and no node is right-high.
	///
	/// # Example
	///
	/// ```
	/// use dendrology::Tree;
	///
	/// let tree: Tree<_> = [3, 2, 4, 1].into_iter().collect();
	/// assert_eq!(tree.height(), 2);
	/// assert!(tree.is_fibonacci());
	/// ```
	pub fn is_fibonacci(&self) -> bool {
		let fib_index = (self.height() + 3) as usize;
		if self.len != fibonacci(fib_index) - 1 {
			return false;
		}
		LevelOrderNodes::new(self.root.as_deref())
			.all(|(node, _)| node.balance != Balance::RightHigh)
	}

	/// Returns `true` if the tree is a complete binary tree: every level is
	/// full except possibly the last, which is filled from the left.
	///
	/// Numbering nodes in level order (root 0, children of `i` at `2i + 1`
	/// and `2i + 2`), a tree is complete exactly when every index is below
	/// `len()`. An empty tree is complete.
	pub fn is_complete(&self) -> bool {
		LevelOrderNodes::new(self.root.as_deref()).all(|(_, index)| index < self.len)
	}
}

// ---------------------------------------------------------------------------
// Tree Implementation: Ordered Operations
// ---------------------------------------------------------------------------

impl<E, C: Comparator<E>> Tree<E, C> {
	// -----------------------------------------------------------------------
	// Lookup
	// -----------------------------------------------------------------------

	/// Descends from the root to the node equal to `item`.
	fn locate(&self, item: &E) -> error::Result<Located<'_, E>> {
		let mut parent = None;
		let mut current = self.root.as_deref();
		let mut depth = 0;

		while let Some(node) = current {
			current = match self.cmp.compare(item, &node.data) {
				Ordering::Equal => {
					return Ok(Located {
						node,
						parent,
						depth,
					})
				}
				Ordering::Less => node.left.as_deref(),
				Ordering::Greater => node.right.as_deref(),
			};
			parent = Some(node);
			depth += 1;
		}

		Err(Error::KeyNotFound)
	}

	/// Returns `true` if an element equal to `item` is stored. O(height).
	pub fn contains(&self, item: &E) -> bool {
		self.locate(item).is_ok()
	}

	/// Returns the stored element equal to `item`.
	///
	/// When the comparator only looks at part of an element, this returns
	/// the canonical stored instance rather than `item` itself.
	///
	/// # Errors
	///
	/// - [`Error::EmptyTree`] if the tree has no elements
	/// - [`Error::KeyNotFound`] if no stored element equals `item`
	///
	/// # Example
	///
	/// ```
	/// use dendrology::Tree;
	///
	/// let mut tree = Tree::with_comparator(|a: &(u32, &str), b: &(u32, &str)| a.0.cmp(&b.0));
	/// tree.insert((7, "seven"));
	///
	/// assert_eq!(tree.retrieve(&(7, "")), Ok(&(7, "seven")));
	/// ```
	pub fn retrieve(&self, item: &E) -> error::Result<&E> {
		if self.is_empty() {
			return Err(Error::EmptyTree);
		}
		self.locate(item).map(|found| &found.node.data)
	}

	// -----------------------------------------------------------------------
	// Genealogy Queries
	// -----------------------------------------------------------------------

	/// Returns the elements of the children of `entry`, left before right.
	/// Absent children are omitted.
	///
	/// # Errors
	///
	/// [`Error::KeyNotFound`] if `entry` is not in the tree.
	pub fn children(&self, entry: &E) -> error::Result<SmallVec<[&E; 2]>> {
		let found = self.locate(entry)?;
		Ok([found.node.left.as_deref(), found.node.right.as_deref()]
			.into_iter()
			.flatten()
			.map(|child| &child.data)
			.collect())
	}

	/// Returns the element of the parent of `entry`, or `None` if `entry` is
	/// the root.
	///
	/// # Errors
	///
	/// [`Error::KeyNotFound`] if `entry` is not in the tree.
	pub fn parent(&self, entry: &E) -> error::Result<Option<&E>> {
		self.locate(entry).map(|found| found.parent.map(|parent| &parent.data))
	}

	/// Returns the number of ancestors of `entry`, which is its depth.
	///
	/// # Errors
	///
	/// [`Error::KeyNotFound`] if `entry` is not in the tree.
	pub fn ancestors(&self, entry: &E) -> error::Result<usize> {
		self.locate(entry).map(|found| found.depth)
	}

	/// Returns the number of nodes below `entry`: the size of its subtree,
	/// not counting `entry` itself.
	///
	/// # Errors
	///
	/// - [`Error::EmptyTree`] if the tree has no elements
	/// - [`Error::KeyNotFound`] if `entry` is not in the tree
	pub fn descendants(&self, entry: &E) -> error::Result<usize> {
		if self.is_empty() {
			return Err(Error::EmptyTree);
		}
		let found = self.locate(entry)?;
		Ok(Preorder::new(Some(found.node)).count() - 1)
	}

	// -----------------------------------------------------------------------
	// Insertion
	// -----------------------------------------------------------------------

	/// Inserts `item`, or overwrites the stored element equal to it.
	///
	/// Returns the overwritten element on update, `None` if `item` is new.
	/// The length grows only when `item` is new; an update never changes the
	/// tree's shape.
	///
	/// # Algorithm
	///
	/// 1. Descend recursively to the insertion point and attach a leaf
	/// 2. While unwinding, update each balance factor on the side that grew
	/// 3. At the first node already leaning toward the grown side, rotate
	///    once (single or double); the height increase is absorbed there
	///
	/// # Panics
	///
	/// Panics if a rebalancing table meets a configuration the AVL invariant
	/// rules out, which can only mean the tree was already corrupt.
	///
	/// # Example
	///
	/// ```
	/// use dendrology::Tree;
	///
	/// let mut tree = Tree::new();
	/// assert_eq!(tree.insert("a"), None);
	/// assert_eq!(tree.insert("a"), Some("a"));
	/// assert_eq!(tree.len(), 1);
	/// ```
	pub fn insert(&mut self, item: E) -> Option<E> {
		let root = self.root.take();
		match Self::insert_node(&self.cmp, root, item) {
			Ok(Inserted {
				node,
				replaced,
				..
			}) => {
				self.root = Some(node);
				if replaced.is_none() {
					self.len += 1;
				}
				replaced
			}
			Err(err) => fatal(err),
		}
	}

	fn insert_node(cmp: &C, link: Link<E>, item: E) -> error::Result<Inserted<E>> {
		let mut node = match link {
			Some(node) => node,
			None => {
				return Ok(Inserted {
					node: Node::leaf(item),
					taller: true,
					replaced: None,
				})
			}
		};

		match cmp.compare(&item, &node.data) {
			Ordering::Less => {
				let grown = Self::insert_node(cmp, node.left.take(), item)?;
				node.left = Some(grown.node);
				let mut taller = grown.taller;
				if taller {
					match node.balance {
						Balance::LeftHigh => {
							node = left_balance(node)?;
							taller = false;
						}
						Balance::Balanced => node.balance = Balance::LeftHigh,
						Balance::RightHigh => {
							node.balance = Balance::Balanced;
							taller = false;
						}
					}
				}
				Ok(Inserted {
					node,
					taller,
					replaced: grown.replaced,
				})
			}
			Ordering::Greater => {
				let grown = Self::insert_node(cmp, node.right.take(), item)?;
				node.right = Some(grown.node);
				let mut taller = grown.taller;
				if taller {
					match node.balance {
						Balance::LeftHigh => {
							node.balance = Balance::Balanced;
							taller = false;
						}
						Balance::Balanced => node.balance = Balance::RightHigh,
						Balance::RightHigh => {
							node = right_balance(node)?;
							taller = false;
						}
					}
				}
				Ok(Inserted {
					node,
					taller,
					replaced: grown.replaced,
				})
			}
			Ordering::Equal => {
				let replaced = mem::replace(&mut node.data, item);
				Ok(Inserted {
					node,
					taller: false,
					replaced: Some(replaced),
				})
			}
		}
	}

	// -----------------------------------------------------------------------
	// Deletion
	// -----------------------------------------------------------------------

	/// Removes the element equal to `item`, returning it.
	///
	/// Removing an absent element is a no-op that returns `None`.
	///
	/// # Algorithm
	///
	/// 1. Descend recursively to the node equal to `item`
	/// 2. With at most one child, splice the node out; with two, move the
	///    in-order predecessor (rightmost node of the left subtree) into it
	/// 3. While unwinding, rebalance every node whose subtree got shorter;
	///    unlike insertion this can rotate at every level up to the root
	///
	/// # Panics
	///
	/// Panics if a rebalancing table meets a configuration the AVL invariant
	/// rules out, which can only mean the tree was already corrupt.
	pub fn remove(&mut self, item: &E) -> Option<E> {
		if !self.contains(item) {
			return None;
		}

		let root = self.root.take();
		match Self::remove_node(&self.cmp, root, item) {
			Ok(Removed {
				node,
				removed,
				..
			}) => {
				self.root = node;
				if removed.is_some() {
					self.len -= 1;
				}
				removed
			}
			Err(err) => fatal(err),
		}
	}

	fn remove_node(cmp: &C, link: Link<E>, item: &E) -> error::Result<Removed<E>> {
		let mut node = match link {
			Some(node) => node,
			None => {
				return Ok(Removed {
					node: None,
					shorter: false,
					removed: None,
				})
			}
		};

		match cmp.compare(item, &node.data) {
			Ordering::Less => {
				let out = Self::remove_node(cmp, node.left.take(), item)?;
				node.left = out.node;
				let (node, shorter) = if out.shorter {
					delete_right_balance(node)?
				} else {
					(node, false)
				};
				Ok(Removed {
					node: Some(node),
					shorter,
					removed: out.removed,
				})
			}
			Ordering::Greater => {
				let out = Self::remove_node(cmp, node.right.take(), item)?;
				node.right = out.node;
				let (node, shorter) = if out.shorter {
					delete_left_balance(node)?
				} else {
					(node, false)
				};
				Ok(Removed {
					node: Some(node),
					shorter,
					removed: out.removed,
				})
			}
			Ordering::Equal => match (node.left.take(), node.right.take()) {
				(None, only) | (only, None) => Ok(Removed {
					node: only,
					shorter: true,
					removed: Some(node.data),
				}),
				(Some(left), Some(right)) => {
					node.right = Some(right);
					let (left, predecessor, shorter) = remove_rightmost(left)?;
					node.left = left;
					let removed = mem::replace(&mut node.data, predecessor);
					let (node, shorter) = if shorter {
						delete_right_balance(node)?
					} else {
						(node, false)
					};
					Ok(Removed {
						node: Some(node),
						shorter,
						removed: Some(removed),
					})
				}
			},
		}
	}

	// -----------------------------------------------------------------------
	// Validation
	// -----------------------------------------------------------------------

	/// Verifies every tree invariant.
	///
	/// # Invariants Checked
	///
	/// 1. Ordering: every element lies strictly between the bounds set by
	///    its ancestors
	/// 2. Balance: sibling subtree heights differ by at most one
	/// 3. Balance factors: each stored factor matches the real heights
	/// 4. Length: `len()` equals the number of reachable nodes
	///
	/// # Errors
	///
	/// [`Error::InvariantViolation`] describing the first violation found.
	pub fn check_invariants(&self) -> error::Result<()> {
		let (_, count) = self.check_subtree(self.root.as_deref(), None, None)?;
		if count != self.len {
			return Err(Error::InvariantViolation(format!(
				"len is {} but {} nodes are reachable",
				self.len, count
			)));
		}
		Ok(())
	}

	/// Validates all tree invariants. Panics with diagnostic info if any
	/// invariant is violated.
	pub fn assert_invariants(&self) {
		if let Err(err) = self.check_invariants() {
			panic!("{err}");
		}
	}

	/// Returns the real height and node count of a subtree, checking every
	/// node against the exclusive bounds `lower` and `upper`.
	fn check_subtree(
		&self,
		node: Option<&Node<E>>,
		lower: Option<&E>,
		upper: Option<&E>,
	) -> error::Result<(isize, usize)> {
		let node = match node {
			Some(node) => node,
			None => return Ok((-1, 0)),
		};

		if let Some(lower) = lower {
			if self.cmp.compare(&node.data, lower) != Ordering::Greater {
				return Err(Error::InvariantViolation(
					"element is not greater than an ancestor it lies right of".to_string(),
				));
			}
		}
		if let Some(upper) = upper {
			if self.cmp.compare(&node.data, upper) != Ordering::Less {
				return Err(Error::InvariantViolation(
					"element is not less than an ancestor it lies left of".to_string(),
				));
			}
		}

		let (left_height, left_count) =
			self.check_subtree(node.left.as_deref(), lower, Some(&node.data))?;
		let (right_height, right_count) =
			self.check_subtree(node.right.as_deref(), Some(&node.data), upper)?;

		let expected = match left_height - right_height {
			1 => Balance::LeftHigh,
			0 => Balance::Balanced,
			-1 => Balance::RightHigh,
			diff => {
				return Err(Error::InvariantViolation(format!(
					"sibling subtree heights differ by {diff}"
				)))
			}
		};
		if node.balance != expected {
			return Err(Error::InvariantViolation(format!(
				"node stores {:?} but its subtrees are {:?}",
				node.balance, expected
			)));
		}

		Ok((1 + left_height.max(right_height), 1 + left_count + right_count))
	}
}

// ---------------------------------------------------------------------------
// Rotation Primitives
// ---------------------------------------------------------------------------
//
// Rotations only relink ownership. Every caller sets the balance factors of
// the nodes involved from its case table before rotating.

fn violation(what: &str) -> Error {
	Error::InvariantViolation(what.to_string())
}

/// Borrows the node behind `link`, failing if the subtree is empty.
fn child_mut<'n, E>(link: &'n mut Link<E>, what: &str) -> error::Result<&'n mut Node<E>> {
	link.as_deref_mut().ok_or_else(|| violation(what))
}

/// The right child of `node` becomes the subtree root; its former left
/// subtree becomes `node`'s right subtree.
fn rotate_left<E>(mut node: Box<Node<E>>) -> error::Result<Box<Node<E>>> {
	let mut pivot = node.right.take().ok_or_else(|| violation("rotate_left without a right child"))?;
	node.right = pivot.left.take();
	pivot.left = Some(node);
	Ok(pivot)
}

/// The left child of `node` becomes the subtree root; its former right
/// subtree becomes `node`'s left subtree.
fn rotate_right<E>(mut node: Box<Node<E>>) -> error::Result<Box<Node<E>>> {
	let mut pivot = node.left.take().ok_or_else(|| violation("rotate_right without a left child"))?;
	node.left = pivot.right.take();
	pivot.right = Some(node);
	Ok(pivot)
}

/// Double rotation for a left-heavy `node` whose left child leans right.
///
/// The left child's right child ends up on top. Final factors are keyed on
/// that grandchild's factor before rotating:
///
/// | grandchild  | node        | left child  |
/// |-------------|-------------|-------------|
/// | `LeftHigh`  | `RightHigh` | `Balanced`  |
/// | `Balanced`  | `Balanced`  | `Balanced`  |
/// | `RightHigh` | `Balanced`  | `LeftHigh`  |
fn rotate_left_right<E>(mut node: Box<Node<E>>) -> error::Result<Box<Node<E>>> {
	let left = child_mut(&mut node.left, "double rotation without a left child")?;
	let pivot = child_mut(&mut left.right, "double rotation without a left-right grandchild")?;
	let (node_balance, left_balance) = match pivot.balance {
		Balance::LeftHigh => (Balance::RightHigh, Balance::Balanced),
		Balance::Balanced => (Balance::Balanced, Balance::Balanced),
		Balance::RightHigh => (Balance::Balanced, Balance::LeftHigh),
	};
	pivot.balance = Balance::Balanced;
	left.balance = left_balance;
	node.balance = node_balance;

	node.left = node.left.take().map(rotate_left).transpose()?;
	rotate_right(node)
}

/// Double rotation for a right-heavy `node` whose right child leans left.
/// Mirror image of [`rotate_left_right`].
fn rotate_right_left<E>(mut node: Box<Node<E>>) -> error::Result<Box<Node<E>>> {
	let right = child_mut(&mut node.right, "double rotation without a right child")?;
	let pivot = child_mut(&mut right.left, "double rotation without a right-left grandchild")?;
	let (node_balance, right_balance) = match pivot.balance {
		Balance::RightHigh => (Balance::LeftHigh, Balance::Balanced),
		Balance::Balanced => (Balance::Balanced, Balance::Balanced),
		Balance::LeftHigh => (Balance::Balanced, Balance::RightHigh),
	};
	pivot.balance = Balance::Balanced;
	right.balance = right_balance;
	node.balance = node_balance;

	node.right = node.right.take().map(rotate_right).transpose()?;
	rotate_left(node)
}

// ---------------------------------------------------------------------------
// Insertion Rebalancing
// ---------------------------------------------------------------------------

/// Restores balance after the left subtree of a left-high `node` grew.
/// The returned subtree has the height `node` had before the insertion.
fn left_balance<E>(mut node: Box<Node<E>>) -> error::Result<Box<Node<E>>> {
	let left = child_mut(&mut node.left, "left subtree grew but is empty")?;
	match left.balance {
		Balance::LeftHigh => {
			trace!("insert: single right rotation");
			left.balance = Balance::Balanced;
			node.balance = Balance::Balanced;
			rotate_right(node)
		}
		Balance::Balanced => Err(violation("left_balance found a balanced left child after insertion")),
		Balance::RightHigh => {
			trace!("insert: left-right double rotation");
			rotate_left_right(node)
		}
	}
}

/// Restores balance after the right subtree of a right-high `node` grew.
/// Mirror image of [`left_balance`].
fn right_balance<E>(mut node: Box<Node<E>>) -> error::Result<Box<Node<E>>> {
	let right = child_mut(&mut node.right, "right subtree grew but is empty")?;
	match right.balance {
		Balance::RightHigh => {
			trace!("insert: single left rotation");
			right.balance = Balance::Balanced;
			node.balance = Balance::Balanced;
			rotate_left(node)
		}
		Balance::Balanced => Err(violation("right_balance found a balanced right child after insertion")),
		Balance::LeftHigh => {
			trace!("insert: right-left double rotation");
			rotate_right_left(node)
		}
	}
}

// ---------------------------------------------------------------------------
// Deletion Rebalancing
// ---------------------------------------------------------------------------
//
// Both functions return the new subtree root and whether the subtree is now
// one level shorter than before the deletion.

/// Rebalances `node` after its left subtree got shorter, leaving the right
/// side relatively heavier.
fn delete_right_balance<E>(mut node: Box<Node<E>>) -> error::Result<(Box<Node<E>>, bool)> {
	match node.balance {
		Balance::LeftHigh => {
			node.balance = Balance::Balanced;
			Ok((node, true))
		}
		Balance::Balanced => {
			node.balance = Balance::RightHigh;
			Ok((node, false))
		}
		Balance::RightHigh => {
			let right = child_mut(&mut node.right, "right-high node without a right child")?;
			match right.balance {
				Balance::LeftHigh => {
					trace!("delete: right-left double rotation");
					Ok((rotate_right_left(node)?, true))
				}
				Balance::RightHigh => {
					trace!("delete: single left rotation, height shrinks");
					right.balance = Balance::Balanced;
					node.balance = Balance::Balanced;
					Ok((rotate_left(node)?, true))
				}
				Balance::Balanced => {
					trace!("delete: single left rotation, height kept");
					right.balance = Balance::LeftHigh;
					node.balance = Balance::RightHigh;
					Ok((rotate_left(node)?, false))
				}
			}
		}
	}
}

/// Rebalances `node` after its right subtree got shorter, leaving the left
/// side relatively heavier. Mirror image of [`delete_right_balance`].
fn delete_left_balance<E>(mut node: Box<Node<E>>) -> error::Result<(Box<Node<E>>, bool)> {
	match node.balance {
		Balance::RightHigh => {
			node.balance = Balance::Balanced;
			Ok((node, true))
		}
		Balance::Balanced => {
			node.balance = Balance::LeftHigh;
			Ok((node, false))
		}
		Balance::LeftHigh => {
			let left = child_mut(&mut node.left, "left-high node without a left child")?;
			match left.balance {
				Balance::RightHigh => {
					trace!("delete: left-right double rotation");
					Ok((rotate_left_right(node)?, true))
				}
				Balance::LeftHigh => {
					trace!("delete: single right rotation, height shrinks");
					left.balance = Balance::Balanced;
					node.balance = Balance::Balanced;
					Ok((rotate_right(node)?, true))
				}
				Balance::Balanced => {
					trace!("delete: single right rotation, height kept");
					left.balance = Balance::RightHigh;
					node.balance = Balance::LeftHigh;
					Ok((rotate_right(node)?, false))
				}
			}
		}
	}
}

/// Detaches the rightmost node of the subtree rooted at `node`.
///
/// Returns the remaining subtree, the detached element, and whether the
/// subtree got shorter.
fn remove_rightmost<E>(mut node: Box<Node<E>>) -> error::Result<(Link<E>, E, bool)> {
	match node.right.take() {
		None => {
			let Node {
				data,
				left,
				..
			} = *node;
			Ok((left, data, true))
		}
		Some(right) => {
			let (right, data, shorter) = remove_rightmost(right)?;
			node.right = right;
			let (node, shorter) = if shorter {
				delete_left_balance(node)?
			} else {
				(node, false)
			};
			Ok((Some(node), data, shorter))
		}
	}
}

// ---------------------------------------------------------------------------
// Shape Helpers
// ---------------------------------------------------------------------------

/// Height of a subtree, -1 when empty. Follows the taller child at every
/// level, which the balance factors identify without a full walk.
fn subtree_height<E>(node: Option<&Node<E>>) -> isize {
	let mut height = -1;
	let mut current = node;
	while let Some(node) = current {
		height += 1;
		current = match node.balance {
			Balance::RightHigh => node.right.as_deref(),
			Balance::LeftHigh | Balance::Balanced => node.left.as_deref(),
		};
	}
	height
}

/// The `n`th Fibonacci number, with `fib(0) = 0` and `fib(1) = 1`.
fn fibonacci(n: usize) -> usize {
	let (mut current, mut next) = (0usize, 1usize);
	for _ in 0..n {
		let sum = current.saturating_add(next);
		current = next;
		next = sum;
	}
	current
}

/// Reports an invariant violation met while mutating the tree and aborts
/// the operation.
#[cold]
fn fatal(err: Error) -> ! {
	tracing::error!(%err, "AVL rebalancing reached an impossible configuration");
	panic!("{err}");
}

// ---------------------------------------------------------------------------
// Trait Implementations
// ---------------------------------------------------------------------------

impl<E: fmt::Debug, C> fmt::Debug for Tree<E, C> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

impl<'t, E, C> IntoIterator for &'t Tree<E, C> {
	type Item = &'t E;
	type IntoIter = Iter<'t, E>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<E, C: Comparator<E>> Extend<E> for Tree<E, C> {
	fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
		for item in iter {
			self.insert(item);
		}
	}
}

impl<E: Ord> FromIterator<E> for Tree<E> {
	fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
		let mut tree = Tree::new();
		tree.extend(iter);
		tree
	}
}
