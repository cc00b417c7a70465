//! Iterators for the `Tree` data structure
//!
//! All iterators borrow the tree and walk it with an explicit stack or
//! queue, so traversal depth never grows the call stack.
use crate::Node;
use std::collections::VecDeque;

/// In-order iterator over the elements of the tree.
///
/// Yields elements in comparator order.
pub struct Iter<'t, E> {
	/// Nodes whose left subtree has been pushed but which are not yet
	/// yielded. The top is the next element.
	stack: Vec<&'t Node<E>>,
}

impl<'t, E> Iter<'t, E> {
	pub(crate) fn new(root: Option<&'t Node<E>>) -> Iter<'t, E> {
		let mut iter = Iter {
			stack: Vec::new(),
		};
		iter.push_left_spine(root);
		iter
	}

	#[inline]
	fn push_left_spine(&mut self, mut node: Option<&'t Node<E>>) {
		while let Some(n) = node {
			self.stack.push(n);
			node = n.left.as_deref();
		}
	}
}

impl<'t, E> Iterator for Iter<'t, E> {
	type Item = &'t E;

	fn next(&mut self) -> Option<&'t E> {
		let node = self.stack.pop()?;
		self.push_left_spine(node.right.as_deref());
		Some(&node.data)
	}
}

/// Pre-order iterator: each node before its left, then right, subtree.
pub struct Preorder<'t, E> {
	stack: Vec<&'t Node<E>>,
}

impl<'t, E> Preorder<'t, E> {
	pub(crate) fn new(root: Option<&'t Node<E>>) -> Preorder<'t, E> {
		Preorder {
			stack: root.into_iter().collect(),
		}
	}
}

impl<'t, E> Iterator for Preorder<'t, E> {
	type Item = &'t E;

	fn next(&mut self) -> Option<&'t E> {
		let node = self.stack.pop()?;
		// Right first so the left subtree is popped first
		self.stack.extend(node.right.as_deref());
		self.stack.extend(node.left.as_deref());
		Some(&node.data)
	}
}

/// Post-order iterator: each node after its left, then right, subtree.
pub struct Postorder<'t, E> {
	/// Pending nodes, flagged `true` once their children have been pushed.
	stack: Vec<(&'t Node<E>, bool)>,
}

impl<'t, E> Postorder<'t, E> {
	pub(crate) fn new(root: Option<&'t Node<E>>) -> Postorder<'t, E> {
		Postorder {
			stack: root.map(|node| (node, false)).into_iter().collect(),
		}
	}
}

impl<'t, E> Iterator for Postorder<'t, E> {
	type Item = &'t E;

	fn next(&mut self) -> Option<&'t E> {
		loop {
			let (node, expanded) = self.stack.pop()?;
			if expanded {
				return Some(&node.data);
			}
			self.stack.push((node, true));
			if let Some(right) = node.right.as_deref() {
				self.stack.push((right, false));
			}
			if let Some(left) = node.left.as_deref() {
				self.stack.push((left, false));
			}
		}
	}
}

/// Breadth-first walk over nodes, paired with their level-order index.
///
/// The root has index 0 and the children of index `i` have indices
/// `2i + 1` and `2i + 2`, whether or not the other sibling exists.
pub(crate) struct LevelOrderNodes<'t, E> {
	queue: VecDeque<(&'t Node<E>, usize)>,
}

impl<'t, E> LevelOrderNodes<'t, E> {
	pub(crate) fn new(root: Option<&'t Node<E>>) -> LevelOrderNodes<'t, E> {
		LevelOrderNodes {
			queue: root.map(|node| (node, 0)).into_iter().collect(),
		}
	}
}

impl<'t, E> Iterator for LevelOrderNodes<'t, E> {
	type Item = (&'t Node<E>, usize);

	fn next(&mut self) -> Option<Self::Item> {
		let (node, index) = self.queue.pop_front()?;
		let first_child = index.saturating_mul(2).saturating_add(1);
		if let Some(left) = node.left.as_deref() {
			self.queue.push_back((left, first_child));
		}
		if let Some(right) = node.right.as_deref() {
			self.queue.push_back((right, first_child.saturating_add(1)));
		}
		Some((node, index))
	}
}

/// Level-order iterator: nodes level by level, left to right.
pub struct LevelOrder<'t, E> {
	inner: LevelOrderNodes<'t, E>,
}

impl<'t, E> LevelOrder<'t, E> {
	pub(crate) fn new(root: Option<&'t Node<E>>) -> LevelOrder<'t, E> {
		LevelOrder {
			inner: LevelOrderNodes::new(root),
		}
	}
}

impl<'t, E> Iterator for LevelOrder<'t, E> {
	type Item = &'t E;

	fn next(&mut self) -> Option<&'t E> {
		self.inner.next().map(|(node, _)| &node.data)
	}
}
