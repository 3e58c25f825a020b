use crate::catalog::Algorithm;
use crate::trace::{Action, Highlight, Recorder, Trace, TraceConfig, Traced};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt::Display;

/// A tree node. Each node owns its two subtrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode<T> {
    pub value: T,
    pub left: Option<Box<TreeNode<T>>>,
    pub right: Option<Box<TreeNode<T>>>,
}

impl<T> TreeNode<T> {
    fn leaf(value: T) -> Self {
        TreeNode {
            value,
            left: None,
            right: None,
        }
    }
}

/// Deep copy of the whole tree, as held by a step.
pub type TreeSnapshot<T> = Option<Box<TreeNode<T>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    Inorder,
    Preorder,
    Postorder,
    LevelOrder,
}

/// Unbalanced binary search tree. Values equal to a node go to its right subtree.
#[derive(Debug, Clone)]
pub struct BinarySearchTree<T> {
    root: TreeSnapshot<T>,
    size: usize,
    config: TraceConfig,
    last_trace: Trace<TreeSnapshot<T>>,
}

impl<T: Clone + Display + PartialOrd> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Display + PartialOrd> BinarySearchTree<T> {
    pub fn new() -> Self {
        Self::with_config(TraceConfig::default())
    }

    pub fn with_config(config: TraceConfig) -> Self {
        BinarySearchTree {
            root: None,
            size: 0,
            config,
            last_trace: Trace::default(),
        }
    }

    pub fn insert(&mut self, value: T) {
        let mut rec = Recorder::new(self.config, Algorithm::BinarySearchTree);
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let goes_left = value < node.value;
            rec.record(
                Action::Compare,
                format!(
                    "{} {} {}, go {}",
                    value,
                    if goes_left { "<" } else { ">=" },
                    node.value,
                    if goes_left { "left" } else { "right" }
                ),
                Some(Highlight::Value(node.value.to_string())),
                || self.root.clone(),
            );
            current = if goes_left {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }

        let description = format!("Attach {} as a new leaf", value);
        let highlight = Highlight::Value(value.to_string());
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if value < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(TreeNode::leaf(value)));
        self.size += 1;

        rec.record(Action::Insert, description, Some(highlight), || {
            self.root.clone()
        });
        self.last_trace = rec.finish();
    }

    /// Walks from the root comparing against `value`.
    fn locate(&self, value: &T, rec: &mut Recorder<TreeSnapshot<T>>) -> Option<&TreeNode<T>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let ordering = value.partial_cmp(&node.value)?;
            rec.record(
                Action::Compare,
                match ordering {
                    Ordering::Equal => format!("{} equals {}", value, node.value),
                    Ordering::Less => format!("{} < {}, go left", value, node.value),
                    Ordering::Greater => format!("{} > {}, go right", value, node.value),
                },
                Some(Highlight::Value(node.value.to_string())),
                || self.root.clone(),
            );
            current = match ordering {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    pub fn search(&self, value: &T) -> bool {
        let mut rec = Recorder::disabled(Algorithm::BinarySearchTree);
        self.locate(value, &mut rec).is_some()
    }

    pub fn search_traced(&self, value: &T) -> Traced<bool, TreeSnapshot<T>> {
        let mut rec = Recorder::new(self.config, Algorithm::BinarySearchTree);
        let found = self.locate(value, &mut rec).is_some();
        if found {
            rec.record(
                Action::Found,
                format!("Found {}", value),
                Some(Highlight::Value(value.to_string())),
                || self.root.clone(),
            );
        } else {
            rec.record(
                Action::NotFound,
                format!("Reached an empty subtree, {} is not in the tree", value),
                None,
                || self.root.clone(),
            );
        }
        Traced {
            result: found,
            trace: rec.finish(),
        }
    }

    /// Removes one node holding `value`. A node with two children takes the value of its
    /// in-order successor, which is then removed from the right subtree.
    pub fn remove(&mut self, value: &T) -> bool {
        let mut rec = Recorder::new(self.config, Algorithm::BinarySearchTree);
        let plan = self.locate(value, &mut rec).map(|node| match (&node.left, &node.right) {
            (Some(_), Some(right)) => {
                let successor = &Self::leftmost(right).value;
                (
                    Action::Update,
                    format!("{} has two children, replace it with successor {}", value, successor),
                )
            }
            (None, None) => (Action::Remove, format!("{} is a leaf, splice it out", value)),
            _ => (
                Action::Remove,
                format!("{} has one child, promote the child", value),
            ),
        });

        let removed = match plan {
            Some((action, description)) => {
                rec.record(
                    action,
                    description,
                    Some(Highlight::Value(value.to_string())),
                    || self.root.clone(),
                );
                let removed = Self::remove_node(&mut self.root, value);
                if removed {
                    self.size -= 1;
                }
                rec.record(Action::Remove, format!("Removed {}", value), None, || {
                    self.root.clone()
                });
                removed
            }
            None => {
                rec.record(
                    Action::NotFound,
                    format!("{} is not in the tree", value),
                    None,
                    || self.root.clone(),
                );
                false
            }
        };
        self.last_trace = rec.finish();
        removed
    }

    fn remove_node(slot: &mut TreeSnapshot<T>, value: &T) -> bool {
        let Some(node) = slot.as_mut() else {
            return false;
        };
        match value.partial_cmp(&node.value) {
            Some(Ordering::Less) => Self::remove_node(&mut node.left, value),
            Some(Ordering::Greater) => Self::remove_node(&mut node.right, value),
            None => false,
            Some(Ordering::Equal) => {
                match (node.left.take(), node.right.take()) {
                    (None, None) => *slot = None,
                    (Some(child), None) | (None, Some(child)) => *slot = Some(child),
                    (Some(left), Some(right)) => {
                        let successor = Self::leftmost(&right).value.clone();
                        node.left = Some(left);
                        node.right = Some(right);
                        node.value = successor.clone();
                        Self::remove_node(&mut node.right, &successor);
                    }
                }
                true
            }
        }
    }

    fn leftmost(node: &TreeNode<T>) -> &TreeNode<T> {
        let mut current = node;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        current
    }

    fn rightmost(node: &TreeNode<T>) -> &TreeNode<T> {
        let mut current = node;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        current
    }

    pub fn min(&self) -> Option<&T> {
        self.root.as_deref().map(|n| &Self::leftmost(n).value)
    }

    pub fn max(&self) -> Option<&T> {
        self.root.as_deref().map(|n| &Self::rightmost(n).value)
    }

    /// Number of edges on the longest root-to-leaf path; -1 for an empty tree.
    pub fn height(&self) -> i64 {
        fn height_of<T>(node: Option<&TreeNode<T>>) -> i64 {
            match node {
                None => -1,
                Some(n) => 1 + height_of(n.left.as_deref()).max(height_of(n.right.as_deref())),
            }
        }
        height_of(self.root.as_deref())
    }

    pub fn inorder(&self) -> Vec<T> {
        self.traverse(TraversalOrder::Inorder)
    }

    pub fn preorder(&self) -> Vec<T> {
        self.traverse(TraversalOrder::Preorder)
    }

    pub fn postorder(&self) -> Vec<T> {
        self.traverse(TraversalOrder::Postorder)
    }

    /// Values grouped by depth, root level first.
    pub fn level_order(&self) -> Vec<Vec<T>> {
        let mut levels = Vec::new();
        let mut queue: VecDeque<&TreeNode<T>> = self.root.as_deref().into_iter().collect();
        while !queue.is_empty() {
            let mut level = Vec::with_capacity(queue.len());
            for _ in 0..queue.len() {
                let Some(node) = queue.pop_front() else {
                    break;
                };
                level.push(node.value.clone());
                queue.extend(node.left.as_deref());
                queue.extend(node.right.as_deref());
            }
            levels.push(level);
        }
        levels
    }

    pub fn traverse(&self, order: TraversalOrder) -> Vec<T> {
        let mut rec = Recorder::disabled(Algorithm::TreeTraversal);
        self.walk(order, &mut rec)
    }

    /// Traversal whose steps hold the values visited so far.
    pub fn traverse_traced(&self, order: TraversalOrder) -> Traced<Vec<T>, Vec<T>> {
        let mut rec = Recorder::new(self.config, Algorithm::TreeTraversal);
        let result = self.walk(order, &mut rec);
        debug!("{:?} traversal visited {} nodes", order, result.len());
        Traced {
            result,
            trace: rec.finish(),
        }
    }

    fn walk(&self, order: TraversalOrder, rec: &mut Recorder<Vec<T>>) -> Vec<T> {
        fn visit<T: Clone + Display>(value: &T, out: &mut Vec<T>, rec: &mut Recorder<Vec<T>>) {
            out.push(value.clone());
            rec.record(
                Action::Visit,
                format!("Visit {}", value),
                Some(Highlight::Value(value.to_string())),
                || out.clone(),
            );
        }

        fn depth_first<T: Clone + Display>(
            node: Option<&TreeNode<T>>,
            order: TraversalOrder,
            out: &mut Vec<T>,
            rec: &mut Recorder<Vec<T>>,
        ) {
            let Some(node) = node else {
                return;
            };
            if order == TraversalOrder::Preorder {
                visit(&node.value, out, rec);
            }
            depth_first(node.left.as_deref(), order, out, rec);
            if order == TraversalOrder::Inorder {
                visit(&node.value, out, rec);
            }
            depth_first(node.right.as_deref(), order, out, rec);
            if order == TraversalOrder::Postorder {
                visit(&node.value, out, rec);
            }
        }

        let mut out = Vec::with_capacity(self.size);
        match order {
            TraversalOrder::LevelOrder => {
                let mut queue: VecDeque<&TreeNode<T>> =
                    self.root.as_deref().into_iter().collect();
                while let Some(node) = queue.pop_front() {
                    visit(&node.value, &mut out, rec);
                    queue.extend(node.left.as_deref());
                    queue.extend(node.right.as_deref());
                }
            }
            _ => depth_first(self.root.as_deref(), order, &mut out, rec),
        }
        out
    }

    /// Breadth-first scan of every node, ignoring the ordering.
    pub fn contains_bfs(&self, value: &T) -> bool {
        let mut queue: VecDeque<&TreeNode<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            if node.value == *value {
                return true;
            }
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
        false
    }

    /// Depth-first scan of every node with an explicit stack.
    pub fn contains_dfs(&self, value: &T) -> bool {
        let mut stack: Vec<&TreeNode<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            if node.value == *value {
                return true;
            }
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        false
    }

    pub fn root(&self) -> Option<&TreeNode<T>> {
        self.root.as_deref()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
        self.last_trace = Trace::default();
    }

    pub fn last_trace(&self) -> &Trace<TreeSnapshot<T>> {
        &self.last_trace
    }

    pub fn take_trace(&mut self) -> Trace<TreeSnapshot<T>> {
        std::mem::take(&mut self.last_trace)
    }
}
