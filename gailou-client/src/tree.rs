use std::{collections::HashSet, fmt, sync::Arc};

use crate::api::{Comment, CommentId};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Toggle {
    /// The replies are shown
    Collapse,

    /// The replies are hidden, `replies` is the number of direct replies
    Expand { replies: usize },
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toggle::Collapse => write!(f, "Collapse replies"),
            Toggle::Expand { replies: 1 } => write!(f, "Expand 1 reply"),
            Toggle::Expand { replies } => write!(f, "Expand {replies} replies"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentRow<'a> {
    pub comment: &'a Comment,

    /// Nesting level, top-level comments are at depth 0
    pub depth: usize,

    /// Only set for comments that have replies
    pub toggle: Option<Toggle>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Row<'a> {
    /// Placeholder for an article without any comment
    NoComments,
    Comment(CommentRow<'a>),
}

/// A comment forest along with the expanded/collapsed state of its nodes.
///
/// Every comment starts expanded. State is keyed by comment id and is dropped
/// as a whole when the forest gets replaced.
#[derive(Clone, Debug, Default)]
pub struct CommentTree {
    forest: Arc<Vec<Comment>>,
    collapsed: HashSet<CommentId>,
}

impl CommentTree {
    pub fn new(forest: Arc<Vec<Comment>>) -> CommentTree {
        CommentTree {
            forest,
            collapsed: HashSet::new(),
        }
    }

    pub fn forest(&self) -> &Arc<Vec<Comment>> {
        &self.forest
    }

    pub fn replace(&mut self, forest: Arc<Vec<Comment>>) {
        self.forest = forest;
        self.collapsed.clear();
    }

    pub fn is_expanded(&self, id: &CommentId) -> bool {
        !self.collapsed.contains(id)
    }

    /// Flip the state of a single comment, returns whether it is now expanded
    pub fn toggle(&mut self, id: &CommentId) -> bool {
        if self.collapsed.remove(id) {
            true
        } else {
            self.collapsed.insert(id.clone());
            false
        }
    }

    /// List the rows to display, in display order.
    ///
    /// Replies of collapsed comments are not visited at all. The walk uses its
    /// own stack, so arbitrarily deep reply chains are fine.
    pub fn render(&self) -> Vec<Row<'_>> {
        if self.forest.is_empty() {
            return vec![Row::NoComments];
        }
        let mut rows = Vec::with_capacity(self.forest.len());
        let mut stack = self
            .forest
            .iter()
            .rev()
            .map(|c| (c, 0))
            .collect::<Vec<(&Comment, usize)>>();
        while let Some((comment, depth)) = stack.pop() {
            let expanded = self.is_expanded(&comment.id);
            let toggle = match (comment.children.len(), expanded) {
                (0, _) => None,
                (_, true) => Some(Toggle::Collapse),
                (replies, false) => Some(Toggle::Expand { replies }),
            };
            if toggle == Some(Toggle::Collapse) {
                stack.extend(comment.children.iter().rev().map(|c| (c, depth + 1)));
            }
            rows.push(Row::Comment(CommentRow {
                comment,
                depth,
                toggle,
            }));
        }
        rows
    }
}
