//! Dialogue engine.
//!
//! An NPC's conversation is a tree of nodes keyed by id, always entered at the
//! `greeting` node. A [`Conversation`] tracks the node currently shown and moves
//! along a choice when the player picks one by number.

use std::collections::BTreeMap;

use runewild_data::{GREETING_NODE, Id, NpcDef};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueTree {
    pub nodes: BTreeMap<Id, DialogueNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueNode {
    pub text: String,
    pub trigger_quest: Option<Id>,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub text: String,
    pub goes_to: Id,
}

impl DialogueNode {
    /// A node without choices ends the conversation once shown.
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty()
    }
}

impl DialogueTree {
    /// Build the runtime tree for an NPC. A bare `greeting_message` becomes a
    /// single terminal `greeting` node; a full tree takes precedence when both exist.
    pub fn from_npc_def(def: &NpcDef) -> Self {
        let mut nodes: BTreeMap<Id, DialogueNode> = def
            .dialogue
            .iter()
            .map(|(id, node)| {
                (
                    id.clone(),
                    DialogueNode {
                        text: node.text.clone(),
                        trigger_quest: node.trigger_quest.clone(),
                        choices: node
                            .choices
                            .iter()
                            .map(|c| Choice {
                                text: c.text.clone(),
                                goes_to: c.goes_to.clone(),
                            })
                            .collect(),
                    },
                )
            })
            .collect();
        if let Some(message) = &def.greeting_message {
            nodes.entry(GREETING_NODE.to_string()).or_insert_with(|| DialogueNode {
                text: message.clone(),
                ..DialogueNode::default()
            });
        }
        Self { nodes }
    }

    pub fn node(&self, id: &str) -> Option<&DialogueNode> {
        self.nodes.get(id)
    }
}

/// Reasons a conversation could not proceed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DialogueError {
    #[error("dialogue node '{0}' does not exist")]
    MissingNode(Id),
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("choice {choice} is out of range (1-{max})")]
    OutOfRange { choice: usize, max: usize },
}

/// Position within a [`DialogueTree`].
#[derive(Debug, Clone)]
pub struct Conversation<'a> {
    tree: &'a DialogueTree,
    current: Id,
}

impl<'a> Conversation<'a> {
    /// Begin at the greeting node.
    ///
    /// # Errors
    /// - if the tree has no greeting node
    pub fn start(tree: &'a DialogueTree) -> Result<Self, DialogueError> {
        if tree.node(GREETING_NODE).is_none() {
            return Err(DialogueError::MissingNode(GREETING_NODE.to_string()));
        }
        Ok(Self {
            tree,
            current: GREETING_NODE.to_string(),
        })
    }

    pub fn current_id(&self) -> &str {
        &self.current
    }

    /// The node being shown.
    ///
    /// # Errors
    /// - if the current node id is not in the tree
    pub fn node(&self) -> Result<&'a DialogueNode, DialogueError> {
        self.tree
            .node(&self.current)
            .ok_or_else(|| DialogueError::MissingNode(self.current.clone()))
    }

    /// Follow the 1-indexed choice typed by the player. On any error the
    /// conversation stays on the same node.
    ///
    /// # Errors
    /// - input is not an integer, is out of range, or leads to an unknown node
    pub fn choose(&mut self, input: &str) -> Result<&'a DialogueNode, DialogueError> {
        let node = self.node()?;
        let trimmed = input.trim();
        let choice: usize = trimmed
            .parse()
            .map_err(|_| DialogueError::NotANumber(trimmed.to_string()))?;
        let max = node.choices.len();
        if choice == 0 || choice > max {
            return Err(DialogueError::OutOfRange { choice, max });
        }
        let target = &node.choices[choice - 1].goes_to;
        let next = self
            .tree
            .node(target)
            .ok_or_else(|| DialogueError::MissingNode(target.clone()))?;
        self.current.clone_from(target);
        Ok(next)
    }
}
