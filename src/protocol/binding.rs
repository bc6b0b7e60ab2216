//! Binding tree handed in by the datastore layer
//!
//! The tree is a snapshot: `Source → PrefixGroup → Binding`, each level kept in
//! insertion order so that encoded updates are reproducible.

use std::fmt;

use ipnetwork::IpNetwork;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Security Group Tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sgt(pub u16);

impl Sgt {
    /// Get raw tag value
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl From<u16> for Sgt {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for Sgt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pending datastore operation on a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    /// Announce the binding
    Add,
    /// Withdraw the binding
    Delete,
}

/// One IP prefix to SGT binding
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binding {
    prefix: IpNetwork,
    action: Option<Action>,
    changed: Option<bool>,
}

impl Binding {
    /// Create a binding with no pending action and an unset changed flag
    #[must_use]
    pub const fn new(prefix: IpNetwork) -> Self {
        Self {
            prefix,
            action: None,
            changed: None,
        }
    }

    /// Shorthand for a changed binding that should be announced
    #[must_use]
    pub const fn add(prefix: IpNetwork) -> Self {
        Self::new(prefix).with_action(Action::Add).with_changed(true)
    }

    /// Shorthand for a changed binding that should be withdrawn
    #[must_use]
    pub const fn delete(prefix: IpNetwork) -> Self {
        Self::new(prefix).with_action(Action::Delete).with_changed(true)
    }

    /// Set the pending action
    #[must_use]
    pub const fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the changed flag
    #[must_use]
    pub const fn with_changed(mut self, changed: bool) -> Self {
        self.changed = Some(changed);
        self
    }

    /// Get the bound prefix
    #[must_use]
    pub const fn prefix(&self) -> IpNetwork {
        self.prefix
    }

    /// Get the pending action, if any
    #[must_use]
    pub const fn action(&self) -> Option<Action> {
        self.action
    }

    /// Get the changed flag; `None` when the datastore never set it
    #[must_use]
    pub const fn changed(&self) -> Option<bool> {
        self.changed
    }
}

/// Bindings sharing one SGT
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrefixGroup {
    sgt: Sgt,
    bindings: Vec<Binding>,
}

impl PrefixGroup {
    /// Create an empty group tagged with `sgt`
    #[must_use]
    pub const fn new(sgt: u16) -> Self {
        Self {
            sgt: Sgt(sgt),
            bindings: Vec::new(),
        }
    }

    /// Append a binding
    #[must_use]
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Append a binding in place
    pub fn push(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    /// Get the group's tag
    #[must_use]
    pub const fn sgt(&self) -> Sgt {
        self.sgt
    }

    /// Get bindings in insertion order
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}

/// Bindings learned from one origin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Source {
    prefix_groups: Vec<PrefixGroup>,
}

impl Source {
    /// Create an empty source
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prefix_groups: Vec::new(),
        }
    }

    /// Append a prefix group
    #[must_use]
    pub fn with_group(mut self, group: PrefixGroup) -> Self {
        self.prefix_groups.push(group);
        self
    }

    /// Append a prefix group in place
    pub fn push(&mut self, group: PrefixGroup) {
        self.prefix_groups.push(group);
    }

    /// Get prefix groups in insertion order
    #[must_use]
    pub fn prefix_groups(&self) -> &[PrefixGroup] {
        &self.prefix_groups
    }
}

/// Snapshot of the master binding database
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BindingTree {
    sources: Vec<Source>,
}

impl BindingTree {
    /// Create an empty tree
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Append a source
    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Append a source in place
    pub fn push(&mut self, source: Source) {
        self.sources.push(source);
    }

    /// Get sources in insertion order
    #[must_use]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Iterate over every binding together with its group's tag
    pub fn iter(&self) -> impl Iterator<Item = (Sgt, &Binding)> {
        self.sources
            .iter()
            .flat_map(|source| source.prefix_groups.iter())
            .flat_map(|group| group.bindings.iter().map(move |binding| (group.sgt, binding)))
    }
}
