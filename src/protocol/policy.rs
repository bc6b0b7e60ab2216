//! Version compatibility policy and binding filters
//!
//! Deciding whether a binding ends up in an Update is split into three
//! predicates, always applied in this order:
//!
//! 1. [`changed_filter`] - incremental updates only carry changed bindings
//! 2. [`action_filter`] - bindings without a pending action are never sent
//! 3. [`VersionPolicy::admits`] - the peer's version must be able to express the prefix

use ipnetwork::IpNetwork;

use super::{Action, Binding, Error, Result, Version};

/// Check if `version` uses the legacy wire format
#[must_use]
pub const fn is_legacy(version: Version) -> bool {
    version.is_legacy()
}

/// How a version treats prefixes of one address family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyRule {
    /// Family cannot be expressed at all
    Rejected,
    /// Only full-length host prefixes
    HostOnly,
    /// Any prefix length
    AnyLength,
}

impl FamilyRule {
    const fn admits(self, prefix_len: u8, host_len: u8) -> bool {
        match self {
            Self::Rejected => false,
            Self::HostOnly => prefix_len == host_len,
            Self::AnyLength => true,
        }
    }
}

/// Per-version admissibility table for mapping records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionPolicy {
    version: Version,
    ipv4: FamilyRule,
    ipv6: FamilyRule,
}

impl VersionPolicy {
    /// Look up the policy for `version`
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedTarget`] for versions without legacy rules.
    pub const fn for_version(version: Version) -> Result<Self> {
        let (ipv4, ipv6) = match version {
            Version::V1 => (FamilyRule::HostOnly, FamilyRule::Rejected),
            Version::V2 => (FamilyRule::HostOnly, FamilyRule::HostOnly),
            Version::V3 => (FamilyRule::AnyLength, FamilyRule::AnyLength),
            Version::V4 => return Err(Error::UnsupportedTarget { version }),
        };

        Ok(Self {
            version,
            ipv4,
            ipv6,
        })
    }

    /// Get the version this policy applies to
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Get the IPv4 rule
    #[must_use]
    pub const fn ipv4(&self) -> FamilyRule {
        self.ipv4
    }

    /// Get the IPv6 rule
    #[must_use]
    pub const fn ipv6(&self) -> FamilyRule {
        self.ipv6
    }

    /// Check if `prefix` can be carried by this version
    #[must_use]
    pub fn admits(&self, prefix: IpNetwork) -> bool {
        match prefix {
            IpNetwork::V4(net) => self.ipv4.admits(net.prefix(), 32),
            IpNetwork::V6(net) => self.ipv6.admits(net.prefix(), 128),
        }
    }
}

/// Check if `binding` passes the changed-only filter
///
/// Outside changed-only mode every binding passes. In changed-only mode only
/// bindings explicitly flagged as changed pass; an unset flag counts as
/// unchanged.
#[must_use]
pub const fn changed_filter(binding: &Binding, changed_only: bool) -> bool {
    !changed_only || matches!(binding.changed(), Some(true))
}

/// Get the action to encode for `binding`, if any
#[must_use]
pub const fn action_filter(binding: &Binding) -> Option<Action> {
    binding.action()
}
