//! Mapping record codec
//!
//! ```text
//! Mapping-Record = [Opcode (4 octets), Length (4 octets),
//!                   IPv4/IPv6 address (4/16 octets), [List of TLVs]]
//! ```
//!
//! The opcode fixes both the action and the address family. Length counts
//! everything after the length field.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bytes::{Buf, BufMut, Bytes};
use ipnetwork::IpNetwork;

use super::{
    Action, Attribute, AttributeType, Binding, Error, RECORD_HEADER_SIZE, Result, Sgt,
    VersionPolicy,
};

const IPV4_ADDRESS_LEN: usize = 4;
const IPV6_ADDRESS_LEN: usize = 16;

/// Mapping record opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Opcode {
    /// Add an IPv4 binding
    AddIpv4 = 1,
    /// Delete an IPv4 binding
    DeleteIpv4 = 2,
    /// Add an IPv6 binding
    AddIpv6 = 3,
    /// Delete an IPv6 binding
    DeleteIpv6 = 4,
}

impl Opcode {
    /// Convert from wire code
    #[must_use]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::AddIpv4),
            2 => Some(Self::DeleteIpv4),
            3 => Some(Self::AddIpv6),
            4 => Some(Self::DeleteIpv6),
            _ => None,
        }
    }

    /// Convert to wire code
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Pick the opcode for an action on an address
    #[must_use]
    pub const fn for_binding(action: Action, address: IpAddr) -> Self {
        match (action, address) {
            (Action::Add, IpAddr::V4(_)) => Self::AddIpv4,
            (Action::Delete, IpAddr::V4(_)) => Self::DeleteIpv4,
            (Action::Add, IpAddr::V6(_)) => Self::AddIpv6,
            (Action::Delete, IpAddr::V6(_)) => Self::DeleteIpv6,
        }
    }

    /// Get the action carried by this opcode
    #[must_use]
    pub const fn action(self) -> Action {
        match self {
            Self::AddIpv4 | Self::AddIpv6 => Action::Add,
            Self::DeleteIpv4 | Self::DeleteIpv6 => Action::Delete,
        }
    }

    /// Check if this opcode carries an IPv6 address
    #[must_use]
    pub const fn is_ipv6(self) -> bool {
        matches!(self, Self::AddIpv6 | Self::DeleteIpv6)
    }

    /// Get the address width for this opcode's family
    #[must_use]
    pub const fn address_len(self) -> usize {
        if self.is_ipv6() {
            IPV6_ADDRESS_LEN
        } else {
            IPV4_ADDRESS_LEN
        }
    }

    /// Get the host prefix length for this opcode's family
    #[must_use]
    pub const fn host_prefix_len(self) -> u8 {
        if self.is_ipv6() { 128 } else { 32 }
    }
}

/// One add or delete operation on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRecord {
    opcode: Opcode,
    address: IpAddr,
    attributes: Vec<Attribute>,
}

impl MappingRecord {
    /// Build the record announcing `prefix` with `sgt`
    #[must_use]
    pub fn add(sgt: Sgt, prefix: IpNetwork) -> Self {
        Self::build(Action::Add, Some(sgt), prefix)
    }

    /// Build the record withdrawing `prefix`
    #[must_use]
    pub fn delete(prefix: IpNetwork) -> Self {
        Self::build(Action::Delete, None, prefix)
    }

    fn build(action: Action, sgt: Option<Sgt>, prefix: IpNetwork) -> Self {
        let opcode = Opcode::for_binding(action, prefix.ip());

        let mut attributes = Vec::with_capacity(2);
        if let Some(sgt) = sgt {
            attributes.push(Attribute::Sgt(sgt));
        }
        if prefix.prefix() != opcode.host_prefix_len() {
            attributes.push(Attribute::PrefixLength(prefix.prefix()));
        }

        Self {
            opcode,
            address: prefix.ip(),
            attributes,
        }
    }

    /// Build the record for `binding` if it may be sent to a peer under `policy`
    ///
    /// Returns `None` when the binding has no pending action or when its prefix
    /// cannot be expressed in the policy's version. Neither case is an error.
    #[must_use]
    pub fn from_binding(sgt: Sgt, binding: &Binding, policy: &VersionPolicy) -> Option<Self> {
        let action = super::action_filter(binding)?;
        let prefix = binding.prefix();
        if !policy.admits(prefix) {
            return None;
        }

        let record = match action {
            Action::Add => Self::add(sgt, prefix),
            Action::Delete => Self::delete(prefix),
        };
        Some(record)
    }

    /// Get opcode
    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Get action
    #[must_use]
    pub const fn action(&self) -> Action {
        self.opcode.action()
    }

    /// Get address
    #[must_use]
    pub const fn address(&self) -> IpAddr {
        self.address
    }

    /// Get attributes in wire order
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Get the SGT attribute, if present
    #[must_use]
    pub fn sgt(&self) -> Option<Sgt> {
        self.attributes.iter().find_map(|attribute| match attribute {
            Attribute::Sgt(sgt) => Some(*sgt),
            _ => None,
        })
    }

    /// Get the prefix length; host length when no Prefix-Length attribute is present
    #[must_use]
    pub fn prefix_len(&self) -> u8 {
        self.attributes
            .iter()
            .find_map(|attribute| match attribute {
                Attribute::PrefixLength(len) => Some(*len),
                _ => None,
            })
            .unwrap_or(self.opcode.host_prefix_len())
    }

    /// Get the prefix described by the address and prefix length
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPrefix`] if the prefix length exceeds the family width.
    pub fn prefix(&self) -> Result<IpNetwork> {
        let prefix_len = self.prefix_len();
        IpNetwork::new(self.address, prefix_len).map_err(|_| Error::UnknownPrefix {
            address: self.address,
            prefix_len,
        })
    }

    /// Get the length field value (address + attributes)
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.opcode.address_len()
            + self
                .attributes
                .iter()
                .map(Attribute::encoded_len)
                .sum::<usize>()
    }

    /// Get encoded length (header + body)
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        RECORD_HEADER_SIZE + self.body_len()
    }

    /// Write the record to `buf`
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32(self.opcode.as_u32());
        // A record holds at most an address and a handful of short TLVs.
        buf.put_u32(self.body_len() as u32);
        match self.address {
            IpAddr::V4(addr) => buf.put_slice(&addr.octets()),
            IpAddr::V6(addr) => buf.put_slice(&addr.octets()),
        }
        for attribute in &self.attributes {
            attribute.encode(buf);
        }
    }

    /// Decode one record from the front of `buf`, advancing past it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record header or body runs past the end of `buf`
    /// - The opcode is unknown
    /// - The body is too short for the opcode's address family
    /// - An attribute is malformed
    /// - The prefix length does not fit the address family
    /// - An add record carries no SGT
    pub fn decode(buf: &mut Bytes) -> Result<Self> {
        if buf.remaining() < RECORD_HEADER_SIZE {
            return Err(Error::RecordTruncated {
                needed: RECORD_HEADER_SIZE,
                got: buf.remaining(),
            });
        }

        let raw_opcode = buf.get_u32();
        let body_len = buf.get_u32() as usize;

        let opcode =
            Opcode::from_u32(raw_opcode).ok_or(Error::UnknownOpcode { opcode: raw_opcode })?;

        if buf.remaining() < body_len {
            return Err(Error::RecordTruncated {
                needed: body_len,
                got: buf.remaining(),
            });
        }

        let address_len = opcode.address_len();
        if body_len < address_len {
            return Err(Error::AddressLength {
                expected: address_len,
                found: body_len,
            });
        }

        let mut body = buf.split_to(body_len);
        let address = read_address(&mut body, opcode);

        let mut attributes = Vec::new();
        while body.has_remaining() {
            attributes.push(Attribute::decode(&mut body)?);
        }

        let record = Self {
            opcode,
            address,
            attributes,
        };

        record.prefix()?;
        if record.action() == Action::Add && record.sgt().is_none() {
            return Err(Error::MissingAttribute {
                type_code: AttributeType::Sgt.as_u32(),
            });
        }

        Ok(record)
    }
}

fn read_address(body: &mut Bytes, opcode: Opcode) -> IpAddr {
    if opcode.is_ipv6() {
        IpAddr::V6(Ipv6Addr::from(body.get_u128()))
    } else {
        IpAddr::V4(Ipv4Addr::from(body.get_u32()))
    }
}
