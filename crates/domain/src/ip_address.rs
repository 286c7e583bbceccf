use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Address family numbers as registered with IANA (and used by the ECS option).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    pub const fn code(self) -> u16 {
        match self {
            AddressFamily::Ipv4 => 1,
            AddressFamily::Ipv6 => 2,
        }
    }

    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(AddressFamily::Ipv4),
            2 => Some(AddressFamily::Ipv6),
            _ => None,
        }
    }

    /// Width of an address of this family, in bits.
    pub const fn max_prefix_len(self) -> u8 {
        match self {
            AddressFamily::Ipv4 => 32,
            AddressFamily::Ipv6 => 128,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Ipv4 => write!(f, "IPv4"),
            AddressFamily::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// A client address reduced to its family and raw network-order bytes.
///
/// Only [`parse_ip_address`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIpAddress {
    family: AddressFamily,
    bytes: [u8; 16],
}

impl ParsedIpAddress {
    pub fn family(&self) -> AddressFamily {
        self.family
    }

    /// 4 bytes for IPv4, 16 for IPv6.
    pub fn address_bytes(&self) -> &[u8] {
        match self.family {
            AddressFamily::Ipv4 => &self.bytes[..4],
            AddressFamily::Ipv6 => &self.bytes,
        }
    }

    pub fn to_ip_addr(&self) -> IpAddr {
        match self.family {
            AddressFamily::Ipv4 => {
                IpAddr::V4(Ipv4Addr::new(self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]))
            }
            AddressFamily::Ipv6 => IpAddr::V6(Ipv6Addr::from(self.bytes)),
        }
    }
}

impl fmt::Display for ParsedIpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ip_addr())
    }
}

/// Parses a single, already trimmed IP literal.
///
/// Anything containing a `.` is read as dotted-quad IPv4, anything containing
/// a `:` as IPv6 with at most one `::`. Returns `None` on any malformed input.
pub fn parse_ip_address(input: &str) -> Option<ParsedIpAddress> {
    if input.is_empty() {
        return None;
    }
    if input.contains('.') {
        parse_ipv4(input)
    } else if input.contains(':') {
        parse_ipv6(input)
    } else {
        None
    }
}

fn parse_ipv4(input: &str) -> Option<ParsedIpAddress> {
    let mut bytes = [0u8; 16];
    let mut count = 0usize;

    for part in input.split('.') {
        if count == 4 {
            return None;
        }
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        bytes[count] = part.parse::<u8>().ok()?;
        count += 1;
    }

    if count != 4 {
        return None;
    }

    Some(ParsedIpAddress {
        family: AddressFamily::Ipv4,
        bytes,
    })
}

fn parse_ipv6(input: &str) -> Option<ParsedIpAddress> {
    let mut halves = input.split("::");
    let left = halves.next().unwrap_or_default();
    let right = halves.next();
    if halves.next().is_some() {
        return None;
    }

    let left_groups: Vec<&str> = left.split(':').filter(|p| !p.is_empty()).collect();
    let right_groups: Vec<&str> = right
        .map(|r| r.split(':').filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    let total = left_groups.len() + right_groups.len();
    if total > 8 {
        return None;
    }
    if right.is_none() && total != 8 {
        return None;
    }

    let zero_fill = 8 - total;
    let groups = left_groups
        .iter()
        .copied()
        .chain(std::iter::repeat("0").take(zero_fill))
        .chain(right_groups.iter().copied());

    let mut bytes = [0u8; 16];
    for (i, group) in groups.enumerate() {
        if group.len() > 4 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u16::from_str_radix(group, 16).ok()?;
        bytes[i * 2..i * 2 + 2].copy_from_slice(&value.to_be_bytes());
    }

    Some(ParsedIpAddress {
        family: AddressFamily::Ipv6,
        bytes,
    })
}
