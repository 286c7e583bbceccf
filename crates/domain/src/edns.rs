//! EDNS0 Client Subnet (RFC 7871) detection and injection on raw wire-format
//! messages.
//!
//! Both directions work directly on the byte buffer rather than a decoded
//! message tree: the relay forwards whatever the client sent and only needs
//! to know whether an ECS option is present, or to append one.

use crate::dns_message::{DnsMessage, DNS_HEADER_LEN};
use crate::errors::DomainError;
use crate::ip_address::{AddressFamily, ParsedIpAddress};
use bytes::{BufMut, BytesMut};

pub const EDNS_RR_TYPE_OPT: u16 = 41;
pub const EDNS_OPTION_CODE_ECS: u16 = 8;
/// UDP payload size advertised in the OPT records we append.
pub const EDNS_UDP_PAYLOAD_SIZE: u16 = 4096;

/// NAME(1) + TYPE(2) + CLASS(2) + TTL(4) + RDLENGTH(2)
const OPT_RR_FIXED_LEN: usize = 11;

/// An ECS option ready to be serialized as an EDNS0 TLV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcsOption {
    family: AddressFamily,
    source_prefix_len: u8,
    scope_prefix_len: u8,
    address: Vec<u8>,
}

impl EcsOption {
    /// Builds the option for a client address, keeping only the first
    /// `ceil(source_prefix_len / 8)` address bytes.
    ///
    /// The prefix is capped at the family's width. Bits past the prefix in
    /// the last kept byte are zeroed (RFC 7871 §6).
    pub fn for_client(ip: &ParsedIpAddress, source_prefix_len: u8) -> Self {
        let family = ip.family();
        let prefix = source_prefix_len.min(family.max_prefix_len());
        let kept = (prefix as usize).div_ceil(8);

        let mut address = ip.address_bytes()[..kept].to_vec();
        let partial_bits = prefix % 8;
        if partial_bits != 0 {
            if let Some(last) = address.last_mut() {
                *last &= 0xFFu8 << (8 - partial_bits);
            }
        }

        Self {
            family,
            source_prefix_len: prefix,
            scope_prefix_len: 0,
            address,
        }
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn source_prefix_len(&self) -> u8 {
        self.source_prefix_len
    }

    pub fn scope_prefix_len(&self) -> u8 {
        self.scope_prefix_len
    }

    pub fn address(&self) -> &[u8] {
        &self.address
    }

    /// OPTION-LENGTH: FAMILY(2) + SOURCE PREFIX(1) + SCOPE PREFIX(1) + address.
    pub fn option_len(&self) -> u16 {
        (4 + self.address.len()) as u16
    }

    /// The full TLV: OPTION-CODE, OPTION-LENGTH, then the option data.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.option_len() as usize);
        buf.extend_from_slice(&EDNS_OPTION_CODE_ECS.to_be_bytes());
        buf.extend_from_slice(&self.option_len().to_be_bytes());
        buf.extend_from_slice(&self.family.code().to_be_bytes());
        buf.push(self.source_prefix_len);
        buf.push(self.scope_prefix_len);
        buf.extend_from_slice(&self.address);
        buf
    }
}

/// Reports whether the message already carries an ECS option that narrows
/// the client down: code 8, length ≥ 4, a known family and a non-zero source
/// prefix. A `/0` option is a request to *not* use ECS and does not count.
///
/// Any declared count or length that runs past the buffer yields `false`.
pub fn contains_meaningful_ecs(buf: &[u8]) -> bool {
    scan_for_meaningful_ecs(buf).unwrap_or(false)
}

fn scan_for_meaningful_ecs(buf: &[u8]) -> Option<bool> {
    if buf.len() < DNS_HEADER_LEN {
        return None;
    }

    let qdcount = read_u16(buf, 4)?;
    let ancount = read_u16(buf, 6)?;
    let nscount = read_u16(buf, 8)?;
    let arcount = read_u16(buf, 10)?;

    if arcount == 0 {
        return Some(false);
    }

    let mut pos = DNS_HEADER_LEN;

    for _ in 0..qdcount {
        pos = skip_name(buf, pos)?;
        pos += 4; // QTYPE + QCLASS
        if pos > buf.len() {
            return None;
        }
    }

    for _ in 0..(u32::from(ancount) + u32::from(nscount)) {
        pos = skip_name(buf, pos)?;
        pos += 8; // TYPE + CLASS + TTL
        let rdlen = read_u16(buf, pos)? as usize;
        pos += 2 + rdlen;
        if pos > buf.len() {
            return None;
        }
    }

    for _ in 0..arcount {
        pos = skip_name(buf, pos)?;
        if pos + 10 > buf.len() {
            return None;
        }
        let rr_type = read_u16(buf, pos)?;
        let rdlen = read_u16(buf, pos + 8)? as usize;
        let rdata_start = pos + 10;
        let rdata_end = rdata_start + rdlen;
        if rdata_end > buf.len() {
            return None;
        }

        // At most one OPT record is allowed; it alone decides.
        if rr_type == EDNS_RR_TYPE_OPT {
            return Some(opt_rdata_has_meaningful_ecs(&buf[rdata_start..rdata_end]));
        }

        pos = rdata_end;
    }

    Some(false)
}

fn opt_rdata_has_meaningful_ecs(rdata: &[u8]) -> bool {
    let mut pos = 0usize;

    while pos + 4 <= rdata.len() {
        let code = u16::from_be_bytes([rdata[pos], rdata[pos + 1]]);
        let len = u16::from_be_bytes([rdata[pos + 2], rdata[pos + 3]]) as usize;
        let value_start = pos + 4;
        let value_end = value_start + len;
        if value_end > rdata.len() {
            return false;
        }

        if code == EDNS_OPTION_CODE_ECS && len >= 4 {
            let family = u16::from_be_bytes([rdata[value_start], rdata[value_start + 1]]);
            let source_prefix = rdata[value_start + 2];
            if source_prefix > 0 && AddressFamily::from_code(family).is_some() {
                return true;
            }
        }

        pos = value_end;
    }

    false
}

/// Returns the offset just past the owner name starting at `pos`.
///
/// A compression pointer ends the name after its two bytes; the target is
/// never followed, so pointer loops cannot occur.
fn skip_name(buf: &[u8], mut pos: usize) -> Option<usize> {
    loop {
        let label_len = *buf.get(pos)? as usize;
        if label_len == 0 {
            return Some(pos + 1);
        }
        match label_len & 0xC0 {
            0xC0 => {
                if pos + 2 > buf.len() {
                    return None;
                }
                return Some(pos + 2);
            }
            0x00 => {
                pos += 1 + label_len;
            }
            // 0x40 / 0x80 label types are obsolete or reserved.
            _ => return None,
        }
    }
}

fn read_u16(buf: &[u8], pos: usize) -> Option<u16> {
    let bytes = buf.get(pos..pos + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

/// Appends a fresh OPT record carrying `ecs` and bumps ARCOUNT.
///
/// The caller is expected to have checked [`contains_meaningful_ecs`] first;
/// the input message is left untouched.
pub fn append_ecs_option(message: &DnsMessage, ecs: &EcsOption) -> Result<DnsMessage, DomainError> {
    let arcount = message.ar_count();
    let new_arcount = arcount.checked_add(1).ok_or_else(|| {
        DomainError::InvalidDnsMessage("ARCOUNT is already at its maximum".into())
    })?;

    let option = ecs.to_bytes();
    let mut buf = BytesMut::with_capacity(message.len() + OPT_RR_FIXED_LEN + option.len());
    buf.extend_from_slice(message.as_bytes());
    buf[10..12].copy_from_slice(&new_arcount.to_be_bytes());

    buf.put_u8(0); // root owner name
    buf.put_u16(EDNS_RR_TYPE_OPT);
    buf.put_u16(EDNS_UDP_PAYLOAD_SIZE);
    buf.put_u32(0); // extended RCODE, version, flags
    buf.put_u16(option.len() as u16);
    buf.extend_from_slice(&option);

    DnsMessage::from_bytes(buf.freeze())
}
