use crate::errors::DomainError;
use bytes::Bytes;

pub const DNS_HEADER_LEN: usize = 12;
/// Largest message a DoH request may carry (RFC 8484 §6).
pub const MAX_DNS_MESSAGE_LEN: usize = 65_535;

/// A DNS message in wire format.
///
/// The buffer is never modified; transformations such as ECS injection return
/// a new message. Only the header length is validated at construction, the
/// section counts are read lazily and treated as untrusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsMessage {
    bytes: Bytes,
}

impl DnsMessage {
    /// Wraps a wire-format buffer.
    ///
    /// Empty buffers, buffers shorter than the 12-byte header and buffers
    /// over 65535 bytes fail with `InvalidDnsMessage`, which the HTTP layer
    /// answers with 400 instead of forwarding the message upstream.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Result<Self, DomainError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(DomainError::InvalidDnsMessage("message is empty".into()));
        }
        if bytes.len() < DNS_HEADER_LEN {
            return Err(DomainError::InvalidDnsMessage(format!(
                "message is {} bytes, shorter than the {}-byte header",
                bytes.len(),
                DNS_HEADER_LEN
            )));
        }
        if bytes.len() > MAX_DNS_MESSAGE_LEN {
            return Err(DomainError::InvalidDnsMessage(format!(
                "message is {} bytes, larger than {}",
                bytes.len(),
                MAX_DNS_MESSAGE_LEN
            )));
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Cheap clone of the underlying buffer.
    pub fn bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn id(&self) -> u16 {
        self.header_u16(0)
    }

    pub fn qd_count(&self) -> u16 {
        self.header_u16(4)
    }

    pub fn an_count(&self) -> u16 {
        self.header_u16(6)
    }

    pub fn ns_count(&self) -> u16 {
        self.header_u16(8)
    }

    pub fn ar_count(&self) -> u16 {
        self.header_u16(10)
    }

    fn header_u16(&self, offset: usize) -> u16 {
        u16::from_be_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }
}

impl AsRef<[u8]> for DnsMessage {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
