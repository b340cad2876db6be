use bytes::{Buf, BufMut, BytesMut};

use crate::error::Error;
use crate::{Result, RtpSsrc};

/// RTCP Goodbye (BYE) packet
/// Defined in RFC 3550 Section 6.6
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtcpGoodbye {
    /// SSRC/CSRC identifiers
    pub sources: Vec<RtpSsrc>,
    
    /// Reason for leaving (optional)
    pub reason: Option<String>,
}

impl RtcpGoodbye {
    /// Create a new BYE packet
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            reason: None,
        }
    }
    
    /// Create a new BYE packet for a single source
    pub fn new_for_source(ssrc: RtpSsrc) -> Self {
        let mut bye = Self::new();
        bye.add_source(ssrc);
        bye
    }
    
    /// Create a new BYE packet for a single source with a reason
    pub fn new_with_reason(ssrc: RtpSsrc, reason: String) -> Self {
        let mut bye = Self::new_for_source(ssrc);
        bye.reason = Some(reason);
        bye
    }
    
    /// Add a source to the BYE packet
    pub fn add_source(&mut self, ssrc: RtpSsrc) {
        self.sources.push(ssrc);
    }
    
    /// Set the reason for leaving
    pub fn set_reason(&mut self, reason: String) {
        self.reason = Some(reason);
    }
    
    /// Calculate the size of the BYE packet in bytes
    pub fn size(&self) -> usize {
        let mut size = self.sources.len() * 4; // Sources (4 bytes each)
        
        // Add reason text if present (length byte + text + padding to 4-byte boundary)
        if let Some(reason) = &self.reason {
            size += 1; // Length byte
            size += reason.len(); // Reason text
            // Padding to 4-byte boundary if needed
            let padding = (4 - ((1 + reason.len()) % 4)) % 4;
            size += padding;
        }
        
        size
    }
    
    /// Serialize the BYE packet to bytes
    pub fn serialize(&self) -> Result<BytesMut> {
        let mut buf = BytesMut::with_capacity(self.size());
        
        // Add SSRC/CSRC identifiers
        for ssrc in &self.sources {
            buf.put_u32(*ssrc);
        }
        
        // Add reason if present
        if let Some(reason) = &self.reason {
            // Length of the reason text (max 255 bytes)
            let reason_len = reason.len().min(255);
            buf.put_u8(reason_len as u8);
            
            // Add reason text
            buf.put_slice(&reason.as_bytes()[0..reason_len]);
            
            // Add padding to align to 4-byte boundary
            let padding_bytes = (4 - ((1 + reason_len) % 4)) % 4;
            for _ in 0..padding_bytes {
                buf.put_u8(0);
            }
        }
        
        Ok(buf)
    }
}

/// Parse BYE packet from bytes
pub fn parse_bye(buf: &mut impl Buf, source_count: u8) -> Result<RtcpGoodbye> {
    // Extract SSRC/CSRC identifiers
    let mut sources = Vec::with_capacity(source_count as usize);
    for _ in 0..source_count {
        if buf.remaining() < 4 {
            return Err(Error::BufferTooSmall {
                required: 4,
                available: buf.remaining(),
            });
        }
        sources.push(buf.get_u32());
    }
    
    // Extract reason if present
    let reason = if buf.has_remaining() {
        if buf.remaining() < 1 {
            return Err(Error::BufferTooSmall {
                required: 1,
                available: buf.remaining(),
            });
        }
        
        let reason_len = buf.get_u8() as usize;
        if buf.remaining() < reason_len {
            return Err(Error::BufferTooSmall {
                required: reason_len,
                available: buf.remaining(),
            });
        }
        
        let mut reason_bytes = vec![0u8; reason_len];
        buf.copy_to_slice(&mut reason_bytes);
        
        // Skip padding bytes
        let padding_bytes = (4 - ((1 + reason_len) % 4)) % 4;
        for _ in 0..padding_bytes {
            if buf.has_remaining() {
                buf.advance(1);
            }
        }
        
        Some(String::from_utf8_lossy(&reason_bytes).to_string())
    } else {
        None
    };
    
    Ok(RtcpGoodbye { sources, reason })
}
