use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::str;

use crate::error::Error;
use crate::{Result, RtpSsrc};

/// RTCP Application-Defined (APP) packet
/// Defined in RFC 3550 Section 6.7
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtcpApplicationDefined {
    /// SSRC/CSRC identifier
    pub ssrc: RtpSsrc,
    
    /// Name (4 ASCII characters)
    pub name: [u8; 4],
    
    /// Application-dependent data
    pub data: Bytes,
}

impl RtcpApplicationDefined {
    /// Create a new APP packet
    pub fn new(ssrc: RtpSsrc, name: [u8; 4]) -> Self {
        Self {
            ssrc,
            name,
            data: Bytes::new(),
        }
    }
    
    /// Create a new APP packet with a string name (must be exactly 4 characters)
    pub fn new_with_name(ssrc: RtpSsrc, name_str: &str) -> Result<Self> {
        if name_str.len() != 4 {
            return Err(Error::InvalidParameter(
                format!("APP name must be exactly 4 characters, got {}", name_str.len())
            ));
        }
        
        let mut name = [0; 4];
        name.copy_from_slice(name_str.as_bytes());
        
        Ok(Self::new(ssrc, name))
    }
    
    /// Create a new APP packet with data
    pub fn new_with_data(ssrc: RtpSsrc, name: [u8; 4], data: Bytes) -> Self {
        Self { ssrc, name, data }
    }
    
    /// Get the name as a string (if valid ASCII)
    pub fn name_str(&self) -> String {
        String::from_utf8_lossy(&self.name).to_string()
    }
    
    /// Set the application data
    pub fn set_data(&mut self, data: Bytes) {
        self.data = data;
    }
    
    /// Calculate the total size in bytes
    pub fn size(&self) -> usize {
        let mut size = 8; // SSRC (4) + name (4)
        
        // Add data with padding to 4-byte boundary
        if !self.data.is_empty() {
            size += self.data.len();
            // Add padding to align to 4-byte boundary
            let padding = (4 - (self.data.len() % 4)) % 4;
            size += padding;
        }
        
        size
    }
    
    /// Serialize the APP packet to bytes
    pub fn serialize(&self) -> Result<BytesMut> {
        let mut buf = BytesMut::with_capacity(self.size());
        
        // SSRC
        buf.put_u32(self.ssrc);
        
        // Name (4 bytes)
        buf.put_slice(&self.name);
        
        // Application-dependent data
        if !self.data.is_empty() {
            buf.put_slice(&self.data);
            
            // Add padding to align to 4-byte boundary
            let padding_bytes = (4 - (self.data.len() % 4)) % 4;
            for _ in 0..padding_bytes {
                buf.put_u8(0);
            }
        }
        
        Ok(buf)
    }
}

/// Parse APP packet from bytes
pub fn parse_app(buf: &mut impl Buf) -> Result<RtcpApplicationDefined> {
    // Check if we have enough data for SSRC and name (8 bytes)
    if buf.remaining() < 8 {
        return Err(Error::BufferTooSmall {
            required: 8,
            available: buf.remaining(),
        });
    }
    
    // Extract SSRC
    let ssrc = buf.get_u32();
    
    // Extract name
    let mut name = [0u8; 4];
    buf.copy_to_slice(&mut name);
    
    // Extract application-dependent data
    let data = if buf.has_remaining() {
        let data_bytes = buf.copy_to_bytes(buf.remaining());
        data_bytes
    } else {
        Bytes::new()
    };
    
    Ok(RtcpApplicationDefined {
        ssrc,
        name,
        data,
    })
}
