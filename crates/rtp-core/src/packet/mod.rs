//! RTP packet (RFC 3550 §5.1) header and payload representation.

pub mod rtcp;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::Error;
use crate::{Result, RtpSequenceNumber, RtpSsrc, RtpTimestamp};

const RTP_VERSION: u8 = 2;
const FIXED_HEADER_LEN: usize = 12;

/// Fixed RTP header fields, RFC 3550 §5.1. CSRC list support is omitted —
/// this core never mixes streams, so `csrc_count` is always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpHeader {
    pub version: u8,
    pub padding: bool,
    pub marker: bool,
    pub payload_type: u8,
    pub sequence_number: RtpSequenceNumber,
    pub timestamp: RtpTimestamp,
    pub ssrc: RtpSsrc,
}

impl RtpHeader {
    /// `marker` is taken as a 0/1 byte to match the historical C-style call
    /// sites that construct a header before filling in sequence/timestamp.
    pub fn new(payload_type: u8, marker: u8, sequence_number: RtpSequenceNumber, ssrc: RtpSsrc) -> Self {
        Self {
            version: RTP_VERSION,
            padding: false,
            marker: marker != 0,
            payload_type,
            sequence_number,
            timestamp: 0,
            ssrc,
        }
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        let first_byte = (self.version << 6) | ((self.padding as u8) << 5);
        buf.put_u8(first_byte);
        buf.put_u8(((self.marker as u8) << 7) | (self.payload_type & 0x7f));
        buf.put_u16(self.sequence_number);
        buf.put_u32(self.timestamp);
        buf.put_u32(self.ssrc);
    }

    pub fn decode(buf: &mut impl Buf) -> Result<Self> {
        if buf.remaining() < FIXED_HEADER_LEN {
            return Err(Error::PacketError("RTP header truncated".to_string()));
        }
        let first_byte = buf.get_u8();
        let version = first_byte >> 6;
        let padding = (first_byte & 0x20) != 0;
        let cc = first_byte & 0x0f;

        let second_byte = buf.get_u8();
        let marker = (second_byte & 0x80) != 0;
        let payload_type = second_byte & 0x7f;

        let sequence_number = buf.get_u16();
        let timestamp = buf.get_u32();
        let ssrc = buf.get_u32();

        // Skip any CSRC list entries rather than reject them.
        for _ in 0..cc {
            if buf.remaining() < 4 {
                break;
            }
            buf.get_u32();
        }

        if version != RTP_VERSION {
            return Err(Error::PacketError(format!("unsupported RTP version {}", version)));
        }

        Ok(Self {
            version,
            padding,
            marker,
            payload_type,
            sequence_number,
            timestamp,
            ssrc,
        })
    }
}

/// An RTP packet: fixed header plus an encoded media payload.
#[derive(Debug, Clone)]
pub struct RtpPacket {
    pub header: RtpHeader,
    pub payload: Bytes,
}

impl RtpPacket {
    pub fn new(header: RtpHeader, payload: Bytes) -> Self {
        Self { header, payload }
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(FIXED_HEADER_LEN + self.payload.len());
        self.header.encode(&mut buf);
        buf.extend_from_slice(&self.payload);
        buf.freeze()
    }

    pub fn decode(mut data: Bytes) -> Result<Self> {
        let header = RtpHeader::decode(&mut data)?;
        Ok(Self { header, payload: data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_round_trips_through_wire_format() {
        let header = RtpHeader::new(8, 1, 1000, 0x1234_5678);
        let packet = RtpPacket::new(header.clone(), Bytes::from_static(b"payload"));
        let encoded = packet.encode();
        let decoded = RtpPacket::decode(encoded).unwrap();
        assert_eq!(decoded.header.payload_type, 8);
        assert!(decoded.header.marker);
        assert_eq!(decoded.header.sequence_number, 1000);
        assert_eq!(decoded.header.ssrc, 0x1234_5678);
        assert_eq!(&decoded.payload[..], b"payload");
    }

    #[test]
    fn rejects_truncated_header() {
        let bytes = Bytes::from_static(&[0x80, 0x00]);
        assert!(RtpPacket::decode(bytes).is_err());
    }
}
