//! Packet loss and reordering tracking keyed on RTP sequence number.

use crate::RtpSequenceNumber;

/// Classification of one received sequence number against the tracker's
/// running expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketLossResult {
    FirstPacket { seq: RtpSequenceNumber },
    Sequential { seq: RtpSequenceNumber },
    Gap { seq: RtpSequenceNumber, expected: RtpSequenceNumber, lost: u32 },
    Duplicate { seq: RtpSequenceNumber },
    Reordered { seq: RtpSequenceNumber, expected: RtpSequenceNumber },
    Unknown,
}

#[derive(Debug, Clone, Default)]
pub struct PacketLossStats {
    pub received: u64,
    pub lost: u64,
    pub fraction_lost: u8,
}

/// Sequence-number based loss/duplicate/reorder tracker, RFC 3550 §A.3 style.
pub struct PacketLossTracker {
    highest_seq: Option<RtpSequenceNumber>,
    received: u64,
    lost: u64,
    received_since_report: u64,
    expected_since_report: u64,
}

const MAX_DROPOUT: i32 = 3000;
const MAX_MISORDER: i32 = 100;

impl PacketLossTracker {
    pub fn new() -> Self {
        Self {
            highest_seq: None,
            received: 0,
            lost: 0,
            received_since_report: 0,
            expected_since_report: 0,
        }
    }

    pub fn process(&mut self, seq: RtpSequenceNumber) -> PacketLossResult {
        self.received += 1;
        self.received_since_report += 1;

        let Some(highest) = self.highest_seq else {
            self.highest_seq = Some(seq);
            self.expected_since_report += 1;
            return PacketLossResult::FirstPacket { seq };
        };

        let delta = seq.wrapping_sub(highest) as i16 as i32;

        if delta == 0 {
            return PacketLossResult::Duplicate { seq };
        }

        if delta > 0 && delta < MAX_DROPOUT {
            self.highest_seq = Some(seq);
            self.expected_since_report += delta as u64;
            if delta == 1 {
                PacketLossResult::Sequential { seq }
            } else {
                let lost = (delta - 1) as u32;
                self.lost += lost as u64;
                PacketLossResult::Gap {
                    seq,
                    expected: highest.wrapping_add(1),
                    lost,
                }
            }
        } else if -delta < MAX_MISORDER {
            PacketLossResult::Reordered {
                seq,
                expected: highest,
            }
        } else {
            PacketLossResult::Unknown
        }
    }

    pub fn get_stats(&self) -> PacketLossStats {
        let fraction_lost = if self.expected_since_report == 0 {
            0
        } else {
            let lost_since_report = self
                .expected_since_report
                .saturating_sub(self.received_since_report);
            ((lost_since_report * 256) / self.expected_since_report).min(255) as u8
        };
        PacketLossStats {
            received: self.received,
            lost: self.lost,
            fraction_lost,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PacketLossTracker {
    fn default() -> Self {
        Self::new()
    }
}
