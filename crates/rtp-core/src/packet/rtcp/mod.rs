//! RTCP (RFC 3550 §6) packet bodies: sender/receiver reports, report blocks,
//! source description BYE, and application-defined packets.

pub mod app;
pub mod bye;
pub mod ntp;
pub mod receiver_report;
pub mod report_block;
pub mod sender_report;

pub use app::{parse_app, RtcpApplicationDefined};
pub use bye::{parse_bye, RtcpGoodbye};
pub use ntp::NtpTimestamp;
pub use receiver_report::{parse_receiver_report, serialize_receiver_report, RtcpReceiverReport};
pub use report_block::RtcpReportBlock;
pub use sender_report::{parse_sender_report, serialize_sender_report, RtcpSenderReport};
