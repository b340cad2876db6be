//! Manager / Call Director behaviors (spec.md §4.6): IP-to-IP routing
//! classification, the incoming-call waiting set, DTMF/busy/ring tone
//! generation onto the urgent ring buffer, voicemail NOTIFY parsing, and
//! the stateless OPTIONS responder.

use std::f32::consts::PI;

use tokio::sync::RwLock;

use crate::api::types::SessionId;
use crate::errors::Result;
use crate::manager::events::SessionEvent;
use rvoip_media_core::buffer::RingBuffer;

use super::SessionCoordinator;

/// How a dialed destination string is routed, per spec.md §4.6: a literal
/// `ip:<addr>` target bypasses the account layer entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// Routed through the stack's account-null SIP link.
    IpToIp(String),
    /// Attached to an account as usual.
    Account,
}

/// Classify a dialed string for routing, matching the `ip:<addr>` pattern
/// spec.md calls out. Case-sensitive on the `ip:` prefix, matching the
/// original daemon's literal prefix check.
pub fn classify_destination(destination: &str) -> RouteKind {
    match destination.strip_prefix("ip:") {
        Some(addr) if !addr.is_empty() => RouteKind::IpToIp(addr.to_string()),
        _ => RouteKind::Account,
    }
}

/// DTMF dual-tone frequency pairs (RFC 4733 / ITU-T Q.23), keyed by digit.
fn dtmf_frequencies(digit: char) -> Option<(f32, f32)> {
    Some(match digit {
        '1' => (697.0, 1209.0),
        '2' => (697.0, 1336.0),
        '3' => (697.0, 1477.0),
        'A' | 'a' => (697.0, 1633.0),
        '4' => (770.0, 1209.0),
        '5' => (770.0, 1336.0),
        '6' => (770.0, 1477.0),
        'B' | 'b' => (770.0, 1633.0),
        '7' => (852.0, 1209.0),
        '8' => (852.0, 1336.0),
        '9' => (852.0, 1477.0),
        'C' | 'c' => (852.0, 1633.0),
        '*' => (941.0, 1209.0),
        '0' => (941.0, 1336.0),
        '#' => (941.0, 1477.0),
        'D' | 'd' => (941.0, 1633.0),
        _ => return None,
    })
}

/// Synthesize a dual-tone sample buffer at `sample_rate_hz` for `duration_ms`.
fn dual_tone(freq_a: f32, freq_b: f32, sample_rate_hz: u32, duration_ms: u32) -> Vec<i16> {
    let n = (sample_rate_hz as u64 * duration_ms as u64 / 1000) as usize;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f32 / sample_rate_hz as f32;
        let s = 0.5 * (2.0 * PI * freq_a * t).sin() + 0.5 * (2.0 * PI * freq_b * t).sin();
        out.push((s * 0.3 * i16::MAX as f32) as i16);
    }
    out
}

/// Single-frequency tone, used for busy tone and the bundled ringtone
/// fallback when the user's configured ringtone file fails to decode.
fn single_tone(freq_hz: f32, sample_rate_hz: u32, duration_ms: u32) -> Vec<i16> {
    let n = (sample_rate_hz as u64 * duration_ms as u64 / 1000) as usize;
    (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate_hz as f32;
            ((2.0 * PI * freq_hz * t).sin() * 0.4 * i16::MAX as f32) as i16
        })
        .collect()
}

/// The ITU-T busy tone cadence used when the remote signals busy: 480/620 Hz.
pub fn busy_tone(sample_rate_hz: u32, duration_ms: u32) -> Vec<i16> {
    dual_tone(480.0, 620.0, sample_rate_hz, duration_ms)
}

/// Bundled ringtone fallback, played when the user's configured ringtone
/// file is missing or fails to decode (spec.md §4.6).
pub fn bundled_ringtone_fallback(sample_rate_hz: u32, duration_ms: u32) -> Vec<i16> {
    single_tone(440.0, sample_rate_hz, duration_ms)
}

/// Write one DTMF digit's tone onto the urgent ring buffer, overlaying
/// whatever is currently playing on the voice buffer.
pub fn play_dtmf_tone(urgent: &RingBuffer, digit: char, sample_rate_hz: u32, duration_ms: u32) -> bool {
    match dtmf_frequencies(digit) {
        Some((a, b)) => {
            let samples = dual_tone(a, b, sample_rate_hz, duration_ms);
            urgent.put(&samples, 1.0);
            true
        }
        None => false,
    }
}

/// Parses a `Voice-Message: <new>/<total>` fragment out of a NOTIFY body,
/// per spec.md §4.6 and RFC 3842's message-summary body.
pub fn parse_voicemail_notify(body: &str) -> Option<(u32, u32)> {
    for line in body.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix("Voice-Message:") else {
            continue;
        };
        let rest = rest.trim();
        let mut parts = rest.split('/');
        let new = parts.next()?.trim().parse().ok()?;
        let total = parts.next()?.trim().parse().ok()?;
        return Some((new, total));
    }
    None
}

/// The capability set advertised on a stateless OPTIONS reply (spec.md
/// §4.6: "200 OK with Allow, Accept, Supported, and Allow-Events headers
/// cloned from the stack capabilities").
#[derive(Debug, Clone)]
pub struct OptionsCapabilities {
    pub allow: Vec<String>,
    pub accept: Vec<String>,
    pub supported: Vec<String>,
    pub allow_events: Vec<String>,
}

impl Default for OptionsCapabilities {
    fn default() -> Self {
        Self {
            allow: vec![
                "INVITE", "ACK", "CANCEL", "BYE", "OPTIONS", "REGISTER", "REFER", "NOTIFY", "INFO",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            accept: vec!["application/sdp".to_string()],
            supported: vec!["replaces".to_string(), "timer".to_string()],
            allow_events: vec!["refer".to_string(), "message-summary".to_string()],
        }
    }
}

impl OptionsCapabilities {
    /// Builds the stateless 200 OK reply to an OPTIONS request, per
    /// spec.md §4.6. No dialog or transaction state is touched.
    pub fn build_response(&self) -> rvoip_sip_core::Response {
        use rvoip_sip_core::{HeaderName, HeaderValue, Response, StatusCode, TypedHeader};

        Response::new(StatusCode::Ok)
            .with_header(TypedHeader::Other(HeaderName::Allow, HeaderValue::text(self.allow.join(", "))))
            .with_header(TypedHeader::Other(HeaderName::Accept, HeaderValue::text(self.accept.join(", "))))
            .with_header(TypedHeader::Other(
                HeaderName::Supported,
                HeaderValue::text(self.supported.join(", ")),
            ))
            .with_header(TypedHeader::Other(
                HeaderName::Other("Allow-Events".to_string()),
                HeaderValue::text(self.allow_events.join(", ")),
            ))
    }
}

/// Tracks incoming calls that arrived while another call already held the
/// active slot (spec.md §4.6: "add the call to the waiting set and notify
/// the client").
#[derive(Default)]
pub struct WaitingCallSet {
    waiting: RwLock<Vec<SessionId>>,
}

impl WaitingCallSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, session_id: SessionId) {
        self.waiting.write().await.push(session_id);
    }

    pub async fn remove(&self, session_id: &SessionId) -> bool {
        let mut waiting = self.waiting.write().await;
        let before = waiting.len();
        waiting.retain(|id| id != session_id);
        waiting.len() != before
    }

    pub async fn list(&self) -> Vec<SessionId> {
        self.waiting.read().await.clone()
    }
}

impl SessionCoordinator {
    /// Decide how an incoming call should be handled: ring if no call is
    /// currently active, otherwise queue it in the waiting set and notify
    /// the client (spec.md §4.6).
    pub async fn direct_incoming_call(
        &self,
        waiting: &WaitingCallSet,
        session_id: &SessionId,
        from: &str,
        to: &str,
    ) -> Result<bool> {
        let active = self.registry.list_active_sessions().await?;
        if active.is_empty() {
            Ok(true)
        } else {
            waiting.push(session_id.clone()).await;
            let _ = self
                .publish_event(SessionEvent::IncomingCallWaiting {
                    session_id: session_id.clone(),
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .await;
            Ok(false)
        }
    }

    /// Emit a voicemail notification for `account_id` from a parsed NOTIFY
    /// body, or do nothing if the body carries no `Voice-Message` fragment.
    pub async fn notify_voicemail(&self, account_id: &str, notify_body: &str) {
        if let Some((new_messages, total_messages)) = parse_voicemail_notify(notify_body) {
            let _ = self
                .publish_event(SessionEvent::VoicemailNotification {
                    account_id: account_id.to_string(),
                    new_messages,
                    total_messages,
                })
                .await;
        }
    }
}
