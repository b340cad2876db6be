//! SDP Offer/Answer Model (spec.md §4.2): builds initial offers from an
//! account's codec list, computes the codec intersection against a remote
//! offer/answer, and tracks the negotiated per-media direction across
//! re-INVITEs.

use rvoip_sip_core::types::sdp::{
    ConnectionData, MediaDescription, MediaDirection, Origin, ParsedAttribute, RtpMapAttribute, SdpSession,
};

use crate::errors::{DialogError, DialogResult};

/// One entry from the account's ordered codec preference list (spec.md
/// §3's `Account.codec preference list`), already resolved to an RTP
/// payload type by whatever codec registry the caller draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecDescriptor {
    pub name: String,
    pub payload_type: u8,
    pub clock_rate_hz: u32,
}

impl CodecDescriptor {
    pub fn new(name: impl Into<String>, payload_type: u8, clock_rate_hz: u32) -> Self {
        Self { name: name.into(), payload_type, clock_rate_hz }
    }
}

/// Result of a successful offer/answer run for one media slot: the codecs
/// both sides can use, in local preference order, and the direction this
/// side should use.
#[derive(Debug, Clone)]
pub struct NegotiatedMedia {
    pub media_type: String,
    pub codecs: Vec<CodecDescriptor>,
    pub direction: MediaDirection,
    pub remote_port: u16,
}

/// The full result of a negotiation run, one entry per enabled media slot.
#[derive(Debug, Clone, Default)]
pub struct NegotiatedSession {
    pub media: Vec<NegotiatedMedia>,
}

impl NegotiatedSession {
    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }
}

/// One requested media slot: type, whether it's enabled, and whether the
/// local side has it muted (policy: muted media is still offered
/// SENDRECV — see SPEC_FULL.md §10 Open Question 3).
#[derive(Debug, Clone)]
pub struct MediaSlotRequest {
    pub media_type: String,
    pub enabled: bool,
    pub muted: bool,
}

/// Builds the initial SDP offer for an outbound INVITE: one `m=` line per
/// enabled slot in `slots`, each carrying `codecs` (already resolved by the
/// caller from the account's codec preference list) and a SENDRECV
/// direction attribute.
pub fn create_initial_offer(
    local_ip: &str,
    rtp_port: u16,
    codecs: &[CodecDescriptor],
    slots: &[MediaSlotRequest],
) -> SdpSession {
    let mut session = SdpSession::new(
        Origin {
            username: "-".to_string(),
            sess_id: session_id(),
            sess_version: "1".to_string(),
            net_type: "IN".to_string(),
            addr_type: "IP4".to_string(),
            unicast_address: local_ip.to_string(),
        },
        "rvoip-session",
    );
    session.connection_info = Some(ConnectionData {
        net_type: "IN".to_string(),
        addr_type: "IP4".to_string(),
        connection_address: local_ip.to_string(),
        ttl: None,
        multicast_count: None,
    });

    for slot in slots.iter().filter(|s| s.enabled) {
        session.media_descriptions.push(build_media(&slot.media_type, rtp_port, codecs, MediaDirection::SendRecv));
    }

    session
}

/// Parses a remote offer. A thin wrapper over `SdpSession`'s `FromStr` so
/// callers in this module all go through one entry point, matching
/// spec.md §4.2's `receiving_initial_offer` naming.
pub fn receiving_initial_offer(remote_sdp: &str) -> DialogResult<SdpSession> {
    remote_sdp.parse::<SdpSession>().map_err(DialogError::SipCore)
}

/// Computes, for each local media slot, the codec intersection with the
/// matching remote media description (matched by `media` type, in order),
/// preserving local preference order. A slot whose intersection is empty
/// fails the whole negotiation, per spec.md §4.2.
pub fn start_negociation(local_codecs: &[CodecDescriptor], remote: &SdpSession) -> DialogResult<NegotiatedSession> {
    let mut result = NegotiatedSession::default();

    for remote_media in &remote.media_descriptions {
        let remote_rtpmaps: Vec<&RtpMapAttribute> = remote_media
            .generic_attributes
            .iter()
            .filter_map(|a| match a {
                ParsedAttribute::RtpMap(rtpmap) => Some(rtpmap),
                _ => None,
            })
            .collect();

        let intersected: Vec<CodecDescriptor> = local_codecs
            .iter()
            .filter(|local| {
                remote_media.formats.iter().any(|fmt| fmt.parse::<u8>().ok() == Some(local.payload_type))
                    || remote_rtpmaps.iter().any(|r| r.encoding_name.eq_ignore_ascii_case(&local.name))
            })
            .cloned()
            .collect();

        if intersected.is_empty() {
            return Err(DialogError::Negotiation(format!(
                "no common codec for media '{}': offered {:?}",
                remote_media.media, remote_media.formats
            )));
        }

        let remote_direction = remote_media.direction.unwrap_or(MediaDirection::SendRecv);
        result.media.push(NegotiatedMedia {
            media_type: remote_media.media.clone(),
            codecs: intersected,
            direction: mirror_direction(remote_direction),
            remote_port: remote_media.port,
        });
    }

    Ok(result)
}

/// Applies a completed negotiation onto the local session: rewrites each
/// media slot's format list and direction to the negotiated result, in
/// place, so `session` becomes the answer (or the accepted re-offer).
pub fn set_negociated_offer(session: &mut SdpSession, negotiated: &NegotiatedSession) -> DialogResult<()> {
    if negotiated.is_empty() {
        return Err(DialogError::Negotiation("cannot apply an empty negotiation result".to_string()));
    }

    for (media, negotiated_media) in session.media_descriptions.iter_mut().zip(&negotiated.media) {
        media.formats = negotiated_media.codecs.iter().map(|c| c.payload_type.to_string()).collect();
        media.direction = Some(negotiated_media.direction);
        media.generic_attributes.retain(|a| !matches!(a, ParsedAttribute::RtpMap(_)));
        for codec in &negotiated_media.codecs {
            media.generic_attributes.push(ParsedAttribute::RtpMap(RtpMapAttribute {
                payload_type: codec.payload_type,
                encoding_name: codec.name.clone(),
                clock_rate: codec.clock_rate_hz,
                encoding_params: None,
            }));
        }
    }

    Ok(())
}

/// Rewrites every media description's port to `port`: used once the RTP
/// session's actual bound/external port is known, after the offer was
/// built against a placeholder.
pub fn attribute_port_to_all_media(session: &mut SdpSession, port: u16) {
    for media in &mut session.media_descriptions {
        media.port = port;
    }
}

/// Builds the re-INVITE offer for a hold/resume toggle: every media slot's
/// direction is replaced by `direction` (SENDONLY to hold, SENDRECV to
/// resume), per spec.md §4.2's reinvite recipe.
pub fn reinvite(session: &mut SdpSession, direction: MediaDirection) {
    for media in &mut session.media_descriptions {
        media.direction = Some(direction);
        media.generic_attributes.retain(|a| !matches!(a, ParsedAttribute::Direction(_)));
    }
    session.origin.sess_version = bump_version(&session.origin.sess_version);
}

fn mirror_direction(remote: MediaDirection) -> MediaDirection {
    match remote {
        MediaDirection::SendOnly => MediaDirection::RecvOnly,
        MediaDirection::RecvOnly => MediaDirection::SendOnly,
        other => other,
    }
}

fn build_media(media_type: &str, port: u16, codecs: &[CodecDescriptor], direction: MediaDirection) -> MediaDescription {
    let mut media = MediaDescription::new(
        media_type,
        port,
        "RTP/AVP",
        codecs.iter().map(|c| c.payload_type.to_string()).collect(),
    );
    media.direction = Some(direction);
    for codec in codecs {
        media.generic_attributes.push(ParsedAttribute::RtpMap(RtpMapAttribute {
            payload_type: codec.payload_type,
            encoding_name: codec.name.clone(),
            clock_rate: codec.clock_rate_hz,
            encoding_params: None,
        }));
    }
    media
}

fn bump_version(current: &str) -> String {
    current.parse::<u64>().map(|v| (v + 1).to_string()).unwrap_or_else(|_| "2".to_string())
}

fn session_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_micros().to_string()).unwrap_or_else(|_| "0".to_string())
}
