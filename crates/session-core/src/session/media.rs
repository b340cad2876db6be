//! Session Media Coordination
//!
//! Handles media setup and management for sessions.

use crate::api::types::{SessionId, MediaInfo};
use crate::errors::Result;

/// Media coordinator for sessions
#[derive(Debug)]
pub struct MediaCoordinator;

impl MediaCoordinator {
    pub fn new() -> Self {
        Self
    }

    pub async fn setup_media(&self, session_id: &SessionId, sdp: &str) -> Result<MediaInfo> {
        // TODO: Integrate with media-core
        tracing::debug!("Setting up media for session: {}", session_id);
        Ok(MediaInfo {
            local_sdp: Some(sdp.to_string()),
            remote_sdp: None,
            local_rtp_port: Some(8000),
            remote_rtp_port: None,
            codec: Some("PCMU".to_string()),
            rtp_stats: None,
            quality_metrics: None,
        })
    }

    pub async fn update_media(&self, session_id: &SessionId, new_sdp: &str) -> Result<()> {
        tracing::debug!("Updating media for session: {}", session_id);
        Ok(())
    }

    pub async fn cleanup_media(&self, session_id: &SessionId) -> Result<()> {
        tracing::debug!("Cleaning up media for session: {}", session_id);
        Ok(())
    }
}

impl Default for MediaCoordinator {
    fn default() -> Self {
        Self::new()
    }
} 