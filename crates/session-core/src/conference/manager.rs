//! Conference Manager
//!
//! High-level manager that coordinates all conference operations.
//! TODO: Full implementation needed

use std::sync::Arc;
use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;

use crate::api::types::SessionId;
use crate::errors::Result;

use super::types::*;
use super::room::ConferenceRoom;
use super::api::ConferenceApi;
use super::events::{ConferenceEvent, ConferenceEventHandler};

/// High-level manager for all conference operations
pub struct ConferenceManager {
    /// Active conference rooms (concurrent HashMap)
    conferences: Arc<DashMap<ConferenceId, ConferenceRoom>>,
    /// Event handlers for conference events (using RwLock to avoid DashMap lifetime issues)
    event_handlers: Arc<RwLock<Vec<(String, Arc<dyn ConferenceEventHandler>)>>>,
    /// Local IP address for SDP generation
    local_ip: std::net::IpAddr,
}

impl ConferenceManager {
    /// Create a new conference manager
    pub fn new(local_ip: std::net::IpAddr) -> Self {
        Self {
            conferences: Arc::new(DashMap::new()),
            event_handlers: Arc::new(RwLock::new(Vec::new())),
            local_ip,
        }
    }

    /// Add an event handler with a unique name
    pub async fn add_event_handler(&self, name: &str, handler: Arc<dyn ConferenceEventHandler>) {
        let mut handlers = self.event_handlers.write().await;
        handlers.push((name.to_string(), handler));
    }

    /// Publish an event to all handlers
    async fn publish_event(&self, event: ConferenceEvent) {
        let handlers = self.event_handlers.read().await;
        for (_, handler) in handlers.iter() {
            handler.handle_event(event.clone()).await;
        }
    }

    /// Remove an event handler by name
    pub async fn remove_event_handler(&self, name: &str) -> bool {
        let mut handlers = self.event_handlers.write().await;
        if let Some(pos) = handlers.iter().position(|(n, _)| n == name) {
            handlers.remove(pos);
            true
        } else {
            false
        }
    }

    /// Get count of active conferences
    pub fn conference_count(&self) -> usize {
        self.conferences.len()
    }

    /// Get count of event handlers
    pub async fn event_handler_count(&self) -> usize {
        let handlers = self.event_handlers.read().await;
        handlers.len()
    }

    // TODO: Implement full ConferenceApi functionality
}

#[async_trait]
impl ConferenceApi for ConferenceManager {
    async fn create_conference(&self, config: ConferenceConfig) -> Result<ConferenceId> {
        let conference_id = ConferenceId::new();
        self.create_named_conference(conference_id.clone(), config).await?;
        Ok(conference_id)
    }

    async fn create_named_conference(&self, id: ConferenceId, config: ConferenceConfig) -> Result<()> {
        // Check if conference already exists
        if self.conferences.contains_key(&id) {
            return Err(crate::errors::SessionError::invalid_state("Conference already exists"));
        }

        // Create new conference room
        let room = ConferenceRoom::new(id.clone(), config.clone());
        self.conferences.insert(id.clone(), room);

        // Publish event
        self.publish_event(ConferenceEvent::ConferenceCreated {
            conference_id: id,
            config,
            created_at: std::time::Instant::now(),
        }).await;

        Ok(())
    }

    async fn join_conference(&self, conference_id: &ConferenceId, session_id: &SessionId) -> Result<ParticipantInfo> {
        // Find the conference
        if let Some(mut conference_entry) = self.conferences.get_mut(conference_id) {
            let conference = conference_entry.value_mut();
            
            // Create participant with better SIP URI
            let sip_uri = format!("sip:{}@conference.local", session_id.as_str());
            let participant = crate::conference::participant::ConferenceParticipant::new(
                session_id.clone(),
                sip_uri
            );
            
            // Add to conference
            conference.add_participant(participant.clone())?;
            
            let participant_info = participant.to_participant_info();
            
            // Publish event
            self.publish_event(ConferenceEvent::ParticipantJoined {
                conference_id: conference_id.clone(),
                session_id: session_id.clone(),
                participant_info: participant_info.clone(),
                joined_at: std::time::Instant::now(),
            }).await;
            
            Ok(participant_info)
        } else {
            Err(crate::errors::SessionError::session_not_found(&format!("Conference {}", conference_id)))
        }
    }

    async fn leave_conference(&self, conference_id: &ConferenceId, session_id: &SessionId) -> Result<()> {
        if let Some(mut conference_entry) = self.conferences.get_mut(conference_id) {
            let conference = conference_entry.value_mut();
            
            if conference.remove_participant(session_id).is_some() {
                self.publish_event(ConferenceEvent::ParticipantLeft {
                    conference_id: conference_id.clone(),
                    session_id: session_id.clone(),
                    reason: "User left".to_string(),
                    left_at: std::time::Instant::now(),
                }).await;
                Ok(())
            } else {
                Err(crate::errors::SessionError::session_not_found(&session_id.to_string()))
            }
        } else {
            Err(crate::errors::SessionError::session_not_found(&format!("Conference {}", conference_id)))
        }
    }

    async fn list_participants(&self, conference_id: &ConferenceId) -> Result<Vec<ParticipantInfo>> {
        if let Some(conference) = self.conferences.get(conference_id) {
            Ok(conference.participants
                .iter()
                .map(|entry| entry.value().to_participant_info())
                .collect())
        } else {
            Err(crate::errors::SessionError::session_not_found(&format!("Conference {}", conference_id)))
        }
    }

    async fn get_conference_stats(&self, conference_id: &ConferenceId) -> Result<ConferenceStats> {
        if let Some(conference) = self.conferences.get(conference_id) {
            Ok(conference.get_stats())
        } else {
            Err(crate::errors::SessionError::session_not_found(&format!("Conference {}", conference_id)))
        }
    }

    async fn list_conferences(&self) -> Result<Vec<ConferenceId>> {
        Ok(self.conferences.iter().map(|entry| entry.key().clone()).collect())
    }

    async fn terminate_conference(&self, conference_id: &ConferenceId) -> Result<()> {
        if let Some((_, conference)) = self.conferences.remove(conference_id) {
            let stats = conference.get_stats();
            self.publish_event(ConferenceEvent::ConferenceTerminated {
                conference_id: conference_id.clone(),
                reason: "Manual termination".to_string(),
                terminated_at: std::time::Instant::now(),
                final_stats: stats,
            }).await;
            Ok(())
        } else {
            Err(crate::errors::SessionError::session_not_found(&format!("Conference {}", conference_id)))
        }
    }

    async fn update_participant_status(&self, conference_id: &ConferenceId, session_id: &SessionId, status: ParticipantStatus) -> Result<()> {
        if let Some(mut conference_entry) = self.conferences.get_mut(conference_id) {
            let conference = conference_entry.value_mut();
            
            if let Some(mut participant_entry) = conference.participants.get_mut(session_id) {
                let old_status = participant_entry.status.clone();
                participant_entry.update_status(status.clone());
                
                // Publish status change event
                self.publish_event(ConferenceEvent::ParticipantStatusChanged {
                    conference_id: conference_id.clone(),
                    session_id: session_id.clone(),
                    old_status,
                    new_status: status,
                    changed_at: std::time::Instant::now(),
                }).await;
                
                Ok(())
            } else {
                Err(crate::errors::SessionError::session_not_found(&session_id.to_string()))
            }
        } else {
            Err(crate::errors::SessionError::session_not_found(&format!("Conference {}", conference_id)))
        }
    }

    async fn generate_conference_sdp(&self, conference_id: &ConferenceId, session_id: &SessionId) -> Result<String> {
        // Get conference configuration and participants
        let config = self.get_conference_config(conference_id).await?;
        let participants = self.list_participants(conference_id).await?;
        
        // Generate unique media port for this session
        let media_port = 10000 + ((session_id.as_str().len() * 17) % 1000) as u16;
        
        // Create session timestamp
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        // Generate comprehensive conference SDP using configured local IP
        Ok(format!(
            "v=0\r\n\
             o=conference_{} {} {} IN IP4 {}\r\n\
             s=Conference Room {} ({} participants)\r\n\
             i=Multi-party conference call\r\n\
             c=IN IP4 {}\r\n\
             t=0 0\r\n\
             m=audio {} RTP/AVP 0 8 18 101\r\n\
             a=sendrecv\r\n\
             a=rtpmap:0 PCMU/8000\r\n\
             a=rtpmap:8 PCMA/8000\r\n\
             a=rtpmap:18 G729/8000\r\n\
             a=rtpmap:101 telephone-event/8000\r\n\
             a=fmtp:101 0-15\r\n\
             a=ptime:20\r\n\
             a=maxptime:40\r\n\
             {}{}",
            session_id.as_str(),
            timestamp,
            timestamp,
            self.local_ip,
            conference_id,
            participants.len(),
            self.local_ip,
            media_port,
            if config.audio_mixing_enabled {
                "a=conf:audio-mixing\r\n"
            } else {
                ""
            },
            if config.max_participants > 2 {
                "a=conf:multi-party\r\n"
            } else {
                ""
            }
        ))
    }

    async fn conference_exists(&self, conference_id: &ConferenceId) -> bool {
        self.conferences.contains_key(conference_id)
    }

    async fn get_conference_config(&self, conference_id: &ConferenceId) -> Result<ConferenceConfig> {
        if let Some(conference) = self.conferences.get(conference_id) {
            Ok(conference.config.clone())
        } else {
            Err(crate::errors::SessionError::session_not_found(&format!("Conference {}", conference_id)))
        }
    }

    async fn update_conference_config(&self, conference_id: &ConferenceId, config: ConferenceConfig) -> Result<()> {
        if let Some(mut conference_entry) = self.conferences.get_mut(conference_id) {
            let conference = conference_entry.value_mut();
            
            // Update configuration
            conference.config = config.clone();
            conference.last_updated = std::time::Instant::now();
            
            // Publish configuration update event
            self.publish_event(ConferenceEvent::StatsUpdated {
                conference_id: conference_id.clone(),
                stats: conference.get_stats(),
                updated_at: std::time::Instant::now(),
            }).await;
            
            Ok(())
        } else {
            Err(crate::errors::SessionError::session_not_found(&format!("Conference {}", conference_id)))
        }
    }
} 