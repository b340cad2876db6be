//! Transport layer abstractions for distributed event coordination
//!
//! This module provides the trait and implementations for network transports
//! used in distributed deployments.

use async_trait::async_trait;
use anyhow::Result;
use std::sync::Arc;

use crate::events::cross_crate::CrossCrateEvent;

pub mod nats;
pub mod grpc;

/// Network transport trait for distributed event delivery
#[async_trait]
pub trait NetworkTransport: Send + Sync {
    /// Send an event to a specific target service
    async fn send(&self, target: &str, event: Arc<dyn CrossCrateEvent>) -> Result<()>;
    
    /// Subscribe to events for this service
    async fn subscribe(&self, event_types: Vec<&str>) -> Result<TransportReceiver>;
    
    /// Health check for the transport
    async fn health_check(&self) -> Result<()>;
    
    /// Graceful shutdown
    async fn shutdown(&self) -> Result<()>;
}

/// Receiver for transport events
pub struct TransportReceiver {
    /// Internal receiver implementation
    receiver: Box<dyn TransportReceiverImpl>,
}

impl TransportReceiver {
    /// Create a new transport receiver
    pub fn new(receiver: Box<dyn TransportReceiverImpl>) -> Self {
        Self { receiver }
    }
    
    /// Receive the next event
    pub async fn recv(&mut self) -> Result<Option<Arc<dyn CrossCrateEvent>>> {
        self.receiver.recv().await
    }
}

/// Internal trait for transport receiver implementations
#[async_trait]
pub trait TransportReceiverImpl: Send + Sync {
    /// Receive the next event
    async fn recv(&mut self) -> Result<Option<Arc<dyn CrossCrateEvent>>>;
}

/// Serialization utilities for cross-crate events
pub mod serialization {
    use super::*;
    use serde::{Serialize, Deserialize};
    
    /// Wire format for serialized events
    #[derive(Debug, Serialize, Deserialize)]
    pub struct WireEvent {
        /// Event type identifier
        pub event_type: String,
        /// Source service name
        pub source: String,
        /// Target service name
        pub target: String,
        /// Serialized event payload (JSON)
        pub payload: serde_json::Value,
        /// Timestamp (Unix millis)
        pub timestamp: u64,
        /// Optional correlation ID for tracing
        pub correlation_id: Option<String>,
    }
    
    /// Serialize a cross-crate event for network transport
    pub fn serialize_event(
        event: &Arc<dyn CrossCrateEvent>,
        source: &str,
        target: &str,
    ) -> Result<Vec<u8>> {
        // TODO: Implement proper serialization
        // For now, this is a stub
        let wire_event = WireEvent {
            event_type: event.event_type().to_string(),
            source: source.to_string(),
            target: target.to_string(),
            payload: serde_json::json!({}), // TODO: Serialize actual event
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)?
                .as_millis() as u64,
            correlation_id: None,
        };
        
        Ok(serde_json::to_vec(&wire_event)?)
    }
    
    /// Deserialize a cross-crate event from network transport
    pub fn deserialize_event(_data: &[u8]) -> Result<Arc<dyn CrossCrateEvent>> {
        // TODO: Implement proper deserialization
        anyhow::bail!("Event deserialization not yet implemented")
    }
}
