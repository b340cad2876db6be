//! gRPC transport implementation for distributed event coordination
//!
//! This is currently a stub implementation that will be completed
//! when distributed mode is fully implemented.

use async_trait::async_trait;
use anyhow::Result;
use std::sync::Arc;
use std::collections::HashMap;

use super::{NetworkTransport, TransportReceiver, TransportReceiverImpl};
use crate::events::cross_crate::CrossCrateEvent;

/// gRPC transport implementation
pub struct GrpcTransport {
    /// Listen endpoint for this service
    endpoint: String,
    /// Service name for this instance
    service_name: String,
    /// Known service endpoints
    service_endpoints: HashMap<String, String>,
}

impl GrpcTransport {
    /// Create a new gRPC transport
    pub fn new(
        endpoint: String,
        service_name: String,
        service_endpoints: HashMap<String, String>,
    ) -> Self {
        Self {
            endpoint,
            service_name,
            service_endpoints,
        }
    }
    
    /// Start the gRPC server
    pub async fn start_server(&mut self) -> Result<()> {
        // TODO: Implement gRPC server
        tracing::warn!(
            "gRPC transport start_server() called but not yet implemented. \
            Endpoint: {}",
            self.endpoint
        );
        Err(anyhow::anyhow!("gRPC transport not yet implemented"))
    }
}

#[async_trait]
impl NetworkTransport for GrpcTransport {
    async fn send(&self, target: &str, event: Arc<dyn CrossCrateEvent>) -> Result<()> {
        let endpoint = self.service_endpoints.get(target)
            .ok_or_else(|| anyhow::anyhow!("Unknown target service: {}", target))?;
            
        tracing::warn!(
            "gRPC transport send() called but not yet implemented. \
            Target: {} ({}), Event: {}",
            target,
            endpoint,
            event.event_type()
        );
        
        Err(anyhow::anyhow!(
            "gRPC transport not yet implemented. \
            Cannot send event '{}' to target '{}' at '{}'",
            event.event_type(),
            target,
            endpoint
        ))
    }
    
    async fn subscribe(&self, event_types: Vec<&str>) -> Result<TransportReceiver> {
        tracing::warn!(
            "gRPC transport subscribe() called but not yet implemented. \
            Event types: {:?}",
            event_types
        );
        Ok(TransportReceiver::new(Box::new(GrpcReceiver::new())))
    }
    
    async fn health_check(&self) -> Result<()> {
        tracing::warn!("gRPC transport health_check() called but not yet implemented");
        Err(anyhow::anyhow!("gRPC transport not yet implemented"))
    }
    
    async fn shutdown(&self) -> Result<()> {
        tracing::info!("gRPC transport shutdown() called (no-op for stub)");
        Ok(())
    }
}

/// gRPC receiver implementation
struct GrpcReceiver {
    // TODO: Add gRPC stream handle
}

impl GrpcReceiver {
    fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl TransportReceiverImpl for GrpcReceiver {
    async fn recv(&mut self) -> Result<Option<Arc<dyn CrossCrateEvent>>> {
        tracing::warn!("gRPC receiver recv() called but not yet implemented");
        // Return None to indicate no events available
        // In a real implementation, this would block until an event arrives
        Ok(None)
    }
}

/// Proto definitions for gRPC transport (stub)
pub mod proto {
    /// Event service definition (will be generated from .proto files)
    pub struct EventService;
    
    /// Event message (will be generated from .proto files)
    pub struct EventMessage {
        pub event_type: String,
        pub source: String,
        pub target: String,
        pub payload: Vec<u8>,
        pub timestamp: u64,
        pub correlation_id: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[tokio::test]
    async fn test_grpc_transport_creation() {
        let mut endpoints = HashMap::new();
        endpoints.insert("media-core".to_string(), "grpc://media:50051".to_string());
        endpoints.insert("dialog-core".to_string(), "grpc://dialog:50052".to_string());
        
        let transport = GrpcTransport::new(
            "grpc://0.0.0.0:50050".to_string(),
            "session-core".to_string(),
            endpoints.clone(),
        );
        
        assert_eq!(transport.endpoint, "grpc://0.0.0.0:50050");
        assert_eq!(transport.service_name, "session-core");
        assert_eq!(transport.service_endpoints.len(), 2);
    }
    
    #[tokio::test]
    async fn test_grpc_transport_not_implemented() {
        let transport = GrpcTransport::new(
            "grpc://0.0.0.0:50050".to_string(),
            "test-service".to_string(),
            HashMap::new(),
        );
        
        // All methods should return not implemented errors
        assert!(transport.health_check().await.is_err());
        
        // Shutdown should succeed (no-op)
        assert!(transport.shutdown().await.is_ok());
    }
}
