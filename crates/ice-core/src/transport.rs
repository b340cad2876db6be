//! Multi-component ICE transport: a carrier of up to N [`IceAgent`]s, one per
//! RTP/RTCP-style component, exposing the small surface the SIP/ICE adapter
//! and the RTP session actually need.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

use crate::agent::{IceAgent, IceAgentState};
use crate::candidate::IceCandidate;
use crate::config::{IceComponent, IceConfig, IceRole};
use crate::error::{Error, Result};

/// Callback invoked with each application-data payload received on a
/// component. The peer address is fixed once a pair is nominated, so unlike
/// a raw socket recv the callback only needs the payload.
pub type RecvCallback = Arc<dyn Fn(Vec<u8>) + Send + Sync>;

struct ComponentHandle {
    agent: IceAgent,
    recv_callback: Arc<RwLock<Option<RecvCallback>>>,
}

/// Carrier of up to N ICE components, per spec.md's `IceTransport`: created,
/// gathered, exchanged (candidates swapped out of band by the caller),
/// nominated, completed.
pub struct IceTransport {
    components: HashMap<u32, ComponentHandle>,
    default_component: u32,
}

impl IceTransport {
    /// Create a transport carrying one [`IceAgent`] per requested component.
    pub async fn new(config: IceConfig, role: IceRole, components: &[IceComponent]) -> Result<Self> {
        if components.is_empty() {
            return Err(Error::ConfigError("IceTransport needs at least one component".into()));
        }
        let default_component = components[0].as_u32();
        let mut map = HashMap::new();
        for component in components {
            let mut comp_config = config.clone();
            comp_config.component = *component;
            let (agent, mut event_rx, data_rx) = IceAgent::new(comp_config, role).await?;
            let comp_id = component.as_u32();
            let recv_callback: Arc<RwLock<Option<RecvCallback>>> = Arc::new(RwLock::new(None));

            tokio::spawn(async move {
                while let Some(event) = event_rx.recv().await {
                    debug!("ICE component {} event: {:?}", comp_id, event);
                }
            });

            tokio::spawn(Self::forward_loop(comp_id, data_rx, recv_callback.clone()));

            map.insert(
                comp_id,
                ComponentHandle {
                    agent,
                    recv_callback,
                },
            );
        }

        Ok(Self {
            components: map,
            default_component,
        })
    }

    async fn forward_loop(
        component: u32,
        mut data_rx: mpsc::Receiver<Bytes>,
        recv_callback: Arc<RwLock<Option<RecvCallback>>>,
    ) {
        while let Some(data) = data_rx.recv().await {
            let callback = recv_callback.read().await.clone();
            match callback {
                Some(cb) => cb(data.to_vec()),
                None => debug!(
                    "dropping {} bytes on ICE component {}: no recv callback registered",
                    data.len(),
                    component
                ),
            }
        }
    }

    fn component(&self, component: u32) -> Result<&ComponentHandle> {
        self.components
            .get(&component)
            .ok_or_else(|| Error::InvalidState(format!("unknown ICE component {}", component)))
    }

    pub async fn gather(&self) -> Result<()> {
        for handle in self.components.values() {
            handle.agent.gather_candidates().await?;
        }
        Ok(())
    }

    pub async fn add_remote_candidate(&self, component: u32, candidate: IceCandidate) -> Result<()> {
        self.component(component)?.agent.add_remote_candidate(candidate).await
    }

    pub async fn start_connectivity_checks(&self) -> Result<()> {
        for handle in self.components.values() {
            handle.agent.start_connectivity_checks().await?;
        }
        Ok(())
    }

    /// True once every component has a selected (nominated) candidate pair.
    pub async fn is_completed(&self) -> bool {
        for handle in self.components.values() {
            if handle.agent.state().await != IceAgentState::Connected {
                return false;
            }
        }
        true
    }

    pub async fn get_local_address(&self, component: u32) -> Result<SocketAddr> {
        let candidates = self.component(component)?.agent.local_candidates().await;
        candidates
            .first()
            .map(|c| c.address())
            .ok_or_else(|| Error::InvalidState("no local candidate gathered".into()))
    }

    pub async fn get_remote_address(&self, component: u32) -> Result<SocketAddr> {
        let pair = self.component(component)?.agent.selected_pair().await;
        pair.map(|(_, remote)| remote.address())
            .ok_or_else(|| Error::InvalidState("no candidate pair selected".into()))
    }

    pub async fn get_default_local_address(&self) -> Result<SocketAddr> {
        self.get_local_address(self.default_component).await
    }

    pub async fn send(&self, component: u32, data: &[u8]) -> Result<()> {
        self.component(component)?.agent.send_data(data).await
    }

    /// Register the callback invoked for every datagram received on
    /// `component`. Only one callback may be registered per component.
    pub async fn set_on_recv(&self, component: u32, callback: RecvCallback) -> Result<()> {
        let handle = self.component(component)?;
        *handle.recv_callback.write().await = Some(callback);
        Ok(())
    }

    pub async fn close(&self) -> Result<()> {
        for handle in self.components.values() {
            handle.agent.close().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatheringPolicy;

    #[tokio::test]
    async fn construct_two_component_transport() {
        let config = IceConfig {
            gathering_policy: GatheringPolicy::HostOnly,
            ..IceConfig::default()
        };
        let transport = IceTransport::new(
            config,
            IceRole::Controlling,
            &[IceComponent::Rtp, IceComponent::Rtcp],
        )
        .await
        .unwrap();
        assert!(!transport.is_completed().await);
    }

    #[tokio::test]
    async fn unknown_component_is_an_error() {
        let config = IceConfig::default();
        let transport = IceTransport::new(config, IceRole::Controlling, &[IceComponent::Rtp])
            .await
            .unwrap();
        assert!(transport.get_local_address(IceComponent::Rtcp.as_u32()).await.is_err());
    }
}
