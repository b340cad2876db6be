//! ICE agent configuration (RFC 8445 §2) and the STUN/TURN server list used
//! during candidate gathering.

use std::net::SocketAddr;

/// Which side initiated the offer, deciding tie-break resolution (RFC 8445 §8.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IceRole {
    Controlling,
    Controlled,
}

/// RTP/RTCP component identifiers, matching the `component` field of an
/// ICE candidate line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IceComponent {
    Rtp = 1,
    Rtcp = 2,
}

impl IceComponent {
    pub fn as_u32(&self) -> u32 {
        *self as u32
    }
}

/// Which candidate types gathering should attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatheringPolicy {
    /// Host candidates only (no STUN/TURN round trips).
    HostOnly,
    /// Host and server-reflexive candidates.
    HostAndReflexive,
    /// Host, reflexive and relayed candidates.
    All,
}

/// A single configured STUN or TURN server.
#[derive(Debug, Clone)]
pub struct IceServerConfig {
    pub address: SocketAddr,
    pub username: Option<String>,
    pub credential: Option<String>,
    pub is_turn: bool,
}

impl IceServerConfig {
    pub fn stun(address: SocketAddr) -> Self {
        Self {
            address,
            username: None,
            credential: None,
            is_turn: false,
        }
    }

    pub fn turn(address: SocketAddr, username: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            address,
            username: Some(username.into()),
            credential: Some(credential.into()),
            is_turn: true,
        }
    }
}

/// Configuration for one [`crate::agent::IceAgent`].
#[derive(Debug, Clone)]
pub struct IceConfig {
    pub gathering_policy: GatheringPolicy,
    pub gather_host: bool,
    pub use_udp: bool,
    pub use_tcp: bool,
    pub max_gathering_time_ms: u64,
    pub servers: Vec<IceServerConfig>,
    pub component: IceComponent,
}

impl Default for IceConfig {
    fn default() -> Self {
        Self {
            gathering_policy: GatheringPolicy::HostOnly,
            gather_host: true,
            use_udp: true,
            use_tcp: false,
            max_gathering_time_ms: 2000,
            servers: Vec::new(),
            component: IceComponent::Rtp,
        }
    }
}

/// Builder for [`IceConfig`], matching the teacher's builder-pattern
/// conventions used elsewhere in the workspace.
#[derive(Debug, Clone, Default)]
pub struct IceConfigBuilder {
    config: IceConfig,
}

impl IceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gathering_policy(mut self, policy: GatheringPolicy) -> Self {
        self.config.gathering_policy = policy;
        self
    }

    pub fn use_tcp(mut self, enabled: bool) -> Self {
        self.config.use_tcp = enabled;
        self
    }

    pub fn max_gathering_time_ms(mut self, ms: u64) -> Self {
        self.config.max_gathering_time_ms = ms;
        self
    }

    pub fn add_server(mut self, server: IceServerConfig) -> Self {
        self.config.servers.push(server);
        self
    }

    pub fn component(mut self, component: IceComponent) -> Self {
        self.config.component = component;
        self
    }

    pub fn build(self) -> IceConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_udp_host_only() {
        let config = IceConfig::default();
        assert_eq!(config.gathering_policy, GatheringPolicy::HostOnly);
        assert!(config.use_udp);
        assert!(!config.use_tcp);
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = IceConfigBuilder::new()
            .gathering_policy(GatheringPolicy::All)
            .use_tcp(true)
            .component(IceComponent::Rtcp)
            .build();
        assert_eq!(config.gathering_policy, GatheringPolicy::All);
        assert!(config.use_tcp);
        assert_eq!(config.component.as_u32(), 2);
    }
}
