//! Codec registry for RTP payload negotiation.
//!
//! The SDP negotiator builds its codec list from a registry populated at
//! init rather than a hardcoded match, matching the "abstract interface
//! with encode/decode entry points" design note. Only G.711 ships as a
//! concrete entry; other audio codecs are future work (spec.md §1).

pub mod g711;

use std::collections::HashMap;
use std::sync::Arc;

use rvoip_rtp_core::session::Codec;

pub use g711::{G711Codec, G711Variant};

/// Static description of one registry entry, independent of whether it's
/// currently backed by a concrete `Codec` implementation.
#[derive(Debug, Clone)]
pub struct CodecDescriptor {
    pub name: &'static str,
    pub clock_rate_hz: u32,
    pub frame_size_samples: usize,
    pub payload_type: u8,
    pub dynamic: bool,
}

/// Lookup table from RTP payload type to a codec implementation, used by
/// the SDP negotiator to compute the offered/accepted codec intersection
/// and by the RTP session to encode/decode.
pub struct CodecRegistry {
    codecs: HashMap<u8, Arc<dyn Codec>>,
    descriptors: HashMap<u8, CodecDescriptor>,
}

impl CodecRegistry {
    /// Build the registry with the codecs this core actually supports.
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            codecs: HashMap::new(),
            descriptors: HashMap::new(),
        };
        registry.register(
            Arc::new(G711Codec::new(G711Variant::Pcmu)),
            CodecDescriptor {
                name: "PCMU",
                clock_rate_hz: 8000,
                frame_size_samples: 160,
                payload_type: 0,
                dynamic: false,
            },
        );
        registry.register(
            Arc::new(G711Codec::new(G711Variant::Pcma)),
            CodecDescriptor {
                name: "PCMA",
                clock_rate_hz: 8000,
                frame_size_samples: 160,
                payload_type: 8,
                dynamic: false,
            },
        );
        registry
    }

    pub fn register(&mut self, codec: Arc<dyn Codec>, descriptor: CodecDescriptor) {
        self.codecs.insert(descriptor.payload_type, codec);
        self.descriptors.insert(descriptor.payload_type, descriptor);
    }

    pub fn get(&self, payload_type: u8) -> Option<Arc<dyn Codec>> {
        self.codecs.get(&payload_type).cloned()
    }

    pub fn descriptor(&self, payload_type: u8) -> Option<&CodecDescriptor> {
        self.descriptors.get(&payload_type)
    }

    pub fn supports(&self, payload_type: u8) -> bool {
        self.codecs.contains_key(&payload_type)
    }

    /// All registered payload types, in ascending order.
    pub fn supported_payload_types(&self) -> Vec<u8> {
        let mut types: Vec<u8> = self.codecs.keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Static descriptors in payload-type order, as the SDP negotiator
    /// would offer them.
    pub fn descriptors(&self) -> Vec<&CodecDescriptor> {
        self.supported_payload_types()
            .into_iter()
            .filter_map(|pt| self.descriptors.get(&pt))
            .collect()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
