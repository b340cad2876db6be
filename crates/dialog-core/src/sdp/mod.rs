//! SDP offer/answer handling for dialog-core (spec.md §4.2).

pub mod offer_answer;

pub use offer_answer::{
    attribute_port_to_all_media, create_initial_offer, receiving_initial_offer, reinvite,
    set_negociated_offer, start_negociation, CodecDescriptor, MediaSlotRequest, NegotiatedMedia,
    NegotiatedSession,
};
