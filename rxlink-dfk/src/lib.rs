//! RXLink Deframing Kernel
//!
//! This crate provides the receive-side deframing kernel for the RXLink
//! system: bit-level frame synchronization, frame assembly and packetization.

pub mod channel;
pub mod deframer;
pub mod stream_builder;
pub mod sync;

pub use channel::PacketChannel;
pub use deframer::{DeframerStats, Packet, PacketDeframer, Payload};
pub use stream_builder::StreamBuilder;
pub use sync::BitSynchronizer;
