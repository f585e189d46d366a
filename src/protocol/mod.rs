//! Domain layer of the bridge: SLCAN codec, CAN transport model and
//! collaborator traits, and the queueing components tied together by the
//! foreground scheduler.
pub mod bridge;
pub mod slcan;
pub mod transport;
