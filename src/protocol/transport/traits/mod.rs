//! Capability traits implemented by the hardware collaborators (CAN driver,
//! USB link, monotonic clock, status indicator) and consumed by the bridge.
pub mod activity;
pub mod can_driver;
pub mod clock;
pub mod host_link;
