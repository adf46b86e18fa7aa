//! The host-framework seam.
//!
//! Roomkit does not accept connections, serialize state patches, or keep
//! a process alive — the host framework does. This trait is the narrow
//! surface Roomkit calls back into it with. The host process implements
//! it once; tests implement it with a recorder.

use std::time::Duration;

use roomkit_protocol::RoomMetadata;

/// Operations the hosting framework provides to a room.
///
/// All methods are fire-and-forget from the room's perspective: the
/// room states its intent and the host carries it out on its own
/// schedule.
pub trait RoomHost: Send + Sync + 'static {
    /// Publishes the room's metadata for discovery.
    fn set_metadata(&self, metadata: RoomMetadata);

    /// Sets the interval between periodic state broadcasts.
    fn set_patch_interval(&self, interval: Duration);

    /// Sets the maximum number of clients the host should admit.
    fn set_max_clients(&self, max_clients: usize);

    /// Initiates room disconnection. The host is expected to close
    /// remaining transports and eventually deliver a dispose event.
    fn initiate_disconnect(&self);

    /// Terminates the hosting process with success status.
    ///
    /// Only invoked for rooms configured as process-exclusive singletons
    /// ([`RoomConfig::singleton`](crate::RoomConfig)). A production
    /// implementation calls `std::process::exit(0)`; keeping the exit in
    /// the host binding leaves the library testable.
    fn terminate_process(&self);
}
