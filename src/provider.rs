//! Provider-facing descriptors (data) and signing policies (behavior).
//!
//! `descriptor` exposes validated configuration (`ProviderDescriptor`)
//! covering the environment tier, identifier resolution, consumer
//! credentials, provider paths, and the AX/SReg attribute schema. `signing`
//! defines [`SigningPolicy`], the hook the hand-off uses to restrict which
//! OAuth parameters participate in the signature base.

pub mod descriptor;
pub mod signing;

pub use descriptor::*;
pub use signing::*;
