//! Typed OpenML wire messages.
//!
//! Every message kind of the OpenML XML API is a plain struct here, paired
//! with a declarative wire mapping registered once in [`bindings`]. The
//! transport and cache collaborators only ever exchange the bytes produced
//! by [`to_xml`] and consumed by [`from_xml`]; domain helpers such as
//! [`task_info`] only ever see the typed objects.

pub mod bindings;
pub mod message;
pub mod messages;
pub mod task_info;

pub use bindings::registry;
pub use message::{from_xml, to_xml, Message};
