//! Message Fabric
//!
//! Point-to-point delivery of protocol messages between the coordinator and the
//! workers of one run. Every rank owns an inbox; the coordinator can reach every
//! worker, and every worker can reach the coordinator.
//!
//! ## Guarantees
//! - **FIFO per pair**: messages from one sender to one receiver arrive in send order.
//! - **Fire-and-forget sends**: inboxes are unbounded, so `send` never suspends.
//! - **Closure detection**: once every peer that could write to an inbox is gone and the
//!   inbox is drained, `recv` reports `FabricClosed` instead of waiting forever.

pub mod endpoint;

pub use endpoint::{Endpoint, Fabric};
