//! In-process doubles for the admin client.
//!
//! - **Stubs**: an in-memory `/usuarios` backend that records every call
//!
//! Used by the `--offline-demo` mode as well as by unit and integration
//! tests, so it is always compiled.

pub mod stubs;

pub use stubs::{InMemoryUserAdmin, RecordedCall, StubOperation, sample_user};
