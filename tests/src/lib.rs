//! # Notification Bridge Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs     # Recording/blocking subscriber handles, record builders
//!     ├── scenarios.rs    # End-to-end flows through bridge + messenger
//!     ├── concurrency.rs  # Bus thread vs. attach/detach churn
//!     └── host_stream.rs  # Channel-backed subscriber consumed as a stream
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p nb-tests
//! cargo test -p nb-tests integration::concurrency::
//! ```
