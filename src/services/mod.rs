//! Host services built on top of the notebook core.
//!
//! ARCHITECTURE
//! ============
//! The core stays synchronous and I/O free. Anything that talks to the
//! network lives here and runs on the tokio runtime.

pub mod evaluation;
