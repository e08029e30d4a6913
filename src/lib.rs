//! # Smart BDD
//!
//! Step-definition glue for behaviour-driven tests against messaging systems,
//! local shell commands and file systems, remote machines and UI drivers.
//!
//! The heart of the library is message bucket verification: messages are
//! recorded into named buckets and asserted by polling until an expectation
//! holds or the wait runs out.
//!
//! ## Features
//!
//! - **messaging** - Message handlers, bucket recording and polling verification
//! - **system** - Local file system, shell commands and remote machines
//! - **steps** - `SmartSteps` glue over every collaborator (implies the two above)
//! - **full** - Enables all features
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! smart-bdd = { version = "0.1.0", features = ["full"] }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run,ignore
//! use smart_bdd::smart_messaging::{BucketRegistry, MessagingConfig, MessagingManager};
//! use smart_bdd::smart_steps::{SmartSteps, StepContext};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MessagingConfig::new().with_memory_handler("memory", 0);
//!     let messaging = MessagingManager::from_config(&config, Arc::new(BucketRegistry::new()))?;
//!     let steps = SmartSteps::new(StepContext::new().with_messaging(Arc::new(messaging)));
//!
//!     steps.start_recording("memory", "orders").await?;
//!     steps.send_message("memory", "Hello World!!", "text/plain", None).await?;
//!     steps.assert_bucket_size("orders", "=", 1, 10).await?;
//!     Ok(())
//! }
//! ```

// Re-export core data model (always available)
pub use smart_core::*;

// Re-export optional components based on features
#[cfg(feature = "messaging")]
pub use smart_messaging;

#[cfg(feature = "system")]
pub use smart_system;

#[cfg(feature = "steps")]
pub use smart_steps;

// Re-export commonly used dependencies for convenience
pub use serde;
pub use serde_json;
pub use thiserror;
pub use tokio;
pub use tracing;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_types_are_reexported() {
        let criterion = Criterion::parse("$[0].message", "contains", "Hello").unwrap();
        assert_eq!(criterion.operator, ValueMatchOperator::Contains);
        assert_eq!(PollPlan::for_wait(10).attempts(), 5);
    }
}
