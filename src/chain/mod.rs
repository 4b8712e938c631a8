//! Command chains
//!
//! A chain ties member commands to a main command: members run automatically, in registration
//! order, once the main command has finished, and refuse to run on their own.
//!
//! [`registration`] turns configuration into `(main, member)` pairs, [`registry::ChainRegistry`]
//! stores them and [`interceptor::ChainInterceptor`] enforces them around every dispatch.

pub mod interceptor;
pub mod registration;
pub mod registry;

pub use interceptor::ChainInterceptor;
pub use registry::ChainRegistry;
