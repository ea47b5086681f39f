//! Backend access for the catalogue: the [`BackendGateway`] seam, its
//! reqwest implementation, the per-request tenant context, and the codec
//! that owns every wire-format conversion.

pub mod codec;
pub mod context;
pub mod error;
pub mod gateway;
pub mod http;

pub use context::{RequestContext, TENANT_HEADER};
pub use error::GatewayError;
pub use gateway::BackendGateway;
pub use http::HttpGateway;
