//! Model gateway: adapts heterogeneous model-serving backends to a single
//! uniform chat interface.
//!
//! Provides `AdapterSpec`/`AdapterRegistry` for endpoint and payload-shape
//! selection, ordered response-shape reduction, and `ModelGateway` — a total
//! function from `(prompt, model)` to a `ChatAnswer`.

mod adapter;
mod gateway;
mod payload;
mod reduce;

pub use adapter::*;
pub use gateway::ModelGateway;
pub use payload::{build_payload, MENTOR_PERSONA};
pub use reduce::reduce;
