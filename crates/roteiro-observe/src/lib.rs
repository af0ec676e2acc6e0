//! Observability setup for roteiro: log filtering, formatting and the
//! optional OpenTelemetry bridge.

pub mod tracing_setup;
