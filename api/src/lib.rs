// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup wiring
// - domain: posts, comments, tags
// - application: ports, use cases and the pure services behind them
// - infrastructure: Postgres adapters for the ports
// - presentation: HTTP handlers and routing

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
mod test_support;
