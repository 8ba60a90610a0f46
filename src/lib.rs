// Module layout (Clean Architecture style)
// - bootstrap: configuration, startup and the shared AppContext
// - infrastructure: Postgres, upload filesystem and chat HTTP adapters
// - presentation: HTTP handlers, session cookies and routing
// - application: form schemas, ports, use cases and certificate rendering
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
