/// Components are the unit of state in arpsim. A component is a plain struct advanced one
/// tick at a time through its `step` function, which samples an inputs struct and returns an
/// outputs struct describing the transfers that completed during that tick. All handshakes are
/// valid/ready pairs spelled out in the port structs: an `Option<T>` input is an asserted valid
/// with its payload, a `bool` input is an asserted ready, and a producer keeps presenting the
/// same item until the matching `taken` flag comes back. Level signals that a neighboring
/// component needs to sample before the tick (a query currently on offer, readiness for a
/// reply) are exposed as probe methods, which is how the `Resolver` composite wires the cache
/// and table together without a combinational call cycle. `reset` drops in-flight work without
/// emitting responses; table storage is not control state and survives it.
pub mod component;

/// Configuration structs handed to component constructors. Components capture their
/// configuration at construction and never read it from anywhere else, so a wiring diagram is
/// fully described by the constructor calls that built it.
pub mod config;

/// Event tracing. There is no logging framework here; a trace is a sink that writes one Debug
/// line per recorded event, prefixed with the tick it happened on, so a test or a demo can
/// keep a replayable record of what a component did.
pub mod trace;
