mod cache;
pub use self::cache::*;

mod encoder;
pub use self::encoder::*;

mod resolver;
pub use self::resolver::*;

mod table;
pub use self::table::*;

/// A synchronous component advanced one tick at a time. See the module documentation on the
/// crate root for the valid/ready conventions the port structs follow.
pub trait Component {
    type Inputs;
    type Outputs;

    /// Samples `inputs`, advances one tick, and reports the transfers that completed.
    fn step(&mut self, inputs: Self::Inputs) -> Self::Outputs;

    /// Drops in-flight work and returns control state to the post-construction condition,
    /// without emitting any response.
    fn reset(&mut self);
}
