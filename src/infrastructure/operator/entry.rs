//! Concrete operator behind the inbound operator ports.

/// Implements every operator use case over the configured adapters.
///
/// Stateless: each call parses the configuration it is given and opens
/// the sources it needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Operator;

impl Operator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}
