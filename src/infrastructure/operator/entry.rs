//! Operator entry point.

/// Concrete implementation of every operator port.
///
/// Stateless: each use-case parses the config it is handed and wires what
/// it needs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Operator;
