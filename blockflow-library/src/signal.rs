//! Stateful signal blocks.
//!
//! These blocks keep state across ticks, which is why [`Compute`] takes
//! `&mut self`. Time is measured in ticks, never wall clock, so behavior
//! is deterministic under test.

use crate::logic::bool_input;
use blockflow_core::prelude::*;

/// Rising edge detector.
///
/// Output is true for exactly one tick when the input transitions from
/// false to true.
#[derive(Debug, Clone, Default)]
pub struct RisingEdge {
    last: bool,
}

impl RisingEdge {
    /// Create a detector with no prior sample.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Compute for RisingEdge {
    fn compute(&mut self, inputs: &InputValues) -> Result<Option<ComputeOutput>> {
        let current = bool_input(inputs, "in");
        let fired = current && !self.last;
        self.last = current;
        Ok(Some(ComputeOutput::scalar(fired)))
    }
}

/// Tick-counted square wave.
///
/// Over each period the output is true for the first half (rounded up)
/// and false for the rest. A period of 2 alternates every tick.
#[derive(Debug, Clone)]
pub struct Pulse {
    period: u64,
    counter: u64,
}

impl Pulse {
    /// Create a pulse with the given period in ticks. Periods below 2 are
    /// clamped to 2.
    pub fn new(period: u64) -> Self {
        Self {
            period: period.max(2),
            counter: 0,
        }
    }
}

impl Compute for Pulse {
    fn compute(&mut self, _inputs: &InputValues) -> Result<Option<ComputeOutput>> {
        let high = self.counter < self.period.div_ceil(2);
        self.counter = (self.counter + 1) % self.period;
        Ok(Some(ComputeOutput::scalar(high)))
    }
}

/// A ported rising edge detector: input "in", output "out".
pub fn rising_edge(name: impl Into<String>) -> FunctionBlock {
    FunctionBlock::new(name, RisingEdge::new())
        .with_input(InputPort::new("in").with_type("BOOL"))
        .with_output(OutputPort::new("out").with_type("BOOL"))
}

/// A ported pulse generator: no inputs, output "out".
pub fn pulse(name: impl Into<String>, period: u64) -> FunctionBlock {
    FunctionBlock::new(name, Pulse::new(period))
        .with_output(OutputPort::new("out").with_type("BOOL"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bool_in(v: bool) -> InputValues {
        [("in".to_string(), Value::bool(v))].into_iter().collect()
    }

    fn out_bool(out: Option<ComputeOutput>) -> bool {
        match out {
            Some(ComputeOutput::Scalar(v)) => v.as_bool().unwrap(),
            other => panic!("expected scalar, got {:?}", other),
        }
    }

    #[test]
    fn rising_edge_fires_once_per_transition() {
        let mut edge = RisingEdge::new();

        assert!(out_bool(edge.compute(&bool_in(true)).unwrap()));
        assert!(!out_bool(edge.compute(&bool_in(true)).unwrap()));
        assert!(!out_bool(edge.compute(&bool_in(false)).unwrap()));
        assert!(out_bool(edge.compute(&bool_in(true)).unwrap()));
    }

    #[test]
    fn rising_edge_starts_low() {
        let mut edge = RisingEdge::new();
        assert!(!out_bool(edge.compute(&bool_in(false)).unwrap()));
    }

    #[test]
    fn pulse_alternates_with_period_two() {
        let mut p = Pulse::new(2);
        let empty = InputValues::new();

        let wave: Vec<bool> = (0..6)
            .map(|_| out_bool(p.compute(&empty).unwrap()))
            .collect();
        assert_eq!(wave, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn pulse_odd_period_rounds_high_half_up() {
        let mut p = Pulse::new(3);
        let empty = InputValues::new();

        let wave: Vec<bool> = (0..6)
            .map(|_| out_bool(p.compute(&empty).unwrap()))
            .collect();
        assert_eq!(wave, vec![true, true, false, true, true, false]);
    }

    #[test]
    fn pulse_clamps_degenerate_period() {
        let mut p = Pulse::new(0);
        let empty = InputValues::new();

        assert!(out_bool(p.compute(&empty).unwrap()));
        assert!(!out_bool(p.compute(&empty).unwrap()));
    }
}
