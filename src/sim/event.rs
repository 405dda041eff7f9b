use crate::model::StepSnapshot;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of run events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Velocity first entered the band around the setpoint.
    SetpointReached,
    /// The load hit the end stop.
    EndOfBelt,
    /// The drive is commanding torque but the load is not moving.
    Stall,
    Custom(String),
}

/// A discrete event that occurred during a run.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub snapshot: StepSnapshot,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive snapshots and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &StepSnapshot, current: &StepSnapshot) -> Option<EventKind>;
}

/// Fires once when velocity enters `band` of the setpoint from below.
pub struct SetpointDetector {
    pub v_ref: f64,
    pub band: f64,
    fired: bool,
}

impl SetpointDetector {
    pub fn new(v_ref: f64, band: f64) -> Self {
        Self {
            v_ref,
            band,
            fired: false,
        }
    }
}

impl EventDetector for SetpointDetector {
    fn check(&mut self, prev: &StepSnapshot, current: &StepSnapshot) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let lower = self.v_ref - self.band;
        if prev.vel < lower && current.vel >= lower {
            self.fired = true;
            Some(EventKind::SetpointReached)
        } else {
            None
        }
    }
}

/// Fires once when position reaches the belt length.
pub struct EndOfBeltDetector {
    pub length: f64,
    fired: bool,
}

impl EndOfBeltDetector {
    pub fn new(length: f64) -> Self {
        Self { length, fired: false }
    }
}

impl EventDetector for EndOfBeltDetector {
    fn check(&mut self, prev: &StepSnapshot, current: &StepSnapshot) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if prev.pos < self.length && current.pos >= self.length {
            self.fired = true;
            Some(EventKind::EndOfBelt)
        } else {
            None
        }
    }
}

/// Fires once when the drive pushes at rest for `patience` consecutive
/// snapshots without producing any motion.
pub struct StallDetector {
    pub patience: usize,
    at_rest: usize,
    fired: bool,
}

impl StallDetector {
    pub fn new(patience: usize) -> Self {
        Self {
            patience,
            at_rest: 0,
            fired: false,
        }
    }
}

impl EventDetector for StallDetector {
    fn check(&mut self, prev: &StepSnapshot, current: &StepSnapshot) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let pushing = current.torque.abs() > 0.0;
        let stuck = current.vel == 0.0 && current.pos == prev.pos;
        if pushing && stuck {
            self.at_rest += 1;
        } else {
            self.at_rest = 0;
        }
        if self.at_rest >= self.patience {
            self.fired = true;
            Some(EventKind::Stall)
        } else {
            None
        }
    }
}

/// Sweep a detector set over a snapshot sequence, collecting events.
pub fn scan(snapshots: &[StepSnapshot], detectors: &mut [&mut dyn EventDetector]) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for pair in snapshots.windows(2) {
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&pair[0], &pair[1]) {
                events.push(SimEvent {
                    time: pair[1].time,
                    kind,
                    snapshot: pair[1].clone(),
                });
            }
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn snap(time: f64, vel: f64, pos: f64, torque: f64) -> StepSnapshot {
        StepSnapshot {
            time,
            vel,
            torque,
            power: 0.0,
            pos,
            world: Vector2::zeros(),
        }
    }

    #[test]
    fn setpoint_detected_once() {
        let mut det = SetpointDetector::new(0.6, 0.05);
        let prev = snap(0.0, 0.4, 0.1, 25.0);
        let curr = snap(0.05, 0.58, 0.15, 20.0);
        assert_eq!(det.check(&prev, &curr), Some(EventKind::SetpointReached));
        // Should not fire again
        assert!(det.check(&prev, &curr).is_none());
    }

    #[test]
    fn end_of_belt_detected() {
        let mut det = EndOfBeltDetector::new(3.0);
        let prev = snap(5.0, 0.5, 2.99, 13.0);
        let curr = snap(5.05, 0.0, 3.0, 13.0);
        assert_eq!(det.check(&prev, &curr), Some(EventKind::EndOfBelt));
    }

    #[test]
    fn stall_needs_sustained_rest() {
        let mut det = StallDetector::new(3);
        let a = snap(0.0, 0.0, 0.0, 25.0);
        let b = snap(0.05, 0.0, 0.0, 25.0);
        assert!(det.check(&a, &b).is_none());
        assert!(det.check(&a, &b).is_none());
        assert_eq!(det.check(&a, &b), Some(EventKind::Stall));
    }

    #[test]
    fn moving_load_never_stalls() {
        let mut det = StallDetector::new(1);
        let a = snap(0.0, 0.2, 0.1, 25.0);
        let b = snap(0.05, 0.3, 0.12, 25.0);
        assert!(det.check(&a, &b).is_none());
    }

    #[test]
    fn scan_collects_in_time_order() {
        let snaps = vec![
            snap(0.0, 0.0, 0.0, 25.0),
            snap(0.05, 0.56, 0.03, 25.0),
            snap(0.10, 0.5, 3.0, 13.0),
        ];
        let mut setpoint = SetpointDetector::new(0.6, 0.05);
        let mut end = EndOfBeltDetector::new(3.0);
        let events = scan(&snaps, &mut [&mut setpoint, &mut end]);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::SetpointReached);
        assert_eq!(events[1].kind, EventKind::EndOfBelt);
    }
}
