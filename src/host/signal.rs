//! Traffic signals at lane ends
//!
//! A signal stands at the end of one lane and alternates between letting vehicles through
//! and holding them at the stop line.

use bevy::prelude::*;

use super::SimClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalPhase {
    Go,
    Stop,
}

/// A signal guarding the end of `lane`
#[derive(Component, Debug, Clone)]
pub struct TrafficSignal {
    pub lane: Entity,
    pub phase: SignalPhase,
    /// Time spent in the current phase
    pub timer: f32,
    pub go_secs: f32,
    pub stop_secs: f32,
}

impl TrafficSignal {
    pub fn new(lane: Entity, go_secs: f32, stop_secs: f32) -> Self {
        Self {
            lane,
            phase: SignalPhase::Go,
            timer: 0.0,
            go_secs,
            stop_secs,
        }
    }

    pub fn is_stop(&self) -> bool {
        self.phase == SignalPhase::Stop
    }

    /// Advance the phase timer, switching phase when the current one has run out
    pub fn update_timer(&mut self, delta_secs: f32) {
        self.timer += delta_secs;

        let phase_length = match self.phase {
            SignalPhase::Go => self.go_secs,
            SignalPhase::Stop => self.stop_secs,
        };

        if self.timer >= phase_length {
            self.timer -= phase_length;
            self.phase = match self.phase {
                SignalPhase::Go => SignalPhase::Stop,
                SignalPhase::Stop => SignalPhase::Go,
            };
        }
    }
}

/// System to step every signal by one tick
pub fn cycle_signals(clock: Res<SimClock>, mut signals: Query<&mut TrafficSignal>) {
    for mut signal in &mut signals {
        signal.update_timer(clock.delta);
    }
}
