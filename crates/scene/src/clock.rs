//! Scene clock and the rhythm function derived from it.
//!
//! All animated quantities run off `time` shifted by [`PHASE_OFFSET`] so the
//! beat, the lattice breathing, the cell wobble and the camera drift share one
//! phase origin. Each consumer scales the raw seconds differently, which is
//! why the individual phases are exposed rather than a single warped time.

/// Common phase origin shared by every animated term.
const PHASE_OFFSET: f32 = 0.625;

/// Read-only snapshot of the external monotonic clock, taken once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneClock {
    seconds: f32,
}

impl SceneClock {
    pub fn new(seconds: f32) -> Self {
        Self { seconds }
    }

    pub fn seconds(&self) -> f32 {
        self.seconds
    }

    /// Slow phase driving the zoom pulse and the autonomous camera orbit.
    pub fn drift_phase(&self) -> f32 {
        PHASE_OFFSET + 0.125 * self.seconds
    }

    /// Unit-rate phase driving the rhythm envelope and the lattice spacing.
    pub fn envelope_phase(&self) -> f32 {
        PHASE_OFFSET + self.seconds
    }

    /// Fast phase driving the per-cell anisotropic scale wobble.
    pub fn wobble_phase(&self) -> f32 {
        PHASE_OFFSET + 10.0 * self.seconds
    }

    /// Sawtooth in `[0, 1)` with period one second, total over negative time.
    pub fn beat_phase(&self) -> f32 {
        (self.seconds - PHASE_OFFSET).rem_euclid(1.0)
    }

    /// Pulse in `[0, 1)` that strobes the displacement field and the tint.
    ///
    /// The beat sawtooth is gated by two half-wave ramps of the envelope
    /// phase; whichever ramp is closer to zero wins. The formula is kept
    /// exactly as the scene defines it rather than simplified.
    pub fn rhythm(&self) -> f32 {
        let beat = self.beat_phase();
        let phase = self.envelope_phase();

        -f32::max(
            beat * (0.5 * -phase.cos() - 0.5),
            beat * (0.5 * phase.sin() - 0.5),
        )
    }
}
