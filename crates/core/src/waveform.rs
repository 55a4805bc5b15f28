//! Triangular pulse waveform.
//!
//! The brightness level ramps from 0 up to 1 and back down by a fixed step per tick. Levels
//! are tracked as integer positions on a `0..=resolution` scale, so the ramp boundaries are
//! reached exactly regardless of how many ticks have been applied.

/// Default level increment per tick.
pub const DEFAULT_STEP: f32 = 0.05;

/// Ramp direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Level increases by one step per tick.
    #[default]
    Rising,
    /// Level decreases by one step per tick.
    Falling,
}

/// Position on the triangle ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Phase {
    /// Level expressed in steps, `0` is off and `resolution` is the full brightness.
    pub position: u16,
    pub direction: Direction,
}

/// Result of a single waveform step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub phase: Phase,
    /// Set when the step has started from the bottom of the ramp.
    pub cycle_completed: bool,
}

/// Triangle wave shape with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    resolution: u16,
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl Triangle {
    /// Creates a new triangle shape with the given level increment.
    ///
    /// # Panics
    ///
    /// - If the step is not in the `(0, 1]` range.
    pub fn new(step: f32) -> Self {
        assert!(
            step > 0.0 && step <= 1.0,
            "The waveform step should be in the (0, 1] range"
        );
        let resolution = (1.0 / step).round().clamp(1.0, f32::from(u16::MAX)) as u16;
        Self { resolution }
    }

    /// Returns the number of steps of a single ramp.
    pub fn resolution(&self) -> u16 {
        self.resolution
    }

    /// Returns the brightness level of the given phase in the `[0, 1]` range.
    pub fn level(&self, phase: Phase) -> f32 {
        f32::from(phase.position.min(self.resolution)) / f32::from(self.resolution)
    }

    /// Computes the next phase.
    ///
    /// At the bottom the direction turns to rising and a cycle is counted, at the top the
    /// direction turns to falling. Then the level moves by one step.
    pub fn step(&self, phase: Phase) -> StepOutcome {
        let mut direction = phase.direction;
        let mut cycle_completed = false;

        if phase.position == 0 {
            direction = Direction::Rising;
            cycle_completed = true;
        } else if phase.position >= self.resolution {
            direction = Direction::Falling;
        }

        let position = match direction {
            Direction::Rising => phase.position.saturating_add(1).min(self.resolution),
            Direction::Falling => phase.position.min(self.resolution).saturating_sub(1),
        };

        StepOutcome {
            phase: Phase {
                position,
                direction,
            },
            cycle_completed,
        }
    }
}

/// Stateful pulse waveform driven by the animation scheduler.
#[derive(Debug, Clone, Default)]
pub struct Waveform {
    triangle: Triangle,
    phase: Phase,
    completed_cycles: u32,
}

impl Waveform {
    /// Creates a new waveform starting at the zero level.
    pub fn new(triangle: Triangle) -> Self {
        Self {
            triangle,
            phase: Phase::default(),
            completed_cycles: 0,
        }
    }

    /// Applies a single step and returns a new level.
    pub fn advance(&mut self) -> f32 {
        let outcome = self.triangle.step(self.phase);
        self.phase = outcome.phase;
        if outcome.cycle_completed {
            self.completed_cycles += 1;
        }
        self.level()
    }

    /// Returns the current level.
    pub fn level(&self) -> f32 {
        self.triangle.level(self.phase)
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the number of the zero level crossings.
    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }
}
