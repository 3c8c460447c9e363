/*!
    Paced source configuration types.
*/

use tokio::time::MissedTickBehavior;

/**
    What the pacing gate does when the consumer falls behind.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum MissedTicks {
    /// Deliver one frame immediately, then resume the original schedule.
    #[default]
    Skip,
    /// Deliver every missed frame back to back until caught up.
    Burst,
    /// Restart the schedule from the moment of the late delivery.
    Delay,
}

impl From<MissedTicks> for MissedTickBehavior {
    fn from(value: MissedTicks) -> Self {
        match value {
            MissedTicks::Skip => Self::Skip,
            MissedTicks::Burst => Self::Burst,
            MissedTicks::Delay => Self::Delay,
        }
    }
}

/**
    Configuration for a paced frame source.
*/
#[derive(Clone, Debug, Default)]
pub struct SourceConfig {
    /// Pace at this rate instead of the one declared in the header.
    pub frame_rate_override: Option<u32>,
    /// Behavior when pulls arrive later than their tick.
    pub missed_ticks: MissedTicks,
}

impl SourceConfig {
    /**
        Create a new config that paces at the header's frame rate.
    */
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Pace at `frame_rate` frames per second regardless of the header.
    */
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate_override = Some(frame_rate);
        self
    }

    /**
        Set the behavior for pulls that arrive late.
    */
    pub fn with_missed_ticks(mut self, missed_ticks: MissedTicks) -> Self {
        self.missed_ticks = missed_ticks;
        self
    }

    /**
        The rate to pace at, given the header's declared rate.
    */
    pub(crate) fn effective_frame_rate(&self, declared: u32) -> u32 {
        self.frame_rate_override.unwrap_or(declared)
    }
}
