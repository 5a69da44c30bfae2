//! Animation frame bookkeeping passed to emitters.

/// One animation frame: an index and the fixed interval between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub index: u32,
    pub time_interval_in_seconds: f32,
}

impl Frame {
    pub fn new(index: u32, time_interval_in_seconds: f32) -> Self {
        Self {
            index,
            time_interval_in_seconds,
        }
    }

    /// Simulation time at the start of this frame.
    pub fn time_in_seconds(&self) -> f32 {
        self.index as f32 * self.time_interval_in_seconds
    }

    /// Step to the next frame.
    pub fn advance(&mut self) {
        self.index += 1;
    }

    /// Step forward by `frames` frames.
    pub fn advance_by(&mut self, frames: u32) {
        self.index += frames;
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(0, 1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_advance() {
        let mut frame = Frame::new(1, 0.5);
        assert_eq!(frame.time_in_seconds(), 0.5);
        frame.advance();
        assert_eq!(frame.index, 2);
        frame.advance_by(3);
        assert_eq!(frame.time_in_seconds(), 2.5);
    }
}
