/// Stream parameters read from a validated RIFF/WAVE header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub channels: u16,
    /// Bytes per sample, per channel.
    pub sample_width: u16,
    pub frame_rate: u32,
    pub frames: u32,
}

impl AudioFormat {
    pub fn duration_secs(&self) -> f32 {
        if self.frame_rate == 0 {
            return 0.0;
        }
        self.frames as f32 / self.frame_rate as f32
    }
}
