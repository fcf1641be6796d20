use std::fmt;

/// Which engine slot produced a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptSource {
    Primary,
    Fallback,
}

impl TranscriptSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for TranscriptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    pub engine: String,
    pub source: TranscriptSource,
}

impl Transcript {
    pub fn new(text: String, engine: impl Into<String>, source: TranscriptSource) -> Self {
        Self {
            text,
            engine: engine.into(),
            source,
        }
    }
}
