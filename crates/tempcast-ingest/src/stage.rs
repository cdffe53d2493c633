use std::fmt;

/// Where an ingestion cycle currently is.
///
/// A cycle moves `Idle → Fetching → Parsing → Upserting → Done`; a failure in
/// any stage goes straight to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestStage {
    #[default]
    Idle,
    Fetching,
    Parsing,
    Upserting,
    Done,
    Failed,
}

impl IngestStage {
    /// True once the cycle has finished, successfully or not.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// The stage that follows this one on success.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Fetching),
            Self::Fetching => Some(Self::Parsing),
            Self::Parsing => Some(Self::Upserting),
            Self::Upserting => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::Upserting => "upserting",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
