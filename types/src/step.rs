/// Whether a pipeline step holds back the step declared after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepMode {
    /// The next step starts only after this one settles.
    #[default]
    Blocking,
    /// The next step may start as soon as this one has been scheduled.
    Concurrent,
}

impl StepMode {
    #[must_use]
    pub const fn from_blocking(blocking: bool) -> Self {
        if blocking {
            Self::Blocking
        } else {
            Self::Concurrent
        }
    }

    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Blocking)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocking => "blocking",
            Self::Concurrent => "concurrent",
        }
    }
}
