//! Linear step ordering shared by the wizards

/// A wizard step in a fixed linear sequence
pub trait Step: Copy + PartialEq + std::fmt::Debug + 'static {
    /// All steps in order
    const ALL: &'static [Self];

    /// Label shown in the step header
    fn title(&self) -> &'static str;

    /// Zero-based position
    fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    fn next(&self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    fn previous(&self) -> Option<Self> {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
    }

    fn is_first(&self) -> bool {
        self.index() == 0
    }

    fn is_last(&self) -> bool {
        self.index() + 1 == Self::ALL.len()
    }
}
