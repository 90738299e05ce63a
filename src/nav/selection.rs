use std::ops::RangeInclusive;

/// The start/end marks of a byte selection.
///
/// An [`Anchored`](Selection::Anchored) selection is open-ended: its far end
/// follows the live cursor. Either end may be the larger one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Anchored(usize),
    Closed { start: usize, end: usize },
}

impl Selection {
    /// Advance the three-state cycle `None -> Anchored -> Closed -> None`.
    #[must_use]
    pub const fn toggle(self, cursor: usize) -> Self {
        match self {
            Self::None => Self::Anchored(cursor),
            Self::Anchored(start) => Self::Closed { start, end: cursor },
            Self::Closed { .. } => Self::None,
        }
    }

    pub const fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }

    /// The start mark, if one is set.
    pub const fn start(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Anchored(start) | Self::Closed { start, .. } => Some(start),
        }
    }

    /// The effective end mark: the recorded end, or `cursor` while anchored.
    pub const fn end(self, cursor: usize) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Anchored(_) => Some(cursor),
            Self::Closed { end, .. } => Some(end),
        }
    }

    /// Inclusive selected interval, ordered low to high.
    pub fn range(self, cursor: usize) -> Option<RangeInclusive<usize>> {
        let start = self.start()?;
        let end = self.end(cursor)?;
        Some(start.min(end)..=start.max(end))
    }

    pub fn contains(self, cursor: usize, address: usize) -> bool {
        self.range(cursor).is_some_and(|r| r.contains(&address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_three_times_returns_to_none() {
        let sel = Selection::None.toggle(4);
        assert_eq!(sel, Selection::Anchored(4));
        let sel = sel.toggle(9);
        assert_eq!(sel, Selection::Closed { start: 4, end: 9 });
        let sel = sel.toggle(12);
        assert_eq!(sel, Selection::None);
    }

    #[test]
    fn test_anchored_range_follows_cursor() {
        let sel = Selection::Anchored(10);
        assert_eq!(sel.range(14), Some(10..=14));
        assert_eq!(sel.range(3), Some(3..=10));
    }

    #[test]
    fn test_closed_range_is_ordered_regardless_of_entry_order() {
        let backwards = Selection::Closed { start: 20, end: 5 };
        assert_eq!(backwards.range(0), Some(5..=20));
        assert!(backwards.contains(0, 5));
        assert!(backwards.contains(0, 20));
        assert!(!backwards.contains(0, 21));
    }

    #[test]
    fn test_none_has_no_range() {
        assert_eq!(Selection::None.range(3), None);
        assert!(!Selection::None.contains(3, 3));
        assert!(!Selection::None.is_active());
    }
}
