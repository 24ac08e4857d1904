//=========================================================================
// Schedule
//=========================================================================
//
// Declarative, validated list of timeline entries for one scope.
//
// A schedule is data: (delay, action) pairs measured from the scope's
// zero point. Delays must be strictly increasing so the authored order
// and the firing order are the same thing.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::TimelineError;

//=== TimelineEntry =======================================================

/// A single (delay, action) pair belonging to one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry<A> {
    /// Time since the scope's zero point.
    pub delay: Duration,

    /// Action delivered when the delay has elapsed.
    pub action: A,
}

impl<A> TimelineEntry<A> {
    pub fn new(delay: Duration, action: A) -> Self {
        Self { delay, action }
    }

    pub fn after_millis(millis: u64, action: A) -> Self {
        Self::new(Duration::from_millis(millis), action)
    }
}

//=== Schedule ============================================================

/// Ordered sequence of timeline entries with strictly increasing delays.
///
/// # Example
///
/// ```
/// # use reveal_engine::core::timeline::{Schedule, TimelineEntry};
/// let schedule = Schedule::new(vec![
///     TimelineEntry::after_millis(1000, "first"),
///     TimelineEntry::after_millis(2500, "second"),
/// ]).unwrap();
///
/// assert_eq!(schedule.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule<A> {
    entries: Vec<TimelineEntry<A>>,
}

impl<A> Schedule<A> {
    //--- Construction -----------------------------------------------------

    /// Validates and wraps a list of entries.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::NonIncreasingDelay`] for the first entry
    /// whose delay is not strictly greater than its predecessor's.
    pub fn new(entries: Vec<TimelineEntry<A>>) -> Result<Self, TimelineError> {
        for (index, pair) in entries.windows(2).enumerate() {
            if pair[1].delay <= pair[0].delay {
                return Err(TimelineError::NonIncreasingDelay {
                    index: index + 1,
                    previous: pair[0].delay,
                    delay: pair[1].delay,
                });
            }
        }

        Ok(Self { entries })
    }

    /// Schedule with no entries.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Builds a schedule from a built-in millisecond table.
    ///
    /// Only used for the hard-coded scripts, whose ordering is covered by
    /// tests.
    pub(crate) fn from_millis(table: &[(u64, A)]) -> Self
    where
        A: Copy,
    {
        debug_assert!(
            table.windows(2).all(|pair| pair[0].0 < pair[1].0),
            "built-in schedule delays must be strictly increasing"
        );

        Self {
            entries: table
                .iter()
                .map(|&(millis, action)| TimelineEntry::after_millis(millis, action))
                .collect(),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn entries(&self) -> &[TimelineEntry<A>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delay of the last entry, or zero for an empty schedule.
    pub fn span(&self) -> Duration {
        self.entries.last().map_or(Duration::ZERO, |entry| entry.delay)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimelineEntry<A>> {
        self.entries.iter()
    }
}

impl<A> Default for Schedule<A> {
    fn default() -> Self {
        Self::empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_strictly_increasing_delays() {
        let schedule = Schedule::new(vec![
            TimelineEntry::after_millis(0, 'a'),
            TimelineEntry::after_millis(10, 'b'),
            TimelineEntry::after_millis(20, 'c'),
        ])
        .unwrap();

        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.span(), Duration::from_millis(20));
    }

    #[test]
    fn rejects_equal_delays() {
        let result = Schedule::new(vec![
            TimelineEntry::after_millis(100, 1),
            TimelineEntry::after_millis(100, 2),
        ]);

        assert_eq!(
            result,
            Err(TimelineError::NonIncreasingDelay {
                index: 1,
                previous: Duration::from_millis(100),
                delay: Duration::from_millis(100),
            })
        );
    }

    #[test]
    fn rejects_reordered_delays() {
        let result = Schedule::new(vec![
            TimelineEntry::after_millis(10, 1),
            TimelineEntry::after_millis(30, 2),
            TimelineEntry::after_millis(20, 3),
        ]);

        assert!(matches!(
            result,
            Err(TimelineError::NonIncreasingDelay { index: 2, .. })
        ));
    }

    #[test]
    fn empty_schedule_has_zero_span() {
        let schedule: Schedule<u8> = Schedule::empty();
        assert!(schedule.is_empty());
        assert_eq!(schedule.span(), Duration::ZERO);
    }

    #[test]
    fn from_millis_preserves_order() {
        let schedule = Schedule::from_millis(&[(5, 'x'), (9, 'y')]);
        let actions: Vec<char> = schedule.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec!['x', 'y']);
    }
}
