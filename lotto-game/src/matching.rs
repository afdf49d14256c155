//! Overlap counting between a draw and a ticket.
use crate::draw::NumberSet;
use crate::ticket::Ticket;

/// Count values present in both `a` and `b`.
///
/// Both sides must hold unique values; order does not matter.
#[must_use]
pub fn count_matches(a: &[u32], b: &[u32]) -> usize {
    let mut left: NumberSet = a.iter().copied().collect();
    let mut right: NumberSet = b.iter().copied().collect();
    left.sort_unstable();
    right.sort_unstable();

    let (mut i, mut j, mut matches) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                matches += 1;
                i += 1;
                j += 1;
            }
        }
    }
    matches
}

/// Ticket membership mask for constant-time lookups during a run.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    mask: Vec<bool>,
    ticket_size: usize,
}

impl MatchEngine {
    #[must_use]
    pub fn new(ticket: &Ticket) -> Self {
        let highest = ticket.numbers().iter().copied().max().unwrap_or(0);
        let mut mask = vec![false; highest as usize + 1];
        for &number in ticket.numbers() {
            mask[number as usize] = true;
        }
        Self {
            mask,
            ticket_size: ticket.len(),
        }
    }

    /// Number of drawn values on the ticket.
    #[must_use]
    pub fn count(&self, drawn: &[u32]) -> usize {
        drawn
            .iter()
            .filter(|&&number| self.mask.get(number as usize).copied().unwrap_or(false))
            .count()
    }

    /// Whether `matches` is a full match.
    #[must_use]
    pub const fn is_jackpot(&self, matches: usize) -> bool {
        matches == self.ticket_size
    }

    #[must_use]
    pub const fn ticket_size(&self) -> usize {
        self.ticket_size
    }
}
