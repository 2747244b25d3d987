//! Load-balancing selection.
//!
//! The eligible member with the fewest watches so far in the run wins.
//! Equal loads are broken by a fresh random shuffle for every slot, so no
//! fixed roster order keeps favouring the same person.

use rand::seq::SliceRandom;
use rand::Rng;

/// A member that passed the availability and rotation filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Member ID.
    pub member_id: &'a str,
    /// Watches assigned to the member so far in this run.
    pub load: u32,
}

/// Picks the least-loaded candidate, breaking ties with `rng`.
///
/// Returns `None` for an empty candidate list. With a seeded `rng`, the
/// same candidates always produce the same winner.
pub fn select_member<'a, R: Rng + ?Sized>(
    mut candidates: Vec<Candidate<'a>>,
    rng: &mut R,
) -> Option<Candidate<'a>> {
    candidates.shuffle(rng);
    // Stable: shuffled order survives among equal loads.
    candidates.sort_by_key(|c| c.load);
    candidates.into_iter().next()
}
