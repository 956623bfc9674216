//! Rank planning for todos within a category.
//!
//! Ranks are integers in `MIN_RANK..=MAX_RANK`. Among the not-done todos of
//! one category ranks are kept unique by shifting: when a todo is placed on
//! a rank that an active todo already holds, every active todo at or above
//! that rank moves up by one. Done todos never take part in a shift and may
//! share a rank with an active todo.
//!
//! The functions here only compute plans. Applying them (and holding the
//! transaction that makes the shift atomic) is the job of the db crate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Lowest rank a todo may hold.
pub const MIN_RANK: i32 = 1;

/// Highest rank a todo may hold.
pub const MAX_RANK: i32 = 100;

/// The current rank of one not-done todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankSlot {
    pub id: DbId,
    pub rank: i32,
}

/// A single rank change produced by a shift plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankMove {
    pub id: DbId,
    pub from: i32,
    pub to: i32,
}

/// One entry of a bulk reorder request: set todo `id` to `rank`.
///
/// Unknown JSON keys are ignored, so clients may send full todo views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankAssignment {
    pub id: DbId,
    pub rank: i32,
}

/// Validate that a rank lies in `MIN_RANK..=MAX_RANK`.
pub fn validate_rank(rank: i32) -> Result<(), String> {
    if (MIN_RANK..=MAX_RANK).contains(&rank) {
        Ok(())
    } else {
        Err(format!(
            "Rank must be between {MIN_RANK} and {MAX_RANK}, got {rank}"
        ))
    }
}

/// Whether an active todo other than `exclude` holds `rank`.
pub fn is_occupied(active: &[RankSlot], rank: i32, exclude: Option<DbId>) -> bool {
    active
        .iter()
        .any(|slot| slot.rank == rank && Some(slot.id) != exclude)
}

/// Plan the moves needed to free `requested` for a todo being placed there.
///
/// `active` holds the not-done todos of the destination category. `exclude`
/// is the todo being placed when it already lives in that category; it is
/// never moved by its own shift.
///
/// Returns an empty plan when the rank is free. Otherwise every other active
/// todo with `rank >= requested` moves up by exactly one, listed in ascending
/// rank order (ties broken by id). Fails with [`CoreError::Conflict`] when the
/// shift would push a todo past [`MAX_RANK`].
pub fn plan_shift(
    active: &[RankSlot],
    requested: i32,
    exclude: Option<DbId>,
) -> Result<Vec<RankMove>, CoreError> {
    if !is_occupied(active, requested, exclude) {
        return Ok(Vec::new());
    }

    let mut to_shift: Vec<RankSlot> = active
        .iter()
        .filter(|slot| slot.rank >= requested && Some(slot.id) != exclude)
        .copied()
        .collect();
    to_shift.sort_by_key(|slot| (slot.rank, slot.id));

    if let Some(top) = to_shift.iter().find(|slot| slot.rank >= MAX_RANK) {
        return Err(CoreError::Conflict(format!(
            "Cannot place a todo at rank {requested}: todo {} would be shifted past rank {MAX_RANK}",
            top.id
        )));
    }

    Ok(to_shift
        .into_iter()
        .map(|slot| RankMove {
            id: slot.id,
            from: slot.rank,
            to: slot.rank + 1,
        })
        .collect())
}

/// Validate a bulk reorder batch before it touches the store.
///
/// Every rank must be in range and no id may appear twice. Ranks are not
/// checked against each other: the caller supplies the whole permutation
/// and done todos may legitimately share a rank.
pub fn validate_reorder(batch: &[RankAssignment]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(batch.len());
    for entry in batch {
        validate_rank(entry.rank).map_err(|msg| {
            CoreError::Validation(format!("Todo {}: {msg}", entry.id))
        })?;
        if !seen.insert(entry.id) {
            return Err(CoreError::Validation(format!(
                "Todo {} appears more than once in the reorder batch",
                entry.id
            )));
        }
    }
    Ok(())
}
