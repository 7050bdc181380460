//! Initiative auction - supply bids decide who acts first
//!
//! Bids only ever go up: a bid is accepted iff it strictly exceeds the
//! player's last accepted bid (conceptually 0 before the first). Rejected
//! bids are silent no-ops. Turn order is re-derived after every accepted bid
//! once the table is full, so late raises reshuffle the order rather than
//! arriving too late.

use ahash::AHashMap;

use crate::core::types::PlayerId;

/// Record a bid if it strictly exceeds the player's previous accepted bid
///
/// Returns whether the bid was accepted. The amount is an abstract supply
/// quantity; spending it against the kingdom economy is the caller's
/// business before it gets here.
pub fn accept_bid(supplies: &mut AHashMap<PlayerId, u32>, player: PlayerId, amount: u32) -> bool {
    let previous = supplies.get(&player).copied().unwrap_or(0);
    if amount <= previous {
        return false;
    }
    supplies.insert(player, amount);
    true
}

/// Derive turn order from a full set of bids
///
/// Descending bid value; ties keep declaration order (stable sort). Callers
/// invoke this after every accepted bid once every player in
/// `declaration_order` has a bid - never as a one-shot "finalize".
pub fn compute_order(
    supplies: &AHashMap<PlayerId, u32>,
    declaration_order: &[PlayerId],
) -> Vec<PlayerId> {
    let mut order: Vec<PlayerId> = declaration_order.to_vec();
    order.sort_by_key(|id| std::cmp::Reverse(supplies.get(id).copied().unwrap_or(0)));
    order
}

/// Has every declared player placed at least one accepted bid?
pub fn all_players_bid(
    supplies: &AHashMap<PlayerId, u32>,
    declaration_order: &[PlayerId],
) -> bool {
    declaration_order.iter().all(|id| supplies.contains_key(id))
}
