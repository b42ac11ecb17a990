//! The single decision point for when a purchase debits the shared
//! committed-supply counter. Both purchase paths and the deferred
//! exercise debit go through `checked_commit`, so the cap invariant
//! has exactly one enforcement site.

/// When an option purchase debits the committed-supply counter.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SupplyMode {
    /// Debit at issue: an unexercised option holds capacity a direct
    /// buyer could otherwise have claimed
    Synced,
    /// Debit at exercise: issuance only probes remaining capacity, so
    /// outstanding options can exceed what direct purchases have left
    Deferred,
}

impl SupplyMode {
    pub fn for_round(sync_supply: bool) -> Self {
        if sync_supply {
            SupplyMode::Synced
        } else {
            SupplyMode::Deferred
        }
    }

    pub fn debits_at_issue(self) -> bool {
        matches!(self, SupplyMode::Synced)
    }
}

/// New committed count after taking `amount` units, or `None` when the
/// request would push past the cap.
pub fn checked_commit(minted: u32, amount: u32, cap: u32) -> Option<u32> {
    let new_minted = minted.checked_add(amount)?;
    if new_minted > cap {
        return None;
    }
    Some(new_minted)
}
