use anchor_lang::prelude::*;

use crate::state::*;

/// Read-only access to a collection (views)
#[derive(Accounts)]
pub struct ViewCollection<'info> {
    #[account(
        seeds = [COLLECTION_SEED, collection.collection_asset.as_ref()],
        bump = collection.bump
    )]
    pub collection: Box<Account<'info, Collection>>,
}

/// Read-only access to a collection and one claimant's allowance (views)
#[derive(Accounts)]
#[instruction(claimant: Pubkey)]
pub struct ViewAllowance<'info> {
    #[account(
        seeds = [COLLECTION_SEED, collection.collection_asset.as_ref()],
        bump = collection.bump
    )]
    pub collection: Box<Account<'info, Collection>>,

    /// Omit for a claimant that was never whitelisted
    #[account(
        seeds = [ALLOWANCE_SEED, collection.key().as_ref(), claimant.as_ref()],
        bump
    )]
    pub allowance: Option<Account<'info, Allowance>>,
}

impl ViewAllowance<'_> {
    /// Remaining allowance of `claimant`, 0 without an allowance account
    pub fn remaining(&self, claimant: &Pubkey) -> u64 {
        self.allowance
            .as_ref()
            .filter(|a| a.claimant == *claimant)
            .map_or(0, |a| a.remaining)
    }
}
