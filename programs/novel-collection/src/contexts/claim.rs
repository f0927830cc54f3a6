use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;

use crate::errors::NovelCollectionError;
use crate::events::ItemsClaimed;
use crate::registry::{CoreItemRegistry, ItemRegistry};
use crate::state::*;

// ============================================================================
// CLAIM - Whitelisted issuance of sequentially numbered items
// ============================================================================

/// Claim `amount` items against the caller's allowance
///
/// Remaining accounts: one item asset PDA per claimed item, in id order
/// (see `registry::item_address`).
#[derive(Accounts)]
pub struct ClaimItems<'info> {
    #[account(
        mut,
        seeds = [COLLECTION_SEED, collection.collection_asset.as_ref()],
        bump = collection.bump
    )]
    pub collection: Box<Account<'info, Collection>>,

    /// The claimant's allowance; omitted when they were never whitelisted
    #[account(
        mut,
        seeds = [ALLOWANCE_SEED, collection.key().as_ref(), claimant.key().as_ref()],
        bump
    )]
    pub allowance: Option<Account<'info, Allowance>>,

    /// The Metaplex Core Collection asset
    /// CHECK: Verified via collection.collection_asset
    #[account(
        mut,
        address = collection.collection_asset @ NovelCollectionError::InvalidCollectionAsset
    )]
    pub collection_asset: AccountInfo<'info>,

    /// Pays for and receives the items
    #[account(mut)]
    pub claimant: Signer<'info>,

    /// CHECK: Metaplex Core program
    #[account(address = mpl_core::ID)]
    pub mpl_core_program: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> ClaimItems<'info> {
    pub fn handler(ctx: Context<'_, '_, 'info, 'info, ClaimItems<'info>>, amount: u64) -> Result<()> {
        let timestamp = Clock::get()?.unix_timestamp;
        let claimant = ctx.accounts.claimant.key();

        // =====================================================================
        // STEP 1: Validate and commit allowance + issued count
        // =====================================================================

        let allowance = ctx.accounts.allowance.as_deref_mut();
        let grant = ctx
            .accounts
            .collection
            .reserve(allowance, &claimant, amount)?;

        // Persist before Metaplex Core gets control
        ctx.accounts.collection.exit(&crate::ID)?;
        if let Some(allowance) = &ctx.accounts.allowance {
            allowance.exit(&crate::ID)?;
        }

        // =====================================================================
        // STEP 2: Issue the items
        // =====================================================================

        let mut registry = CoreItemRegistry {
            mpl_core_program: ctx.accounts.mpl_core_program.to_account_info(),
            collection_asset: ctx.accounts.collection_asset.to_account_info(),
            authority: ctx.accounts.collection.to_account_info(),
            payer: ctx.accounts.claimant.to_account_info(),
            owner: ctx.accounts.claimant.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
            item_accounts: ctx.remaining_accounts,
        };
        registry.issue(&ctx.accounts.collection, &grant)?;

        let collection = &ctx.accounts.collection;
        msg!(
            "Claimed {} items: remaining_allowance={}, issued={}/{}",
            amount,
            grant.remaining_allowance,
            collection.issued_count,
            collection.supply_cap
        );

        emit!(ItemsClaimed {
            collection: collection.key(),
            claimant,
            first_item_id: grant.first_item_id,
            amount,
            remaining_allowance: grant.remaining_allowance,
            issued_count: collection.issued_count,
            timestamp,
        });

        Ok(())
    }
}
