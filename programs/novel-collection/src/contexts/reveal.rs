use anchor_lang::prelude::*;

use crate::entropy::SlotHashEntropy;
use crate::events::CollectionRevealed;
use crate::state::*;

/// One-shot reveal (administrator only)
#[derive(Accounts)]
pub struct RevealCollection<'info> {
    #[account(
        mut,
        seeds = [COLLECTION_SEED, collection.collection_asset.as_ref()],
        bump = collection.bump
    )]
    pub collection: Box<Account<'info, Collection>>,

    pub admin: Signer<'info>,

    /// CHECK: Slot hashes sysvar for randomness
    #[account(address = anchor_lang::solana_program::sysvar::slot_hashes::ID)]
    pub slot_hashes: AccountInfo<'info>,
}

impl<'info> RevealCollection<'info> {
    pub fn handler(ctx: Context<RevealCollection>, base_uri: String) -> Result<()> {
        let clock = Clock::get()?;
        let admin = ctx.accounts.admin.key();
        let collection_key = ctx.accounts.collection.key();

        let entropy = SlotHashEntropy {
            slot_hashes: &ctx.accounts.slot_hashes,
            collection: collection_key,
            slot: clock.slot,
            unix_timestamp: clock.unix_timestamp,
        };

        let collection = &mut ctx.accounts.collection;
        let starting_index = collection.reveal(&admin, base_uri, &entropy, clock.unix_timestamp)?;

        msg!(
            "Collection revealed: base_uri={}, starting_index={}",
            collection.reveal.base_uri,
            starting_index
        );

        emit!(CollectionRevealed {
            collection: collection_key,
            base_uri: collection.reveal.base_uri.clone(),
            starting_index,
            issued_count: collection.issued_count,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }
}
