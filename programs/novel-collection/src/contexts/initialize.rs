use anchor_lang::prelude::*;
use mpl_core::instructions::CreateCollectionV2CpiBuilder;

use crate::events::CollectionInitialized;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeCollection<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Collection::INIT_SPACE,
        seeds = [COLLECTION_SEED, collection_asset.key().as_ref()],
        bump
    )]
    pub collection: Box<Account<'info, Collection>>,

    /// The Metaplex Core Collection asset (must be a new keypair)
    #[account(mut)]
    pub collection_asset: Signer<'info>,

    /// CHECK: Metaplex Core program
    #[account(address = mpl_core::ID)]
    pub mpl_core_program: AccountInfo<'info>,

    /// Becomes the collection administrator
    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitializeCollection<'info> {
    pub fn handler(
        ctx: Context<InitializeCollection>,
        name: String,
        symbol: String,
        supply_cap: u64,
        metadata_proof_hash: String,
        contract_uri: String,
        placeholder_uri: String,
    ) -> Result<()> {
        let timestamp = Clock::get()?.unix_timestamp;
        let admin_key = ctx.accounts.admin.key();
        let collection_key = ctx.accounts.collection.key();
        let collection_asset_key = ctx.accounts.collection_asset.key();

        ctx.accounts.collection.configure(
            admin_key,
            collection_asset_key,
            name.clone(),
            symbol,
            supply_cap,
            metadata_proof_hash.clone(),
            contract_uri.clone(),
            placeholder_uri,
            timestamp,
            ctx.bumps.collection,
        )?;

        // Collection PDA is update authority, so it can sign item creation later
        CreateCollectionV2CpiBuilder::new(&ctx.accounts.mpl_core_program)
            .collection(&ctx.accounts.collection_asset.to_account_info())
            .payer(&ctx.accounts.admin.to_account_info())
            .update_authority(Some(&ctx.accounts.collection.to_account_info()))
            .system_program(&ctx.accounts.system_program.to_account_info())
            .name(name)
            .uri(contract_uri)
            .invoke()?;

        msg!("Collection initialized: supply_cap={}, asset={}", supply_cap, collection_asset_key);

        emit!(CollectionInitialized {
            collection: collection_key,
            collection_asset: collection_asset_key,
            admin: admin_key,
            supply_cap,
            metadata_proof_hash,
            timestamp,
        });

        Ok(())
    }
}
