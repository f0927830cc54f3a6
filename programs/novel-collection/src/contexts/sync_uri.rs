use anchor_lang::prelude::*;
use mpl_core::instructions::UpdateV1CpiBuilder;

use crate::errors::NovelCollectionError;
use crate::events::ItemUriSynced;
use crate::registry::ITEM_SEED;
use crate::state::*;

/// Rewrite an issued item's on-asset URI to its resolved metadata URI
/// Permissionless; only meaningful after reveal
#[derive(Accounts)]
#[instruction(item_id: u64)]
pub struct SyncItemUri<'info> {
    #[account(
        seeds = [COLLECTION_SEED, collection.collection_asset.as_ref()],
        bump = collection.bump
    )]
    pub collection: Box<Account<'info, Collection>>,

    /// CHECK: Item asset PDA, verified by seeds
    #[account(
        mut,
        seeds = [ITEM_SEED, collection.key().as_ref(), &item_id.to_le_bytes()],
        bump
    )]
    pub item_asset: AccountInfo<'info>,

    /// CHECK: Verified via collection.collection_asset
    #[account(
        mut,
        address = collection.collection_asset @ NovelCollectionError::InvalidCollectionAsset
    )]
    pub collection_asset: AccountInfo<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Metaplex Core program
    #[account(address = mpl_core::ID)]
    pub mpl_core_program: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

pub fn sync_item_uri_handler(ctx: Context<SyncItemUri>, item_id: u64) -> Result<()> {
    let collection = &ctx.accounts.collection;

    let uri = collection.synced_uri(item_id)?;

    let authority_seeds: &[&[u8]] = &[
        COLLECTION_SEED,
        collection.collection_asset.as_ref(),
        &[collection.bump],
    ];

    UpdateV1CpiBuilder::new(&ctx.accounts.mpl_core_program)
        .asset(&ctx.accounts.item_asset)
        .collection(Some(&ctx.accounts.collection_asset))
        .payer(&ctx.accounts.payer.to_account_info())
        .authority(Some(&collection.to_account_info()))
        .system_program(&ctx.accounts.system_program.to_account_info())
        .new_uri(uri.clone())
        .invoke_signed(&[authority_seeds])?;

    msg!("Item {} URI synced: {}", item_id, uri);

    emit!(ItemUriSynced {
        collection: collection.key(),
        item_id,
        item_asset: ctx.accounts.item_asset.key(),
        uri,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
