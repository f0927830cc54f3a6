use anchor_lang::prelude::*;
use mpl_core::instructions::CreateV2CpiBuilder;
use mpl_core::types::DataState;

use crate::errors::NovelCollectionError;
use crate::state::{ClaimGrant, Collection, COLLECTION_SEED};

/// Seed for item asset PDAs: ["item", collection, item_id (u64 LE)]
pub const ITEM_SEED: &[u8] = b"item";

/// Owner of issued items
///
/// `issue` is called exactly once per successful claim, after the collection's
/// bookkeeping for that claim is committed.
pub trait ItemRegistry {
    fn issue(&mut self, collection: &Collection, grant: &ClaimGrant) -> Result<()>;
}

pub fn item_address(collection: &Pubkey, item_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[ITEM_SEED, collection.as_ref(), &item_id.to_le_bytes()],
        &crate::ID,
    )
}

/// Issues items as Metaplex Core assets inside the collection's Core collection
///
/// `item_accounts` holds one item PDA per granted id, in id order.
pub struct CoreItemRegistry<'a, 'info> {
    pub mpl_core_program: AccountInfo<'info>,
    pub collection_asset: AccountInfo<'info>,
    /// Collection PDA, update authority of the Core collection
    pub authority: AccountInfo<'info>,
    pub payer: AccountInfo<'info>,
    pub owner: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
    pub item_accounts: &'a [AccountInfo<'info>],
}

impl CoreItemRegistry<'_, '_> {
    /// Check every item account against the PDA of its granted id, in order.
    /// Runs to completion before any asset is created. Returns the item bumps.
    fn verify_item_accounts(&self, grant: &ClaimGrant) -> Result<Vec<u8>> {
        require!(grant.amount > 0, NovelCollectionError::ZeroAmount);
        require!(
            self.item_accounts.len() as u64 == grant.amount,
            NovelCollectionError::ItemAccountCountMismatch
        );

        let collection_key = self.authority.key();
        grant
            .item_ids()
            .zip(self.item_accounts.iter())
            .map(|(item_id, item_account)| {
                let (expected, bump) = item_address(&collection_key, item_id);
                require_keys_eq!(
                    item_account.key(),
                    expected,
                    NovelCollectionError::InvalidItemAccount
                );
                Ok(bump)
            })
            .collect()
    }
}

impl ItemRegistry for CoreItemRegistry<'_, '_> {
    fn issue(&mut self, collection: &Collection, grant: &ClaimGrant) -> Result<()> {
        let item_bumps = self.verify_item_accounts(grant)?;

        let collection_key = self.authority.key();
        let authority_seeds: &[&[u8]] = &[
            COLLECTION_SEED,
            collection.collection_asset.as_ref(),
            &[collection.bump],
        ];

        for ((item_id, item_account), item_bump) in grant
            .item_ids()
            .zip(self.item_accounts.iter())
            .zip(item_bumps)
        {
            let item_id_bytes = item_id.to_le_bytes();
            let item_seeds: &[&[u8]] = &[
                ITEM_SEED,
                collection_key.as_ref(),
                &item_id_bytes,
                &[item_bump],
            ];

            CreateV2CpiBuilder::new(&self.mpl_core_program)
                .asset(item_account)
                .collection(Some(&self.collection_asset))
                .authority(Some(&self.authority))
                .payer(&self.payer)
                .owner(Some(&self.owner))
                .system_program(&self.system_program)
                .name(collection.item_name(item_id))
                .uri(collection.resolve_uri(item_id)?)
                .data_state(DataState::AccountState)
                .invoke_signed(&[authority_seeds, item_seeds])?;
        }

        msg!(
            "Issued items {}..={} to {}",
            grant.first_item_id,
            grant.last_item_id(),
            grant.claimant
        );

        Ok(())
    }
}
