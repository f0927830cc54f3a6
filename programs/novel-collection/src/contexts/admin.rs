use anchor_lang::prelude::*;

use crate::events::{AdminAccepted, AdminProposed};
use crate::state::*;

#[derive(Accounts)]
pub struct ProposeAdmin<'info> {
    #[account(
        mut,
        seeds = [COLLECTION_SEED, collection.collection_asset.as_ref()],
        bump = collection.bump
    )]
    pub collection: Box<Account<'info, Collection>>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct AcceptAdmin<'info> {
    #[account(
        mut,
        seeds = [COLLECTION_SEED, collection.collection_asset.as_ref()],
        bump = collection.bump
    )]
    pub collection: Box<Account<'info, Collection>>,

    /// Must match the proposed administrator
    pub new_admin: Signer<'info>,
}

pub fn propose_admin_handler(ctx: Context<ProposeAdmin>, new_admin: Pubkey) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let collection = &mut ctx.accounts.collection;
    collection.propose_admin(&admin, new_admin)?;

    msg!("Administrator handoff proposed to {}", new_admin);

    emit!(AdminProposed {
        collection: collection.key(),
        admin,
        pending_admin: new_admin,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn accept_admin_handler(ctx: Context<AcceptAdmin>) -> Result<()> {
    let new_admin = ctx.accounts.new_admin.key();
    let collection = &mut ctx.accounts.collection;
    let previous_admin = collection.accept_admin(&new_admin)?;

    msg!("Administrator changed from {} to {}", previous_admin, new_admin);

    emit!(AdminAccepted {
        collection: collection.key(),
        previous_admin,
        admin: new_admin,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
