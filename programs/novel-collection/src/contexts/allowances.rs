use anchor_lang::prelude::*;

use crate::events::AllowancesSet;
use crate::state::*;

/// Batch overwrite of claimant allowances (administrator only)
///
/// Remaining accounts: the allowance PDA of each claimant, writable, in the
/// same order as `claimants` (see `state::allowance_address`). Missing PDAs are
/// created and paid for by the administrator.
#[derive(Accounts)]
pub struct SetAllowances<'info> {
    #[account(
        seeds = [COLLECTION_SEED, collection.collection_asset.as_ref()],
        bump = collection.bump
    )]
    pub collection: Box<Account<'info, Collection>>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn set_allowances_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, SetAllowances<'info>>,
    claimants: Vec<Pubkey>,
    amounts: Vec<u64>,
) -> Result<()> {
    let timestamp = Clock::get()?.unix_timestamp;
    let admin = ctx.accounts.admin.key();
    let collection_key = ctx.accounts.collection.key();

    // =====================================================================
    // STEP 1: Validate the whole batch before writing anything
    // =====================================================================

    ctx.accounts
        .collection
        .authorize_allowances(&admin, &claimants, &amounts)?;

    let allowance_accounts = ctx.remaining_accounts;
    let account_keys: Vec<Pubkey> = allowance_accounts.iter().map(|a| a.key()).collect();
    let bumps = verify_allowance_accounts(&collection_key, &claimants, &account_keys)?;

    // =====================================================================
    // STEP 2: Load or create each allowance, then overwrite it
    // =====================================================================

    let mut created: u64 = 0;
    for (i, allowance_info) in allowance_accounts.iter().enumerate() {
        let claimant = claimants[i];
        let bump = bumps[i];

        // A claimant repeated in the batch was already created on its first pair
        let mut allowance = if allowance_info.owner == &crate::ID {
            let data = allowance_info.try_borrow_data()?;
            let existing = Allowance::try_deserialize(&mut &data[..])?;
            existing
        } else {
            let space = 8 + Allowance::INIT_SPACE;
            let lamports = Rent::get()?.minimum_balance(space);
            let seeds: &[&[u8]] = &[
                ALLOWANCE_SEED,
                collection_key.as_ref(),
                claimant.as_ref(),
                &[bump],
            ];

            anchor_lang::system_program::create_account(
                CpiContext::new_with_signer(
                    ctx.accounts.system_program.to_account_info(),
                    anchor_lang::system_program::CreateAccount {
                        from: ctx.accounts.admin.to_account_info(),
                        to: allowance_info.clone(),
                    },
                    &[seeds],
                ),
                lamports,
                space as u64,
                &crate::ID,
            )?;
            created += 1;

            Allowance::new(collection_key, claimant, bump)
        };

        allowance.overwrite(amounts[i], timestamp);

        let mut data = allowance_info.try_borrow_mut_data()?;
        allowance.try_serialize(&mut &mut data[..])?;
    }

    msg!(
        "Allowances set for {} claimants ({} new allowance accounts)",
        claimants.len(),
        created
    );

    emit!(AllowancesSet {
        collection: collection_key,
        admin,
        count: claimants.len() as u64,
        timestamp,
    });

    Ok(())
}
