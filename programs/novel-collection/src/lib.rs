use anchor_lang::prelude::*;

pub mod contexts;
pub mod entropy;
pub mod errors;
pub mod events;
pub mod registry;
pub mod state;

pub use contexts::*;

declare_id!("Cm8eJKQkJFxp3Nb1xFSKoP91BEdrfojUBrgFazP4oXD2");

#[program]
pub mod novel_collection {
    use super::*;

    // ============================================
    // COLLECTION SETUP
    // ============================================

    /// Create the collection; the payer becomes its administrator
    pub fn initialize_collection(
        ctx: Context<InitializeCollection>,
        name: String,
        symbol: String,
        supply_cap: u64,
        metadata_proof_hash: String,
        contract_uri: String,
        placeholder_uri: String,
    ) -> Result<()> {
        InitializeCollection::handler(
            ctx,
            name,
            symbol,
            supply_cap,
            metadata_proof_hash,
            contract_uri,
            placeholder_uri,
        )
    }

    /// Overwrite claimant allowances (admin only)
    /// Allowance PDAs go in remaining_accounts, in claimant order
    pub fn set_allowances<'info>(
        ctx: Context<'_, '_, 'info, 'info, SetAllowances<'info>>,
        claimants: Vec<Pubkey>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        contexts::allowances::set_allowances_handler(ctx, claimants, amounts)
    }

    // ============================================
    // CLAIMING
    // ============================================

    /// Claim items against the caller's allowance
    /// Item asset PDAs go in remaining_accounts, in id order
    pub fn claim<'info>(
        ctx: Context<'_, '_, 'info, 'info, ClaimItems<'info>>,
        amount: u64,
    ) -> Result<()> {
        ClaimItems::handler(ctx, amount)
    }

    // ============================================
    // REVEAL
    // ============================================

    /// Fix the base URI and draw the starting index (admin only, once)
    pub fn reveal(ctx: Context<RevealCollection>, base_uri: String) -> Result<()> {
        RevealCollection::handler(ctx, base_uri)
    }

    /// Push an issued item's resolved URI onto its Core asset
    pub fn sync_item_uri(ctx: Context<SyncItemUri>, item_id: u64) -> Result<()> {
        contexts::sync_uri::sync_item_uri_handler(ctx, item_id)
    }

    // ============================================
    // ADMINISTRATOR
    // ============================================

    pub fn propose_admin(ctx: Context<ProposeAdmin>, new_admin: Pubkey) -> Result<()> {
        contexts::admin::propose_admin_handler(ctx, new_admin)
    }

    pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
        contexts::admin::accept_admin_handler(ctx)
    }

    // ============================================
    // VIEWS (returned via return data)
    // ============================================

    /// Pass the claimant's allowance PDA, or omit it if none exists
    pub fn remaining_allowance(ctx: Context<ViewAllowance>, claimant: Pubkey) -> Result<u64> {
        Ok(ctx.accounts.remaining(&claimant))
    }

    /// Whether `claim(amount)` by `claimant` would succeed right now
    pub fn can_claim(ctx: Context<ViewAllowance>, claimant: Pubkey, amount: u64) -> Result<bool> {
        Ok(ctx.accounts.collection.can_claim(ctx.accounts.remaining(&claimant), amount))
    }

    pub fn is_revealed(ctx: Context<ViewCollection>) -> Result<bool> {
        Ok(ctx.accounts.collection.is_revealed())
    }

    pub fn token_uri(ctx: Context<ViewCollection>, item_id: u64) -> Result<String> {
        ctx.accounts.collection.resolve_uri(item_id)
    }

    pub fn issued_count(ctx: Context<ViewCollection>) -> Result<u64> {
        Ok(ctx.accounts.collection.issued_count)
    }

    pub fn supply_cap(ctx: Context<ViewCollection>) -> Result<u64> {
        Ok(ctx.accounts.collection.supply_cap)
    }

    pub fn metadata_proof_hash(ctx: Context<ViewCollection>) -> Result<String> {
        Ok(ctx.accounts.collection.metadata_proof_hash.clone())
    }

    pub fn contract_uri(ctx: Context<ViewCollection>) -> Result<String> {
        Ok(ctx.accounts.collection.contract_uri.clone())
    }
}
