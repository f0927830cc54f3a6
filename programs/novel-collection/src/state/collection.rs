use anchor_lang::prelude::*;

use crate::entropy::EntropySource;
use crate::errors::NovelCollectionError;
use crate::state::allowance::Allowance;
use crate::state::reveal::{RevealState, MAX_URI_LEN};

pub const COLLECTION_SEED: &[u8] = b"collection";

pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;
pub const MAX_PROOF_HASH_LEN: usize = 128;

/// A fixed-supply, whitelisted collection
/// PDA seeds: ["collection", collection_asset]
///
/// The PDA is the update authority of the Metaplex Core collection and signs
/// every item creation.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Collection {
    /// Administrator allowed to seed allowances and reveal
    pub admin: Pubkey,
    /// Proposed administrator, set by `propose_admin`
    pub pending_admin: Option<Pubkey>,
    /// The Metaplex Core collection asset items are issued into
    pub collection_asset: Pubkey,
    #[max_len(32)]
    pub name: String,
    #[max_len(10)]
    pub symbol: String,
    /// Upper bound on items ever issued
    pub supply_cap: u64,
    /// Commitment to the metadata set, published before reveal and never interpreted
    #[max_len(128)]
    pub metadata_proof_hash: String,
    /// Collection-level metadata URI
    #[max_len(200)]
    pub contract_uri: String,
    /// Returned for every item until reveal
    #[max_len(200)]
    pub placeholder_uri: String,
    /// Items issued so far; also the id of the most recent item
    pub issued_count: u64,
    pub reveal: RevealState,
    pub created_at: i64,
    pub bump: u8,
}

/// Items granted by one validated claim, numbered `first_item_id..first_item_id + amount`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimGrant {
    pub claimant: Pubkey,
    pub first_item_id: u64,
    pub amount: u64,
    /// Claimant's allowance after the claim
    pub remaining_allowance: u64,
}

impl ClaimGrant {
    pub fn last_item_id(&self) -> u64 {
        self.first_item_id + (self.amount - 1)
    }

    pub fn item_ids(&self) -> std::ops::RangeInclusive<u64> {
        self.first_item_id..=self.last_item_id()
    }
}

impl Collection {
    /// Validate and store the construction-time configuration.
    #[allow(clippy::too_many_arguments)]
    pub fn configure(
        &mut self,
        admin: Pubkey,
        collection_asset: Pubkey,
        name: String,
        symbol: String,
        supply_cap: u64,
        metadata_proof_hash: String,
        contract_uri: String,
        placeholder_uri: String,
        timestamp: i64,
        bump: u8,
    ) -> Result<()> {
        // Item ids run 1..=supply_cap, so the cap leaves room for `last id + 1`
        require!(
            supply_cap > 0 && supply_cap < u64::MAX,
            NovelCollectionError::InvalidSupplyCap
        );
        require!(name.len() <= MAX_NAME_LEN, NovelCollectionError::NameTooLong);
        require!(symbol.len() <= MAX_SYMBOL_LEN, NovelCollectionError::SymbolTooLong);
        require!(
            metadata_proof_hash.len() <= MAX_PROOF_HASH_LEN,
            NovelCollectionError::ProofHashTooLong
        );
        require!(contract_uri.len() <= MAX_URI_LEN, NovelCollectionError::UriTooLong);
        require!(placeholder_uri.len() <= MAX_URI_LEN, NovelCollectionError::UriTooLong);

        self.admin = admin;
        self.pending_admin = None;
        self.collection_asset = collection_asset;
        self.name = name;
        self.symbol = symbol;
        self.supply_cap = supply_cap;
        self.metadata_proof_hash = metadata_proof_hash;
        self.contract_uri = contract_uri;
        self.placeholder_uri = placeholder_uri;
        self.issued_count = 0;
        self.reveal = RevealState::default();
        self.created_at = timestamp;
        self.bump = bump;

        Ok(())
    }

    pub fn is_administrator(&self, caller: &Pubkey) -> bool {
        self.admin == *caller
    }

    fn ensure_admin(&self, caller: &Pubkey) -> Result<()> {
        require!(self.is_administrator(caller), NovelCollectionError::Unauthorized);
        Ok(())
    }

    pub fn remaining_supply(&self) -> u64 {
        self.supply_cap - self.issued_count
    }

    // ------------------------------------------------------------------
    // Allocation
    // ------------------------------------------------------------------

    /// Guards of a batch allowance overwrite: administrator caller, matching lengths.
    pub fn authorize_allowances(
        &self,
        caller: &Pubkey,
        claimants: &[Pubkey],
        amounts: &[u64],
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        require!(
            claimants.len() == amounts.len(),
            NovelCollectionError::LengthMismatch
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Minting
    // ------------------------------------------------------------------

    /// Every guard `reserve` applies, without mutating anything.
    pub fn check_claim(&self, remaining_allowance: u64, amount: u64) -> Result<()> {
        require!(amount > 0, NovelCollectionError::ZeroAmount);
        require!(
            amount <= remaining_allowance,
            NovelCollectionError::AllowanceExceeded
        );
        require!(
            amount <= self.remaining_supply(),
            NovelCollectionError::SupplyCapReached
        );
        Ok(())
    }

    pub fn can_claim(&self, remaining_allowance: u64, amount: u64) -> bool {
        self.check_claim(remaining_allowance, amount).is_ok()
    }

    /// Validate a claim and commit its bookkeeping.
    ///
    /// Allowance and issued count are both updated before this returns, so the
    /// returned grant can be handed to an `ItemRegistry` with nothing left to settle.
    ///
    /// `allowance` is the claimant's allowance account, or `None` if they have none.
    pub fn reserve(
        &mut self,
        allowance: Option<&mut Allowance>,
        claimant: &Pubkey,
        amount: u64,
    ) -> Result<ClaimGrant> {
        if let Some(allowance) = allowance.as_deref() {
            require_keys_eq!(
                allowance.claimant,
                *claimant,
                NovelCollectionError::AllowanceMismatch
            );
        }
        let remaining = allowance.as_deref().map_or(0, |a| a.remaining);
        self.check_claim(remaining, amount)?;
        let allowance = allowance.ok_or(NovelCollectionError::AllowanceExceeded)?;

        let first_item_id = self.issued_count + 1;
        let remaining_allowance = allowance.consume(amount)?;
        self.issued_count += amount;

        Ok(ClaimGrant {
            claimant: *claimant,
            first_item_id,
            amount,
            remaining_allowance,
        })
    }

    // ------------------------------------------------------------------
    // Reveal
    // ------------------------------------------------------------------

    pub fn is_revealed(&self) -> bool {
        self.reveal.is_revealed()
    }

    /// Administrator-only, one-shot. Returns the drawn starting index.
    pub fn reveal<E: EntropySource>(
        &mut self,
        caller: &Pubkey,
        base_uri: String,
        entropy: &E,
        timestamp: i64,
    ) -> Result<u64> {
        self.ensure_admin(caller)?;
        let supply_cap = self.supply_cap;
        self.reveal
            .transition(base_uri, supply_cap, || entropy.current_entropy(), timestamp)
    }

    // ------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------

    /// Metadata URI of an issued item. Ids start at 1.
    pub fn resolve_uri(&self, item_id: u64) -> Result<String> {
        require!(
            item_id >= 1 && item_id <= self.issued_count,
            NovelCollectionError::UnknownItem
        );
        if !self.reveal.is_revealed() {
            return Ok(self.placeholder_uri.clone());
        }
        Ok(self.reveal.revealed_uri(item_id, self.supply_cap))
    }

    /// URI to write onto an item asset. Unissued ids fail before the reveal check.
    pub fn synced_uri(&self, item_id: u64) -> Result<String> {
        let uri = self.resolve_uri(item_id)?;
        require!(self.is_revealed(), NovelCollectionError::NotRevealed);
        Ok(uri)
    }

    pub fn item_name(&self, item_id: u64) -> String {
        format!("{} #{}", self.name, item_id)
    }

    // ------------------------------------------------------------------
    // Administrator handoff
    // ------------------------------------------------------------------

    pub fn propose_admin(&mut self, caller: &Pubkey, new_admin: Pubkey) -> Result<()> {
        self.ensure_admin(caller)?;
        self.pending_admin = Some(new_admin);
        Ok(())
    }

    /// Returns the previous administrator.
    pub fn accept_admin(&mut self, caller: &Pubkey) -> Result<Pubkey> {
        let pending = self.pending_admin.ok_or(NovelCollectionError::NoPendingAdmin)?;
        require_keys_eq!(pending, *caller, NovelCollectionError::Unauthorized);

        let previous = self.admin;
        self.admin = pending;
        self.pending_admin = None;
        Ok(previous)
    }
}

#[cfg(test)]
pub(crate) fn test_collection(admin: Pubkey, supply_cap: u64) -> Result<Collection> {
    let mut collection = Collection {
        admin: Pubkey::default(),
        pending_admin: None,
        collection_asset: Pubkey::default(),
        name: String::new(),
        symbol: String::new(),
        supply_cap: 0,
        metadata_proof_hash: String::new(),
        contract_uri: String::new(),
        placeholder_uri: String::new(),
        issued_count: 0,
        reveal: RevealState::default(),
        created_at: 0,
        bump: 0,
    };
    collection.configure(
        admin,
        Pubkey::new_unique(),
        "Cats".to_string(),
        "CAT".to_string(),
        supply_cap,
        "0x523abcde".to_string(),
        "https://metadata-url.com/my-metadata".to_string(),
        "ipfs://QmCats/placeholder.json".to_string(),
        1_700_000_000,
        254,
    )?;
    Ok(collection)
}
