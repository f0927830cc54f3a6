use anchor_lang::prelude::*;

use crate::errors::NovelCollectionError;

pub const ALLOWANCE_SEED: &[u8] = b"allowance";

/// Remaining allowance of one claimant in one collection
/// PDA seeds: ["allowance", collection, claimant]
///
/// A claimant without this account has allowance 0.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Allowance {
    pub collection: Pubkey,
    pub claimant: Pubkey,
    /// Items this claimant may still claim
    pub remaining: u64,
    pub updated_at: i64,
    pub bump: u8,
}

impl Allowance {
    pub fn new(collection: Pubkey, claimant: Pubkey, bump: u8) -> Self {
        Self {
            collection,
            claimant,
            remaining: 0,
            updated_at: 0,
            bump,
        }
    }

    /// Replace the remaining allowance. Never additive.
    pub fn overwrite(&mut self, amount: u64, timestamp: i64) {
        self.remaining = amount;
        self.updated_at = timestamp;
    }

    /// Subtract a claimed amount, returning what is left.
    pub fn consume(&mut self, amount: u64) -> Result<u64> {
        require!(
            amount <= self.remaining,
            NovelCollectionError::AllowanceExceeded
        );
        self.remaining -= amount;
        Ok(self.remaining)
    }
}

pub fn allowance_address(collection: &Pubkey, claimant: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[ALLOWANCE_SEED, collection.as_ref(), claimant.as_ref()],
        &crate::ID,
    )
}

/// Check that `account_keys` are the allowance PDAs of `claimants`, pairwise and in order.
/// Returns the bump of each PDA.
pub fn verify_allowance_accounts(
    collection: &Pubkey,
    claimants: &[Pubkey],
    account_keys: &[Pubkey],
) -> Result<Vec<u8>> {
    require!(
        account_keys.len() == claimants.len(),
        NovelCollectionError::AllowanceAccountCountMismatch
    );

    claimants
        .iter()
        .zip(account_keys)
        .map(|(claimant, key)| {
            let (expected, bump) = allowance_address(collection, claimant);
            require_keys_eq!(*key, expected, NovelCollectionError::InvalidAllowanceAccount);
            Ok(bump)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_error;

    fn allowance(remaining: u64) -> Allowance {
        let mut allowance = Allowance::new(Pubkey::new_unique(), Pubkey::new_unique(), 255);
        allowance.overwrite(remaining, 1);
        allowance
    }

    #[test]
    fn test_new_allowance_is_zero() {
        let allowance = Allowance::new(Pubkey::new_unique(), Pubkey::new_unique(), 254);
        assert_eq!(allowance.remaining, 0);
        assert_eq!(allowance.bump, 254);
    }

    #[test]
    fn test_overwrite_not_accumulate() {
        let mut allowance = allowance(3);
        allowance.overwrite(5, 2);
        assert_eq!(allowance.remaining, 5);
        assert_eq!(allowance.updated_at, 2);

        allowance.consume(2).unwrap();
        allowance.overwrite(4, 3);
        assert_eq!(allowance.remaining, 4);
    }

    #[test]
    fn test_consume_beyond_remaining() {
        let mut allowance = allowance(2);
        assert_error(allowance.consume(3), NovelCollectionError::AllowanceExceeded);
        assert_eq!(allowance.remaining, 2);
        assert_eq!(allowance.consume(2).unwrap(), 0);
        assert_error(allowance.consume(1), NovelCollectionError::AllowanceExceeded);
    }

    #[test]
    fn test_addresses_distinct_per_claimant_and_collection() {
        let collection = Pubkey::new_unique();
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        assert_ne!(allowance_address(&collection, &a).0, allowance_address(&collection, &b).0);
        assert_ne!(
            allowance_address(&collection, &a).0,
            allowance_address(&Pubkey::new_unique(), &a).0
        );
        assert_eq!(allowance_address(&collection, &a), allowance_address(&collection, &a));
    }

    #[test]
    fn test_verify_accepts_matching_accounts() {
        let collection = Pubkey::new_unique();
        let claimants: Vec<Pubkey> = (0..250).map(|_| Pubkey::new_unique()).collect();
        let keys: Vec<Pubkey> = claimants
            .iter()
            .map(|c| allowance_address(&collection, c).0)
            .collect();

        let bumps = verify_allowance_accounts(&collection, &claimants, &keys).unwrap();
        assert_eq!(bumps.len(), 250);
        assert_eq!(bumps[7], allowance_address(&collection, &claimants[7]).1);
    }

    #[test]
    fn test_verify_accepts_repeated_claimant() {
        let collection = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let key = allowance_address(&collection, &user).0;
        assert!(verify_allowance_accounts(&collection, &[user, user], &[key, key]).is_ok());
    }

    #[test]
    fn test_verify_rejects_count_mismatch() {
        let collection = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let key = allowance_address(&collection, &user).0;
        assert_error(
            verify_allowance_accounts(&collection, &[user, Pubkey::new_unique()], &[key]),
            NovelCollectionError::AllowanceAccountCountMismatch,
        );
    }

    #[test]
    fn test_verify_rejects_swapped_accounts() {
        let collection = Pubkey::new_unique();
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let keys = [allowance_address(&collection, &b).0, allowance_address(&collection, &a).0];
        assert_error(
            verify_allowance_accounts(&collection, &[a, b], &keys),
            NovelCollectionError::InvalidAllowanceAccount,
        );
    }

    #[test]
    fn test_verify_rejects_other_collection() {
        let user = Pubkey::new_unique();
        let foreign = allowance_address(&Pubkey::new_unique(), &user).0;
        assert_error(
            verify_allowance_accounts(&Pubkey::new_unique(), &[user], &[foreign]),
            NovelCollectionError::InvalidAllowanceAccount,
        );
    }
}
