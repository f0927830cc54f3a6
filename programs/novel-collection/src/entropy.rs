use anchor_lang::prelude::*;

use crate::errors::NovelCollectionError;

/// Source of the unpredictable value a reveal reduces into its starting index
pub trait EntropySource {
    fn current_entropy(&self) -> Result<u64>;
}

/// Number of leading SlotHashes bytes mixed in. The 8-byte entry count and the
/// newest (slot, hash) pair fill 48 of them; the last 16 come from the next pair.
const SLOT_HASHES_PREFIX_LEN: usize = 64;

/// Entropy from the SlotHashes sysvar, bound to the collection and the current clock
pub struct SlotHashEntropy<'a, 'info> {
    pub slot_hashes: &'a AccountInfo<'info>,
    pub collection: Pubkey,
    pub slot: u64,
    pub unix_timestamp: i64,
}

impl EntropySource for SlotHashEntropy<'_, '_> {
    fn current_entropy(&self) -> Result<u64> {
        let data = self.slot_hashes.try_borrow_data()?;
        require!(
            data.len() >= SLOT_HASHES_PREFIX_LEN,
            NovelCollectionError::InvalidEntropyAccount
        );

        let seed = solana_sha256_hasher::hashv(&[
            &data[..SLOT_HASHES_PREFIX_LEN],
            self.collection.as_ref(),
            &self.slot.to_le_bytes(),
            &self.unix_timestamp.to_le_bytes(),
        ]);
        Ok(entropy_from_bytes(seed.to_bytes()))
    }
}

/// First 8 bytes, little-endian
pub fn entropy_from_bytes(bytes: [u8; 32]) -> u64 {
    let mut head = [0u8; 8];
    head.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(head)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::errors::assert_error;

    pub(crate) struct FixedEntropy(pub u64);

    impl EntropySource for FixedEntropy {
        fn current_entropy(&self) -> Result<u64> {
            Ok(self.0)
        }
    }

    pub(crate) struct FailingEntropy;

    impl EntropySource for FailingEntropy {
        fn current_entropy(&self) -> Result<u64> {
            err!(NovelCollectionError::InvalidEntropyAccount)
        }
    }

    fn sysvar_info<'a>(key: &'a Pubkey, owner: &'a Pubkey, lamports: &'a mut u64, data: &'a mut [u8]) -> AccountInfo<'a> {
        AccountInfo::new(key, false, false, lamports, data, owner, false, 0)
    }

    #[test]
    fn test_entropy_from_bytes_little_endian() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x01;
        bytes[7] = 0x80;
        bytes[8] = 0xff;
        assert_eq!(entropy_from_bytes(bytes), 0x8000_0000_0000_0001);
    }

    #[test]
    fn test_slot_hash_entropy_binds_inputs() {
        let key = anchor_lang::solana_program::sysvar::slot_hashes::ID;
        let owner = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data = vec![7u8; 128];
        let info = sysvar_info(&key, &owner, &mut lamports, &mut data);

        let collection = Pubkey::new_unique();
        let source = SlotHashEntropy { slot_hashes: &info, collection, slot: 10, unix_timestamp: 99 };
        let first = source.current_entropy().unwrap();
        assert_eq!(source.current_entropy().unwrap(), first);

        let later = SlotHashEntropy { slot_hashes: &info, collection, slot: 11, unix_timestamp: 99 };
        assert_ne!(later.current_entropy().unwrap(), first);

        let other = SlotHashEntropy {
            slot_hashes: &info,
            collection: Pubkey::new_unique(),
            slot: 10,
            unix_timestamp: 99,
        };
        assert_ne!(other.current_entropy().unwrap(), first);
    }

    #[test]
    fn test_short_slot_hashes_rejected() {
        let key = anchor_lang::solana_program::sysvar::slot_hashes::ID;
        let owner = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data = vec![0u8; 8];
        let info = sysvar_info(&key, &owner, &mut lamports, &mut data);

        let source = SlotHashEntropy {
            slot_hashes: &info,
            collection: Pubkey::new_unique(),
            slot: 1,
            unix_timestamp: 1,
        };
        assert_error(source.current_entropy(), NovelCollectionError::InvalidEntropyAccount);
    }
}
