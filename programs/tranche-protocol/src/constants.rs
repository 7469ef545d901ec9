/// Number of decimals every allocation is scaled to before it is hashed.
pub const TOKEN_DECIMALS: u8 = 18;

/// Length in bytes of a recipient address.
pub const ADDRESS_LENGTH: usize = 20;

/// Length in bytes of an encoded amount (big-endian uint256).
pub const AMOUNT_LENGTH: usize = 32;

/// Length of the packed leaf preimage: `address || amount`.
pub const LEAF_ENCODING_LENGTH: usize = ADDRESS_LENGTH + AMOUNT_LENGTH;

/// Length in bytes of every node in the claim tree.
pub const HASH_LENGTH: usize = 32;

/// Denominator for basis-point fractions used by vesting schedules.
pub const BPS_DENOMINATOR: u64 = 10_000;
