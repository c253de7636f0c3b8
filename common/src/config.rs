pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Asset names used in logs and reports
pub const DPASS_NAME: &str = "Dpass";
pub const DPASS_NFT_NAME: &str = "DpassNFT";

// Domain separation tag used when deriving a principal from a seed
// Changing it changes every derived principal
pub const PRINCIPAL_SEED_DOMAIN: &[u8] = b"DPASS_PRINCIPAL:";

// ===== Error code ranges =====

// Access control errors (ownership and pause gate)
pub const ACCESS_ERROR_RANGE_START: u64 = 0x0100;
// Asset primitive errors (ledger bookkeeping)
pub const ASSET_ERROR_RANGE_START: u64 = 0x0200;

// First token id assigned by a fresh NFT ledger
pub const FIRST_TOKEN_ID: u64 = 0;
