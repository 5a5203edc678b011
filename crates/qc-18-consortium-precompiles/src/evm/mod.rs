//! # EVM Boundary
//!
//! Call-convention glue between a host EVM and the domain.
//!
//! This is the **outer layer** (adapter) of the hexagonal architecture:
//! it decodes calldata, enforces authorization and static-call rules,
//! invokes the domain and encodes return data.
//!
//! ## Components
//!
//! - `precompiles/interface.rs` - `sol!` call types and the header tuple
//! - `precompiles/validator_sorting.rs` - `0x…66`
//! - `precompiles/verify_headers.rs` - `0x…67`
//! - `precompiles/pick_validator_set.rs` - `0x…68`

pub mod precompiles;

pub use precompiles::{
    execute_precompile, is_consortium_precompile, Precompile, PrecompileEnv, PrecompileOutput,
    PICK_VALIDATOR_SET_ADDRESS, VALIDATOR_SORTING_ADDRESS, VERIFY_DOUBLE_SIGN_ADDRESS,
};
