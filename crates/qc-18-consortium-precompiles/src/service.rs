//! # Consortium Precompile Service
//!
//! Wires the driven-port adapters, the configuration and the precompile
//! dispatcher into one object a host engine can call.
//!
//! ## Security
//!
//! - Every precompile accepts only the configured consortium system contracts
//!   (validator set, slash indicator, staking) as caller
//! - Unset (zero) contract slots authorize nobody
//! - Non-static invocations are rejected unless explicitly allowed

use crate::adapters::{InMemoryCandidateRegistry, K256SignerRecovery};
use crate::domain::election::arrange_order;
use crate::domain::entities::{CallContext, CandidatePool, ElectionParameters, ValidatorSet};
use crate::domain::equivocation::{check_equivocation, EquivocationVerdict};
use crate::domain::invariants::check_all_invariants;
use crate::domain::ordering::stake_order;
use crate::domain::value_objects::{Address, U256};
use crate::errors::{ConfigError, HeaderError, PrecompileError, RegistryError};
use crate::evm::precompiles::{execute_precompile, PrecompileEnv, PrecompileOutput};
use crate::ports::inbound::ConsortiumPrecompileApi;
use crate::ports::outbound::{CandidateRegistry, SignerRecovery};

use parking_lot::RwLock;
use std::env;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Default bound on candidates per call.
pub const DEFAULT_MAX_CANDIDATES: usize = 1024;

/// Default bound on a serialized header record (64 KiB).
pub const DEFAULT_MAX_HEADER_SIZE: usize = 64 * 1024;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Consortium precompile configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Validator-set system contract.
    pub validator_set_contract: Address,
    /// Slash-indicator system contract.
    pub slash_indicator_contract: Address,
    /// Staking system contract.
    pub staking_contract: Address,
    /// Maximum candidates accepted per call.
    pub max_candidates: usize,
    /// Maximum size of one serialized header record in bytes.
    pub max_header_size: usize,
    /// Reject invocations outside a static call.
    pub enforce_static_call: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            validator_set_contract: Address::ZERO,
            slash_indicator_contract: Address::ZERO,
            staking_contract: Address::ZERO,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            enforce_static_call: true,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_VALIDATOR_SET_CONTRACT`: Hex address (default: zero address)
    /// - `QC_SLASH_INDICATOR_CONTRACT`: Hex address (default: zero address)
    /// - `QC_STAKING_CONTRACT`: Hex address (default: zero address)
    /// - `QC_MAX_CANDIDATES`: Candidate bound (default: 1024)
    /// - `QC_MAX_HEADER_SIZE`: Header size bound in bytes (default: 65536)
    /// - `QC_ENFORCE_STATIC_CALL`: Reject non-static calls (default: true)
    ///
    /// Unparseable values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            validator_set_contract: env::var("QC_VALIDATOR_SET_CONTRACT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.validator_set_contract),

            slash_indicator_contract: env::var("QC_SLASH_INDICATOR_CONTRACT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.slash_indicator_contract),

            staking_contract: env::var("QC_STAKING_CONTRACT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.staking_contract),

            max_candidates: env::var("QC_MAX_CANDIDATES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_candidates),

            max_header_size: env::var("QC_MAX_HEADER_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_header_size),

            enforce_static_call: env::var("QC_ENFORCE_STATIC_CALL")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.enforce_static_call),
        }
    }

    /// Configured system contracts, unset slots included.
    #[must_use]
    pub fn system_contracts(&self) -> [Address; 3] {
        [
            self.validator_set_contract,
            self.slash_indicator_contract,
            self.staking_contract,
        ]
    }

    /// Returns true if `caller` is a configured (non-zero) system contract.
    #[must_use]
    pub fn is_system_contract(&self, caller: &Address) -> bool {
        !caller.is_zero() && self.system_contracts().contains(caller)
    }

    /// Checks the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for zero limits or one non-zero contract
    /// bound to two roles.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_candidates == 0 {
            return Err(ConfigError::ZeroLimit("max_candidates"));
        }
        if self.max_header_size == 0 {
            return Err(ConfigError::ZeroLimit("max_header_size"));
        }

        let contracts = self.system_contracts();
        for (i, contract) in contracts.iter().enumerate() {
            if !contract.is_zero() && contracts[i + 1..].contains(contract) {
                return Err(ConfigError::DuplicateContract(*contract));
            }
        }
        Ok(())
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Call statistics for the precompile service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Calls routed to a consortium precompile.
    pub calls: u64,
    /// Calls that returned data.
    pub successful_calls: u64,
    /// Calls rejected for caller or static-context reasons.
    pub rejected_calls: u64,
    /// Calls that failed on malformed input.
    pub invalid_input_calls: u64,
    /// Calls that failed for any other reason (e.g. registry unavailable).
    pub failed_calls: u64,
}

// =============================================================================
// SERVICE
// =============================================================================

/// The consortium precompile service.
///
/// This service:
/// 1. Routes host calls to the precompile at the target address
/// 2. Exposes the same operations in-process via [`ConsortiumPrecompileApi`]
/// 3. Maintains call statistics
pub struct PrecompileService {
    config: ServiceConfig,
    registry: Arc<dyn CandidateRegistry>,
    recovery: Arc<dyn SignerRecovery>,
    stats: RwLock<ServiceStats>,
}

impl PrecompileService {
    /// Create a new service.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn new(
        config: ServiceConfig,
        registry: Arc<dyn CandidateRegistry>,
        recovery: Arc<dyn SignerRecovery>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.system_contracts().iter().all(Address::is_zero) {
            warn!("no consortium system contract configured; every call will be rejected");
        }

        Ok(Self {
            config,
            registry,
            recovery,
            stats: RwLock::new(ServiceStats::default()),
        })
    }

    /// Service configuration.
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Get current service statistics.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    fn record(&self, update: impl FnOnce(&mut ServiceStats)) {
        update(&mut self.stats.write());
    }

    /// Executes the consortium precompile at `address`.
    ///
    /// Returns `None` if no consortium precompile lives at `address`, so the
    /// host can fall through to its own precompile table.
    #[instrument(skip(self, address, context, input), fields(address = %address, caller = %context.caller, input_len = input.len()))]
    pub fn execute(
        &self,
        address: Address,
        context: &CallContext,
        input: &[u8],
    ) -> Option<Result<PrecompileOutput, PrecompileError>> {
        let env = PrecompileEnv {
            context,
            config: &self.config,
            registry: self.registry.as_ref(),
            recovery: self.recovery.as_ref(),
        };

        let result = execute_precompile(address, &env, input)?;

        match &result {
            Ok(output) => {
                debug!(output_len = output.output.len(), "precompile call succeeded");
                self.record(|s| {
                    s.calls += 1;
                    s.successful_calls += 1;
                });
            }
            Err(err @ (PrecompileError::UnauthorizedCaller(_) | PrecompileError::NotStaticCall)) => {
                warn!(error = %err, "precompile call rejected");
                self.record(|s| {
                    s.calls += 1;
                    s.rejected_calls += 1;
                });
            }
            Err(err) if err.is_input_error() => {
                debug!(error = %err, "precompile call with invalid input");
                self.record(|s| {
                    s.calls += 1;
                    s.invalid_input_calls += 1;
                });
            }
            Err(err) => {
                warn!(error = %err, "precompile call failed");
                self.record(|s| {
                    s.calls += 1;
                    s.failed_calls += 1;
                });
            }
        }

        Some(result)
    }
}

/// Create a service with in-memory adapters, for tests and tooling.
///
/// The registry starts empty; publish a snapshot through the returned handle.
#[must_use]
pub fn create_test_service(config: ServiceConfig) -> (PrecompileService, Arc<InMemoryCandidateRegistry>) {
    let registry = Arc::new(InMemoryCandidateRegistry::new());
    let service = PrecompileService {
        config,
        registry: registry.clone(),
        recovery: Arc::new(K256SignerRecovery::new()),
        stats: RwLock::new(ServiceStats::default()),
    };
    (service, registry)
}

impl ConsortiumPrecompileApi for PrecompileService {
    fn sort_validators(&self, pool: &CandidatePool) -> Vec<Address> {
        pool.addresses_of(&stake_order(pool))
    }

    fn sort_registered_validators(&self) -> Result<Vec<Address>, RegistryError> {
        let snapshot = self.registry.snapshot()?;
        Ok(self.sort_validators(&snapshot.pool))
    }

    #[instrument(skip(self, pool), fields(candidates = pool.len()))]
    fn pick_validator_set(&self, pool: &CandidatePool, params: ElectionParameters) -> ValidatorSet {
        let (order, prioritized) = arrange_order(pool, params);
        debug_assert!(check_all_invariants(pool, params, &order, prioritized));
        ValidatorSet::new(pool.addresses_of(&order), prioritized)
    }

    fn pick_registered_validator_set(&self) -> Result<ValidatorSet, RegistryError> {
        let snapshot = self.registry.snapshot()?;
        Ok(self.pick_validator_set(&snapshot.pool, snapshot.params))
    }

    #[instrument(skip(self, first, second))]
    fn check_double_sign(
        &self,
        chain_id: U256,
        first: &[u8],
        second: &[u8],
    ) -> Result<EquivocationVerdict, HeaderError> {
        check_equivocation(chain_id, first, second, |hash, seal| {
            self.recovery.recover(hash, seal)
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
