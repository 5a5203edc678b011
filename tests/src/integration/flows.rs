//! # Integration Test Flows
//!
//! Tests that the election and slashing precompiles work together the way
//! the validator-set and slash-indicator contracts drive them.
//!
//! ## Flows Tested:
//!
//! 1. **Epoch rotation**: registry snapshot → `pickValidatorSet()` → elected set
//! 2. **Slashing**: elected producer equivocates → `validatingDoubleSignProof` →
//!    producer removed → next epoch excludes them
//! 3. **Concurrent callers**: one service shared across threads

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use alloy_sol_types::SolCall;
    use k256::ecdsa::SigningKey;
    use qc_18_consortium_precompiles::domain::header::{BLOOM_LEN, NONCE_LEN};
    use qc_18_consortium_precompiles::domain::services::address_from_public_key;
    use qc_18_consortium_precompiles::evm::precompiles::interface::from_sol_address;
    use qc_18_consortium_precompiles::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const VALIDATOR_SET: u64 = 0x1000;
    const SLASH_INDICATOR: u64 = 0x2000;
    const CHAIN_ID: u64 = 2020;

    fn chain_id() -> U256 {
        U256::from(CHAIN_ID)
    }

    struct Producer {
        key: SigningKey,
        address: Address,
    }

    impl Producer {
        fn random() -> Self {
            let key = SigningKey::random(&mut rand::thread_rng());
            let address =
                address_from_public_key(key.verifying_key().to_encoded_point(false).as_bytes())
                    .unwrap();
            Self { key, address }
        }

        /// Seals a header at `number`; `state` makes sibling blocks distinct.
        ///
        /// Returns the header tuple the slash-indicator contract submits.
        fn seal_block(&self, number: u64, state: u8) -> Vec<u8> {
            let header = HeaderRecord {
                parent_hash: Hash::new([0x33; 32]),
                uncle_hash: Hash::ZERO,
                coinbase: self.address,
                state_root: Hash::new([state; 32]),
                transactions_root: Hash::ZERO,
                receipts_root: Hash::ZERO,
                logs_bloom: vec![0u8; BLOOM_LEN],
                difficulty: U256::from(7),
                number: U256::from(number),
                gas_limit: 100_000_000,
                gas_used: 0,
                timestamp: 1_600_000_000 + number * 3,
                extra_data: Bytes(vec![0u8; 32 + Seal::LEN]),
                mix_digest: Hash::ZERO,
                nonce: [0u8; NONCE_LEN],
            };

            let hash = header.signing_hash(chain_id()).unwrap();
            let (signature, recovery_id) =
                self.key.sign_prehash_recoverable(hash.as_bytes()).unwrap();
            let bytes = signature.to_bytes();
            let mut r = [0u8; 32];
            let mut s = [0u8; 32];
            r.copy_from_slice(&bytes[..32]);
            s.copy_from_slice(&bytes[32..]);

            let sealed = header.with_seal(&Seal::new(r, s, recovery_id.to_byte()));
            encode_header(&sealed, chain_id())
        }
    }

    fn make_service() -> (PrecompileService, Arc<InMemoryCandidateRegistry>) {
        create_test_service(ServiceConfig {
            validator_set_contract: Address::from_low_u64_be(VALIDATOR_SET),
            slash_indicator_contract: Address::from_low_u64_be(SLASH_INDICATOR),
            ..ServiceConfig::default()
        })
    }

    /// Producer `i` stakes `(i + 1) * 1000`; every third one is trusted.
    fn snapshot_for(producers: &[Producer], params: ElectionParameters) -> RegistrySnapshot {
        RegistrySnapshot {
            pool: CandidatePool::new(
                producers
                    .iter()
                    .enumerate()
                    .map(|(i, p)| Candidate::new(p.address, U256::from((i as u64 + 1) * 1_000), i % 3 == 0))
                    .collect(),
            ),
            params,
        }
    }

    fn pick(service: &PrecompileService) -> Vec<Address> {
        let context = CallContext::static_call(Address::from_low_u64_be(VALIDATOR_SET), chain_id());
        let output = service
            .execute(
                PICK_VALIDATOR_SET_ADDRESS,
                &context,
                &PickRegisteredValidatorSetCall {}.abi_encode(),
            )
            .expect("consortium precompile")
            .expect("pick succeeds");
        PickValidatorSetCall::abi_decode_returns(output.output.as_slice(), true)
            .unwrap()
            .validators
            .into_iter()
            .map(from_sol_address)
            .collect()
    }

    fn submit_proof(service: &PrecompileService, first: &[u8], second: &[u8]) -> bool {
        let context = CallContext::static_call(Address::from_low_u64_be(SLASH_INDICATOR), chain_id());
        let input = ValidatingDoubleSignProofCall {
            header1: first.to_vec().into(),
            header2: second.to_vec().into(),
        }
        .abi_encode();
        let output = service
            .execute(VERIFY_DOUBLE_SIGN_ADDRESS, &context, &input)
            .expect("consortium precompile")
            .expect("proof decodes");
        ValidatingDoubleSignProofCall::abi_decode_returns(output.output.as_slice(), true)
            .unwrap()
            .proven
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[test]
    fn test_epoch_rotation_with_slashing() {
        let (service, registry) = make_service();
        let mut producers: Vec<Producer> = (0..25).map(|_| Producer::random()).collect();
        let params = ElectionParameters::new(21, 5);

        // Epoch 1
        let snapshot = snapshot_for(&producers, params);
        registry.publish(snapshot.clone());
        let elected = pick(&service);
        assert_eq!(elected, service.pick_validator_set(&snapshot.pool, params).into_addresses());
        assert_eq!(elected.len(), 21);

        // Prioritized block: the five heaviest trusted producers (24, 21, 18, 15, 12).
        let prioritized: Vec<Address> = [24, 21, 18, 15, 12]
            .iter()
            .map(|&i| producers[i].address)
            .collect();
        assert_eq!(&elected[..5], prioritized.as_slice());

        // The heaviest untrusted producer equivocates at height 100.
        let offender = producers.remove(23);
        assert!(elected.contains(&offender.address));
        let first = offender.seal_block(100, 1);
        let second = offender.seal_block(100, 2);
        assert!(submit_proof(&service, &first, &second));

        // A replayed single block is not evidence.
        assert!(!submit_proof(&service, &first, &first));

        // Epoch 2 without the offender.
        registry.publish(snapshot_for(&producers, params));
        let elected = pick(&service);
        assert_eq!(elected.len(), 21);
        assert!(!elected.contains(&offender.address));

        let stats = service.stats();
        assert_eq!(stats.calls, 4);
        assert_eq!(stats.successful_calls, 4);
    }

    #[test]
    fn test_honest_producers_cannot_be_framed() {
        let (service, _registry) = make_service();
        let honest = Producer::random();
        let attacker = Producer::random();

        // Attacker seals a sibling of the honest block.
        let genuine = honest.seal_block(50, 1);
        let forged = attacker.seal_block(50, 2);
        assert!(!submit_proof(&service, &genuine, &forged));

        // Sequential blocks by the same producer are not evidence.
        assert!(!submit_proof(&service, &honest.seal_block(50, 1), &honest.seal_block(51, 1)));
    }

    #[test]
    fn test_registry_outage_fails_calls() {
        let (service, registry) = make_service();
        let producers: Vec<Producer> = (0..5).map(|_| Producer::random()).collect();
        registry.publish(snapshot_for(&producers, ElectionParameters::new(21, 11)));
        assert_eq!(pick(&service).len(), 5);

        registry.clear();
        let context = CallContext::static_call(Address::from_low_u64_be(VALIDATOR_SET), chain_id());
        let result = service
            .execute(
                VALIDATOR_SORTING_ADDRESS,
                &context,
                &SortRegisteredValidatorsCall {}.abi_encode(),
            )
            .expect("consortium precompile");
        assert_eq!(
            result.unwrap_err(),
            PrecompileError::Registry(RegistryError::Unavailable)
        );
        assert_eq!(service.stats().failed_calls, 1);
    }

    #[test]
    fn test_concurrent_callers_see_same_set() {
        let (service, registry) = make_service();
        let producers: Vec<Producer> = (0..30).map(|_| Producer::random()).collect();
        registry.publish(snapshot_for(&producers, ElectionParameters::new(21, 11)));

        let service = Arc::new(service);
        let expected = pick(&service);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                thread::spawn(move || (0..10).map(|_| pick(&service)).collect::<Vec<_>>())
            })
            .collect();

        for handle in handles {
            for elected in handle.join().unwrap() {
                assert_eq!(elected, expected);
            }
        }
        assert_eq!(service.stats().calls, 81);
    }
}
