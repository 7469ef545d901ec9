mod common;

use {
    common::{tokens, RoundFixture},
    std::thread,
    tranche_protocol::{ClaimStatus, ErrorCode, VestingSchedule, U256},
};

#[test]
fn test_same_address_claims_never_double_spend() {
    let fixture = RoundFixture::new();
    // pool holds far more than any single allocation
    let distributor = fixture.distributor_with_pool(VestingSchedule::Immediate, tokens(1_000_000));
    let (bob, proof) = fixture.bob();

    let results: Vec<Result<U256, ErrorCode>> = thread::scope(|s| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                s.spawn(|| distributor.claim(&bob.claimant, bob.amount, tokens(300), proof, 0))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let total = results
        .iter()
        .filter_map(|result| result.as_ref().ok())
        .fold(U256::ZERO, |acc, amount| acc + *amount);
    assert_eq!(total, bob.amount);
    assert_eq!(distributor.token().balance_of(&bob.claimant), bob.amount);

    // 300 + 300 + 300 + 100, then every other attempt finds nothing left
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 4);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| *e == ErrorCode::NothingToClaim));

    let record = distributor.ledger().record(&bob.claimant).unwrap();
    assert_eq!(record.claim_count, 4);
    assert_eq!(
        distributor.ledger().status(&bob.claimant, bob.amount),
        ClaimStatus::FullyClaimed
    );
}

#[test]
fn test_different_addresses_claim_in_parallel() {
    let fixture = RoundFixture::new();
    let distributor = fixture.distributor(VestingSchedule::Immediate);

    thread::scope(|s| {
        for (leaf, proof) in fixture.leaves.iter().zip(fixture.proofs.iter()) {
            let distributor = &distributor;
            s.spawn(move || {
                let transferred = distributor
                    .claim(&leaf.claimant, leaf.amount, leaf.amount, proof, 0)
                    .unwrap();
                assert_eq!(transferred, leaf.amount);
            });
        }
    });

    assert_eq!(distributor.token().balance(), U256::ZERO);
    for leaf in &fixture.leaves {
        assert_eq!(distributor.token().balance_of(&leaf.claimant), leaf.amount);
    }
}
