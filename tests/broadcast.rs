use ark_ec::pairing::Pairing;
use ark_std::rand::rngs::StdRng;
use ark_std::rand::{Rng, SeedableRng};
use ark_std::test_rng;
use std::sync::Arc;
use std::thread;

use bestie::{broadcast, Bit, Error, Identity, Pattern, SubsetDescriptor, Symbol};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn random_identity<R: Rng>(rng: &mut R, l: usize) -> Identity {
    Identity::new(
        (0..l)
            .map(|_| if rng.gen() { Bit::One } else { Bit::Zero })
            .collect(),
    )
}

/// A descriptor that covers `id` and leaves it unrevoked (`d > 0`).
fn random_covering_subset<R: Rng>(rng: &mut R, id: &Identity) -> SubsetDescriptor {
    let covered = id
        .bits()
        .iter()
        .map(|b| {
            if rng.gen() {
                Symbol::Fixed(*b)
            } else {
                Symbol::Wildcard
            }
        })
        .collect();

    let mut revoked: Vec<_> = id
        .bits()
        .iter()
        .map(|b| match rng.gen_range(0..3) {
            0 => Symbol::Wildcard,
            1 => Symbol::Fixed(*b),
            _ => Symbol::Fixed(b.flip()),
        })
        .collect();
    let forced = rng.gen_range(0..id.len());
    revoked[forced] = Symbol::Fixed(id.bits()[forced].flip());

    let subset = SubsetDescriptor::new(Pattern::new(covered), Pattern::new(revoked)).unwrap();
    assert!(subset.covered().matches(id));
    assert!(!subset.revoked().matches(id));
    subset
}

fn check_round_trip<E: Pairing>(seed: u64) {
    let rng = &mut StdRng::seed_from_u64(seed);
    for l in 1..=6 {
        let (pp, mk) = broadcast::setup::<E, _>(rng, l).unwrap();
        assert!(pp.verify_master_key(&mk));

        for _ in 0..3 {
            let id = random_identity(rng, l);
            let sk = mk.key_gen(rng, &pp, &id).unwrap();
            let subset = random_covering_subset(rng, &id);

            let m = pp.random_message(rng);
            let hdr = pp.encrypt(rng, &subset, m).unwrap();
            assert_eq!(
                sk.decrypt(&subset, &id, &hdr).unwrap(),
                m,
                "id = {id}, cl = {}, rl = {}",
                subset.covered(),
                subset.revoked()
            );
        }
    }
}

fn check_revocation<E: Pairing>(seed: u64) {
    let rng = &mut StdRng::seed_from_u64(seed);
    let l = 5;
    let (pp, mk) = broadcast::setup::<E, _>(rng, l).unwrap();

    for _ in 0..4 {
        let id = random_identity(rng, l);
        let sk = mk.key_gen(rng, &pp, &id).unwrap();

        // RL equals id wherever it is fixed; CL is arbitrary
        let revoked = id
            .bits()
            .iter()
            .map(|b| {
                if rng.gen() {
                    Symbol::Fixed(*b)
                } else {
                    Symbol::Wildcard
                }
            })
            .collect();
        let covered = (0..l)
            .map(|_| match rng.gen_range(0..3) {
                0 => Symbol::Wildcard,
                1 => Symbol::Fixed(Bit::Zero),
                _ => Symbol::Fixed(Bit::One),
            })
            .collect();
        let subset = SubsetDescriptor::new(Pattern::new(covered), Pattern::new(revoked)).unwrap();
        assert!(subset.revoked().matches(&id));

        let m = pp.random_message(rng);
        let hdr = pp.encrypt(rng, &subset, m).unwrap();
        assert!(matches!(
            sk.decrypt(&subset, &id, &hdr),
            Err(Error::Revoked)
        ));
    }
}

#[test]
fn test_round_trip_bls12_381() {
    init_tracing();
    check_round_trip::<ark_bls12_381::Bls12_381>(1);
}

#[test]
fn test_round_trip_bn254() {
    check_round_trip::<ark_bn254::Bn254>(2);
}

#[test]
fn test_revocation_bls12_381() {
    init_tracing();
    check_revocation::<ark_bls12_381::Bls12_381>(3);
}

#[test]
fn test_revocation_bn254() {
    check_revocation::<ark_bn254::Bn254>(4);
}

#[test]
fn test_hand_checked_scenario() {
    type E = ark_bls12_381::Bls12_381;

    let rng = &mut test_rng();
    let (pp, mk) = broadcast::setup::<E, _>(rng, 4).unwrap();
    let id: Identity = "0110".parse().unwrap();
    let sk = mk.key_gen(rng, &pp, &id).unwrap();
    let subset = SubsetDescriptor::parse("***0", "*100").unwrap();

    let coverage = subset.coverage(&id).unwrap();
    assert_eq!(coverage.p, vec![2]);
    assert_eq!(coverage.q, vec![1, 3]);
    assert_eq!(coverage.d(), 1);

    let m = pp.random_message(rng);
    let hdr = pp.encrypt(rng, &subset, m).unwrap();
    assert_eq!(sk.decrypt(&subset, &id, &hdr).unwrap(), m);
}

#[test]
fn test_full_coverage_scenario_is_revoked() {
    type E = ark_bn254::Bn254;

    let rng = &mut test_rng();
    let (pp, mk) = broadcast::setup::<E, _>(rng, 8).unwrap();
    let id: Identity = "00000110".parse().unwrap();
    let sk = mk.key_gen(rng, &pp, &id).unwrap();
    let subset = SubsetDescriptor::parse("*******0", "*******0").unwrap();

    let m = pp.random_message(rng);
    let hdr = pp.encrypt(rng, &subset, m).unwrap();
    assert!(sk.decrypt(&subset, &id, &hdr).unwrap_err().is_revoked());
}

#[test]
fn test_independent_keys_for_same_identity() {
    type E = ark_bls12_381::Bls12_381;

    let rng = &mut test_rng();
    let (pp, mk) = broadcast::setup::<E, _>(rng, 4).unwrap();
    let id: Identity = "1011".parse().unwrap();

    let sk1 = mk.key_gen(rng, &pp, &id).unwrap();
    let sk2 = mk.key_gen(rng, &pp, &id).unwrap();
    assert!(sk1 != sk2);

    for (cl, rl) in [("1***", "0***"), ("**11", "*1*0"), ("1011", "1100")] {
        let subset = SubsetDescriptor::parse(cl, rl).unwrap();
        let m = pp.random_message(rng);
        let hdr = pp.encrypt(rng, &subset, m).unwrap();
        assert_eq!(sk1.decrypt(&subset, &id, &hdr).unwrap(), m);
        assert_eq!(sk2.decrypt(&subset, &id, &hdr).unwrap(), m);
    }
}

#[test]
fn test_input_validation() {
    type E = ark_bls12_381::Bls12_381;

    assert!("01a1".parse::<Identity>().is_err());
    assert!("01*1".parse::<Identity>().is_err());
    assert!(SubsetDescriptor::parse("0?**", "****").unwrap_err().is_invalid_input());
    assert!(SubsetDescriptor::parse("****", "***-").unwrap_err().is_invalid_input());

    let rng = &mut test_rng();
    let (pp, mk) = broadcast::setup::<E, _>(rng, 4).unwrap();
    let id: Identity = "0110".parse().unwrap();
    let sk = mk.key_gen(rng, &pp, &id).unwrap();

    let long: Identity = "01100".parse().unwrap();
    assert!(mk.key_gen(rng, &pp, &long).err().unwrap().is_invalid_input());

    let short = SubsetDescriptor::parse("***", "*10").unwrap();
    let m = pp.random_message(rng);
    assert!(pp.encrypt(rng, &short, m).unwrap_err().is_invalid_input());

    let subset = SubsetDescriptor::parse("***0", "*100").unwrap();
    let hdr = pp.encrypt(rng, &subset, m).unwrap();
    assert!(sk.decrypt(&short, &id, &hdr).unwrap_err().is_invalid_input());
    assert!(sk.decrypt(&subset, &long, &hdr).unwrap_err().is_invalid_input());
}

#[test]
fn test_concurrent_issuance_and_decryption() {
    type E = ark_bls12_381::Bls12_381;

    let rng = &mut test_rng();
    let (pp, mk) = broadcast::setup::<E, _>(rng, 6).unwrap();
    let subset = SubsetDescriptor::parse("1*****", "*0*1**").unwrap();
    let m = pp.random_message(rng);
    let hdr = pp.encrypt(rng, &subset, m).unwrap();

    let shared = Arc::new((pp, mk, subset, hdr));
    let handles: Vec<_> = ["110000", "111111", "100100", "101010"]
        .into_iter()
        .enumerate()
        .map(|(seed, id)| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let (pp, mk, subset, hdr) = &*shared;
                let rng = &mut StdRng::seed_from_u64(seed as u64);
                let id: Identity = id.parse().unwrap();
                let sk = mk.key_gen(rng, pp, &id).unwrap();
                (sk.to_bytes().unwrap(), sk.decrypt(subset, &id, hdr))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // "111111" differs from RL only where RL is fixed to 0, "100100" is revoked
    assert_eq!(*results[0].1.as_ref().unwrap(), m);
    assert_eq!(*results[1].1.as_ref().unwrap(), m);
    assert!(matches!(results[2].1, Err(Error::Revoked)));
    assert_eq!(*results[3].1.as_ref().unwrap(), m);

    // independent streams, independent keys
    for i in 0..results.len() {
        for j in i + 1..results.len() {
            assert_ne!(results[i].0, results[j].0);
        }
    }
}
