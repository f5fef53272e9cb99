mod common;

use common::{
    ed25519_signer, golden_license, golden_record, rsa_signer, rsa_verifier,
    ED25519_PRIVATE_KEY_DER, ED25519_PUBLIC_KEY_DER, RSA_PUBLIC_KEY_DER, VALID_RSA_SHA1_LICENSE,
    VALID_RSA_SHA256_LICENSE,
};
use offline_license::keys::{load_signer, load_verifier, Ed25519Signer, Ed25519Verifier, RsaVerifier};
use offline_license::signature::{is_valid, verify};
use offline_license::{armor, LicenseError, SignatureAlgorithm, SignatureSigner};

// ── RSA ──────────────────────────────────────────────────────────

#[test]
fn rsa_sha1_fixture_verifies() {
    let license = armor::deserialize(VALID_RSA_SHA1_LICENSE).unwrap();
    assert_eq!(license.record(), &golden_record());
    assert!(is_valid(&license, &rsa_verifier(SignatureAlgorithm::RsaSha1)));
    verify(&license, &rsa_verifier(SignatureAlgorithm::RsaSha1)).unwrap();
}

#[test]
fn rsa_sha256_fixture_verifies_only_with_sha256() {
    let license = armor::deserialize(VALID_RSA_SHA256_LICENSE).unwrap();
    assert!(is_valid(&license, &rsa_verifier(SignatureAlgorithm::RsaSha256)));
    assert!(!is_valid(&license, &rsa_verifier(SignatureAlgorithm::RsaSha1)));
}

#[test]
fn rsa_signing_matches_fixture() {
    let fixture = armor::deserialize(VALID_RSA_SHA1_LICENSE).unwrap();
    let signature = rsa_signer(SignatureAlgorithm::RsaSha1)
        .sign_bytes(&offline_license::details::serialize_details(&golden_record()))
        .unwrap();
    assert_eq!(signature, fixture.signature());
}

#[test]
fn rsa_rejects_garbage_signature() {
    let verifier = rsa_verifier(SignatureAlgorithm::RsaSha1);
    assert!(!is_valid(&golden_license(), &verifier));
    assert!(!is_valid(&golden_record().with_signature(vec![0; 256]), &verifier));
    assert!(!is_valid(&golden_record().with_signature(vec![0xFF; 512]), &verifier));
}

#[test]
fn rsa_detects_single_bit_flips() {
    let license = armor::deserialize(VALID_RSA_SHA1_LICENSE).unwrap();
    let verifier = rsa_verifier(SignatureAlgorithm::RsaSha1);

    for bit in [0, 7, 8, 100, 1000, 2047] {
        let mut signature = license.signature().to_vec();
        signature[bit / 8] ^= 1 << (bit % 8);
        let tampered = license.record().clone().with_signature(signature);
        assert!(!is_valid(&tampered, &verifier), "bit {bit}");
    }
}

#[test]
fn rsa_detects_changed_details() {
    let license = armor::deserialize(VALID_RSA_SHA1_LICENSE).unwrap();
    let forged = offline_license::LicenseRecord::new(
        license.identifier(),
        "Someone Else",
        license.issue_date(),
        license.expiry_date(),
    )
    .unwrap()
    .with_signature(license.signature().to_vec());

    assert!(!is_valid(&forged, &rsa_verifier(SignatureAlgorithm::RsaSha1)));
}

#[test]
fn verify_reports_invalid_signature() {
    let err = verify(&golden_license(), &rsa_verifier(SignatureAlgorithm::RsaSha1)).unwrap_err();
    assert!(matches!(err, LicenseError::InvalidSignature));
    assert_eq!(err.to_string(), "Signature on license key is invalid");
}

#[test]
fn rsa_verifier_rejects_ed25519_algorithm() {
    let err = RsaVerifier::from_public_key_der(RSA_PUBLIC_KEY_DER, SignatureAlgorithm::Ed25519)
        .unwrap_err();
    assert!(matches!(err, LicenseError::Configuration(_)));
}

#[test]
fn load_verifier_rejects_wrong_key_type() {
    assert!(matches!(
        load_verifier(SignatureAlgorithm::Ed25519, RSA_PUBLIC_KEY_DER),
        Err(LicenseError::Configuration(_))
    ));
    assert!(matches!(
        load_verifier(SignatureAlgorithm::RsaSha1, b"not a key"),
        Err(LicenseError::Configuration(_))
    ));
}

#[test]
fn load_verifier_reports_algorithm() {
    let verifier = load_verifier(SignatureAlgorithm::RsaSha256, RSA_PUBLIC_KEY_DER).unwrap();
    assert_eq!(verifier.algorithm(), SignatureAlgorithm::RsaSha256);
}

// ── Ed25519 ──────────────────────────────────────────────────────

#[test]
fn ed25519_sign_and_verify() {
    let signer = ed25519_signer();
    let message = offline_license::details::serialize_details(&golden_record());
    let license = golden_record().with_signature(signer.sign_bytes(&message).unwrap());

    assert_eq!(license.signature().len(), 64);
    assert!(is_valid(&license, &signer.verifier()));
}

#[test]
fn ed25519_rejects_other_key() {
    let signer = ed25519_signer();
    let other = Ed25519Signer::from_seed(&[7; 32]);
    let message = offline_license::details::serialize_details(&golden_record());
    let license = golden_record().with_signature(signer.sign_bytes(&message).unwrap());

    assert!(!is_valid(&license, &other.verifier()));
}

#[test]
fn ed25519_rejects_malformed_signature() {
    let verifier = ed25519_signer().verifier();
    assert!(!is_valid(&golden_license(), &verifier));
    assert!(!is_valid(&golden_record().with_signature(Vec::new()), &verifier));
}

#[test]
fn ed25519_verifier_from_raw_bytes() {
    let seed = [9u8; 32];
    let public = ed25519_dalek::SigningKey::from_bytes(&seed).verifying_key().to_bytes();
    let verifier = Ed25519Verifier::from_bytes(&public).unwrap();

    let signer = Ed25519Signer::from_seed(&seed);
    let message = offline_license::details::serialize_details(&golden_record());
    let license = golden_record().with_signature(signer.sign_bytes(&message).unwrap());
    assert!(is_valid(&license, &verifier));
}

#[test]
fn ed25519_der_keys_load() {
    let signer = load_signer(SignatureAlgorithm::Ed25519, ED25519_PRIVATE_KEY_DER).unwrap();
    let verifier = load_verifier(SignatureAlgorithm::Ed25519, ED25519_PUBLIC_KEY_DER).unwrap();
    assert_eq!(signer.algorithm(), SignatureAlgorithm::Ed25519);

    let message = offline_license::details::serialize_details(&golden_record());
    let license = golden_record().with_signature(signer.sign_bytes(&message).unwrap());
    assert!(is_valid(&license, verifier.as_ref()));
    assert!(!is_valid(&license, &ed25519_signer().verifier()));
}
