mod common;

use common::{utc, RSA_PUBLIC_KEY_DER, VALID_RSA_SHA1_LICENSE};
use offline_license::config::{DEFAULT_PUBLIC_KEY_FILE, CONFIG_FILE_NAME};
use offline_license::{FixedClock, LicenseError, SignatureAlgorithm, VerifierConfig};
use std::path::PathBuf;
use std::sync::Arc;

#[test]
fn defaults_match_reference_deployment() {
    let config = VerifierConfig::default();
    assert_eq!(config.public_key_path, PathBuf::from(DEFAULT_PUBLIC_KEY_FILE));
    assert_eq!(config.algorithm, SignatureAlgorithm::RsaSha1);
}

#[test]
fn empty_toml_uses_defaults() {
    assert_eq!(VerifierConfig::from_toml_str("").unwrap(), VerifierConfig::default());
}

#[test]
fn parses_all_fields() {
    let config = VerifierConfig::from_toml_str(
        r#"
        public_key_path = "/etc/app/license.der"
        algorithm = "ed25519"
        "#,
    )
    .unwrap();
    assert_eq!(config.public_key_path, PathBuf::from("/etc/app/license.der"));
    assert_eq!(config.algorithm, SignatureAlgorithm::Ed25519);
}

#[test]
fn rejects_unknown_algorithm() {
    let err = VerifierConfig::from_toml_str(r#"algorithm = "dsa""#).unwrap_err();
    assert!(matches!(err, LicenseError::Configuration(_)));
}

#[test]
fn rejects_unknown_fields() {
    let err = VerifierConfig::from_toml_str(r#"public_key = "x""#).unwrap_err();
    assert!(matches!(err, LicenseError::Configuration(_)));
}

#[test]
fn algorithm_names_roundtrip() {
    for algorithm in [
        SignatureAlgorithm::RsaSha1,
        SignatureAlgorithm::RsaSha256,
        SignatureAlgorithm::Ed25519,
    ] {
        assert_eq!(algorithm.to_string().parse::<SignatureAlgorithm>().unwrap(), algorithm);
    }
    assert_eq!(" RSA-SHA1 ".parse::<SignatureAlgorithm>().unwrap(), SignatureAlgorithm::RsaSha1);
    assert!("sha1withrsa".parse::<SignatureAlgorithm>().is_err());
}

#[test]
fn relative_key_path_resolves_against_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&config_path, "public_key_path = \"keys/public.der\"\n").unwrap();

    let config = VerifierConfig::from_path(&config_path).unwrap();
    assert_eq!(config.public_key_path, dir.path().join("keys/public.der"));
}

#[test]
fn absolute_key_path_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let key_path = dir.path().join("public.der");
    let config_path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &config_path,
        format!("public_key_path = {:?}\n", key_path.display().to_string()),
    )
    .unwrap();

    let config = VerifierConfig::from_path(&config_path).unwrap();
    assert_eq!(config.public_key_path, key_path);
}

#[test]
fn missing_config_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = VerifierConfig::from_path(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, LicenseError::Configuration(_)));
}

#[test]
fn builds_verifier_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(DEFAULT_PUBLIC_KEY_FILE), RSA_PUBLIC_KEY_DER).unwrap();
    let config_path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&config_path, "algorithm = \"rsa-sha1\"\n").unwrap();

    let verifier = VerifierConfig::from_path(&config_path)
        .unwrap()
        .build_verifier_with_clock(Arc::new(FixedClock::new(utc(2015, 1, 1, 0, 0, 0))))
        .unwrap();

    assert!(verifier.verify_text(VALID_RSA_SHA1_LICENSE).is_ok());
}

#[test]
fn missing_key_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = VerifierConfig {
        public_key_path: dir.path().join("absent.key"),
        algorithm: SignatureAlgorithm::RsaSha1,
    };
    let err = config.build_verifier().unwrap_err();
    assert!(matches!(err, LicenseError::Configuration(_)));
}

#[test]
fn mismatched_key_algorithm_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let key_path = dir.path().join("public.der");
    std::fs::write(&key_path, RSA_PUBLIC_KEY_DER).unwrap();
    let config = VerifierConfig {
        public_key_path: key_path,
        algorithm: SignatureAlgorithm::Ed25519,
    };
    assert!(matches!(config.build_verifier(), Err(LicenseError::Configuration(_))));
}

#[test]
fn default_path_ends_with_config_file_name() {
    if let Some(path) = VerifierConfig::default_path() {
        assert!(path.ends_with(PathBuf::from("offline-license").join(CONFIG_FILE_NAME)));
    }
}
