//! Signed-envelope decoding and signature verification.
//!
//! A license travels as a JSON envelope: a base64 payload (the license
//! claims) plus the signer records. Verification trusts exactly one pinned
//! certificate; there is no chain walking and no revocation checking.
//!
//! Expiry is deliberately not checked here. The caller compares
//! `valid_until` against its own clock so that "valid but expired" stays
//! distinguishable from "invalid".

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::debug;
use x509_parser::pem::parse_x509_pem;

use crate::error::{LicenseError, LicenseResult};
use crate::license::License;

/// Outer structure of a signed license document.
#[derive(Debug, Deserialize)]
struct SignedEnvelope {
    /// Base64-encoded license claims (JSON).
    payload: String,
    /// Signer records; at least one must verify.
    #[serde(default)]
    signatures: Vec<SignerRecord>,
}

/// A single signer record inside the envelope.
#[derive(Debug, Deserialize)]
struct SignerRecord {
    /// Base64-encoded RSA PKCS#1 v1.5 signature over the raw payload bytes.
    signature: String,
    /// Optional hint naming the signing key; informational only.
    #[serde(default)]
    #[allow(dead_code)]
    key_id: Option<String>,
}

/// Verifies signed license envelopes against a pinned public key.
#[derive(Debug, Clone)]
pub struct LicenseVerifier {
    public_key: RsaPublicKey,
}

impl LicenseVerifier {
    /// Create a verifier from an already-extracted RSA public key.
    #[must_use]
    pub fn new(public_key: RsaPublicKey) -> Self {
        Self { public_key }
    }

    /// Create a verifier from the pinned PEM certificate baked into the
    /// deployment.
    pub fn from_certificate_pem(pem: &str) -> LicenseResult<Self> {
        let (_, parsed) = parse_x509_pem(pem.as_bytes())
            .map_err(|e| LicenseError::BadCertificate(format!("not PEM: {e}")))?;
        let certificate = parsed
            .parse_x509()
            .map_err(|e| LicenseError::BadCertificate(format!("not an X.509 certificate: {e}")))?;

        let spki = certificate.public_key();
        let public_key = RsaPublicKey::from_pkcs1_der(&spki.subject_public_key.data)
            .map_err(|e| LicenseError::BadCertificate(format!("not an RSA public key: {e}")))?;

        Ok(Self { public_key })
    }

    /// Create a verifier from an SPKI public-key PEM.
    pub fn from_public_key_pem(pem: &str) -> LicenseResult<Self> {
        let public_key = RsaPublicKey::from_public_key_pem(pem)
            .map_err(|e| LicenseError::BadCertificate(format!("not an RSA public key: {e}")))?;
        Ok(Self { public_key })
    }

    /// Decode and verify a signed license document.
    ///
    /// Fails with the malformed/missing-signature/invalid-signature variants
    /// of [`LicenseError`]; never checks expiry. Pure over its input and the
    /// pinned key.
    pub fn verify(&self, raw: &str) -> LicenseResult<License> {
        let envelope: SignedEnvelope = serde_json::from_str(raw)
            .map_err(|e| LicenseError::Malformed(format!("envelope: {e}")))?;

        let payload = BASE64
            .decode(&envelope.payload)
            .map_err(|e| LicenseError::Malformed(format!("payload encoding: {e}")))?;

        // Strict claim decoding: missing required fields fail, unknown
        // fields are ignored.
        let license: License = serde_json::from_slice(&payload)
            .map_err(|e| LicenseError::Malformed(format!("claims: {e}")))?;

        if envelope.signatures.is_empty() {
            return Err(LicenseError::SignatureMissing);
        }

        let digest = Sha256::digest(&payload);
        let verified = envelope.signatures.iter().any(|record| {
            let Ok(signature) = BASE64.decode(&record.signature) else {
                return false;
            };
            self.public_key
                .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature)
                .is_ok()
        });

        if !verified {
            return Err(LicenseError::SignatureInvalid);
        }

        debug!(
            customer_id = %license.customer_id,
            valid_until = %license.valid_until,
            "License signature verified"
        );
        Ok(license)
    }
}
