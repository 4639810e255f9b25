//! Accounts used to sign network operations.
//!
//! An account wraps an Ed25519 key pair and a derived address. Key material
//! is only usable while the account is unlocked.

use crate::core::{sha3_256, Error, Result};
use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

fn derive_address(public_key: &[u8; 32]) -> String {
    let hash = sha3_256(public_key);
    // Address is the trailing 20 bytes of the public-key hash.
    format!("0x{}", hex::encode(&hash.as_bytes()[12..]))
}

/// An account on the network, identified by its address.
pub struct Account {
    address: String,
    password: Option<String>,
    signing_key: SigningKey,
    unlocked: bool,
}

impl Account {
    /// Create a new account with a random key pair, protected by a password.
    pub fn create(password: &str) -> Self {
        use rand::RngCore;
        let mut csprng = rand::rngs::OsRng;
        let mut secret_key_bytes = [0u8; 32];
        csprng.fill_bytes(&mut secret_key_bytes);
        let signing_key = SigningKey::from_bytes(&secret_key_bytes);
        let address = derive_address(&signing_key.verifying_key().to_bytes());
        Self {
            address,
            password: Some(password.to_string()),
            signing_key,
            unlocked: false,
        }
    }

    /// Import an account from a base64-encoded signing key.
    pub fn from_key(encoded_key: &str, password: &str) -> Result<Self> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded_key)
            .map_err(|e| Error::InvalidKeyFormat(e.to_string()))?;
        let key_bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::InvalidKeyFormat("signing key must be 32 bytes".into()))?;
        let signing_key = SigningKey::from_bytes(&key_bytes);
        let address = derive_address(&signing_key.verifying_key().to_bytes());
        Ok(Self {
            address,
            password: Some(password.to_string()),
            signing_key,
            unlocked: false,
        })
    }

    /// The account address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether the account has a usable address.
    pub fn is_valid(&self) -> bool {
        !self.address.is_empty()
    }

    /// Whether the account is currently unlocked.
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Compare an address with this account's, ignoring case.
    pub fn is_address_equal(&self, address: &str) -> bool {
        self.address.eq_ignore_ascii_case(address)
    }

    /// Unlock the account so it can sign.
    ///
    /// With no password given the one supplied at creation is used.
    /// Returns whether the account is now unlocked.
    pub fn unlock(&mut self, password: Option<&str>) -> Result<bool> {
        let candidate = match password {
            Some(p) => p.to_string(),
            None => self.password.clone().ok_or(Error::PasswordRequired)?,
        };
        self.unlocked = match &self.password {
            Some(stored) => *stored == candidate,
            None => true,
        };
        Ok(self.unlocked)
    }

    /// Lock the account. Returns whether it was unlocked.
    pub fn lock(&mut self) -> bool {
        let was_unlocked = self.unlocked;
        self.unlocked = false;
        was_unlocked
    }

    /// The verifying (public) key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Sign a message. The account must be unlocked.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        if !self.unlocked {
            return Err(Error::AccountLocked);
        }
        let signature = self.signing_key.sign(message);
        Ok(signature.to_bytes().to_vec())
    }

    /// Verify a signature made by this account.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        let sig_bytes: [u8; 64] = signature
            .try_into()
            .map_err(|_| Error::InvalidKeyFormat("invalid signature length".into()))?;
        let sig = Signature::from_bytes(&sig_bytes);
        self.verifying_key().verify(message, &sig)?;
        Ok(())
    }

    /// Export the signing key as base64. The account must be unlocked.
    pub fn export_key(&self) -> Result<String> {
        if !self.unlocked {
            return Err(Error::AccountLocked);
        }
        Ok(base64::engine::general_purpose::STANDARD.encode(self.signing_key.to_bytes()))
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("unlocked", &self.unlocked)
            .finish()
    }
}
