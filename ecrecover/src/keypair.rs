//! Private/public key pairs.

use crate::{Error, PrivateKey, PublicKey, Result};
use rand_core::CryptoRngCore;
use signature::{hazmat::PrehashSigner, KeypairRef};

/// A [`PrivateKey`] along with its precomputed [`PublicKey`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Keypair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl Keypair {
    /// Generate a fresh keypair from `rng`.
    pub fn generate(rng: &mut impl CryptoRngCore) -> Result<Self> {
        let keypair = Self::from_private_key(PrivateKey::random(rng)?);

        #[cfg(feature = "tracing")]
        tracing::debug!("generated secp256k1 keypair");

        Ok(keypair)
    }

    /// Derive the keypair for an existing private key.
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self {
            private_key,
            public_key,
        }
    }

    /// Derive the keypair for a 32-byte big endian private key.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self> {
        PrivateKey::from_bytes(bytes).map(Self::from_private_key)
    }

    /// Borrow the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Borrow the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Split into the private and public key.
    pub fn into_parts(self) -> (PrivateKey, PublicKey) {
        (self.private_key, self.public_key)
    }
}

impl AsRef<PublicKey> for Keypair {
    fn as_ref(&self) -> &PublicKey {
        &self.public_key
    }
}

impl KeypairRef for Keypair {
    type VerifyingKey = PublicKey;
}

impl From<PrivateKey> for Keypair {
    fn from(private_key: PrivateKey) -> Keypair {
        Keypair::from_private_key(private_key)
    }
}

impl TryFrom<&[u8]> for Keypair {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_secret_bytes(bytes)
    }
}

impl<S> PrehashSigner<S> for Keypair
where
    PrivateKey: PrehashSigner<S>,
{
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<S> {
        self.private_key.sign_prehash(prehash)
    }
}
