//! Secret encryption for bot file properties
//!
//! Values are sealed with AES-256-GCM. The key is the SHA-256 digest of the
//! bot file secret and each payload is stored as `base64(nonce || ciphertext)`.

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng, Payload},
    Aes256Gcm,
};
use anyhow::{anyhow, bail, Result};
use sha2::{Digest, Sha256};

const NONCE_BYTES: usize = 12;
const AAD: &[u8] = b"msbot-bot-file-v1";

fn derive_key(secret: &str) -> Result<[u8; 32]> {
    if secret.is_empty() {
        bail!("bot file secret must not be empty");
    }
    let digest = Sha256::digest(secret.as_bytes());
    let mut key = [0u8; 32];
    key.copy_from_slice(&digest);
    Ok(key)
}

fn cipher(secret: &str) -> Result<Aes256Gcm> {
    let key = derive_key(secret)?;
    Aes256Gcm::new_from_slice(&key).map_err(|_| anyhow!("secret key material has invalid length"))
}

pub fn encrypt(value: &str, secret: &str) -> Result<String> {
    let cipher = cipher(secret)?;
    let mut nonce = [0u8; NONCE_BYTES];
    use aes_gcm::aead::rand_core::RngCore as _;
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(
            (&nonce).into(),
            Payload {
                msg: value.as_bytes(),
                aad: AAD,
            },
        )
        .map_err(|_| anyhow!("encryption failed"))?;

    let mut payload = Vec::with_capacity(NONCE_BYTES + ciphertext.len());
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&ciphertext);
    Ok(base64::encode(payload))
}

pub fn decrypt(payload: &str, secret: &str) -> Result<String> {
    let cipher = cipher(secret)?;
    let raw = base64::decode(payload).map_err(|_| anyhow!("encrypted value is not valid base64"))?;
    if raw.len() <= NONCE_BYTES {
        bail!("encrypted value is truncated");
    }

    let (nonce, ciphertext) = raw.split_at(NONCE_BYTES);
    let plaintext = cipher
        .decrypt(
            nonce.into(),
            Payload {
                msg: ciphertext,
                aad: AAD,
            },
        )
        .map_err(|_| anyhow!("secret is wrong or the value is corrupt"))?;
    String::from_utf8(plaintext).map_err(|_| anyhow!("decrypted value is not valid UTF-8"))
}
