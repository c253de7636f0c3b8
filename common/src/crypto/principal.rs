use blake3::Hasher;
use rand::RngCore;
use serde::de::Error as SerdeError;
use serde::{Deserialize, Serialize};
use std::{
    convert::TryInto,
    fmt::{Display, Error, Formatter},
    str::FromStr,
};

use crate::config::PRINCIPAL_SEED_DOMAIN;

pub const PRINCIPAL_SIZE: usize = 32; // 32 bytes / 256 bits

/// Account identity used as an authorization subject.
///
/// The all-zero principal is the null identity: it can never own a
/// controller nor receive minted assets.
#[derive(Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Hash, Debug)]
pub struct Principal([u8; PRINCIPAL_SIZE]);

impl Principal {
    pub const fn new(bytes: [u8; PRINCIPAL_SIZE]) -> Self {
        Principal(bytes)
    }

    pub const fn zero() -> Self {
        Principal::new([0; PRINCIPAL_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Derive a deterministic principal from a human readable seed
    pub fn from_seed(seed: &str) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(PRINCIPAL_SEED_DOMAIN);
        hasher.update(seed.as_bytes());
        let result: [u8; PRINCIPAL_SIZE] = hasher.finalize().into();
        Principal(result)
    }

    /// Generate a random, non-zero principal
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let mut bytes = [0u8; PRINCIPAL_SIZE];
            rng.fill_bytes(&mut bytes);
            let principal = Principal(bytes);
            if !principal.is_zero() {
                return principal;
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8; PRINCIPAL_SIZE] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; PRINCIPAL_SIZE] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Principal {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| "Invalid hex string")?;
        let bytes: [u8; PRINCIPAL_SIZE] = bytes.try_into().map_err(|_| "Invalid principal size")?;
        Ok(Principal::new(bytes))
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", &self.to_hex())
    }
}

impl AsRef<[u8]> for Principal {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Principal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'a> Deserialize<'a> for Principal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'a>,
    {
        let hex = String::deserialize(deserializer)?;
        if hex.len() != PRINCIPAL_SIZE * 2 {
            return Err(SerdeError::custom("Invalid hex length"));
        }

        let decoded_hex = hex::decode(hex).map_err(SerdeError::custom)?;
        let bytes: [u8; PRINCIPAL_SIZE] = decoded_hex
            .try_into()
            .map_err(|_| SerdeError::custom("Could not transform hex to bytes array for Principal"))?;
        Ok(Principal::new(bytes))
    }
}
