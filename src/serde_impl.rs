//! Serde support for keys.
//!
//! Keys serialize as their raw encodings: hex strings for human-readable
//! formats such as JSON, plain bytes otherwise. Deserialization runs the same
//! checks as [`KeyGenerator`], so a key that loads is a key that can be used.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "blst")]
//! # {
//! use curve_suites::{BlstBackend, KeyGenerator, PublicKey};
//!
//! let keygen = KeyGenerator::<BlstBackend>::default();
//! let (_, pk) = keygen.generate_pair_default().unwrap();
//!
//! let json = serde_json::to_string(&pk).unwrap();
//! let restored: PublicKey<BlstBackend> = serde_json::from_str(&json).unwrap();
//! assert_eq!(restored, pk);
//! # }
//! ```

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::backend::PairingBackend;
use crate::keys::{KeyGenerator, PrivateKey, PublicKey};

fn serialize_raw<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
        serializer.serialize_str(&hex::encode(bytes))
    } else {
        serializer.serialize_bytes(bytes)
    }
}

fn deserialize_raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    if deserializer.is_human_readable() {
        let encoded = String::deserialize(deserializer)?;
        hex::decode(encoded.trim_start_matches("0x")).map_err(de::Error::custom)
    } else {
        Vec::<u8>::deserialize(deserializer)
    }
}

impl<B: PairingBackend> Serialize for PrivateKey<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_raw(&self.to_bytes(), serializer)
    }
}

impl<'de, B: PairingBackend> Deserialize<'de> for PrivateKey<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = deserialize_raw(deserializer)?;
        KeyGenerator::<B>::default()
            .private_key_from_bytes(&bytes)
            .map_err(de::Error::custom)
    }
}

impl<B: PairingBackend> Serialize for PublicKey<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bytes = self.to_bytes().map_err(serde::ser::Error::custom)?;
        serialize_raw(&bytes, serializer)
    }
}

impl<'de, B: PairingBackend> Deserialize<'de> for PublicKey<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = deserialize_raw(deserializer)?;
        KeyGenerator::<B>::default()
            .public_key_from_bytes(&bytes)
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use serde::{Deserialize, Serialize};

    #[cfg(feature = "ark_bls12377")]
    use crate::backend::ArkworksBls12377;
    #[cfg(feature = "ark_bn254")]
    use crate::backend::ArkworksBn254;
    #[cfg(feature = "blst")]
    use crate::backend::BlstBackend;
    use crate::backend::{FieldElement, PairingBackend};
    use crate::keys::{KeyGenerator, PrivateKey, PublicKey};

    #[derive(Serialize, Deserialize)]
    #[serde(bound = "")]
    struct Registration<B: PairingBackend> {
        name: String,
        public_key: PublicKey<B>,
    }

    fn json_round_trip_helper<B: PairingBackend>() {
        let keygen = KeyGenerator::<B>::default();
        let mut rng = StdRng::seed_from_u64(11);
        let (sk, pk) = keygen.generate_pair(&mut rng).expect("pair");

        let json = serde_json::to_string(&pk).expect("serialize pk");
        assert_eq!(
            json,
            format!("\"{}\"", hex::encode(pk.to_bytes().expect("pk bytes")))
        );
        let restored: PublicKey<B> = serde_json::from_str(&json).expect("deserialize pk");
        assert_eq!(restored, pk);

        let json = serde_json::to_string(&sk).expect("serialize sk");
        let restored: PrivateKey<B> = serde_json::from_str(&json).expect("deserialize sk");
        assert_eq!(restored.to_bytes(), sk.to_bytes());
        assert_eq!(restored.generate_public().expect("public"), pk);

        let registration = Registration {
            name: "validator-0".to_owned(),
            public_key: pk.clone(),
        };
        let json = serde_json::to_value(&registration).expect("serialize registration");
        let restored: Registration<B> = serde_json::from_value(json).expect("deserialize");
        assert_eq!(restored.name, "validator-0");
        assert_eq!(restored.public_key, pk);
    }

    fn rejects_invalid_encodings_helper<B: PairingBackend>() {
        assert!(serde_json::from_str::<PublicKey<B>>("\"not hex\"").is_err());
        assert!(serde_json::from_str::<PublicKey<B>>("\"abcd\"").is_err());
        assert!(serde_json::from_str::<PrivateKey<B>>("\"\"").is_err());
        let too_long = format!("\"{}\"", "ff".repeat(B::Scalar::repr_len() + 1));
        assert!(serde_json::from_str::<PrivateKey<B>>(&too_long).is_err());
    }

    fn run_all<B: PairingBackend>() {
        json_round_trip_helper::<B>();
        rejects_invalid_encodings_helper::<B>();
    }

    #[cfg(feature = "blst")]
    #[test]
    fn serde_bls12_381() {
        run_all::<BlstBackend>();
    }

    #[cfg(feature = "ark_bls12377")]
    #[test]
    fn serde_bls12_377() {
        run_all::<ArkworksBls12377>();
    }

    #[cfg(feature = "ark_bn254")]
    #[test]
    fn serde_bn254() {
        run_all::<ArkworksBn254>();
    }
}
