//! Transcoders between the two compressed encodings of BLS12-381 points.
//!
//! - **Zcash** (blstrs, gnark, ark-bls12-381): big-endian coordinates, flags in
//!   the three high bits of the first byte.
//! - **Little-endian** (mcl without ETH mode, arkworks generic short-Weierstrass
//!   curves): the same bytes in reverse order, flags in the two high bits of the
//!   last byte and no compression flag.
//!
//! Only the flag layout and byte order change; the encoded point is untouched,
//! so no curve arithmetic is involved and invalid points pass through to be
//! rejected by whichever decoder reads them next.
//!
//! # Example
//!
//! ```rust
//! use curve_suites::interop::{G1_COMPRESSED_SIZE, g1_from_zcash, g1_to_zcash};
//!
//! let mut le = [0u8; G1_COMPRESSED_SIZE];
//! le[0] = 0x2a;
//! le[G1_COMPRESSED_SIZE - 1] = 0x80; // y-sign
//!
//! let zcash = g1_to_zcash(&le).unwrap();
//! assert_eq!(zcash[0], 0x80 | 0x20);
//! assert_eq!(zcash[G1_COMPRESSED_SIZE - 1], 0x2a);
//! assert_eq!(g1_from_zcash(&zcash).unwrap(), le);
//! ```

use crate::errors::Error;

/// Compressed G1 size (one base field element).
pub const G1_COMPRESSED_SIZE: usize = 48;
/// Compressed G2 size (two base field elements).
pub const G2_COMPRESSED_SIZE: usize = 96;

const ZCASH_COMPRESSED: u8 = 0x80;
const ZCASH_INFINITY: u8 = 0x40;
const ZCASH_Y_SIGN: u8 = 0x20;

const LE_Y_SIGN: u8 = 0x80;
const LE_INFINITY: u8 = 0x40;

/// Converts a little-endian compressed G1 point to Zcash form.
pub fn g1_to_zcash(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    to_zcash(bytes, G1_COMPRESSED_SIZE)
}

/// Converts a Zcash compressed G1 point to little-endian form.
pub fn g1_from_zcash(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    from_zcash(bytes, G1_COMPRESSED_SIZE)
}

/// Converts a little-endian compressed G2 point to Zcash form.
pub fn g2_to_zcash(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    to_zcash(bytes, G2_COMPRESSED_SIZE)
}

/// Converts a Zcash compressed G2 point to little-endian form.
pub fn g2_from_zcash(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    from_zcash(bytes, G2_COMPRESSED_SIZE)
}

/// Converts a little-endian compressed point of `size` bytes to Zcash form.
///
/// The infinity bit lands on the Zcash infinity position through the
/// reversal alone.
pub fn to_zcash(bytes: &[u8], size: usize) -> Result<Vec<u8>, Error> {
    check_len(bytes, size)?;
    let y_sign = bytes[size - 1] & LE_Y_SIGN != 0;

    let mut out = bytes.to_vec();
    out.reverse();
    out[0] &= !(ZCASH_COMPRESSED | ZCASH_Y_SIGN);
    out[0] |= ZCASH_COMPRESSED;
    if y_sign {
        out[0] |= ZCASH_Y_SIGN;
    }
    Ok(out)
}

/// Converts a Zcash compressed point of `size` bytes to little-endian form.
pub fn from_zcash(bytes: &[u8], size: usize) -> Result<Vec<u8>, Error> {
    check_len(bytes, size)?;
    let y_sign = bytes[0] & ZCASH_Y_SIGN != 0;

    let mut out = bytes.to_vec();
    out[0] &= !(ZCASH_COMPRESSED | ZCASH_Y_SIGN);
    out.reverse();
    if y_sign {
        out[size - 1] |= LE_Y_SIGN;
    }
    debug_assert_eq!(
        out[size - 1] & LE_INFINITY != 0,
        bytes[0] & ZCASH_INFINITY != 0
    );
    Ok(out)
}

fn check_len(bytes: &[u8], size: usize) -> Result<(), Error> {
    if size == 0 || bytes.len() != size {
        return Err(Error::InvalidPointLength {
            expected: size,
            actual: bytes.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_bytes(size: usize) -> Vec<u8> {
        (0..size).map(|i| i as u8).collect()
    }

    #[test]
    fn to_zcash_reverses_and_marks_compressed() {
        let raw = counting_bytes(G2_COMPRESSED_SIZE);
        let out = g2_to_zcash(&raw).unwrap();

        let mut expected = raw.clone();
        expected.reverse();
        expected[0] |= ZCASH_COMPRESSED;
        assert_eq!(out, expected);
    }

    #[test]
    fn y_sign_moves_between_ends() {
        let mut le = vec![0u8; G1_COMPRESSED_SIZE];
        le[G1_COMPRESSED_SIZE - 1] = LE_Y_SIGN | 0x1a;
        le[0] = 0x55;

        let zcash = g1_to_zcash(&le).unwrap();
        assert_eq!(zcash[0], ZCASH_COMPRESSED | ZCASH_Y_SIGN | 0x1a);
        assert_eq!(zcash[G1_COMPRESSED_SIZE - 1], 0x55);

        assert_eq!(g1_from_zcash(&zcash).unwrap(), le);
    }

    #[test]
    fn infinity_bit_survives_both_directions() {
        let mut zcash = vec![0u8; G2_COMPRESSED_SIZE];
        zcash[0] = ZCASH_COMPRESSED | ZCASH_INFINITY;

        let le = g2_from_zcash(&zcash).unwrap();
        let mut expected = vec![0u8; G2_COMPRESSED_SIZE];
        expected[G2_COMPRESSED_SIZE - 1] = LE_INFINITY;
        assert_eq!(le, expected);
        assert_eq!(g2_to_zcash(&le).unwrap(), zcash);
    }

    #[test]
    fn rejects_wrong_lengths() {
        for size in [G1_COMPRESSED_SIZE, G2_COMPRESSED_SIZE] {
            for len in [10, size + 1] {
                let bytes = vec![0u8; len];
                assert!(matches!(
                    to_zcash(&bytes, size),
                    Err(Error::InvalidPointLength { expected, actual }) if expected == size && actual == len
                ));
                assert!(matches!(
                    from_zcash(&bytes, size),
                    Err(Error::InvalidPointLength { .. })
                ));
            }
        }
        assert!(g1_to_zcash(&[0u8; G2_COMPRESSED_SIZE]).is_err());
        assert!(g2_from_zcash(&[0u8; G1_COMPRESSED_SIZE]).is_err());
        assert!(to_zcash(&[], 0).is_err());
    }

    #[cfg(feature = "blst")]
    mod blst_points {
        use blstrs::{G1Affine, G1Projective, G2Affine, G2Projective};
        use group::Group;
        use rand::{SeedableRng, rngs::StdRng};

        use super::super::*;

        const G1_GENERATOR_ZCASH: &str = "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb";

        #[test]
        fn generator_matches_little_endian_coordinates() {
            let zcash = hex::decode(G1_GENERATOR_ZCASH).unwrap();
            let le = g1_from_zcash(&zcash).unwrap();

            // x in little-endian order with no flags set.
            let uncompressed = G1Affine::from(G1Projective::generator()).to_uncompressed();
            let mut x_le = uncompressed[..G1_COMPRESSED_SIZE].to_vec();
            x_le[0] &= 0x1f;
            x_le.reverse();
            assert_eq!(le, x_le);
        }

        #[test]
        fn round_trip_random_points() {
            let mut rng = StdRng::seed_from_u64(5);
            for _ in 0..16 {
                let p1 = G1Affine::from(G1Projective::random(&mut rng));
                let zcash = p1.to_compressed();
                let le = g1_from_zcash(&zcash).unwrap();
                assert_eq!(g1_to_zcash(&le).unwrap(), zcash.to_vec());
                let decoded = G1Affine::from_compressed(&zcash).unwrap();
                assert_eq!(decoded, p1);

                let p2 = G2Affine::from(G2Projective::random(&mut rng));
                let zcash = p2.to_compressed();
                let le = g2_from_zcash(&zcash).unwrap();
                let back = g2_to_zcash(&le).unwrap();
                assert_eq!(G2Affine::from_compressed(back.as_slice().try_into().unwrap()).unwrap(), p2);
            }
        }

        #[test]
        fn negation_flips_only_the_sign_bit() {
            let mut rng = StdRng::seed_from_u64(6);
            let p = G1Projective::random(&mut rng);
            let a = g1_from_zcash(&G1Affine::from(p).to_compressed()).unwrap();
            let b = g1_from_zcash(&G1Affine::from(-p).to_compressed()).unwrap();
            assert_eq!(a[..G1_COMPRESSED_SIZE - 1], b[..G1_COMPRESSED_SIZE - 1]);
            assert_eq!(a[G1_COMPRESSED_SIZE - 1] ^ b[G1_COMPRESSED_SIZE - 1], LE_Y_SIGN);
        }

        #[test]
        fn identity_encodings_agree() {
            let zcash = G2Affine::from(G2Projective::identity()).to_compressed();
            let le = g2_from_zcash(&zcash).unwrap();
            assert_eq!(le[G2_COMPRESSED_SIZE - 1], LE_INFINITY);
            assert!(le[..G2_COMPRESSED_SIZE - 1].iter().all(|b| *b == 0));
            assert_eq!(g2_to_zcash(&le).unwrap(), zcash.to_vec());
        }
    }
}
