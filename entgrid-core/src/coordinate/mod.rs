pub mod error;

use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};

use crate::coordinate::error::*;
use crate::kdf::{DerivedKey, DERIVED_KEY_LEN};

/// Bits of derived key consumed per coordinate
pub const LOCATION_BITS: usize = 10;
/// Cells per row of the entropy grid
pub const GRID_WIDTH: usize = 16;

const KEY_BITS: usize = DERIVED_KEY_LEN * 8;
const WINDOW_LEN: usize = 4;
const X_BITS: u32 = 3;
const Y_BITS: u32 = 7;
const LOCATION_MASK: u32 = (1 << LOCATION_BITS) - 1;
const Y_MASK: u16 = (1 << Y_BITS) - 1;

/// A cell of the entropy grid, decoded from one 10-bit slice of the derived key.
///
/// The top 3 bits are `x` and the bottom 7 bits are `y`, so `x` never reaches the upper
/// half of a 16 wide row. Existing backups depend on this split.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub x: u8,
    pub y: u8,
}

impl GridCoordinate {
    pub fn from_location(location: u16) -> Result<Self, CoordinateError> {
        if u32::from(location) > LOCATION_MASK {
            return Err(CoordinateError::InvalidLocation(location));
        }

        // Both fit in a u8 once the location is known to be 10 bits wide
        let x = (location >> Y_BITS) as u8;
        let y = (location & Y_MASK) as u8;

        debug_assert!(u32::from(x) < (1 << X_BITS));

        Ok(GridCoordinate { x, y })
    }

    pub fn location(&self) -> u16 {
        (u16::from(self.x) << Y_BITS) | u16::from(self.y)
    }

    pub fn cell_index(&self) -> usize {
        usize::from(self.y) * GRID_WIDTH + usize::from(self.x)
    }
}

/// How many coordinates a single derived key can supply
pub const fn max_coordinates() -> usize {
    KEY_BITS / LOCATION_BITS
}

/// Reads bits `[index * 10, index * 10 + 10)` of the key, taken as one big-endian bit string.
pub fn extract_location(key: &DerivedKey, index: usize) -> Result<u16, CoordinateError> {
    let bit_start = index
        .checked_mul(LOCATION_BITS)
        .ok_or(CoordinateError::OutOfRange { index })?;
    let bit_end = bit_start + LOCATION_BITS;

    if bit_end > KEY_BITS {
        return Err(CoordinateError::OutOfRange { index });
    }

    // A 4 byte window always covers the 10 wanted bits, it only has to be pulled back
    // near the end of the key
    let window_start = (bit_start / 8).min(DERIVED_KEY_LEN - WINDOW_LEN);
    let bytes = key.as_bytes();
    let chunk = BigEndian::read_u32(&bytes[window_start..window_start + WINDOW_LEN]);

    let drop_low_bits = 32 - (bit_end - window_start * 8);
    let location = (chunk >> drop_low_bits) & LOCATION_MASK;

    Ok(location as u16)
}

pub fn extract_coordinate(key: &DerivedKey, index: usize) -> Result<GridCoordinate, CoordinateError> {
    GridCoordinate::from_location(extract_location(key, index)?)
}

pub fn extract_coordinates(
    key: &DerivedKey,
    count: usize,
) -> Result<Vec<GridCoordinate>, CoordinateError> {
    (0..count)
        .map(|index| extract_coordinate(key, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    const TEST_KEY_PREFIX: [u8; 8] = [0xc7, 0xbe, 0x13, 0x08, 0xca, 0xe4, 0x3f, 0x17];

    fn key_with_prefix(prefix: &[u8]) -> DerivedKey {
        let mut bytes = [0u8; DERIVED_KEY_LEN];
        bytes[..prefix.len()].copy_from_slice(prefix);
        DerivedKey::from_bytes(bytes)
    }

    fn bit_string(bytes: &[u8]) -> String {
        bytes.iter().map(|byte| format!("{byte:08b}")).collect()
    }

    #[test]
    fn extract_first_locations() {
        let key = key_with_prefix(&TEST_KEY_PREFIX);

        // 11000111 10|111110 0001|0011 000010|00 ...
        assert_eq!(extract_location(&key, 0).unwrap(), 0b1100011110);
        assert_eq!(extract_location(&key, 1).unwrap(), 0b1111100001);
        assert_eq!(extract_location(&key, 2).unwrap(), 0b0011000010);

        assert_eq!(
            extract_coordinate(&key, 0).unwrap(),
            GridCoordinate { x: 6, y: 30 }
        );
        assert_eq!(
            extract_coordinate(&key, 1).unwrap(),
            GridCoordinate { x: 7, y: 97 }
        );
        assert_eq!(
            extract_coordinate(&key, 2).unwrap(),
            GridCoordinate { x: 1, y: 66 }
        );
    }

    #[test]
    fn extract_near_end_of_key() {
        let mut bytes = [0u8; DERIVED_KEY_LEN];
        bytes[30] = 0b1010_1010;
        bytes[31] = 0b1100_0000;
        let key = DerivedKey::from_bytes(bytes);

        assert_eq!(extract_location(&key, 24).unwrap(), 0b1010101011);
        assert_eq!(
            extract_location(&key, 25),
            Err(CoordinateError::OutOfRange { index: 25 })
        );
        assert_eq!(
            extract_location(&key, usize::MAX),
            Err(CoordinateError::OutOfRange { index: usize::MAX })
        );
    }

    #[test]
    fn all_ones_reaches_last_addressable_cell() {
        let key = DerivedKey::from_bytes([0xff; DERIVED_KEY_LEN]);

        for coordinate in extract_coordinates(&key, 23).unwrap() {
            assert_eq!(coordinate, GridCoordinate { x: 7, y: 127 });
            assert_eq!(coordinate.cell_index(), 2039);
        }
    }

    #[test]
    fn extraction_reassembles_key_prefix() {
        let mut rng = StdRng::seed_from_u64(0xb0da);

        for _ in 0..64 {
            let mut bytes = [0u8; DERIVED_KEY_LEN];
            rng.fill_bytes(&mut bytes);
            let key = DerivedKey::from_bytes(bytes);

            let coordinates = extract_coordinates(&key, max_coordinates()).unwrap();
            let extracted: String = coordinates
                .iter()
                .map(|coordinate| format!("{:03b}{:07b}", coordinate.x, coordinate.y))
                .collect();

            let original = bit_string(&bytes);
            assert_eq!(extracted, original[..max_coordinates() * LOCATION_BITS]);
        }
    }

    #[test]
    fn location_split() {
        let coordinate = GridCoordinate::from_location(0b101_0000011).unwrap();

        assert_eq!(coordinate, GridCoordinate { x: 5, y: 3 });
        assert_eq!(coordinate.location(), 0b101_0000011);
        assert_eq!(coordinate.cell_index(), 3 * 16 + 5);
        assert_eq!(
            GridCoordinate::from_location(1024),
            Err(CoordinateError::InvalidLocation(1024))
        );
    }
}
