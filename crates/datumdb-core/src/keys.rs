//! Synthetic key scheme shared by dataset builders and random-access readers.
//!
//! Records are stored under `<8-digit zero-padded position>_<identifier>`,
//! so the store's native key order is the position order the dataset was
//! built in. A random-access cursor recomputes the same key from an index
//! entry's position and identifier to address a record directly.

/// Width of the zero-padded position prefix.
pub const KEY_INDEX_WIDTH: usize = 8;

/// Build the store key for a record at `position` with the given identifier.
pub fn synthetic_key(position: usize, identifier: &str) -> Vec<u8> {
    format!("{position:0width$}_{identifier}", width = KEY_INDEX_WIDTH).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(synthetic_key(0, "cat.jpg"), b"00000000_cat.jpg");
        assert_eq!(synthetic_key(42, "dog 2.png"), b"00000042_dog 2.png");
    }

    #[test]
    fn test_sort_order() {
        // Zero-padding ensures lexicographic sort = position sort
        let k1 = synthetic_key(9, "z");
        let k2 = synthetic_key(10, "a");
        assert!(k1 < k2);
    }
}
