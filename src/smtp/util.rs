use rand::{Rng, distributions::Alphanumeric};

/// Minimum length of a synthetic local part; long enough that a collision
/// with a real mailbox is negligible.
pub(crate) const SYNTHETIC_LOCAL_LEN: usize = 24;

pub(crate) fn random_local_part(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len.max(SYNTHETIC_LOCAL_LEN))
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_shorter_than_minimum(len in 0usize..64) {
            let local = random_local_part(len);
            prop_assert_eq!(local.len(), len.max(SYNTHETIC_LOCAL_LEN));
            prop_assert!(local.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn consecutive_parts_differ() {
        assert_ne!(random_local_part(0), random_local_part(0));
    }
}
