use std::num::NonZeroU32;

/// Item of a `cycle_length` cycle that falls on `slot` (both 1-based).
///
/// `((slot - 1) mod cycle_length) + 1`: stateless, restarts at 1 right after
/// `cycle_length`. Slot 0 is treated as the slot before 1 and maps to the
/// last item.
pub fn assign(cycle_length: NonZeroU32, slot: u32) -> u32 {
    let len = i64::from(cycle_length.get());
    let zero_based = (i64::from(slot) - 1).rem_euclid(len);
    // rem_euclid keeps the value in [0, len), and len fits in u32.
    (zero_based + 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn wraps_after_cycle_length() {
        assert_eq!(assign(nz(150), 1), 1);
        assert_eq!(assign(nz(150), 150), 150);
        assert_eq!(assign(nz(150), 151), 1);
        assert_eq!(assign(nz(31), 365), 24);
    }

    #[test]
    fn always_in_range_and_periodic() {
        for len in 1..=40 {
            for slot in 1..=400 {
                let item = assign(nz(len), slot);
                assert!((1..=len).contains(&item), "len {len} slot {slot} -> {item}");
                assert_eq!(item, assign(nz(len), slot + len));
            }
        }
    }

    #[test]
    fn cycle_of_one_is_constant() {
        assert!((1..=10).all(|slot| assign(nz(1), slot) == 1));
    }

    #[test]
    fn slot_zero_maps_to_last_item() {
        assert_eq!(assign(nz(31), 0), 31);
    }

    #[test]
    fn extreme_slot_does_not_overflow() {
        let item = assign(nz(u32::MAX), u32::MAX);
        assert_eq!(item, u32::MAX);
    }
}
