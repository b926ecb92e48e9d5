use crate::qoi::grammar::Pixel;

pub(crate) const CACHE_SIZE: usize = 64;

/// Running table of previously seen pixels, addressed by `Pixel::hash`.
///
/// Every slot starts as the zero pixel, including alpha, which differs from the
/// `(0, 0, 0, 255)` previous-pixel seed.
#[derive(Debug)]
pub(crate) struct ColorCache {
    slots: [Pixel; CACHE_SIZE],
}

impl ColorCache {
    pub(crate) const fn new() -> Self {
        Self {
            slots: [Pixel::ZERO; CACHE_SIZE],
        }
    }

    pub(crate) const fn lookup(&self, slot: u8) -> Pixel {
        self.slots[slot as usize % CACHE_SIZE]
    }

    pub(crate) fn store(&mut self, pixel: Pixel) {
        self.slots[pixel.hash()] = pixel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_starts_zeroed() {
        let cache = ColorCache::new();

        for slot in 0..CACHE_SIZE as u8 {
            assert_eq!(cache.lookup(slot), Pixel::ZERO);
        }
    }

    #[test]
    fn test_store_uses_hash_slot() {
        let mut cache = ColorCache::new();
        let pixel = Pixel::new(10, 20, 30, 255);

        // (10 * 3 + 20 * 5 + 30 * 7 + 255 * 11) % 64
        assert_eq!(pixel.hash(), 9);

        cache.store(pixel);
        assert_eq!(cache.lookup(9), pixel);
        assert_eq!(cache.lookup(8), Pixel::ZERO);
    }

    #[test]
    fn test_store_overwrites_colliding_slot() {
        let mut cache = ColorCache::new();

        let first = Pixel::new(0, 0, 0, 255);
        let second = Pixel::new(39, 0, 0, 0);
        assert_eq!(first.hash(), second.hash());

        cache.store(first);
        cache.store(second);

        assert_eq!(cache.lookup(first.hash() as u8), second);
    }
}
