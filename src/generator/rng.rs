//! Seeded randomness for one selection run.
//!
//! The seed material is folded into a 32-bit state with an xmur3-style string hash and then
//! stepped with mulberry32. The generator implements `RngCore`, so the usual `rand` helpers
//! (`random_range`, `random_bool`, `shuffle`, `choose_weighted`) all draw from the one stream.

use rand::rand_core::impls;
use rand::RngCore;

/// Article identity plus the settings that should change the poem.
pub struct SeedMaterial<'a> {
    pub location: &'a str,
    pub words_target: usize,
    pub mode: &'a str,
    pub reroll_seed: u64,
    pub fingerprint: String,
}

pub const FINGERPRINT_WORDS: usize = 120;

impl<'a> SeedMaterial<'a> {
    pub fn fingerprint_of<S: AsRef<str>>(words: &[S]) -> String {
        words
            .iter()
            .take(FINGERPRINT_WORDS)
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_key(&self) -> String {
        format!(
            "{}||{}||{}||{}||{}",
            self.location, self.words_target, self.mode, self.reroll_seed, self.fingerprint
        )
    }
}

/// Folds a string into a 32-bit seed.
pub fn hash_seed(material: &str) -> u32 {
    let units: Vec<u16> = material.encode_utf16().collect();
    let mut h: u32 = 1_779_033_703 ^ (units.len() as u32);
    for unit in units {
        h = (h ^ u32::from(unit)).wrapping_mul(3_432_918_353);
        h = h.rotate_left(13);
    }
    h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
    h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
    h ^ (h >> 16)
}

#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u32,
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { seed, state: seed }
    }

    pub fn from_material(material: &SeedMaterial<'_>) -> Self {
        Self::new(hash_seed(&material.to_key()))
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}
