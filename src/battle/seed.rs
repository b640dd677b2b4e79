use rand::SeedableRng;
use rand_pcg::Lcg64Xsh32;

/// Build the deterministic generator used for deck construction from a
/// plain u64 seed. The 16-byte PCG seed is two copies of the u64.
pub fn seeded_rng(seed: u64) -> Lcg64Xsh32 {
    let mut seed_bytes: [u8; 16] = [0u8; 16];
    seed_bytes[0..8].copy_from_slice(&seed.to_le_bytes());
    seed_bytes[8..16].copy_from_slice(&seed.to_le_bytes());
    Lcg64Xsh32::from_seed(seed_bytes)
}
