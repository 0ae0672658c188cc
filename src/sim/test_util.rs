//! Test helpers for injecting randomness

use rand::RngCore;

/// RNG that returns the same word forever.
///
/// `never()` yields 0.0 from every float draw, so invaders never fire;
/// `always()` yields values just below 1.0, so they fire whenever allowed.
pub struct ConstRng(pub u64);

impl ConstRng {
    pub fn never() -> Self {
        Self(0)
    }

    pub fn always() -> Self {
        Self(u64::MAX)
    }
}

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(self.0 as u8);
    }
}
