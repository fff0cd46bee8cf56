use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x5f1d_2c9a_7e43_b8d1;

/// Stable 128-bit content fingerprint.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Fingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

pub(crate) struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    pub(crate) fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    pub(crate) fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    pub(crate) fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    pub(crate) fn finish(self) -> Fingerprint {
        let v = self.inner.digest128();
        Fingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

/// Floor to an integer pixel coordinate, clamped to `[0, max]`.
pub(crate) fn clamp_px(v: f64, max: u32) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    let v = v.floor();
    if v >= f64::from(max) {
        max
    } else {
        v as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
