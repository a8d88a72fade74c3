use common::config::SENSOR_CHANNEL;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128PlusPlus as SomeRng;

pub const RAW_MIN: u16 = 400;
pub const RAW_MAX: u16 = 700;

/// Slowly drifting capacitive probe reading with conversion noise.
///
/// Readings stay within `RAW_MIN..=RAW_MAX`. Channels other than the probe
/// input float and return arbitrary 10-bit values.
pub struct SoilModel {
    rng: SomeRng,
    level: f64,
}

impl SoilModel {
    const DRIFT: f64 = 4.0;
    const NOISE: f64 = 3.0;

    pub fn new(seed: u64) -> Self {
        let mut rng = SomeRng::seed_from_u64(seed);
        let level = rng.gen_range(RAW_MIN as f64..=RAW_MAX as f64);
        Self { rng, level }
    }

    pub fn next_raw(&mut self) -> u16 {
        let (min, max) = (RAW_MIN as f64, RAW_MAX as f64);
        self.level = (self.level + self.rng.gen_range(-Self::DRIFT..=Self::DRIFT)).clamp(min, max);
        let noisy = self.level + self.rng.gen_range(-Self::NOISE..=Self::NOISE);
        noisy.round().clamp(min, max) as u16
    }

    pub fn read(&mut self, channel: u8) -> u16 {
        if channel == SENSOR_CHANNEL {
            self.next_raw()
        } else {
            self.rng.gen_range(0..1024)
        }
    }

    /// Consumes the model into a simulated ADC input.
    pub fn into_source(mut self) -> impl FnMut(u8) -> u16 + Send + 'static {
        move |channel| self.read(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded() {
        let mut model = SoilModel::new(1);
        for _ in 0..10_000 {
            let raw = model.next_raw();
            assert!((RAW_MIN..=RAW_MAX).contains(&raw));
        }
    }

    #[test]
    fn reproducible() {
        let (mut a, mut b) = (SoilModel::new(42), SoilModel::new(42));
        for _ in 0..100 {
            assert_eq!(a.read(0), b.read(0));
        }
    }

    #[test]
    fn drifts_slowly() {
        let mut model = SoilModel::new(7);
        let mut last = model.next_raw() as i32;
        for _ in 0..1000 {
            let raw = model.next_raw() as i32;
            assert!((raw - last).abs() <= (2.0 * SoilModel::NOISE + SoilModel::DRIFT) as i32 + 1);
            last = raw;
        }
    }
}
