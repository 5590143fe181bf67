//! Random problem instances for experiments and benchmarks.

use crate::types::{ItemSpec, PackingError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Draws rectangles with uniform integer sides in the given inclusive ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceGenerator {
    pub count: usize,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl InstanceGenerator {
    pub fn new(count: usize, width: (u32, u32), height: (u32, u32)) -> Self {
        Self {
            count,
            min_width: width.0,
            max_width: width.1,
            min_height: height.0,
            max_height: height.1,
            colors: Vec::new(),
        }
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_width == 0 || self.min_height == 0 {
            return Err(PackingError::InvalidInput(
                "Generated sides must be at least 1".to_string(),
            ));
        }
        if self.min_width > self.max_width || self.min_height > self.max_height {
            return Err(PackingError::InvalidInput(format!(
                "Empty size range: width {}..={}, height {}..={}",
                self.min_width, self.max_width, self.min_height, self.max_height
            )));
        }
        Ok(())
    }

    /// Generates `count` single-quantity item specs.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Vec<ItemSpec>> {
        self.validate()?;

        Ok((0..self.count)
            .map(|_| ItemSpec {
                width: rng.gen_range(self.min_width..=self.max_width),
                height: rng.gen_range(self.min_height..=self.max_height),
                quantity: 1,
                color: self.colors.choose(&mut *rng).cloned(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_generated_sides_stay_in_range() {
        let generator = InstanceGenerator::new(200, (10, 15), (18, 23)).with_colors(["red", "blue"]);
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let specs = generator.generate(&mut rng).unwrap();

        assert_eq!(specs.len(), 200);
        for spec in &specs {
            assert!((10..=15).contains(&spec.width));
            assert!((18..=23).contains(&spec.height));
            assert!(matches!(spec.color.as_deref(), Some("red") | Some("blue")));
        }
    }

    #[test]
    fn test_same_seed_same_instance() {
        let generator = InstanceGenerator::new(20, (1, 50), (1, 50));
        let a = generator.generate(&mut ChaCha20Rng::seed_from_u64(3)).unwrap();
        let b = generator.generate(&mut ChaCha20Rng::seed_from_u64(3)).unwrap();
        let dims = |specs: &[ItemSpec]| specs.iter().map(|s| (s.width, s.height)).collect::<Vec<_>>();
        assert_eq!(dims(&a), dims(&b));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let generator = InstanceGenerator::new(1, (5, 2), (1, 1));
        assert!(generator.generate(&mut ChaCha20Rng::seed_from_u64(0)).is_err());
    }
}
