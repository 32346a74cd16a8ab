use crate::{error::BvhError, split::SplitKind};

/// Default triangle capacity, sized for the small demo scenes the tracer
/// was written against (90 indices).
pub const DEFAULT_MAX_TRIANGLES: usize = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    /// Largest triangle count a build may hold. The node pool gets
    /// `2 * max_triangles - 1` slots.
    pub max_triangles: usize,
    pub split: SplitKind,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_triangles: DEFAULT_MAX_TRIANGLES,
            split: SplitKind::default(),
        }
    }
}

impl BuildConfig {
    pub fn new(max_triangles: usize) -> Self {
        Self {
            max_triangles,
            ..Self::default()
        }
    }

    pub fn with_split(mut self, split: SplitKind) -> Self {
        self.split = split;
        self
    }

    pub fn validate(&self) -> Result<(), BvhError> {
        validate_capacity(self.max_triangles)
    }
}

/// Child links are stored as `i32` and leaf offsets as `u32`, so both the
/// pool and the packed index buffer must be addressable by them.
pub(crate) fn validate_capacity(max_triangles: usize) -> Result<(), BvhError> {
    if max_triangles == 0 {
        return Err(BvhError::ZeroCapacity);
    }

    let fits_pool = max_triangles
        .checked_mul(2)
        .is_some_and(|slots| slots - 1 <= i32::MAX as usize);
    let fits_indices = max_triangles
        .checked_mul(3)
        .is_some_and(|len| len <= u32::MAX as usize);

    if !fits_pool || !fits_indices {
        return Err(BvhError::CapacityTooLarge { max_triangles });
    }

    Ok(())
}

pub(crate) fn pool_capacity(max_triangles: usize) -> usize {
    max_triangles * 2 - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();

        assert_eq!(config.max_triangles, 30);
        assert_eq!(config.split, SplitKind::Origin);
        assert!(config.validate().is_ok());
        assert_eq!(pool_capacity(config.max_triangles), 59);
    }

    #[test]
    fn test_capacity_limits() {
        assert_eq!(BuildConfig::new(0).validate(), Err(BvhError::ZeroCapacity));
        assert!(BuildConfig::new(1).validate().is_ok());
        assert_eq!(
            BuildConfig::new(usize::MAX).validate(),
            Err(BvhError::CapacityTooLarge {
                max_triangles: usize::MAX
            })
        );
    }

    #[test]
    fn test_with_split() {
        let config = BuildConfig::new(8).with_split(SplitKind::LongestAxis);

        assert_eq!(config.max_triangles, 8);
        assert_eq!(config.split, SplitKind::LongestAxis);
    }
}
