// Wheel geometry. The pointer sits at the top (0 degrees); rotating the wheel
// clockwise by `r` degrees puts wheel angle `-r mod 360` under the pointer.

/// Equal-sector wheel labelled with the pool tokens, in pool order
#[derive(Debug, Clone, PartialEq)]
pub struct Wheel {
    sectors: Vec<String>,
}

impl Wheel {
    pub fn new(sectors: Vec<String>) -> Self {
        Self { sectors }
    }

    pub fn sectors(&self) -> &[String] {
        &self.sectors
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    pub fn sector_angle(&self) -> f64 {
        360.0 / self.sectors.len().max(1) as f64
    }

    /// Total rotation that lands the centre of sector `index` under the pointer
    pub fn final_rotation(&self, index: usize, extra_rotations: u32) -> f64 {
        let angle = self.sector_angle();
        360.0 - (index as f64 * angle + angle / 2.0) + f64::from(extra_rotations) * 360.0
    }

    /// Sector under the pointer after rotating by `rotation` degrees
    pub fn sector_at_rotation(&self, rotation: f64) -> usize {
        let under_pointer = (-rotation).rem_euclid(360.0);
        let sector = (under_pointer / self.sector_angle()).floor() as usize;
        sector.min(self.sectors.len().saturating_sub(1))
    }

    pub fn label(&self, sector: usize) -> Option<&str> {
        self.sectors.get(sector).map(|s| s.as_str())
    }
}

/// Decelerating curve used for the spin: fast start, gentle stop
pub fn ease_out_cubic(progress: f64) -> f64 {
    let t = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn wheel(n: usize) -> Wheel {
        Wheel::new((0..n).map(|i| format!("game-{}", i)).collect())
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(7)]
    #[case(10)]
    fn test_final_rotation_lands_on_committed_sector(#[case] n: usize) {
        let wheel = wheel(n);
        for index in 0..n {
            let rotation = wheel.final_rotation(index, 5);
            assert_eq!(wheel.sector_at_rotation(rotation), index);
        }
    }

    #[test]
    fn test_final_rotation_includes_extra_turns() {
        let wheel = wheel(4);
        // sector 0 of 4: 360 - 45 + 5 * 360
        assert_eq!(wheel.final_rotation(0, 5), 2115.0);
        assert_eq!(wheel.final_rotation(0, 0), 315.0);
    }

    #[test]
    fn test_unrotated_wheel_shows_first_sector() {
        assert_eq!(wheel(4).sector_at_rotation(0.0), 0);
        assert_eq!(wheel(4).sector_at_rotation(-10.0), 0);
        assert_eq!(wheel(4).sector_at_rotation(10.0), 3);
    }

    #[test]
    fn test_easing_is_monotonic_and_bounded() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        let samples: Vec<f64> = (0..=20).map(|i| ease_out_cubic(i as f64 / 20.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }
}
