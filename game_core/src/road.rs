use glam::Vec2;

use crate::Config;

/// Axis-aligned bounding box in the road plane (x = lateral, y = world Z)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// True when the boxes share a region of positive area.
    /// Boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Lane geometry. Lanes are centred on x = 0.
#[derive(Debug, Clone, Copy)]
pub struct Road {
    pub lane_count: u8,
    pub lane_width: f32,
}

impl Road {
    pub fn new(config: &Config) -> Self {
        Self {
            lane_count: config.lane_count.max(1),
            lane_width: config.lane_width,
        }
    }

    /// Centre X of a lane
    pub fn lane_x(&self, lane: u8) -> f32 {
        let lane = self.clamp_lane(lane as i32);
        (lane as f32 - (self.lane_count - 1) as f32 / 2.0) * self.lane_width
    }

    pub fn clamp_lane(&self, lane: i32) -> u8 {
        lane.clamp(0, self.lane_count as i32 - 1) as u8
    }

    pub fn center_lane(&self) -> u8 {
        (self.lane_count - 1) / 2
    }

    /// X of the boundary between lane `divider` and lane `divider + 1`
    pub fn divider_x(&self, divider: u8) -> f32 {
        self.lane_x(divider) + self.lane_width / 2.0
    }

    pub fn half_width(&self) -> f32 {
        self.lane_count as f32 * self.lane_width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(x: f32, y: f32) -> Aabb {
        Aabb::from_center_size(Vec2::new(x, y), Vec2::ONE)
    }

    #[test]
    fn test_overlapping_boxes() {
        assert!(unit_box(0.0, 0.0).overlaps(&unit_box(0.5, 0.5)));
        assert!(unit_box(0.5, 0.5).overlaps(&unit_box(0.0, 0.0)));
    }

    #[test]
    fn test_touching_boxes_do_not_overlap() {
        assert!(!unit_box(0.0, 0.0).overlaps(&unit_box(1.0, 0.0)));
        assert!(!unit_box(0.0, 0.0).overlaps(&unit_box(0.0, 1.0)));
    }

    #[test]
    fn test_separated_on_one_axis_only() {
        // Overlap in x but not in y
        assert!(!unit_box(0.0, 0.0).overlaps(&unit_box(0.2, 3.0)));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Aabb::new(Vec2::new(-2.0, -2.0), Vec2::new(2.0, 2.0));
        assert!(outer.overlaps(&unit_box(0.0, 0.0)));
        assert!(unit_box(0.0, 0.0).overlaps(&outer));
    }

    #[test]
    fn test_three_lane_positions() {
        let road = Road::new(&Config::new());
        assert_eq!(road.lane_x(0), -3.0);
        assert_eq!(road.lane_x(1), 0.0);
        assert_eq!(road.lane_x(2), 3.0);
        assert_eq!(road.center_lane(), 1);
        assert_eq!(road.half_width(), 4.5);
    }

    #[test]
    fn test_clamp_lane() {
        let road = Road::new(&Config::new());
        assert_eq!(road.clamp_lane(-1), 0);
        assert_eq!(road.clamp_lane(1), 1);
        assert_eq!(road.clamp_lane(7), 2);
    }

    #[test]
    fn test_divider_positions() {
        let road = Road::new(&Config::new());
        assert_eq!(road.divider_x(0), -1.5);
        assert_eq!(road.divider_x(1), 1.5);
    }

    #[test]
    fn test_single_lane_road() {
        let config = Config {
            lane_count: 1,
            ..Config::default()
        };
        let road = Road::new(&config);
        assert_eq!(road.lane_x(0), 0.0);
        assert_eq!(road.clamp_lane(3), 0);
    }
}
