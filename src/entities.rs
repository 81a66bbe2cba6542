use glam::Vec2;

/// An axis-aligned object identified by its center position and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub position: Vec2,
    pub size: Vec2,
}

impl Entity {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.size.y / 2.0
    }

    /// Leftmost extent of the bounding box.
    pub fn left(&self) -> f32 {
        self.position.x - self.half_width()
    }

    /// Rightmost extent of the bounding box.
    pub fn right(&self) -> f32 {
        self.position.x + self.half_width()
    }

    /// True when `point` lies strictly inside the bounding box.
    /// A point exactly on an edge is not contained.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.left()
            && point.x < self.right()
            && point.y > self.position.y - self.half_height()
            && point.y < self.position.y + self.half_height()
    }
}
