/// Axis-aligned integer rectangles in world units.
///
/// Semantics follow the classic sprite-rect convention: `right()` and
/// `bottom()` are exclusive edges and two rects collide only when they
/// overlap by at least one unit.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn centery(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn center(&self) -> (i32, i32) {
        (self.centerx(), self.centery())
    }

    /// Place the rect so its bottom edge midpoint sits at `(cx, bottom)`.
    pub fn set_midbottom(&mut self, cx: i32, bottom: i32) {
        self.x = cx - self.w / 2;
        self.y = bottom - self.h;
    }

    /// Place the rect so its top edge midpoint sits at `(cx, top)`.
    pub fn set_midtop(&mut self, cx: i32, top: i32) {
        self.x = cx - self.w / 2;
        self.y = top;
    }

    pub fn set_center(&mut self, cx: i32, cy: i32) {
        self.x = cx - self.w / 2;
        self.y = cy - self.h / 2;
    }

    /// Strict overlap test; rects that merely share an edge do not collide.
    pub fn colliderect(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn collidepoint(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// Anything that occupies a rectangle of the play field.
///
/// Every entity collection is a homogeneous `Vec` of one kind; this trait is
/// what lets the collision helpers and the renderer treat them uniformly.
pub trait Bounded {
    fn rect(&self) -> Rect;
}

/// True if any item of `items` overlaps `target`.
pub fn any_collides<T: Bounded>(items: &[T], target: &Rect) -> bool {
    items.iter().any(|item| item.rect().colliderect(target))
}
