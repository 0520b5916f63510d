use std::ops::Add;

use glam::{ivec2, IVec2};
use serde::{Deserialize, Serialize};

/// 4 directions, clock face order.
///
/// Screen coordinates, negative y is north.
pub const DIR_4: [IVec2; 4] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 0]),
];

pub trait VecExt: Sized + Default {
    /// Absolute size of vector in taxicab metric.
    fn taxi_len(&self) -> i32;

    /// Vec points to an adjacent cell, left, right, up or down.
    fn is_adjacent(&self) -> bool {
        self.taxi_len() == 1
    }

    /// Index of the vector in `DIR_4` if it's a cardinal unit vector.
    fn dir4_index(&self) -> Option<usize>;
}

impl VecExt for IVec2 {
    fn taxi_len(&self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    fn dir4_index(&self) -> Option<usize> {
        DIR_4.iter().position(|d| d == self)
    }
}

/// Integer rectangle in screen space.
///
/// The minimum corner is inclusive, the maximum corner is exclusive.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
pub struct Rect {
    p0: IVec2,
    p1: IVec2,
}

impl Rect {
    pub fn new(p0: impl Into<IVec2>, p1: impl Into<IVec2>) -> Self {
        let (p0, p1) = (p0.into(), p1.into());
        Rect {
            p0: p0.min(p1),
            p1: p0.max(p1),
        }
    }

    /// Rectangle with the given dimensions at origin.
    pub fn sized(dim: impl Into<IVec2>) -> Self {
        Rect::new(IVec2::ZERO, dim)
    }

    pub fn min(&self) -> IVec2 {
        self.p0
    }

    pub fn max(&self) -> IVec2 {
        self.p1
    }

    pub fn dim(&self) -> IVec2 {
        self.p1 - self.p0
    }

    pub fn width(&self) -> i32 {
        self.dim().x
    }

    pub fn height(&self) -> i32 {
        self.dim().y
    }

    pub fn center(&self) -> IVec2 {
        self.p0 + self.dim() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub fn contains(&self, p: impl Into<IVec2>) -> bool {
        let p = p.into();
        p.cmpge(self.p0).all() && p.cmplt(self.p1).all()
    }

    /// Overlap of two rectangles. Disjoint rectangles produce an empty
    /// rectangle.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let p0 = self.p0.max(other.p0);
        let p1 = self.p1.min(other.p1).max(p0);
        Rect { p0, p1 }
    }

    /// Move the minimum corner in by `a` and the maximum corner in by `b`.
    pub fn shrink(&self, a: impl Into<IVec2>, b: impl Into<IVec2>) -> Rect {
        let p0 = self.p0 + a.into();
        let p1 = (self.p1 - b.into()).max(p0);
        Rect { p0, p1 }
    }

    pub fn grow(&self, a: impl Into<IVec2>, b: impl Into<IVec2>) -> Rect {
        Rect::new(self.p0 - a.into(), self.p1 + b.into())
    }

    /// Cut the rectangle in two along one axis.
    ///
    /// Give a vector with only one nonzero component. A positive value
    /// measures the cut from the minimum edge, a negative value from the
    /// maximum edge. The part nearer the minimum edge is returned first.
    pub fn split(&self, at: impl Into<IVec2>) -> [Rect; 2] {
        let at = at.into();
        let axis = if at.x != 0 { 0 } else { 1 };
        let v = at[axis];
        let cut = if v >= 0 {
            (self.p0[axis] + v).min(self.p1[axis])
        } else {
            (self.p1[axis] + v).max(self.p0[axis])
        };

        let (mut a, mut b) = (*self, *self);
        a.p1[axis] = cut;
        b.p0[axis] = cut;
        [a, b]
    }

    /// Row-major index of a point inside the rectangle.
    pub fn idx(&self, p: impl Into<IVec2>) -> usize {
        let p = p.into() - self.p0;
        (p.y * self.width() + p.x) as usize
    }
}

/// Offset to add to canvas positions to get map positions when scrolling a
/// view of `map` centered on `focus`.
///
/// Axes where the map fits in the canvas get the map centered, other axes
/// snap to the map edge instead of scrolling past it.
pub fn scroll_offset(canvas: &Rect, focus: IVec2, map: &Rect) -> IVec2 {
    let mut offset = focus - canvas.center();

    // Do each axis individually.
    for d in 0..2 {
        if map.dim()[d] <= canvas.dim()[d] {
            offset[d] = map.min()[d]
                - canvas.min()[d]
                - (canvas.dim()[d] - map.dim()[d]) / 2;
        } else if canvas.min()[d] + offset[d] < map.min()[d] {
            offset[d] = map.min()[d] - canvas.min()[d];
        } else if canvas.max()[d] + offset[d] > map.max()[d] {
            offset[d] = map.max()[d] - canvas.max()[d];
        }
    }

    offset
}

impl Add<IVec2> for Rect {
    type Output = Rect;

    fn add(self, rhs: IVec2) -> Self::Output {
        Rect {
            p0: self.p0 + rhs,
            p1: self.p1 + rhs,
        }
    }
}

impl IntoIterator for Rect {
    type Item = IVec2;
    type IntoIter = RectIter;

    fn into_iter(self) -> Self::IntoIter {
        RectIter {
            rect: self,
            pos: self.p0,
        }
    }
}

pub struct RectIter {
    rect: Rect,
    pos: IVec2,
}

impl Iterator for RectIter {
    type Item = IVec2;

    fn next(&mut self) -> Option<IVec2> {
        if self.rect.is_empty() || self.pos.y >= self.rect.p1.y {
            return None;
        }
        let ret = self.pos;
        self.pos.x += 1;
        if self.pos.x >= self.rect.p1.x {
            self.pos = ivec2(self.rect.p0.x, self.pos.y + 1);
        }
        Some(ret)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rect_split() {
        let r = Rect::new([0, 0], [10, 4]);

        assert_eq!(
            r.split([3, 0]),
            [Rect::new([0, 0], [3, 4]), Rect::new([3, 0], [10, 4])]
        );
        assert_eq!(
            r.split([-3, 0]),
            [Rect::new([0, 0], [7, 4]), Rect::new([7, 0], [10, 4])]
        );
        assert_eq!(
            r.split([0, -1]),
            [Rect::new([0, 0], [10, 3]), Rect::new([0, 3], [10, 4])]
        );
        // Oversized cut stays within bounds.
        assert_eq!(r.split([20, 0])[1].width(), 0);
    }

    #[test]
    fn rect_iteration() {
        let r = Rect::new([1, 1], [3, 3]);
        let points: Vec<IVec2> = r.into_iter().collect();
        assert_eq!(
            points,
            vec![ivec2(1, 1), ivec2(2, 1), ivec2(1, 2), ivec2(2, 2)]
        );

        for (i, p) in r.into_iter().enumerate() {
            assert_eq!(r.idx(p), i);
        }

        assert_eq!(Rect::sized([0, 5]).into_iter().count(), 0);
    }

    #[test]
    fn rect_ops() {
        let r = Rect::new([0, 0], [10, 10]);
        assert!(r.contains([0, 0]));
        assert!(r.contains([9, 9]));
        assert!(!r.contains([10, 9]));
        assert!(!r.contains([-1, 0]));

        assert_eq!(r.shrink([1, 1], [1, 1]), Rect::new([1, 1], [9, 9]));
        assert_eq!(
            r.intersection(&Rect::new([5, 5], [20, 20])),
            Rect::new([5, 5], [10, 10])
        );
        assert!(r.intersection(&Rect::new([20, 20], [30, 30])).is_empty());
        assert_eq!(r + ivec2(2, 3), Rect::new([2, 3], [12, 13]));
    }

    #[test]
    fn scrolling() {
        let canvas = Rect::sized([10, 10]);

        // Small map gets centered.
        let small = Rect::sized([4, 4]);
        assert_eq!(scroll_offset(&canvas, ivec2(1, 1), &small), ivec2(-3, -3));

        let big = Rect::sized([20, 6]);
        assert_eq!(scroll_offset(&canvas, ivec2(1, 1), &big), ivec2(0, -2));
        assert_eq!(scroll_offset(&canvas, ivec2(10, 1), &big), ivec2(5, -2));
        assert_eq!(scroll_offset(&canvas, ivec2(19, 1), &big), ivec2(10, -2));
    }

    #[test]
    fn directions() {
        for (i, d) in DIR_4.iter().enumerate() {
            assert!(d.is_adjacent());
            assert_eq!(d.dir4_index(), Some(i));
        }
        assert_eq!(ivec2(1, 1).dir4_index(), None);
        assert_eq!(ivec2(-3, 4).taxi_len(), 7);
    }
}
