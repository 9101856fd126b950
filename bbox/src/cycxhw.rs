use super::{Rect, RectFloat, RectNum, TLBR};
use crate::{common::*, Transform};

/// Bounding box in CyCxHW format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CyCxHW<T> {
    pub(crate) cy: T,
    pub(crate) cx: T,
    pub(crate) h: T,
    pub(crate) w: T,
}

impl<T> CyCxHW<T> {
    pub fn try_cast<V>(self) -> Option<CyCxHW<V>>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        Some(CyCxHW {
            cy: V::from(self.cy)?,
            cx: V::from(self.cx)?,
            h: V::from(self.h)?,
            w: V::from(self.w)?,
        })
    }

    pub fn cast<V>(self) -> CyCxHW<V>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T> CyCxHW<T>
where
    T: Copy + Num,
{
    pub fn transform(&self, transform: &Transform<T>) -> Self {
        CyCxHW {
            cy: self.cy * transform.sy + transform.ty,
            cx: self.cx * transform.sx + transform.tx,
            h: self.h * transform.sy,
            w: self.w * transform.sx,
        }
    }

    /// Mirror around the vertical axis of the unit square.
    pub fn hflip(&self) -> Self {
        let Self { cy, cx, h, w } = *self;
        Self {
            cy,
            cx: T::one() - cx,
            h,
            w,
        }
    }

    /// Mirror around the horizontal axis of the unit square.
    pub fn vflip(&self) -> Self {
        let Self { cy, cx, h, w } = *self;
        Self {
            cy: T::one() - cy,
            cx,
            h,
            w,
        }
    }
}

impl<T> CyCxHW<T>
where
    T: Copy + Float,
{
    /// Clip the box to the unit square, or return `None` when nothing
    /// remains inside it.
    pub fn clip_to_unit(&self) -> Option<Self> {
        let zero = T::zero();
        let one = T::one();
        let unit = TLBR::from_tlbr([zero, zero, one, one]);
        let clipped = TLBR::from(self).intersect_with(&unit)?;
        Some(clipped.to_cycxhw())
    }
}

impl<T> Rect for CyCxHW<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn t(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.cy - self.h / two
    }

    fn l(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.cx - self.w / two
    }

    fn b(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.cy + self.h / two
    }

    fn r(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.cx + self.w / two
    }

    fn cy(&self) -> Self::Type {
        self.cy
    }

    fn cx(&self) -> Self::Type {
        self.cx
    }

    fn h(&self) -> Self::Type {
        self.h
    }

    fn w(&self) -> Self::Type {
        self.w
    }

    fn try_from_tlbr(tlbr: [T; 4]) -> Result<Self> {
        let [t, l, b, r] = tlbr;
        let zero = T::zero();
        let two = T::one() + T::one();
        let h = b - t;
        let w = r - l;
        let cy = t + h / two;
        let cx = l + w / two;
        ensure!(
            h >= zero && w >= zero,
            "box height and width must be non-negative"
        );

        Ok(Self { cy, cx, h, w })
    }

    fn try_from_tlhw(tlhw: [T; 4]) -> Result<Self> {
        let [t, l, h, w] = tlhw;
        let zero = T::zero();
        let two = T::one() + T::one();
        ensure!(
            h >= zero && w >= zero,
            "box height and width must be non-negative"
        );

        let cy = t + h / two;
        let cx = l + w / two;

        Ok(Self { cy, cx, h, w })
    }

    fn try_from_cycxhw(cycxhw: [T; 4]) -> Result<Self> {
        let [cy, cx, h, w] = cycxhw;
        let zero = T::zero();
        ensure!(
            h >= zero && w >= zero,
            "box height and width must be non-negative"
        );

        Ok(Self { cy, cx, h, w })
    }
}

impl<T> From<TLBR<T>> for CyCxHW<T>
where
    T: Copy + Num,
{
    fn from(from: TLBR<T>) -> Self {
        Self::from(&from)
    }
}

impl<T> From<&TLBR<T>> for CyCxHW<T>
where
    T: Copy + Num,
{
    fn from(from: &TLBR<T>) -> Self {
        let two = T::one() + T::one();
        let TLBR { t, l, b, r, .. } = *from;
        let h = b - t;
        let w = r - l;
        let cy = t + h / two;
        let cx = l + w / two;
        Self { cy, cx, h, w }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cycxhw_flips() {
        let orig = CyCxHW::from_cycxhw([0.25, 0.1, 0.2, 0.1]);

        let flipped = orig.hflip();
        assert_abs_diff_eq!(flipped.cx(), 0.9);
        assert_abs_diff_eq!(flipped.cy(), 0.25);
        assert_abs_diff_eq!(flipped.hflip().cx(), orig.cx());

        let flipped = orig.vflip();
        assert_abs_diff_eq!(flipped.cy(), 0.75);
        assert_abs_diff_eq!(flipped.cx(), 0.1);
    }

    #[test]
    fn cycxhw_clip_to_unit() {
        // box hanging over the left edge
        let clipped = CyCxHW::from_cycxhw([0.5, 0.05, 0.2, 0.3])
            .clip_to_unit()
            .unwrap();
        assert_abs_diff_eq!(clipped.l(), 0.0);
        assert_abs_diff_eq!(clipped.r(), 0.2);
        assert_abs_diff_eq!(clipped.h(), 0.2);

        // box entirely outside
        assert!(CyCxHW::from_cycxhw([-0.5, 0.5, 0.2, 0.2])
            .clip_to_unit()
            .is_none());

        // box larger than the unit square collapses onto it
        let clipped = CyCxHW::from_cycxhw([0.5, 0.5, 3.0, 3.0])
            .clip_to_unit()
            .unwrap();
        assert_abs_diff_eq!(clipped.area(), 1.0);
    }
}
