use crate::models::Xyhw;

/// A partial geometry, as sent in a configure request: only the fields the client asked for
/// are set.
#[derive(Default, Clone, Debug, PartialEq, Eq, Copy)]
pub struct XyhwChange {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub h: Option<i32>,
    pub w: Option<i32>,
    pub border: Option<i32>,
}

impl From<Xyhw> for XyhwChange {
    fn from(xywh: Xyhw) -> Self {
        Self {
            x: Some(xywh.x),
            y: Some(xywh.y),
            w: Some(xywh.w),
            h: Some(xywh.h),
            border: None,
        }
    }
}

impl XyhwChange {
    /// Applies the requested fields to `xyhw`. Returns whether anything changed.
    pub fn update(&self, xyhw: &mut Xyhw) -> bool {
        let mut changed = false;
        for (requested, current) in [
            (self.x, &mut xyhw.x),
            (self.y, &mut xyhw.y),
            (self.w, &mut xyhw.w),
            (self.h, &mut xyhw.h),
        ] {
            if let Some(value) = requested {
                if *current != value {
                    *current = value;
                    changed = true;
                }
            }
        }
        changed
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.w.is_none()
            && self.h.is_none()
            && self.border.is_none()
    }
}
