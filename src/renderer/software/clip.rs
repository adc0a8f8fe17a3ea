/// Per-column vertical occlusion bands for one recursion level.
///
/// * Columns `x0 .. x1` are the horizontal window of the call.
/// * `top[x] .. bottom[x]` is the half-open row range still paintable in
///   column `x`; `top >= bottom` means the column is closed.
/// * Arrays span the full screen width so a child window can be cut out of
///   its parent without re-indexing.
///
/// Every mutator only ever shrinks a band.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipWindow {
    pub x0: i32,
    pub x1: i32,
    pub top: Vec<i32>,
    pub bottom: Vec<i32>,
}

impl ClipWindow {
    /// Whole screen, every column fully open.
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            x0: 0,
            x1: width as i32,
            top: vec![0; width],
            bottom: vec![height as i32; width],
        }
    }

    #[inline(always)]
    pub fn band(&self, x: i32) -> (i32, i32) {
        (self.top[x as usize], self.bottom[x as usize])
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1
    }

    /// Intersect column `x` with `[top, bottom)`.
    #[inline(always)]
    pub fn narrow(&mut self, x: i32, top: i32, bottom: i32) {
        self.clip_top(x, top);
        self.clip_bottom(x, bottom);
    }

    #[inline(always)]
    pub fn clip_top(&mut self, x: i32, top: i32) {
        let t = &mut self.top[x as usize];
        *t = (*t).max(top);
    }

    #[inline(always)]
    pub fn clip_bottom(&mut self, x: i32, bottom: i32) {
        let b = &mut self.bottom[x as usize];
        *b = (*b).min(bottom);
    }

    /// Fully occlude column `x`.
    #[inline(always)]
    pub fn close(&mut self, x: i32) {
        let b = self.bottom[x as usize];
        self.clip_top(x, b);
    }

    /// Snapshot of the current bands restricted to columns `x0 .. x1`
    /// (clamped to this window).
    pub fn child(&self, x0: i32, x1: i32) -> Self {
        Self {
            x0: x0.max(self.x0),
            x1: x1.min(self.x1),
            top: self.top.clone(),
            bottom: self.bottom.clone(),
        }
    }

    /// Smallest top and largest bottom over the window, clamped to
    /// `0 ..= height`.  Used to bound row loops.
    pub fn row_extent(&self, height: i32) -> (i32, i32) {
        let mut lo = height;
        let mut hi = 0;
        for x in self.x0..self.x1 {
            let (t, b) = self.band(x);
            if t < b {
                lo = lo.min(t);
                hi = hi.max(b);
            }
        }
        (lo.clamp(0, height), hi.clamp(0, height))
    }
}

impl Default for ClipWindow {
    fn default() -> Self {
        Self::full(0, 0)
    }
}
