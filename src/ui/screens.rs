/// Selection state for the browse list. The cards themselves stay in the
/// session; only the highlighted row lives here.
#[derive(Default)]
pub(crate) struct BrowseScreen {
    pub(crate) selected: usize,
}

impl BrowseScreen {
    pub(crate) fn new(selected: usize, len: usize) -> Self {
        let mut screen = Self { selected };
        screen.ensure_in_bounds(len);
        screen
    }

    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            return;
        }
        let last = len as isize - 1;
        let new = (self.selected as isize + offset).clamp(0, last);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}
