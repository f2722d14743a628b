/// Transcript scroll position, measured in lines up from the bottom.
///
/// Follow mode pins the view to the newest line; manual scrolling pauses it
/// until the next transcript change or until the user scrolls back down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    lines_from_bottom: u16,
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            lines_from_bottom: 0,
        }
    }

    pub fn is_following_bottom(&self) -> bool {
        self.lines_from_bottom == 0
    }

    pub fn follow_bottom(&mut self) {
        self.lines_from_bottom = 0;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.lines_from_bottom = self.lines_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.lines_from_bottom = self.lines_from_bottom.saturating_sub(lines);
    }

    /// Top line to render for `total` lines in a viewport of `height`.
    pub fn top_line(&self, total: usize, height: u16) -> u16 {
        let max_top = total.saturating_sub(height as usize);
        let top = max_top.saturating_sub(self.lines_from_bottom as usize);
        u16::try_from(top).unwrap_or(u16::MAX)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}
