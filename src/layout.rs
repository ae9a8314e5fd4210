/// Share of the left column's height given to the list pane, in tenths.
/// The stats pane gets the rest.
pub const LIST_HEIGHT_TENTHS: usize = 6;

/// Rows reserved under the panes for the key-help footer.
pub const FOOTER_ROWS: usize = 1;

/// Minimum terminal dimensions for usable rendering.
pub const MIN_COLS: usize = 60;
pub const MIN_ROWS: usize = 12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Dimensions of every pane for one terminal size.
///
/// ```text
/// +-----------+-----------+
/// | list      |           |
/// |           | logs      |
/// +-----------+           |
/// | stats     |           |
/// +-----------+-----------+
/// | footer                |
/// +-----------------------+
/// ```
/// The modal covers the whole pane area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaneLayout {
    pub screen: Size,
    pub list: Size,
    pub stats: Size,
    pub logs: Size,
    pub modal: Size,
}

impl PaneLayout {
    pub fn split(width: u16, height: u16) -> Self {
        let width = width as usize;
        let height = height as usize;
        let body = height.saturating_sub(FOOTER_ROWS);

        let left = width / 2;
        let right = width - left;
        let list = body * LIST_HEIGHT_TENTHS / 10;
        let stats = body - list;

        Self {
            screen: Size::new(width, height),
            list: Size::new(left, list),
            stats: Size::new(left, stats),
            logs: Size::new(right, body),
            modal: Size::new(width, body),
        }
    }

    pub fn is_too_small(&self) -> bool {
        self.screen.width < MIN_COLS || self.screen.height < MIN_ROWS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_covers_the_screen() {
        let layout = PaneLayout::split(120, 41);
        assert_eq!(layout.list, Size::new(60, 24));
        assert_eq!(layout.stats, Size::new(60, 16));
        assert_eq!(layout.logs, Size::new(60, 40));
        assert_eq!(layout.modal, Size::new(120, 40));
        assert_eq!(layout.list.height + layout.stats.height, layout.logs.height);
        assert_eq!(layout.list.width + layout.logs.width, 120);
    }

    #[test]
    fn odd_width_gives_extra_column_to_logs() {
        let layout = PaneLayout::split(81, 20);
        assert_eq!(layout.list.width, 40);
        assert_eq!(layout.logs.width, 41);
    }

    #[test]
    fn too_small_guard() {
        assert!(PaneLayout::split(59, 30).is_too_small());
        assert!(PaneLayout::split(100, 11).is_too_small());
        assert!(!PaneLayout::split(80, 24).is_too_small());
        assert!(PaneLayout::default().is_too_small());
    }

    #[test]
    fn zero_size_does_not_underflow() {
        let layout = PaneLayout::split(0, 0);
        assert_eq!(layout.logs, Size::new(0, 0));
    }
}
