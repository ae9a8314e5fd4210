use unicode_width::UnicodeWidthStr;

const TAB_STOP: usize = 8;

/// Read-only scrollable text buffer shared by the log pane and the modal.
///
/// The full text is kept; nothing is truncated or wrapped here. Lines are
/// stored printable: escape sequences and control characters are removed
/// and tabs expanded. `offset` is the index of the first visible line.
#[derive(Clone, Debug, Default)]
pub struct Viewport {
    lines: Vec<String>,
    offset: usize,
    height: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            lines: Vec::new(),
            offset: 0,
            height,
        }
    }

    /// Replace the buffer and jump back to the top.
    pub fn set_content(&mut self, text: &str) {
        self.lines = text.lines().map(printable).collect();
        self.offset = 0;
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.offset = 0;
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The lines currently inside the window.
    pub fn visible(&self) -> &[String] {
        let end = (self.offset + self.height).min(self.lines.len());
        &self.lines[self.offset.min(end)..end]
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }

    fn half_page(&self) -> usize {
        (self.height / 2).max(1)
    }

    pub fn line_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn line_down(&mut self) {
        self.offset = (self.offset + 1).min(self.max_offset());
    }

    pub fn half_page_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.half_page());
    }

    pub fn half_page_down(&mut self) {
        self.offset = (self.offset + self.half_page()).min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.height.max(1));
    }

    pub fn page_down(&mut self) {
        self.offset = (self.offset + self.height.max(1)).min(self.max_offset());
    }

    pub fn goto_top(&mut self) {
        self.offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// How far through the buffer the bottom of the window is, 0..=100.
    pub fn scroll_percent(&self) -> u8 {
        if self.lines.len() <= self.height {
            return 100;
        }
        let bottom = self.offset + self.height;
        ((bottom * 100) / self.lines.len()).min(100) as u8
    }
}

/// Strip ANSI sequences and control characters, expanding tabs to the next
/// stop by display width.
fn printable(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for (i, segment) in line.split('\t').enumerate() {
        if i > 0 {
            let pad = TAB_STOP - out.width() % TAB_STOP;
            out.push_str(&" ".repeat(pad));
        }
        let stripped = strip_ansi_escapes::strip(segment);
        let clean = String::from_utf8_lossy(&stripped);
        out.extend(clean.chars().filter(|c| !c.is_control()));
    }
    out
}
