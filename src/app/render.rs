use std::io;

use crossterm::{cursor::MoveTo, queue, terminal::Clear, terminal::ClearType};

use crate::view::{self, Presenter};

use super::App;

pub fn render(app: &mut App) -> io::Result<()> {
    let mut out = io::stdout();
    if app.clear_pending {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        app.clear_pending = false;
    }
    Presenter::paint(&mut out, &view::compose(&app.console))
}
