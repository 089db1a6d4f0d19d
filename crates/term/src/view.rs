//! BoardView: draws a `RoundSnapshot` into a framebuffer.
//!
//! Pure, no I/O.

use crate::core::RoundSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Layout of the well: each board cell is `cell_w` columns wide
#[derive(Debug, Clone, Copy)]
pub struct BoardView {
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Size of the bordered well in terminal cells
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 + 2,
        )
    }

    /// Render into a reusable framebuffer, resizing it to the viewport
    pub fn render_into(&self, snap: &RoundSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let (frame_w, frame_h) = self.frame_size();
        let left = viewport.width.saturating_sub(frame_w) / 2;
        let top = viewport.height.saturating_sub(frame_h) / 2;

        draw_border(fb, left, top, frame_w, frame_h);

        let empty = Style::fg(Rgb::new(90, 90, 100)).on(WELL_BG).dim();
        let ghost = Style::fg(Rgb::new(140, 140, 140)).on(WELL_BG).dim();

        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                let tag = snap.grid[y as usize][x as usize];
                let (ch, style) = if snap.active_covers(x, y) {
                    // A blocked spawn is drawn as well, on top of the stack
                    let kind = snap.active.map(|a| a.kind).unwrap_or(PieceKind::I);
                    ('█', block_style(kind))
                } else if let Some(kind) = PieceKind::from_tag(tag) {
                    ('█', block_style(kind))
                } else if snap.ghost_covers(x, y) && !snap.game_over {
                    ('░', ghost)
                } else {
                    ('·', empty)
                };
                let px = left + 1 + x as u16 * self.cell_w;
                fb.fill(px, top + 1 + y as u16, self.cell_w, 1, ch, style);
            }
        }

        draw_panel(fb, snap, left.saturating_add(frame_w).saturating_add(2), top);

        let banner = if snap.paused {
            Some("PAUSED")
        } else if snap.game_over {
            Some("GAME OVER")
        } else {
            None
        };
        if let Some(text) = banner {
            let x = left + frame_w.saturating_sub(text.len() as u16) / 2;
            fb.put_str(x, top + frame_h / 2, text, Style::fg(Rgb::new(255, 255, 255)).bold());
        }
    }

    pub fn render(&self, snap: &RoundSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    let style = Style::fg(Rgb::new(200, 200, 200));
    let (right, bottom) = (x + w - 1, y + h - 1);

    fb.put(x, y, '┌', style);
    fb.put(right, y, '┐', style);
    fb.put(x, bottom, '└', style);
    fb.put(right, bottom, '┘', style);
    for cx in x + 1..right {
        fb.put(cx, y, '─', style);
        fb.put(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom {
        fb.put(x, cy, '│', style);
        fb.put(right, cy, '│', style);
    }
}

fn draw_panel(fb: &mut FrameBuffer, snap: &RoundSnapshot, x: u16, top: u16) {
    let label = Style::default().bold();
    let value = Style::fg(Rgb::new(200, 200, 200));

    let numbers = [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)];
    let mut y = top;
    for (name, number) in numbers {
        fb.put_str(x, y, name, label);
        fb.put_u32(x, y + 1, number, value);
        y += 3;
    }

    fb.put_str(x, y, "NEXT", label);
    fb.put(x, y + 1, letter(snap.next), block_style(snap.next));
    y += 3;

    fb.put_str(x, y, "HOLD", label);
    match snap.hold {
        Some(kind) => {
            let style = if snap.can_hold {
                block_style(kind)
            } else {
                block_style(kind).dim()
            };
            fb.put(x, y + 1, letter(kind), style);
        }
        None => fb.put(x, y + 1, '-', value),
    }
}

fn letter(kind: PieceKind) -> char {
    match kind {
        PieceKind::I => 'I',
        PieceKind::J => 'J',
        PieceKind::L => 'L',
        PieceKind::O => 'O',
        PieceKind::S => 'S',
        PieceKind::T => 'T',
        PieceKind::Z => 'Z',
    }
}

fn block_style(kind: PieceKind) -> Style {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    };
    Style::fg(fg).on(WELL_BG).bold()
}
