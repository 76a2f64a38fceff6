//! Resize handle identities and pointer cursors

/// Which part of a rectangle a drag grabs
#[repr(u8)]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    #[default]
    None,
    /// North-West corner
    NW,
    /// North edge
    N,
    /// North-East corner
    NE,
    /// East edge
    E,
    /// South-East corner
    SE,
    /// South edge
    S,
    /// South-West corner
    SW,
    /// West edge
    W,
}

impl ResizeHandle {
    pub const CORNERS: [ResizeHandle; 4] = [
        ResizeHandle::NW,
        ResizeHandle::NE,
        ResizeHandle::SW,
        ResizeHandle::SE,
    ];

    pub const EDGES: [ResizeHandle; 4] = [
        ResizeHandle::W,
        ResizeHandle::E,
        ResizeHandle::N,
        ResizeHandle::S,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            ResizeHandle::NW | ResizeHandle::NE | ResizeHandle::SW | ResizeHandle::SE
        )
    }

    /// Dragging this handle moves the top edge
    pub fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NW | ResizeHandle::NE)
    }

    /// Dragging this handle moves the bottom edge
    pub fn moves_bottom(self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::SW | ResizeHandle::SE)
    }

    /// Dragging this handle moves the left edge
    pub fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }

    /// Dragging this handle moves the right edge
    pub fn moves_right(self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE)
    }

    /// CSS-style cursor name shown while hovering this handle
    pub fn cursor_name(self) -> &'static str {
        match self {
            ResizeHandle::None => "pointer",
            ResizeHandle::NW => "nw-resize",
            ResizeHandle::N => "n-resize",
            ResizeHandle::NE => "ne-resize",
            ResizeHandle::E => "e-resize",
            ResizeHandle::SE => "se-resize",
            ResizeHandle::S => "s-resize",
            ResizeHandle::SW => "sw-resize",
            ResizeHandle::W => "w-resize",
        }
    }
}

impl From<u8> for ResizeHandle {
    fn from(state: u8) -> Self {
        match state {
            1 => ResizeHandle::NW,
            2 => ResizeHandle::N,
            3 => ResizeHandle::NE,
            4 => ResizeHandle::E,
            5 => ResizeHandle::SE,
            6 => ResizeHandle::S,
            7 => ResizeHandle::SW,
            8 => ResizeHandle::W,
            _ => ResizeHandle::None,
        }
    }
}

impl From<ResizeHandle> for u8 {
    fn from(state: ResizeHandle) -> Self {
        match state {
            ResizeHandle::None => 0,
            ResizeHandle::NW => 1,
            ResizeHandle::N => 2,
            ResizeHandle::NE => 3,
            ResizeHandle::E => 4,
            ResizeHandle::SE => 5,
            ResizeHandle::S => 6,
            ResizeHandle::SW => 7,
            ResizeHandle::W => 8,
        }
    }
}

/// Cursor the host should display over an editor
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Crosshair,
    Default,
    Pointer,
    Resize(ResizeHandle),
}

impl Cursor {
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::Crosshair => "crosshair",
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
            Cursor::Resize(handle) => handle.cursor_name(),
        }
    }
}
