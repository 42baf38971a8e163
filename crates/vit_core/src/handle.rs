//! The eight crop resize handles.

use std::fmt;
use std::str::FromStr;

/// A resize handle on the crop zone border.
///
/// Identifiers combine `t`/`b` (top/bottom) with `l`/`r` (left/right); mid-edge
/// handles use `m` for the axis they do not move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

/// Where a handle sits along one axis of the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Center,
    End,
}

impl Handle {
    /// All handles in creation order.
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopMiddle,
        Handle::TopRight,
        Handle::MiddleLeft,
        Handle::MiddleRight,
        Handle::BottomLeft,
        Handle::BottomMiddle,
        Handle::BottomRight,
    ];

    /// Short identifier, also used as the DOM `data-handle` value.
    pub fn id(&self) -> &'static str {
        match self {
            Handle::TopLeft => "tl",
            Handle::TopMiddle => "tm",
            Handle::TopRight => "tr",
            Handle::MiddleLeft => "ml",
            Handle::MiddleRight => "mr",
            Handle::BottomLeft => "bl",
            Handle::BottomMiddle => "bm",
            Handle::BottomRight => "br",
        }
    }

    pub fn moves_top(&self) -> bool {
        matches!(self, Handle::TopLeft | Handle::TopMiddle | Handle::TopRight)
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(
            self,
            Handle::BottomLeft | Handle::BottomMiddle | Handle::BottomRight
        )
    }

    pub fn moves_left(&self) -> bool {
        matches!(
            self,
            Handle::TopLeft | Handle::MiddleLeft | Handle::BottomLeft
        )
    }

    pub fn moves_right(&self) -> bool {
        matches!(
            self,
            Handle::TopRight | Handle::MiddleRight | Handle::BottomRight
        )
    }

    /// Horizontal placement on the crop border.
    pub fn horizontal(&self) -> Anchor {
        if self.moves_left() {
            Anchor::Start
        } else if self.moves_right() {
            Anchor::End
        } else {
            Anchor::Center
        }
    }

    /// Vertical placement on the crop border.
    pub fn vertical(&self) -> Anchor {
        if self.moves_top() {
            Anchor::Start
        } else if self.moves_bottom() {
            Anchor::End
        } else {
            Anchor::Center
        }
    }

    /// CSS resize cursor for this handle.
    pub fn cursor(&self) -> &'static str {
        match self {
            Handle::TopLeft | Handle::BottomRight => "nwse-resize",
            Handle::TopRight | Handle::BottomLeft => "nesw-resize",
            Handle::TopMiddle | Handle::BottomMiddle => "ns-resize",
            Handle::MiddleLeft | Handle::MiddleRight => "ew-resize",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Unknown handle identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown resize handle: {0}")]
pub struct UnknownHandle(pub String);

impl FromStr for Handle {
    type Err = UnknownHandle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handle::ALL
            .into_iter()
            .find(|h| h.id() == s)
            .ok_or_else(|| UnknownHandle(s.to_string()))
    }
}
