//! Carousel navigation over the menu categories.
//!
//! Positions are clamped to `[0, len - 1]`; stepping past either end is a no-op
//! rather than a wrap-around.

/// Button actions understood by the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselAction {
    Prev,
    Next,
    Reset,
}

/// Result of applying an action to a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The position changed and the view must be redrawn
    Moved(usize),
    /// The action was a no-op at this position
    Unchanged(usize),
}

impl Transition {
    #[cfg(test)]
    fn position(self) -> usize {
        match self {
            Transition::Moved(p) | Transition::Unchanged(p) => p,
        }
    }
}

/// Apply `action` at `position` over a carousel of `len` pages.
///
/// `Reset` always reports `Moved(0)` because it forces a fresh render even when
/// the user is already on the first page. An out-of-range starting position is
/// clamped first.
pub fn apply(action: CarouselAction, position: usize, len: usize) -> Transition {
    let last = len.saturating_sub(1);
    let position = position.min(last);

    match action {
        CarouselAction::Prev if position > 0 => Transition::Moved(position - 1),
        CarouselAction::Next if position < last => Transition::Moved(position + 1),
        CarouselAction::Prev | CarouselAction::Next => Transition::Unchanged(position),
        CarouselAction::Reset => Transition::Moved(0),
    }
}

pub fn has_prev(position: usize) -> bool {
    position > 0
}

pub fn has_next(position: usize, len: usize) -> bool {
    position + 1 < len
}
