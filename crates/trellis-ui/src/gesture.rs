/// Press/release pairing for click targets.
///
/// A click fires only when the pointer is released over the same target it
/// was pressed on; dragging off the target (or onto another one) cancels it.
/// `T` identifies the target: `()` for a single button, a row index for a
/// table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickCommit<T> {
    pressed: Option<T>,
}

impl<T> Default for ClickCommit<T> {
    fn default() -> Self {
        Self { pressed: None }
    }
}

impl<T: PartialEq + Copy> ClickCommit<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the target under the pointer at press time, if any.
    pub fn press(&mut self, target: Option<T>) {
        self.pressed = target;
    }

    /// Returns the target to activate, if the release lands on the pressed one.
    pub fn release(&mut self, target: Option<T>) -> Option<T> {
        let pressed = self.pressed.take()?;
        (target == Some(pressed)).then_some(pressed)
    }

    pub fn cancel(&mut self) {
        self.pressed = None;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }
}
