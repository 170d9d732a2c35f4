//! Game action definitions

/// Everything the player can ask for
///
/// Bindings (keyboard / gamepad):
/// - Left arrow, A / D-pad left = MoveLeft
/// - Right arrow, D / D-pad right = MoveRight
/// - Space, Up arrow, W / South (A on Xbox) = Jump
/// - R / Start = Restart (after game over)
/// - Escape / window close = Quit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Restart,
    Quit,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::Restart,
        Action::Quit,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// The set of actions triggered during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet(u8);

impl ActionSet {
    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: ActionSet) -> ActionSet {
        ActionSet(self.0 | other.0)
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = ActionSet::default();
        for action in iter {
            set.insert(action);
        }
        set
    }
}
