//! Review navigation ring
//!
//! Once a transaction decodes, the user pages through the screens on a
//! closed ring: `TopSign -> TxDesc(0..N-1) -> Sign -> Deny -> TopSign`.
//! Approval is accepted from `TopSign` or `Sign`, denial from `Deny`.

/// Position on the review ring
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum NavState {
    /// Entry screen, approval shortcut
    #[default]
    TopSign,
    /// Decoded transaction screen by index
    TxDesc(usize),
    /// Sign confirmation screen
    Sign,
    /// Deny confirmation screen
    Deny,
}

impl NavState {
    /// Move one position up the ring
    pub fn up(&self, num_screens: usize) -> Self {
        match self {
            NavState::TopSign => NavState::Deny,
            NavState::TxDesc(0) => NavState::TopSign,
            NavState::TxDesc(i) => NavState::TxDesc(i - 1),
            NavState::Sign if num_screens == 0 => NavState::TopSign,
            NavState::Sign => NavState::TxDesc(num_screens - 1),
            NavState::Deny => NavState::Sign,
        }
    }

    /// Move one position down the ring
    pub fn down(&self, num_screens: usize) -> Self {
        match self {
            NavState::TopSign if num_screens == 0 => NavState::Sign,
            NavState::TopSign => NavState::TxDesc(0),
            NavState::TxDesc(i) if i + 1 >= num_screens => NavState::Sign,
            NavState::TxDesc(i) => NavState::TxDesc(i + 1),
            NavState::Sign => NavState::Deny,
            NavState::Deny => NavState::TopSign,
        }
    }

    /// Approval gesture accepted at this position
    pub fn can_approve(&self) -> bool {
        matches!(self, NavState::TopSign | NavState::Sign)
    }

    /// Denial gesture accepted at this position
    pub fn can_deny(&self) -> bool {
        matches!(self, NavState::Deny)
    }
}
