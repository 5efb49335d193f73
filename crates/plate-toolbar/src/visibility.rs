use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

/// Edge between two consecutive evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityTransition {
    Opened,
    Closed,
}

/// Tracks whether the toolbar is open and reports each edge exactly once.
///
/// Repeating the same input produces no transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityMachine {
    state: Visibility,
}

impl VisibilityMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Visibility {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == Visibility::Open
    }

    pub fn update(&mut self, active: bool) -> Option<VisibilityTransition> {
        let transition = match (self.state, active) {
            (Visibility::Closed, true) => {
                self.state = Visibility::Open;
                Some(VisibilityTransition::Opened)
            }
            (Visibility::Open, false) => {
                self.state = Visibility::Closed;
                Some(VisibilityTransition::Closed)
            }
            (Visibility::Closed, false) | (Visibility::Open, true) => None,
        };
        if let Some(transition) = transition {
            info!(?transition, "selection toolbar visibility changed");
        }
        transition
    }
}
