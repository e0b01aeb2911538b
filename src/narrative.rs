//! Story progression.
//!
//! The whole state machine lives in [`transition`]: world events go in, the
//! next state and the texts to show come out.  Transitions only move forward.

use crate::entities::WorldFlags;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NarrativeState {
    Start,
    Relic,
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NarrativeEvent {
    RelicCollected,
    DoorReached,
    BossDefeated,
}

/// Result of a successful transition.  The HUD texts are replaced wholesale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: NarrativeState,
    pub story: &'static str,
    pub objective: &'static str,
    pub hint: &'static str,
}

pub const START_OBJECTIVE: &str = "Find the relic";
pub const START_HINT: &str = "Collect the relic to unlock the boss door.";
pub const PAUSED_HINT: &str = "Paused. Press P to resume.";
pub const ESCAPED_OBJECTIVE: &str = "Escape complete";
pub const ESCAPED_HINT: &str = "Boss defeated! The gate unlocks. Escape is yours.";

impl NarrativeState {
    /// State implied by the world flags.  Always agrees with the state reached
    /// through [`transition`].
    pub fn derive(flags: &WorldFlags) -> NarrativeState {
        if flags.door_reached {
            NarrativeState::Boss
        } else if flags.relic_collected {
            NarrativeState::Relic
        } else {
            NarrativeState::Start
        }
    }

    pub fn story(self) -> &'static str {
        match self {
            NarrativeState::Start => "The prison stirs. Find the relic to regain the first shard.",
            NarrativeState::Relic => "Power shard reclaimed. The warden stirs beyond the door.",
            NarrativeState::Boss => "Boss gate open. Defeat the devil's champion to escape.",
        }
    }

    pub fn objective(self) -> &'static str {
        match self {
            NarrativeState::Start => START_OBJECTIVE,
            NarrativeState::Relic => "Unlock the boss door",
            NarrativeState::Boss => "Defeat the warden",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            NarrativeState::Start => START_HINT,
            NarrativeState::Relic => "The door glows. Defeat the warden beyond.",
            NarrativeState::Boss => "Shoot the warden 3 times to escape.",
        }
    }
}

/// `None` means the event does not move the story from `state`.
pub fn transition(state: NarrativeState, event: NarrativeEvent) -> Option<Transition> {
    let entered = |next: NarrativeState| Transition {
        next,
        story: next.story(),
        objective: next.objective(),
        hint: next.hint(),
    };

    match (state, event) {
        (NarrativeState::Start, NarrativeEvent::RelicCollected) => {
            Some(entered(NarrativeState::Relic))
        }
        (NarrativeState::Relic, NarrativeEvent::DoorReached) => {
            Some(entered(NarrativeState::Boss))
        }
        // The boss can fall before the door is ever reached; only the text
        // changes.
        (_, NarrativeEvent::BossDefeated) => Some(Transition {
            next: state,
            story: state.story(),
            objective: ESCAPED_OBJECTIVE,
            hint: ESCAPED_HINT,
        }),
        _ => None,
    }
}
