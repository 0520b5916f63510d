//! Scripted entity behavior.
use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::{Entity, ScenarioStatus, World, TALK_SEPARATOR};

/// Something an entity does when activated.
///
/// Compound actions carry their own progress so an entity can say
/// different things on successive activations.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Perform the next action in line, repeating the last one once the
    /// list runs out.
    Iter {
        actions: Vec<Action>,
        #[serde(default)]
        pos: usize,
    },
    /// Perform the next action in line, starting over from the beginning
    /// after the last one.
    Loop {
        actions: Vec<Action>,
        #[serde(default)]
        pos: usize,
    },
    /// Go through the list `times` times, then keep repeating the last
    /// action.
    Cycle {
        times: usize,
        actions: Vec<Action>,
        #[serde(default)]
        pos: usize,
    },
    /// Perform every action in the list.
    Sequence(Vec<Action>),
    /// Perform the inner action and make it the actor's new action.
    Reset(Box<Action>),
    /// Set plot state flags.
    UpdatePlot(Vec<String>),
    /// Show a message.
    Alert(String),
    /// Show a message spoken by the actor.
    Talk(String),
    /// Step the actor.
    Move(IVec2),
    /// Add the actor to the player's party.
    JoinParty,
    /// End the game in victory.
    Victory(String),
    /// End the game in defeat.
    Defeat(String),
}

use Action::*;

impl Action {
    pub fn iter(actions: impl IntoIterator<Item = Action>) -> Self {
        Iter {
            actions: actions.into_iter().collect(),
            pos: 0,
        }
    }

    pub fn looping(actions: impl IntoIterator<Item = Action>) -> Self {
        Loop {
            actions: actions.into_iter().collect(),
            pos: 0,
        }
    }

    pub fn cycle(
        times: usize,
        actions: impl IntoIterator<Item = Action>,
    ) -> Self {
        Cycle {
            times,
            actions: actions.into_iter().collect(),
            pos: 0,
        }
    }

    pub fn sequence(actions: impl IntoIterator<Item = Action>) -> Self {
        Sequence(actions.into_iter().collect())
    }

    pub fn reset(action: Action) -> Self {
        Reset(Box::new(action))
    }

    pub fn update_plot(
        flags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        UpdatePlot(flags.into_iter().map(Into::into).collect())
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Alert(text.into())
    }

    pub fn talk(text: impl Into<String>) -> Self {
        Talk(text.into())
    }

    /// Run the action with `actor` as the acting entity.
    ///
    /// If the action wants to replace the actor's current action, the
    /// replacement is returned.
    pub fn perform(
        &mut self,
        w: &mut World,
        actor: Entity,
    ) -> Option<Action> {
        match self {
            Iter { actions, pos } => {
                let Some(last) = actions.len().checked_sub(1) else {
                    return None;
                };
                let i = (*pos).min(last);
                *pos = i + 1;
                actions[i].perform(w, actor)
            }
            Loop { actions, pos } => {
                if actions.is_empty() {
                    return None;
                }
                let i = *pos % actions.len();
                *pos = (i + 1) % actions.len();
                actions[i].perform(w, actor)
            }
            Cycle {
                times,
                actions,
                pos,
            } => {
                let n = actions.len();
                if n == 0 {
                    return None;
                }
                let total = times.saturating_mul(n);
                let i = if *pos < total { *pos % n } else { n - 1 };
                *pos = (*pos + 1).min(total);
                actions[i].perform(w, actor)
            }
            Sequence(actions) => {
                let mut ret = None;
                for a in actions.iter_mut() {
                    ret = a.perform(w, actor).or(ret);
                }
                ret
            }
            Reset(action) => {
                let mut next = (**action).clone();
                let replacement = next.perform(w, actor);
                Some(replacement.unwrap_or(next))
            }
            UpdatePlot(flags) => {
                w.update_plot(flags.iter().cloned());
                None
            }
            Alert(text) => {
                w.infobox_mut().write(text);
                None
            }
            Talk(text) => {
                let line =
                    format!("{}{TALK_SEPARATOR}{text}", actor.name(w));
                w.infobox_mut().write(&line);
                None
            }
            Move(step) => {
                w.step_entity(actor, *step);
                None
            }
            JoinParty => {
                w.join_party(actor);
                None
            }
            Victory(text) => {
                w.end_game(ScenarioStatus::Won(text.clone()));
                None
            }
            Defeat(text) => {
                w.end_game(ScenarioStatus::Lost(text.clone()));
                None
            }
        }
    }
}
