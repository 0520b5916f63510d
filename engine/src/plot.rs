use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Action;

/// Story progress tracker.
///
/// The plot is a set of state flags and a list of pending triggers. A
/// trigger fires once all of its required flags are set, and then unlocks
/// its follow-up triggers.
#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Plot {
    state: BTreeSet<String>,
    triggers: Vec<Trigger>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Trigger {
    pub requires: BTreeSet<String>,
    pub effect: Action,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub then: Vec<Trigger>,
}

impl Trigger {
    pub fn new(
        requires: impl IntoIterator<Item = impl Into<String>>,
        effect: Action,
    ) -> Self {
        Trigger {
            requires: requires.into_iter().map(Into::into).collect(),
            effect,
            then: Vec::new(),
        }
    }

    /// Builder method for triggers that become active after this one
    /// fires.
    pub fn then(mut self, triggers: impl IntoIterator<Item = Trigger>) -> Self {
        self.then.extend(triggers);
        self
    }
}

impl Plot {
    pub fn new(
        state: impl IntoIterator<Item = impl Into<String>>,
        triggers: impl IntoIterator<Item = Trigger>,
    ) -> Self {
        Plot {
            state: state.into_iter().map(Into::into).collect(),
            triggers: triggers.into_iter().collect(),
        }
    }

    /// Set state flags and return the effects of every trigger that fires
    /// as a result, in firing order.
    ///
    /// Triggers unlocked by a firing trigger are checked during the same
    /// update, so a chain whose requirements are already met fires all the
    /// way through.
    pub fn update(
        &mut self,
        flags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Vec<Action> {
        self.state.extend(flags.into_iter().map(Into::into));

        let mut ret = Vec::new();
        while let Some(i) = self
            .triggers
            .iter()
            .position(|t| t.requires.is_subset(&self.state))
        {
            let trigger = self.triggers.remove(i);
            log::debug!("plot trigger {:?} fired", trigger.requires);
            ret.push(trigger.effect);
            self.triggers.extend(trigger.then);
        }
        ret
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.state.contains(flag)
    }

    /// No triggers are left to fire.
    pub fn is_finished(&self) -> bool {
        self.triggers.is_empty()
    }
}
