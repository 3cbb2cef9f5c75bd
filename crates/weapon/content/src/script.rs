//! Scripted intent timelines.
//!
//! A script is a list of steps, each naming the intents held from its start
//! time until the next step. Edges are derived by the host from consecutive
//! samples, so a script only describes levels.

use weapon_core::Intents;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptStep {
    /// Start time in seconds.
    pub at: f32,
    pub held: Intents,
}

impl ScriptStep {
    pub const fn new(at: f32, held: Intents) -> Self {
        Self { at, held }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentScript {
    pub steps: Vec<ScriptStep>,
}

impl IntentScript {
    /// Builds a script, ordering steps by start time.
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        let mut script = Self {
            steps: steps.into_iter().collect(),
        };
        script.sort();
        script
    }

    /// Orders steps by start time; steps sharing a time keep their order.
    pub fn sort(&mut self) {
        self.steps.sort_by(|a, b| a.at.total_cmp(&b.at));
    }

    /// Intents held at `time`: those of the latest step starting at or
    /// before it, or none before the first step.
    pub fn held_at(&self, time: f32) -> Intents {
        self.steps
            .iter()
            .take_while(|step| step.at <= time)
            .last()
            .map_or(Intents::empty(), |step| step.held)
    }

    /// Start time of the last step.
    pub fn end_time(&self) -> f32 {
        self.steps.last().map_or(0.0, |step| step.at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_at_follows_latest_step() {
        let script = IntentScript::new([
            ScriptStep::new(1.0, Intents::empty()),
            ScriptStep::new(0.5, Intents::FIRE | Intents::AIM),
            ScriptStep::new(2.0, Intents::RELOAD),
        ]);

        assert_eq!(script.held_at(0.0), Intents::empty());
        assert_eq!(script.held_at(0.5), Intents::FIRE | Intents::AIM);
        assert_eq!(script.held_at(0.9), Intents::FIRE | Intents::AIM);
        assert_eq!(script.held_at(1.5), Intents::empty());
        assert_eq!(script.held_at(10.0), Intents::RELOAD);
        assert_eq!(script.end_time(), 2.0);
    }

    #[test]
    fn empty_script_holds_nothing() {
        let script = IntentScript::default();
        assert_eq!(script.held_at(3.0), Intents::empty());
        assert_eq!(script.end_time(), 0.0);
    }
}
