//! Match flow, rule resolution and decision policies

/// Tagged log line that skips formatting entirely when the feature is off or the level is
/// filtered out. `$owner` needs `logger()` and `log(level, tag, message)`.
macro_rules! log_tagged {
    ($owner:expr, $level:expr, $tag:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            if $owner.logger().wants($level) {
                $owner.log($level, $tag, &format!($($arg)*));
            }
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$owner;
        }
    };
}

pub mod board;
pub mod combat;
pub mod controller;
pub mod duelist;
pub mod easy_controller;
pub mod effects;
pub mod events;
pub mod game_loop;
pub mod hard_controller;
pub mod logger;
pub mod medium_controller;
pub mod phase;
pub mod state;
pub mod turn_controller;

#[cfg(test)]
pub(crate) mod test_support;

pub use combat::{apply_battle_damage, AttackOutcome};
pub use controller::{policy_for, DecisionPolicy, Difficulty, PhaseContext, Seat};
pub use duelist::{Duelist, SummonRejection, MAX_SUMMON_LEVEL};
pub use effects::{apply_spell_to_monster, SpellOutcome};
pub use events::{EventLog, EventRecorder, EventSubscriber, GameEvent};
pub use game_loop::{GameEndReason, GameLoop, GameResult, VerbosityLevel};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode, SharedLogger};
pub use phase::{Phase, TurnState};
pub use state::{GameState, MatchConfig};
pub use turn_controller::TurnController;
