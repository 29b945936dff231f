//! Commands the backend accepts over POST.

use std::fmt;
use std::str::FromStr;

pub const GENERIC_FAILURE: &str = "Action failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScareKind {
    Full,
    Prop,
    Sound,
    Record,
}

impl ScareKind {
    pub const ALL: [Self; 4] = [Self::Full, Self::Prop, Self::Sound, Self::Record];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Prop => "prop",
            Self::Sound => "sound",
            Self::Record => "record",
        }
    }
}

impl fmt::Display for ScareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScareKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown scare kind `{s}` (expected full, prop, sound or record)"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ToggleMotion,
    Scare(ScareKind),
    StartShow,
    StopShow,
}

impl Command {
    pub const ALL: [Self; 7] = [
        Self::ToggleMotion,
        Self::Scare(ScareKind::Full),
        Self::Scare(ScareKind::Prop),
        Self::Scare(ScareKind::Sound),
        Self::Scare(ScareKind::Record),
        Self::StartShow,
        Self::StopShow,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::ToggleMotion => "/api/motion/toggle",
            Self::Scare(ScareKind::Full) => "/api/scare/full",
            Self::Scare(ScareKind::Prop) => "/api/scare/prop",
            Self::Scare(ScareKind::Sound) => "/api/scare/sound",
            Self::Scare(ScareKind::Record) => "/api/scare/record",
            Self::StartShow => "/api/show/start",
            Self::StopShow => "/api/show/stop",
        }
    }

    /// Shown on success when the backend sends no `message`.
    #[must_use]
    pub fn default_message(self) -> &'static str {
        match self {
            Self::ToggleMotion => "Motion detection toggled",
            Self::Scare(ScareKind::Full) => "Full scare sequence triggered! 💀",
            Self::Scare(ScareKind::Prop) => "Prop triggered! ⚡",
            Self::Scare(ScareKind::Sound) => "Scary sound playing! 🔊",
            Self::Scare(ScareKind::Record) => "Recording started! 📹",
            Self::StartShow => "Show started",
            Self::StopShow => "Show stopped",
        }
    }

    /// Shown on a non-2xx response without `error`/`message`.
    #[must_use]
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::ToggleMotion => "Failed to toggle motion detection",
            Self::Scare(_) => GENERIC_FAILURE,
            Self::StartShow => "Failed to start show",
            Self::StopShow => "Failed to stop show",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToggleMotion => f.write_str("motion:toggle"),
            Self::Scare(kind) => write!(f, "scare:{kind}"),
            Self::StartShow => f.write_str("show:start"),
            Self::StopShow => f.write_str("show:stop"),
        }
    }
}

#[cfg(test)]
#[path = "command_test.rs"]
mod tests;
