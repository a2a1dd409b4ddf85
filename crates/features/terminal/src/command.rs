use std::fmt;
use ts64_codec::is_separator;

/// A recognized command verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Encode,
    Decode,
    Stash,
    Unlock,
    Export,
    StashAudio,
    StashVideo,
    Restore,
    Purge,
    /// `status` or `dashboard`.
    Status,
    Help,
    Clear,
    /// Anything else, lowercased.
    Unknown(String),
}

impl Command {
    fn from_verb(verb: &str) -> Self {
        match verb {
            "encode" => Self::Encode,
            "decode" => Self::Decode,
            "stash" => Self::Stash,
            "unlock" => Self::Unlock,
            "export" => Self::Export,
            "stash_audio" => Self::StashAudio,
            "stash_video" => Self::StashVideo,
            "restore" => Self::Restore,
            "purge" => Self::Purge,
            "status" | "dashboard" => Self::Status,
            "help" => Self::Help,
            "clear" => Self::Clear,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Encode => "encode",
            Self::Decode => "decode",
            Self::Stash => "stash",
            Self::Unlock => "unlock",
            Self::Export => "export",
            Self::StashAudio => "stash_audio",
            Self::StashVideo => "stash_video",
            Self::Restore => "restore",
            Self::Purge => "purge",
            Self::Status => "status",
            Self::Help => "help",
            Self::Clear => "clear",
            Self::Unknown(verb) => verb,
        })
    }
}

/// One input line split into its command and raw argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    pub command: Command,
    /// Everything after the verb with leading separators removed. Case and inner
    /// whitespace are preserved.
    pub argument: &'a str,
}

impl<'a> CommandLine<'a> {
    /// Returns `None` for a blank line.
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim_matches(is_separator);
        if line.is_empty() {
            return None;
        }

        let (verb, rest) = line.find(is_separator).map_or((line, ""), |at| line.split_at(at));
        Some(Self {
            command: Command::from_verb(&verb.to_lowercase()),
            argument: rest.trim_start_matches(is_separator),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_are_ignored() {
        assert_eq!(CommandLine::parse(""), None);
        assert_eq!(CommandLine::parse(" \t\u{200B}\n"), None);
    }

    #[test]
    fn test_verb_is_case_insensitive_and_argument_is_preserved() {
        let parsed = CommandLine::parse("  ENCODE   Hello   World").unwrap();
        assert_eq!(parsed.command, Command::Encode);
        assert_eq!(parsed.argument, "Hello   World");
    }

    #[test]
    fn test_invisible_separators_split_the_verb() {
        let parsed = CommandLine::parse("decode\u{FEFF}0100 1000").unwrap();
        assert_eq!(parsed.command, Command::Decode);
        assert_eq!(parsed.argument, "0100 1000");
    }

    #[test]
    fn test_aliases_and_unknown_verbs() {
        assert_eq!(CommandLine::parse("dashboard").unwrap().command, Command::Status);
        assert_eq!(CommandLine::parse("Launch now").unwrap().command, Command::Unknown("launch".into()));
        assert_eq!(CommandLine::parse("stash_audio").unwrap().argument, "");
        assert_eq!(CommandLine::parse("restore ./my backups/backup_AB12.ts64").unwrap().command, Command::Restore);
    }
}
