//! Server statistics domain models.

/// A statistic mirrored into a locked voice channel name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    TotalMembers,
    Boosts,
}

impl StatKind {
    pub const ALL: [StatKind; 2] = [StatKind::TotalMembers, StatKind::Boosts];

    /// Lowercase fragments identifying an existing channel for this statistic.
    pub fn name_patterns(&self) -> &'static [&'static str] {
        match self {
            StatKind::TotalMembers => &["total members", "members"],
            StatKind::Boosts => &["boosts", "boost"],
        }
    }

    /// Channel name displaying `value`.
    pub fn label(&self, value: u64) -> String {
        match self {
            StatKind::TotalMembers => format!("👥 Total Members: {}", value),
            StatKind::Boosts => format!("🚀 Boosts: {}", value),
        }
    }

    /// Whether a channel name belongs to this statistic.
    pub fn matches(&self, channel_name: &str) -> bool {
        let lower = channel_name.to_lowercase();
        self.name_patterns()
            .iter()
            .any(|pattern| lower.contains(pattern))
    }
}

/// Current guild-wide figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuildStats {
    pub member_count: u64,
    pub boost_count: u64,
}

impl GuildStats {
    pub fn value(&self, kind: StatKind) -> u64 {
        match kind {
            StatKind::TotalMembers => self.member_count,
            StatKind::Boosts => self.boost_count,
        }
    }
}

/// A voice channel of the guild, as far as statistics are concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceChannelInfo {
    pub channel_id: u64,
    pub name: String,
    pub position: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_statistics() {
        assert_eq!(StatKind::TotalMembers.label(1234), "👥 Total Members: 1234");
        assert_eq!(StatKind::Boosts.label(7), "🚀 Boosts: 7");
    }

    #[test]
    fn matches_names_case_insensitively() {
        assert!(StatKind::TotalMembers.matches("👥 Total Members: 10"));
        assert!(StatKind::TotalMembers.matches("MEMBERS"));
        assert!(StatKind::Boosts.matches("🚀 Boost level"));
        assert!(!StatKind::Boosts.matches("👥 Total Members: 10"));
        assert!(!StatKind::TotalMembers.matches("General"));
    }
}
