//! Member registry

use super::member::BoardMember;

/// The configured board, in configuration order.
///
/// Built once at startup and never mutated, so it can be shared behind an
/// `Arc` and read from concurrent discussions without locking.
#[derive(Debug, Clone, Default)]
pub struct MemberRegistry {
    members: Vec<BoardMember>,
}

impl MemberRegistry {
    pub fn new(members: Vec<BoardMember>) -> Self {
        Self { members }
    }

    /// All members, in configured order.
    pub fn members(&self) -> &[BoardMember] {
        &self.members
    }

    pub fn get(&self, id: &str) -> Option<&BoardMember> {
        self.members.iter().find(|m| m.id == id)
    }

    /// First member holding `role`, if any.
    pub fn find_by_role(&self, role: &str) -> Option<&BoardMember> {
        self.members.iter().find(|m| m.role == role)
    }

    /// Configured priority of a member; unknown ids rank last.
    pub fn priority_of(&self, id: &str) -> u32 {
        self.get(id).map_or(u32::MAX, |m| m.priority)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl From<Vec<BoardMember>> for MemberRegistry {
    fn from(members: Vec<BoardMember>) -> Self {
        Self::new(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> MemberRegistry {
        MemberRegistry::new(vec![
            BoardMember::new("ceo", "Alex", "CEO", "anthropic").with_priority(1),
            BoardMember::new("cfo", "Dana", "CFO", "openai").with_priority(2),
        ])
    }

    #[test]
    fn test_lookup() {
        let reg = registry();
        assert_eq!(reg.get("cfo").unwrap().name, "Dana");
        assert!(reg.get("cmo").is_none());
        assert_eq!(reg.find_by_role("CEO").unwrap().id, "ceo");
    }

    #[test]
    fn test_priority_of_unknown_is_last() {
        let reg = registry();
        assert_eq!(reg.priority_of("ceo"), 1);
        assert_eq!(reg.priority_of("ghost"), u32::MAX);
    }
}
