use crate::aggregate::MemberSnapshot;

/// Puts the group owner at the front of the member list unless one of the
/// members already has the owner's id. Nothing else is reordered or
/// deduplicated.
pub fn build_roster(owner: Option<MemberSnapshot>, members: Vec<MemberSnapshot>) -> Vec<MemberSnapshot> {
    match owner {
        Some(owner) if !members.iter().any(|member| member.id == owner.id) => {
            std::iter::once(owner).chain(members).collect()
        }
        _ => members,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(roster: &[MemberSnapshot]) -> Vec<&str> {
        roster.iter().map(|member| member.id.as_str()).collect()
    }

    #[test]
    fn owner_goes_first() {
        let roster = build_roster(
            Some(MemberSnapshot::new("owner", "Oh", vec![])),
            vec![MemberSnapshot::new("b", "Ben", vec![]), MemberSnapshot::new("a", "Ana", vec![])],
        );

        assert_eq!(ids(&roster), vec!["owner", "b", "a"]);
    }

    #[test]
    fn owner_already_a_member() {
        let roster = build_roster(
            Some(MemberSnapshot::new("a", "Ana (owner)", vec![])),
            vec![MemberSnapshot::new("b", "Ben", vec![]), MemberSnapshot::new("a", "Ana", vec![])],
        );

        assert_eq!(ids(&roster), vec!["b", "a"]);
        assert_eq!(roster[1].name, "Ana");
    }

    #[test]
    fn no_owner_keeps_duplicates() {
        let members = vec![MemberSnapshot::new("a", "Ana", vec![]), MemberSnapshot::new("a", "Ana", vec![])];

        assert_eq!(build_roster(None, members.clone()), members);
    }
}
