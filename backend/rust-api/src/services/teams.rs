use crate::models::reservation::{Team, TeamMember};

/// Splits a group booking into teams of `team_size`, in submission order.
///
/// Team `n` is named `Équipe n` and follows `route-n`. Participants without a
/// name or an email are left out but still take their slot, so the team
/// count only depends on `party_size`.
pub fn dispatch_teams(participants: &[TeamMember], party_size: u32, team_size: usize) -> Vec<Team> {
    let team_size = team_size.max(1);
    let party_size = party_size as usize;
    let team_count = party_size.div_ceil(team_size);

    (0..team_count)
        .map(|i| {
            let start = (i * team_size).min(participants.len());
            let end = ((i + 1) * team_size).min(participants.len());
            let members = participants[start..end]
                .iter()
                .filter(|p| !p.name.trim().is_empty() && !p.email.trim().is_empty())
                .map(|p| TeamMember {
                    name: p.name.trim().to_string(),
                    email: p.email.trim().to_string(),
                })
                .collect();

            let n = i + 1;
            Team {
                id: n as u32,
                name: format!("Équipe {}", n),
                members,
                route_id: format!("route-{}", n),
            }
        })
        .collect()
}
