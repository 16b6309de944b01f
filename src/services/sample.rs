//! Placeholder roster served when the backend yields nothing, so the
//! directory is never empty.

use uuid::Uuid;

use crate::services::mappers::{
    Attributed, Dancer, DancerSocial, FOLLOWERS_PER_MEMBER, Team, TeamMember,
};

const MARLINE_ID: Uuid = Uuid::from_u128(0x5a3e_0001_0000_4000_8000_0000_0000_0001);
const SOFIA_ID: Uuid = Uuid::from_u128(0x5a3e_0001_0000_4000_8000_0000_0000_0002);
const HANEUL_ID: Uuid = Uuid::from_u128(0x5a3e_0001_0000_4000_8000_0000_0000_0003);
const NOVA_ID: Uuid = Uuid::from_u128(0x5a3e_0002_0000_4000_8000_0000_0000_0001);
const ORBIT_ID: Uuid = Uuid::from_u128(0x5a3e_0002_0000_4000_8000_0000_0000_0002);

fn dancer(
    id: Uuid,
    name: &str,
    name_en: &str,
    slug: &str,
    specialty: &str,
    monthly_listeners: u64,
) -> Dancer {
    Dancer {
        id,
        name: name.to_string(),
        name_en: name_en.to_string(),
        slug: slug.to_string(),
        profile_image: None,
        bio: String::new(),
        specialty: Attributed::placeholder(specialty.to_string()),
        verified: Attributed::placeholder(true),
        monthly_listeners: Some(monthly_listeners),
        social: DancerSocial::default(),
    }
}

pub fn dancers() -> Vec<Dancer> {
    vec![
        dancer(MARLINE_ID, "김마린", "Marline Kim", "marline-kim", "Dancer", 125_000),
        dancer(SOFIA_ID, "정소피아", "Sofia Jung", "sofia-jung", "Dancer", 98_000),
        dancer(HANEUL_ID, "이하늘", "Haneul Lee", "haneul-lee", "Dancer", 80_000),
    ]
}

fn member(source: &Dancer, is_leader: bool) -> TeamMember {
    TeamMember {
        id: source.id,
        name: source.name.clone(),
        name_en: source.name_en.clone(),
        slug: source.slug.clone(),
        profile_image: None,
        role: None,
        is_leader,
    }
}

pub fn teams() -> Vec<Team> {
    let roster = dancers();
    let (marline, sofia, haneul) = (&roster[0], &roster[1], &roster[2]);

    let team = |id: Uuid, name: &str, name_ko: &str, slug: &str, year: i32, members: Vec<TeamMember>| {
        let leader_id = members.iter().find(|m| m.is_leader).map(|m| m.id);
        Team {
            id,
            name: name.to_string(),
            name_ko: name_ko.to_string(),
            slug: slug.to_string(),
            description: String::new(),
            logo: None,
            cover_image: None,
            leader_id,
            formed_year: Some(Attributed::placeholder(year)),
            member_count: members.len(),
            followers: Some(Attributed::placeholder(members.len() as u64 * FOLLOWERS_PER_MEMBER)),
            members,
        }
    };

    vec![
        team(
            NOVA_ID,
            "Nova Crew",
            "노바 크루",
            "nova-crew",
            2019,
            vec![member(marline, true), member(sofia, false), member(haneul, false)],
        ),
        team(
            ORBIT_ID,
            "Orbit",
            "오르빗",
            "orbit",
            2022,
            vec![member(sofia, true), member(haneul, false)],
        ),
    ]
}
