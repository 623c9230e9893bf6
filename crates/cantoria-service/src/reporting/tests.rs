use cantoria_db::db::enums::{LiturgicalSection, SuggestionStatus, UnavailabilityReason};
use cantoria_db::model::assignment::MassAssignment;
use cantoria_db::model::availability::AvailabilityBlock;
use cantoria_db::model::mass::Mass;
use cantoria_db::model::musician::Musician;
use cantoria_db::model::song::MassSong;
use cantoria_db::model::suggestion::MusicianSuggestion;

use super::*;

fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn mass(on: chrono::NaiveDate) -> Mass {
    let now = chrono::Utc::now();
    Mass {
        id: uuid::Uuid::new_v4(),
        scheduled_date: on,
        scheduled_time: chrono::NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
        kind: "Domingo".to_string(),
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

fn musician(name: &str, available: bool) -> Musician {
    let now = chrono::Utc::now();
    Musician {
        id: uuid::Uuid::new_v4(),
        name: name.to_string(),
        instrument: "Voz".to_string(),
        available,
        email: None,
        phone: None,
        photo: None,
        permanent_notes: None,
        created_at: now,
        updated_at: now,
    }
}

fn song(mass: &Mass, name: &str, section: LiturgicalSection, seq: i64) -> MassSong {
    let now = chrono::Utc::now();
    MassSong {
        id: uuid::Uuid::new_v4(),
        seq,
        mass_id: mass.id,
        name: name.to_string(),
        performer: None,
        youtube_link: None,
        score_link: None,
        download_link: None,
        section,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

fn assign(mass: &Mass, musician: &Musician) -> MassAssignment {
    MassAssignment {
        id: uuid::Uuid::new_v4(),
        mass_id: mass.id,
        musician_id: musician.id,
        created_at: chrono::Utc::now(),
    }
}

fn suggestion(musician: &Musician, status: SuggestionStatus) -> MusicianSuggestion {
    let now = chrono::Utc::now();
    MusicianSuggestion {
        id: uuid::Uuid::new_v4(),
        musician_id: musician.id,
        body: "tocar mais Taizé".to_string(),
        status,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn empty_store_yields_zeroes() {
    let dashboard = StoreSnapshot::default().dashboard(date(2025, 6, 1));

    assert_eq!(
        dashboard.totals,
        Totals {
            masses: 0,
            musicians: 0,
            available_musicians: 0,
            pending_suggestions: 0,
        }
    );
    assert!(dashboard.masses_per_month.is_empty());
    assert!(dashboard.top_musicians.is_empty());
    assert_eq!(dashboard.suggestions_by_status.len(), SuggestionStatus::ALL.len());
    assert!(dashboard.section_fill.iter().all(|s| s.percent == 0));
}

#[test]
fn available_count_excludes_flag_and_blocks() {
    let today = date(2025, 6, 1);
    let ana = musician("Ana", true);
    let bia = musician("Bia", true);
    let caio = musician("Caio", false);
    let now = chrono::Utc::now();
    let snapshot = StoreSnapshot {
        blocks: vec![AvailabilityBlock {
            id: uuid::Uuid::new_v4(),
            musician_id: bia.id,
            start_date: date(2025, 5, 30),
            end_date: today,
            reason: UnavailabilityReason::Doenca,
            custom_reason: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }],
        suggestions: vec![
            suggestion(&ana, SuggestionStatus::Pendente),
            suggestion(&ana, SuggestionStatus::Recusada),
        ],
        musicians: vec![ana, bia, caio],
        ..StoreSnapshot::default()
    };

    let totals = snapshot.totals(today);

    assert_eq!(totals.musicians, 3);
    assert_eq!(totals.available_musicians, 1);
    assert_eq!(totals.pending_suggestions, 1);
}

#[test]
fn months_are_ascending() {
    let snapshot = StoreSnapshot {
        masses: vec![
            mass(date(2025, 12, 25)),
            mass(date(2025, 3, 2)),
            mass(date(2025, 12, 24)),
        ],
        ..StoreSnapshot::default()
    };

    assert_eq!(
        snapshot.masses_per_month(),
        vec![
            MonthCount { month: "2025-03".to_string(), count: 1 },
            MonthCount { month: "2025-12".to_string(), count: 2 },
        ]
    );
}

#[test]
fn rankings_break_ties_alphabetically_and_truncate() {
    let first = mass(date(2025, 1, 5));
    let second = mass(date(2025, 1, 12));
    let ana = musician("Ana", true);
    let bia = musician("Bia", true);
    let caio = musician("Caio", true);

    let snapshot = StoreSnapshot {
        assignments: vec![
            assign(&first, &caio),
            assign(&second, &caio),
            assign(&first, &bia),
            assign(&first, &ana),
        ],
        songs: vec![
            song(&first, "Segura na Mão de Deus", LiturgicalSection::Entrada, 1),
            song(&second, "Segura na Mão de Deus", LiturgicalSection::Entrada, 2),
            song(&first, "Adeste Fideles", LiturgicalSection::Final, 3),
            song(&second, "Santo", LiturgicalSection::Santo, 4),
        ],
        masses: vec![first, second],
        musicians: vec![ana, bia, caio],
        ..StoreSnapshot::default()
    };

    let names: Vec<(String, usize)> = snapshot
        .top_musicians(2)
        .into_iter()
        .map(|r| (r.name, r.appearances))
        .collect();
    assert_eq!(names, vec![("Caio".to_string(), 2), ("Ana".to_string(), 1)]);

    let songs = snapshot.top_songs(RANKING_LIMIT);
    assert_eq!(songs[0].name, "Segura na Mão de Deus");
    assert_eq!(songs[0].uses, 2);
    assert_eq!(songs[1].name, "Adeste Fideles");
    assert_eq!(songs.len(), 3);
}

/// ## Summary
/// Namesakes are ranked as separate musicians.
#[test]
fn musicians_sharing_a_name_are_ranked_separately() {
    let first = mass(date(2025, 2, 2));
    let second = mass(date(2025, 2, 9));
    let soprano = musician("Ana", true);
    let alto = musician("Ana", true);

    let snapshot = StoreSnapshot {
        assignments: vec![
            assign(&first, &soprano),
            assign(&second, &soprano),
            assign(&first, &alto),
        ],
        masses: vec![first, second],
        musicians: vec![soprano, alto],
        ..StoreSnapshot::default()
    };

    assert_eq!(
        snapshot.top_musicians(RANKING_LIMIT),
        vec![
            MusicianRanking { name: "Ana".to_string(), appearances: 2 },
            MusicianRanking { name: "Ana".to_string(), appearances: 1 },
        ]
    );
}

#[test]
fn section_fill_counts_masses_not_songs() {
    let first = mass(date(2025, 1, 5));
    let second = mass(date(2025, 1, 12));
    let third = mass(date(2025, 1, 19));

    let snapshot = StoreSnapshot {
        songs: vec![
            song(&first, "A", LiturgicalSection::Entrada, 1),
            song(&first, "B", LiturgicalSection::Entrada, 2),
            song(&second, "C", LiturgicalSection::Entrada, 3),
            song(&third, "D", LiturgicalSection::Comunhao, 4),
        ],
        masses: vec![first, second, third],
        ..StoreSnapshot::default()
    };

    let fill = snapshot.section_fill();
    let share = |section: LiturgicalSection| {
        fill.iter()
            .find(|s| s.section == section)
            .map(|s| s.percent)
            .expect("every section present")
    };

    assert_eq!(fill.len(), LiturgicalSection::ALL.len());
    assert_eq!(share(LiturgicalSection::Entrada), 67);
    assert_eq!(share(LiturgicalSection::Comunhao), 33);
    assert_eq!(share(LiturgicalSection::Gloria), 0);
}

#[test]
fn dashboard_uses_client_field_names() {
    let json = serde_json::to_value(StoreSnapshot::default().dashboard(date(2025, 1, 1)))
        .expect("serializable");

    assert_eq!(json["totais"]["musicos_disponiveis"], 0);
    assert_eq!(json["sugestoes_por_status"][0]["status"], "pendente");
    assert_eq!(json["preenchimento_secoes"][0]["secao"], "entrada");
}
