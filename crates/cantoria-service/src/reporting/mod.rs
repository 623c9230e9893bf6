//! Dashboard aggregates.
//!
//! Series are computed through [`AnalyticsSource`] so a dedicated analytics
//! backend can replace the in-process aggregation without touching callers.
//! The shipped source is a [`StoreSnapshot`] read from the entity store.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use cantoria_db::db::connection::DbConnection;
use cantoria_db::db::enums::{LiturgicalSection, SuggestionStatus};
use cantoria_db::db::query::{
    assignment as assignment_query, availability as block_query, mass as mass_query,
    musician as musician_query, song as song_query, suggestion as suggestion_query,
};
use cantoria_db::model::assignment::MassAssignment;
use cantoria_db::model::availability::AvailabilityBlock;
use cantoria_db::model::mass::Mass;
use cantoria_db::model::musician::Musician;
use cantoria_db::model::song::MassSong;
use cantoria_db::model::suggestion::MusicianSuggestion;

use crate::error::ServiceResult;
use crate::program::percentage;

/// Length of the ranking series.
pub const RANKING_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    #[serde(rename = "missas")]
    pub masses: usize,
    #[serde(rename = "musicos")]
    pub musicians: usize,
    #[serde(rename = "musicos_disponiveis")]
    pub available_musicians: usize,
    #[serde(rename = "sugestoes_pendentes")]
    pub pending_suggestions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// `YYYY-MM`
    #[serde(rename = "mes")]
    pub month: String,
    #[serde(rename = "quantidade")]
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MusicianRanking {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "participacoes")]
    pub appearances: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongRanking {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "usos")]
    pub uses: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: SuggestionStatus,
    #[serde(rename = "rotulo")]
    pub label: &'static str,
    #[serde(rename = "quantidade")]
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionShare {
    #[serde(rename = "secao")]
    pub section: LiturgicalSection,
    #[serde(rename = "rotulo")]
    pub label: &'static str,
    /// Percentage of masses with at least one song in the section.
    #[serde(rename = "preenchimento")]
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    #[serde(rename = "totais")]
    pub totals: Totals,
    #[serde(rename = "missas_por_mes")]
    pub masses_per_month: Vec<MonthCount>,
    #[serde(rename = "musicos_mais_atuantes")]
    pub top_musicians: Vec<MusicianRanking>,
    #[serde(rename = "musicas_mais_usadas")]
    pub top_songs: Vec<SongRanking>,
    #[serde(rename = "sugestoes_por_status")]
    pub suggestions_by_status: Vec<StatusCount>,
    #[serde(rename = "preenchimento_secoes")]
    pub section_fill: Vec<SectionShare>,
}

/// Provider of the dashboard series.
pub trait AnalyticsSource {
    fn totals(&self, today: chrono::NaiveDate) -> Totals;
    fn masses_per_month(&self) -> Vec<MonthCount>;
    fn top_musicians(&self, limit: usize) -> Vec<MusicianRanking>;
    fn top_songs(&self, limit: usize) -> Vec<SongRanking>;
    fn suggestions_by_status(&self) -> Vec<StatusCount>;
    fn section_fill(&self) -> Vec<SectionShare>;

    #[must_use]
    fn dashboard(&self, today: chrono::NaiveDate) -> Dashboard {
        Dashboard {
            totals: self.totals(today),
            masses_per_month: self.masses_per_month(),
            top_musicians: self.top_musicians(RANKING_LIMIT),
            top_songs: self.top_songs(RANKING_LIMIT),
            suggestions_by_status: self.suggestions_by_status(),
            section_fill: self.section_fill(),
        }
    }
}

/// Point-in-time copy of the rows the dashboard needs.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub masses: Vec<Mass>,
    pub musicians: Vec<Musician>,
    pub assignments: Vec<MassAssignment>,
    pub songs: Vec<MassSong>,
    pub suggestions: Vec<MusicianSuggestion>,
    pub blocks: Vec<AvailabilityBlock>,
}

impl StoreSnapshot {
    /// ## Summary
    /// Reads every table the dashboard aggregates. Only blocks covering
    /// `today` are loaded.
    ///
    /// ## Errors
    /// Returns a database error if any query fails.
    #[tracing::instrument(skip(conn))]
    pub async fn load(conn: &mut DbConnection<'_>, today: chrono::NaiveDate) -> ServiceResult<Self> {
        Ok(Self {
            masses: mass_query::list_masses(conn).await?,
            musicians: musician_query::list_musicians(conn).await?,
            assignments: assignment_query::list_assignments(conn).await?,
            songs: song_query::list_songs(conn).await?,
            suggestions: suggestion_query::list_suggestions(conn).await?,
            blocks: block_query::list_blocks_covering(conn, today).await?,
        })
    }
}

/// Sorts by count descending, then name ascending, and keeps `limit` entries.
fn rank(counts: impl IntoIterator<Item = (String, usize)>, limit: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(a_name, a_count), (b_name, b_count)| {
        b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
    });
    ranked.truncate(limit);
    ranked
}

impl AnalyticsSource for StoreSnapshot {
    fn totals(&self, today: chrono::NaiveDate) -> Totals {
        let blocked: HashSet<uuid::Uuid> = self
            .blocks
            .iter()
            .filter(|block| block.covers(today))
            .map(|block| block.musician_id)
            .collect();

        Totals {
            masses: self.masses.len(),
            musicians: self.musicians.len(),
            available_musicians: self
                .musicians
                .iter()
                .filter(|m| m.available && !blocked.contains(&m.id))
                .count(),
            pending_suggestions: self
                .suggestions
                .iter()
                .filter(|s| s.status == SuggestionStatus::Pendente)
                .count(),
        }
    }

    fn masses_per_month(&self) -> Vec<MonthCount> {
        let mut months: BTreeMap<String, usize> = BTreeMap::new();
        for mass in &self.masses {
            *months
                .entry(mass.scheduled_date.format("%Y-%m").to_string())
                .or_default() += 1;
        }
        months
            .into_iter()
            .map(|(month, count)| MonthCount { month, count })
            .collect()
    }

    fn top_musicians(&self, limit: usize) -> Vec<MusicianRanking> {
        let names: HashMap<uuid::Uuid, &str> = self
            .musicians
            .iter()
            .map(|m| (m.id, m.name.as_str()))
            .collect();

        let mut counts: HashMap<uuid::Uuid, usize> = HashMap::new();
        for assignment in &self.assignments {
            if names.contains_key(&assignment.musician_id) {
                *counts.entry(assignment.musician_id).or_default() += 1;
            }
        }

        let named = counts.into_iter().filter_map(|(id, appearances)| {
            names
                .get(&id)
                .map(|name| ((*name).to_string(), appearances))
        });

        rank(named, limit)
            .into_iter()
            .map(|(name, appearances)| MusicianRanking { name, appearances })
            .collect()
    }

    fn top_songs(&self, limit: usize) -> Vec<SongRanking> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for song in &self.songs {
            *counts.entry(song.name.clone()).or_default() += 1;
        }

        rank(counts, limit)
            .into_iter()
            .map(|(name, uses)| SongRanking { name, uses })
            .collect()
    }

    fn suggestions_by_status(&self) -> Vec<StatusCount> {
        SuggestionStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                label: status.label(),
                count: self.suggestions.iter().filter(|s| s.status == status).count(),
            })
            .collect()
    }

    fn section_fill(&self) -> Vec<SectionShare> {
        let filled: HashSet<(uuid::Uuid, LiturgicalSection)> = self
            .songs
            .iter()
            .map(|song| (song.mass_id, song.section))
            .collect();

        LiturgicalSection::ALL
            .into_iter()
            .map(|section| {
                let masses_with_section = self
                    .masses
                    .iter()
                    .filter(|mass| filled.contains(&(mass.id, section)))
                    .count();
                SectionShare {
                    section,
                    label: section.label(),
                    percent: percentage(masses_with_section, self.masses.len()),
                }
            })
            .collect()
    }
}

/// ## Summary
/// Builds the dashboard from the live store.
///
/// ## Errors
/// Returns a database error if loading the snapshot fails.
#[tracing::instrument(skip(conn))]
pub async fn dashboard(
    conn: &mut DbConnection<'_>,
    today: chrono::NaiveDate,
) -> ServiceResult<Dashboard> {
    let snapshot = StoreSnapshot::load(conn, today).await?;
    Ok(snapshot.dashboard(today))
}

#[cfg(test)]
mod tests;
