use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::tournament::{Tournament, TournamentStatus};
use crate::domain::{Timestamp, TournamentId};

/// Облегчённая сводка турнира для списка.
///
/// Хранится отдельной коллекцией и должна совпадать с полной записью.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub status: TournamentStatus,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub tournament_date: String,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub club_name: String,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub player_count: usize,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub match_count: usize,
    #[serde(default)]
    pub created_at: Timestamp,
}

impl From<&Tournament> for TournamentSummary {
    fn from(t: &Tournament) -> Self {
        Self {
            id: t.id.clone(),
            name: t.name.clone(),
            status: t.status,
            tournament_date: t.tournament_date.clone(),
            club_name: t.location.club_name.clone(),
            player_count: t.player_ids.len(),
            match_count: t.matches.len(),
            created_at: t.created_at,
        }
    }
}

impl TournamentSummary {
    /// Дата турнира, если её удаётся разобрать.
    ///
    /// Понимаем и чистую дату, и полный RFC 3339 timestamp.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.tournament_date.trim();
        if raw.is_empty() {
            return None;
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
    }
}

/// Сортировка для списка: ближайшие сверху, без даты – в конце.
pub fn sort_by_date(summaries: &mut [TournamentSummary]) {
    summaries.sort_by(|a, b| match (a.parsed_date(), b.parsed_date()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
