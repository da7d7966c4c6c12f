use serde::{Deserialize, Serialize};

use crate::domain::{Player, Tournament, TournamentId};

use super::dto::{TournamentCardDto, TournamentDetailDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Список турниров (сводки), ближайшие по дате сверху.
    ListTournaments,

    /// Страница турнира.
    GetTournament { tournament_id: TournamentId },

    /// Весь справочник игроков.
    ListPlayers,

    /// Игроки, которых ещё можно зарегистрировать в турнир.
    AvailablePlayers { tournament_id: TournamentId },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    Tournaments(Vec<TournamentCardDto>),
    Tournament(TournamentDetailDto),
    Players(Vec<Player>),
}

/// Игроки справочника, которых нет ни в основном списке, ни в листе ожидания.
pub fn available_players(tournament: &Tournament, players: Vec<Player>) -> Vec<Player> {
    players
        .into_iter()
        .filter(|p| !tournament.is_entered(&p.id))
        .collect()
}
