use std::collections::HashMap;

use crate::api::dto::{PairViewDto, PlayerRefDto, TournamentDetailDto};
use crate::domain::{Location, Player, PlayerId, Tournament};

/// Утилита: получить отображаемое имя игрока.
pub trait PlayerNameResolver {
    fn resolve_name(&self, player_id: &str) -> String;
}

/// Имя для id, которого нет в справочнике.
pub fn unknown_player_name(player_id: &str) -> String {
    format!("Unknown player ({})", player_id)
}

/// Резолвер по глобальному справочнику игроков.
pub struct DirectoryNameResolver {
    names: HashMap<PlayerId, String>,
}

impl DirectoryNameResolver {
    pub fn new(players: &[Player]) -> Self {
        Self {
            names: players
                .iter()
                .map(|p| (p.id.clone(), p.name.clone()))
                .collect(),
        }
    }
}

impl PlayerNameResolver for DirectoryNameResolver {
    fn resolve_name(&self, player_id: &str) -> String {
        self.names
            .get(player_id)
            .cloned()
            .unwrap_or_else(|| unknown_player_name(player_id))
    }
}

/// "Клуб • адрес" для шапки турнира.
pub fn location_summary(location: &Location) -> String {
    format!("{} • {}", location.club_name, location.address)
}

fn player_ref(player_id: &str, resolver: &impl PlayerNameResolver) -> PlayerRefDto {
    PlayerRefDto {
        player_id: player_id.to_string(),
        name: resolver.resolve_name(player_id),
    }
}

/// Утилита: маппинг Tournament -> TournamentDetailDto.
///
/// Одиночки – зарегистрированные id, не входящие ни в одну пару;
/// пары и лист ожидания – с именами из справочника.
pub fn map_tournament_to_detail(
    tournament: &Tournament,
    resolver: &impl PlayerNameResolver,
) -> TournamentDetailDto {
    let singles = tournament
        .registered_singles()
        .map(|id| player_ref(id, resolver))
        .collect();

    let pairs = tournament
        .pairs
        .iter()
        .map(|pair| PairViewDto {
            pair_id: pair.id.clone(),
            player1: player_ref(&pair.player1_id, resolver),
            player2: player_ref(&pair.player2_id, resolver),
        })
        .collect();

    let waiting_list = tournament
        .waiting_list_ids
        .iter()
        .map(|id| player_ref(id, resolver))
        .collect();

    TournamentDetailDto {
        tournament_id: tournament.id.clone(),
        name: tournament.name.clone(),
        description: tournament.description.clone(),
        status: tournament.status,
        tournament_date: tournament.tournament_date.clone(),
        location_summary: location_summary(&tournament.location),
        players_locked: tournament.players_locked,
        max_players: tournament.max_players(),
        registered_count: tournament.player_ids.len(),
        singles,
        pairs,
        waiting_list,
        match_count: tournament.matches.len(),
    }
}
