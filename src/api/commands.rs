use serde::{Deserialize, Serialize};

use crate::domain::{
    NewPlayer, PairId, PairSlot, PlayerId, TournamentConfig, TournamentId, TournamentPatch,
};

/// Команда верхнего уровня – всё, что меняет состояние.
///
/// Одна кнопка UI = одна команда.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Турнирные команды (создание, правка, удаление).
    Tournament(TournamentCommand),

    /// Регистрация и снятие игроков/пар в конкретном турнире.
    Registration(RegistrationCommand),

    /// Глобальный справочник игроков.
    Player(PlayerCommand),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TournamentCommand {
    /// Создать турнир из формы. Новый турнир – `draft`, состав открыт.
    CreateTournament(CreateTournamentCommand),

    /// Поменять название/описание/дату/место/настройки.
    UpdateTournament(UpdateTournamentCommand),

    /// Удалить полную запись и сводку.
    DeleteTournament(DeleteTournamentCommand),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateTournamentCommand {
    pub config: TournamentConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateTournamentCommand {
    pub tournament_id: TournamentId,
    pub patch: TournamentPatch,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteTournamentCommand {
    pub tournament_id: TournamentId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum RegistrationCommand {
    /// Одиночка: в основной список, если есть место, иначе в лист ожидания.
    RegisterSingle {
        tournament_id: TournamentId,
        player_id: PlayerId,
    },

    /// Пара: оба в основной список + пара, либо оба в лист ожидания.
    RegisterDoubles {
        tournament_id: TournamentId,
        player1_id: PlayerId,
        player2_id: PlayerId,
    },

    RemoveRegisteredPlayer {
        tournament_id: TournamentId,
        player_id: PlayerId,
    },

    RemoveWaitingPlayer {
        tournament_id: TournamentId,
        player_id: PlayerId,
    },

    /// Убрать одного участника пары; пара распускается.
    RemovePlayerFromPair {
        tournament_id: TournamentId,
        pair_id: PairId,
        slot: PairSlot,
    },

    /// Удалить пару вместе с обоими игроками.
    RemovePair {
        tournament_id: TournamentId,
        pair_id: PairId,
    },
}

impl RegistrationCommand {
    pub fn tournament_id(&self) -> &TournamentId {
        match self {
            RegistrationCommand::RegisterSingle { tournament_id, .. }
            | RegistrationCommand::RegisterDoubles { tournament_id, .. }
            | RegistrationCommand::RemoveRegisteredPlayer { tournament_id, .. }
            | RegistrationCommand::RemoveWaitingPlayer { tournament_id, .. }
            | RegistrationCommand::RemovePlayerFromPair { tournament_id, .. }
            | RegistrationCommand::RemovePair { tournament_id, .. } => tournament_id,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Создать игрока из анкеты.
    CreatePlayer(NewPlayer),

    RenamePlayer { player_id: PlayerId, name: String },

    /// Удалить игрока из справочника. Регистрации в турнирах не трогаются.
    DeletePlayer { player_id: PlayerId },
}
