// src/state.rs
//! Состояние приложения: репозиторий + часы + генератор id.
//!
//! Сюда приходят команды и запросы API; всё, что меняет турнир,
//! идёт через `TournamentSession`, так что запись в хранилище
//! всегда делается одной и той же дорогой.

use tracing::info;

use crate::api::{
    available_players, Command, CommandResponse, CreateTournamentCommand,
    DeleteTournamentCommand, PlayerCommand, Query, QueryResponse, RegistrationCommand,
    RegistrationResultDto, TournamentCommand, TournamentDetailDto, UpdateTournamentCommand,
};
use crate::api::errors::ApiError;
use crate::domain::{sort_by_date, NewPlayer, Player, Tournament};
use crate::infra::clock::{Clock, SystemClock};
use crate::infra::ids::IdGenerator;
use crate::infra::mapping::{map_tournament_to_detail, DirectoryNameResolver};
use crate::infra::persistence::KeyValueStore;
use crate::infra::repository::TournamentRepository;
use crate::infra::rng::{RandomSource, SystemRng};
use crate::tournament::{RegistrationError, TournamentSession};

pub struct AppState<S: KeyValueStore, C: Clock = SystemClock, R: RandomSource = SystemRng> {
    repo: TournamentRepository<S>,
    clock: C,
    ids: IdGenerator<R>,
}

impl<S: KeyValueStore> AppState<S> {
    /// Боевой вариант: системные часы и системный RNG.
    pub fn new(store: S) -> Self {
        Self::with_parts(store, SystemClock, IdGenerator::new())
    }
}

impl<S: KeyValueStore, C: Clock, R: RandomSource> AppState<S, C, R> {
    pub fn with_parts(store: S, clock: C, ids: IdGenerator<R>) -> Self {
        let mut repo = TournamentRepository::new(store);
        repo.initialize();
        Self { repo, clock, ids }
    }

    pub fn repository(&self) -> &TournamentRepository<S> {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut TournamentRepository<S> {
        &mut self.repo
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn detail(&self, tournament: &Tournament) -> TournamentDetailDto {
        let resolver = DirectoryNameResolver::new(&self.repo.load_players());
        map_tournament_to_detail(tournament, &resolver)
    }

    // ------------------------------------------------------------------
    // команды
    // ------------------------------------------------------------------

    pub fn execute(&mut self, command: Command) -> Result<CommandResponse, ApiError> {
        match command {
            Command::Tournament(cmd) => self.execute_tournament(cmd),
            Command::Registration(cmd) => self.execute_registration(cmd),
            Command::Player(cmd) => self.execute_player(cmd),
        }
    }

    fn execute_tournament(&mut self, cmd: TournamentCommand) -> Result<CommandResponse, ApiError> {
        match cmd {
            TournamentCommand::CreateTournament(CreateTournamentCommand { config }) => {
                let now = self.clock.now();
                let id = self.ids.next_id(now);
                let tournament = Tournament::new(id, config, now)?;

                self.repo.save_tournament(&tournament)?;
                info!(
                    tournament_id = %tournament.id,
                    name = %tournament.name,
                    "tournament created"
                );

                Ok(CommandResponse::TournamentCreated(self.detail(&tournament)))
            }

            TournamentCommand::UpdateTournament(UpdateTournamentCommand {
                tournament_id,
                patch,
            }) => {
                let now = self.clock.now();
                let mut session = TournamentSession::open(&mut self.repo, Some(&tournament_id));

                if !session.update(patch, now)? {
                    return Err(ApiError::TournamentNotFound(tournament_id));
                }
                if let Some(err) = session.take_sync_error() {
                    return Err(ApiError::Storage(err));
                }

                let tournament = session.into_tournament();
                match tournament {
                    Some(t) => Ok(CommandResponse::TournamentState(self.detail(&t))),
                    None => Err(ApiError::TournamentNotFound(tournament_id)),
                }
            }

            TournamentCommand::DeleteTournament(DeleteTournamentCommand { tournament_id }) => {
                self.repo.delete_tournament(&tournament_id);
                info!(tournament_id = %tournament_id, "tournament deleted");
                Ok(CommandResponse::Ok)
            }
        }
    }

    fn execute_registration(
        &mut self,
        cmd: RegistrationCommand,
    ) -> Result<CommandResponse, ApiError> {
        let now = self.clock.now();
        let tournament_id = cmd.tournament_id().clone();
        // id пары генерим заранее: при отказе он просто не используется.
        let pair_id = self.ids.next_id(now);

        let mut session = TournamentSession::open(&mut self.repo, Some(&tournament_id));

        let mut changed = false;
        let registration: Option<Result<_, RegistrationError>> = match cmd {
            RegistrationCommand::RegisterSingle { player_id, .. } => {
                Some(session.register_single(&player_id, now))
            }
            RegistrationCommand::RegisterDoubles {
                player1_id,
                player2_id,
                ..
            } => Some(session.register_doubles(&player1_id, &player2_id, pair_id, now)),
            RegistrationCommand::RemoveRegisteredPlayer { player_id, .. } => {
                changed = session.remove_registered_player(&player_id, now);
                None
            }
            RegistrationCommand::RemoveWaitingPlayer { player_id, .. } => {
                changed = session.remove_waiting_player(&player_id, now);
                None
            }
            RegistrationCommand::RemovePlayerFromPair { pair_id, slot, .. } => {
                changed = session.remove_player_from_pair(&pair_id, slot, now);
                None
            }
            RegistrationCommand::RemovePair { pair_id, .. } => {
                changed = session.remove_pair(&pair_id, now);
                None
            }
        };

        if let Some(err) = session.take_sync_error() {
            return Err(ApiError::Storage(err));
        }

        let detail = session.into_tournament().map(|t| self.detail(&t));

        match registration {
            Some(outcome) => {
                let result = match outcome {
                    Ok(placement) => RegistrationResultDto::accepted(placement),
                    Err(reason) => RegistrationResultDto::rejected(reason),
                };
                Ok(CommandResponse::Registration {
                    result,
                    tournament: detail,
                })
            }
            // Снятие: no-op – не ошибка, просто ничего не изменилось.
            None => Ok(match detail {
                Some(detail) if changed => CommandResponse::TournamentState(detail),
                _ => CommandResponse::Unchanged,
            }),
        }
    }

    fn execute_player(&mut self, cmd: PlayerCommand) -> Result<CommandResponse, ApiError> {
        match cmd {
            PlayerCommand::CreatePlayer(form) => {
                let player = self.create_player(form)?;
                Ok(CommandResponse::PlayerCreated(player))
            }

            PlayerCommand::RenamePlayer { player_id, name } => {
                let player = self
                    .repo
                    .find_player(&player_id)
                    .ok_or_else(|| ApiError::PlayerNotFound(player_id.clone()))?;
                if name.trim().is_empty() {
                    return Err(ApiError::BadRequest("Name is required.".to_string()));
                }

                self.repo.update_player(player.renamed(&name, self.clock.now()))?;
                Ok(CommandResponse::Ok)
            }

            PlayerCommand::DeletePlayer { player_id } => {
                if self.repo.find_player(&player_id).is_none() {
                    return Err(ApiError::PlayerNotFound(player_id));
                }
                self.repo.delete_player(&player_id)?;
                Ok(CommandResponse::Ok)
            }
        }
    }

    fn create_player(&mut self, form: NewPlayer) -> Result<Player, ApiError> {
        let now = self.clock.now();
        let player = form.into_player(self.ids.next_id(now), now)?;
        self.repo.add_player(player.clone())?;
        info!(player_id = %player.id, "player created");
        Ok(player)
    }

    // ------------------------------------------------------------------
    // запросы
    // ------------------------------------------------------------------

    pub fn query(&self, query: Query) -> Result<QueryResponse, ApiError> {
        match query {
            Query::ListTournaments => {
                let mut summaries = self.repo.load_summaries();
                sort_by_date(&mut summaries);
                Ok(QueryResponse::Tournaments(summaries))
            }

            Query::GetTournament { tournament_id } => {
                let tournament = self
                    .repo
                    .load_tournament(&tournament_id)
                    .ok_or(ApiError::TournamentNotFound(tournament_id))?;
                Ok(QueryResponse::Tournament(self.detail(&tournament)))
            }

            Query::ListPlayers => Ok(QueryResponse::Players(self.repo.load_players())),

            Query::AvailablePlayers { tournament_id } => {
                let tournament = self
                    .repo
                    .load_tournament(&tournament_id)
                    .ok_or(ApiError::TournamentNotFound(tournament_id))?;
                Ok(QueryResponse::Players(available_players(
                    &tournament,
                    self.repo.load_players(),
                )))
            }
        }
    }
}
