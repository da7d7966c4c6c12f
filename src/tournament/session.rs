// src/tournament/session.rs

use tracing::{debug, error};

use crate::domain::{PairId, PairSlot, Timestamp, Tournament, TournamentError, TournamentPatch};
use crate::infra::persistence::KeyValueStore;
use crate::infra::repository::TournamentRepository;
use crate::tournament::registration::{self, Capability, Placement, RegistrationError};

/// Сессия работы с одним турниром:
/// - при открытии инициализирует хранилище и загружает турнир;
/// - каждую принятую операцию сразу сохраняет (полная запись + сводка);
/// - отклонённые операции и no-op ничего не пишут.
///
/// Ошибка сохранения не откатывает снэпшот в памяти – она логируется
/// и доступна через `take_sync_error`.
pub struct TournamentSession<'a, S: KeyValueStore> {
    repo: &'a mut TournamentRepository<S>,
    tournament: Option<Tournament>,
    sync_error: Option<String>,
}

impl<'a, S: KeyValueStore> TournamentSession<'a, S> {
    /// Открыть сессию. `None` в качестве id – "пустая" сессия без турнира.
    pub fn open(repo: &'a mut TournamentRepository<S>, tournament_id: Option<&str>) -> Self {
        repo.initialize();
        let tournament = tournament_id.and_then(|id| repo.load_tournament(id));

        Self {
            repo,
            tournament,
            sync_error: None,
        }
    }

    pub fn tournament(&self) -> Option<&Tournament> {
        self.tournament.as_ref()
    }

    pub fn into_tournament(self) -> Option<Tournament> {
        self.tournament
    }

    /// Забрать ошибку последнего сохранения (если была).
    pub fn take_sync_error(&mut self) -> Option<String> {
        self.sync_error.take()
    }

    fn commit(&mut self, next: Tournament) {
        match self.repo.save_tournament(&next) {
            Ok(()) => self.sync_error = None,
            Err(err) => {
                error!(tournament_id = %next.id, %err, "failed to sync tournament to storage");
                self.sync_error = Some(err.to_string());
            }
        }
        self.tournament = Some(next);
    }

    fn commit_if_changed(&mut self, next: Option<Tournament>) -> bool {
        match next {
            Some(next) => {
                self.commit(next);
                true
            }
            None => false,
        }
    }

    /// Полная замена снэпшота (и сохранение, если он есть).
    pub fn replace(&mut self, tournament: Option<Tournament>) {
        match tournament {
            Some(t) => self.commit(t),
            None => self.tournament = None,
        }
    }

    /// Частичное обновление несущественных полей.
    ///
    /// `Ok(false)` – турнир не загружен. Невалидный результат не сохраняется.
    pub fn update(
        &mut self,
        patch: TournamentPatch,
        now: Timestamp,
    ) -> Result<bool, TournamentError> {
        let next = match self.tournament.as_ref() {
            Some(t) => Some(t.patched(patch, now)?),
            None => None,
        };
        Ok(self.commit_if_changed(next))
    }

    // ------------------------------------------------------------------
    // регистрация
    // ------------------------------------------------------------------

    pub fn register_single(
        &mut self,
        player_id: &str,
        now: Timestamp,
    ) -> Result<Placement, RegistrationError> {
        let admission = registration::register_single(self.tournament.as_ref(), player_id, now)?;
        debug!(player_id, placement = ?admission.placement, "single registered");

        self.commit(admission.tournament);
        Ok(admission.placement)
    }

    pub fn register_doubles(
        &mut self,
        player1_id: &str,
        player2_id: &str,
        pair_id: PairId,
        now: Timestamp,
    ) -> Result<Placement, RegistrationError> {
        let admission = registration::register_doubles(
            self.tournament.as_ref(),
            player1_id,
            player2_id,
            pair_id,
            now,
        )?;
        debug!(player1_id, player2_id, placement = ?admission.placement, "pair registered");

        self.commit(admission.tournament);
        Ok(admission.placement)
    }

    /// Возвращает `true`, если снэпшот изменился.
    pub fn remove_registered_player(&mut self, player_id: &str, now: Timestamp) -> bool {
        let next = registration::remove_registered_player(self.tournament.as_ref(), player_id, now);
        self.commit_if_changed(next)
    }

    pub fn remove_waiting_player(&mut self, player_id: &str, now: Timestamp) -> bool {
        let next = registration::remove_waiting_player(self.tournament.as_ref(), player_id, now);
        self.commit_if_changed(next)
    }

    pub fn remove_player_from_pair(
        &mut self,
        pair_id: &str,
        slot: PairSlot,
        now: Timestamp,
    ) -> bool {
        let next =
            registration::remove_player_from_pair(self.tournament.as_ref(), pair_id, slot, now);
        self.commit_if_changed(next)
    }

    pub fn remove_pair(&mut self, pair_id: &str, now: Timestamp) -> bool {
        let next = registration::remove_pair(self.tournament.as_ref(), pair_id, now);
        self.commit_if_changed(next)
    }

    // ------------------------------------------------------------------
    // ещё не реализовано: состояние не меняется
    // ------------------------------------------------------------------

    pub fn generate_matches(&mut self) -> Result<(), RegistrationError> {
        Err(RegistrationError::Unsupported(Capability::GenerateMatches))
    }

    pub fn update_match_result(&mut self) -> Result<(), RegistrationError> {
        Err(RegistrationError::Unsupported(Capability::UpdateMatchResult))
    }

    pub fn start_tournament(&mut self) -> Result<(), RegistrationError> {
        Err(RegistrationError::Unsupported(Capability::StartTournament))
    }

    pub fn update_status(&mut self) -> Result<(), RegistrationError> {
        Err(RegistrationError::Unsupported(Capability::UpdateStatus))
    }

    pub fn replace_player(&mut self) -> Result<(), RegistrationError> {
        Err(RegistrationError::Unsupported(Capability::ReplacePlayer))
    }

    pub fn update_pair(&mut self) -> Result<(), RegistrationError> {
        Err(RegistrationError::Unsupported(Capability::UpdatePair))
    }
}
