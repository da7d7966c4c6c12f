// src/bin/padelsync_cli.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use padelsync::api::{
    Command, CommandResponse, CreateTournamentCommand, DeleteTournamentCommand, PlayerCommand,
    Query, QueryResponse, RegistrationCommand, TournamentCommand, TournamentDetailDto,
};
use padelsync::config::AppConfig;
use padelsync::domain::{CourtPosition, Gender, NewPlayer, PairSlot, TournamentConfig};
use padelsync::infra::DirStore;
use padelsync::{logging, AppState};

#[derive(Parser, Debug)]
#[command(name = "padelsync", about = "Регистрация на падел-турниры")]
struct Cli {
    /// Каталог хранилища (иначе PADELSYNC_DATA_DIR или ./.padelsync).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Создать турнир.
    Create {
        #[arg(long)]
        name: String,
        /// Дата в формате YYYY-MM-DD.
        #[arg(long)]
        date: String,
        #[arg(long, default_value_t = 16)]
        max_players: u32,
        #[arg(long)]
        club: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        contact: Option<String>,
    },
    /// Список турниров.
    List,
    /// Страница турнира.
    Show { tournament_id: String },
    /// Удалить турнир.
    Delete { tournament_id: String },
    /// Добавить игрока в справочник.
    AddPlayer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, value_enum)]
        gender: Option<GenderArg>,
        #[arg(long, value_enum)]
        position: Option<PositionArg>,
    },
    /// Справочник игроков (или доступные для турнира).
    Players {
        #[arg(long)]
        available_for: Option<String>,
    },
    /// Зарегистрировать одиночку.
    Register { tournament_id: String, player_id: String },
    /// Зарегистрировать пару.
    RegisterPair {
        tournament_id: String,
        player1_id: String,
        player2_id: String,
    },
    /// Снять игрока из основного списка.
    Remove { tournament_id: String, player_id: String },
    /// Снять игрока из листа ожидания.
    RemoveWaiting { tournament_id: String, player_id: String },
    /// Убрать одного участника пары.
    RemoveFromPair {
        tournament_id: String,
        pair_id: String,
        #[arg(value_enum)]
        slot: SlotArg,
    },
    /// Удалить пару.
    RemovePair { tournament_id: String, pair_id: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GenderArg {
    Female,
    Male,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PositionArg {
    Drive,
    Backhand,
    Indifferent,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SlotArg {
    Player1,
    Player2,
}

impl From<GenderArg> for Gender {
    fn from(g: GenderArg) -> Self {
        match g {
            GenderArg::Female => Gender::Female,
            GenderArg::Male => Gender::Male,
        }
    }
}

impl From<PositionArg> for CourtPosition {
    fn from(p: PositionArg) -> Self {
        match p {
            PositionArg::Drive => CourtPosition::Drive,
            PositionArg::Backhand => CourtPosition::Backhand,
            PositionArg::Indifferent => CourtPosition::Indifferent,
        }
    }
}

impl From<SlotArg> for PairSlot {
    fn from(s: SlotArg) -> Self {
        match s {
            SlotArg::Player1 => PairSlot::Player1,
            SlotArg::Player2 => PairSlot::Player2,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::from_env(cli.data_dir).context("invalid configuration")?;
    logging::init(&config.log_filter);

    let store = DirStore::open(&config.data_dir)
        .with_context(|| format!("cannot open storage at {}", config.data_dir.display()))?;
    info!(data_dir = %store.root().display(), "storage opened");
    let mut app = AppState::new(store);

    match cli.command {
        Cmd::List => {
            if let QueryResponse::Tournaments(list) = app.query(Query::ListTournaments)? {
                if list.is_empty() {
                    println!("No tournaments yet.");
                }
                for t in list {
                    let date = if t.tournament_date.is_empty() {
                        "Date not set"
                    } else {
                        t.tournament_date.as_str()
                    };
                    println!(
                        "- id={} | \"{}\" | {} | club={} | status={} | players={} | matches={}",
                        t.id,
                        t.name,
                        date,
                        t.club_name,
                        t.status.as_str(),
                        t.player_count,
                        t.match_count
                    );
                }
            }
        }

        Cmd::Show { tournament_id } => {
            if let QueryResponse::Tournament(detail) =
                app.query(Query::GetTournament { tournament_id })?
            {
                print_detail(&detail);
            }
        }

        Cmd::Players { available_for } => {
            let query = match available_for {
                Some(tournament_id) => Query::AvailablePlayers { tournament_id },
                None => Query::ListPlayers,
            };
            if let QueryResponse::Players(players) = app.query(query)? {
                for p in players {
                    println!("- id={} | {} | {}", p.id, p.name, p.phone);
                }
            }
        }

        other => {
            if let Some(command) = into_command(other) {
                let response = app.execute(command)?;
                print_response(&response);
            }
        }
    }

    Ok(())
}

/// CLI-команда → команда API. Для запросов – `None`.
fn into_command(cmd: Cmd) -> Option<Command> {
    let command = match cmd {
        Cmd::Create {
            name,
            date,
            max_players,
            club,
            address,
            description,
            phone,
            contact,
        } => Command::Tournament(TournamentCommand::CreateTournament(CreateTournamentCommand {
            config: TournamentConfig {
                name,
                description,
                tournament_date: date,
                max_players,
                club_name: club,
                address,
                phone,
                contact_person: contact,
            },
        })),
        Cmd::Delete { tournament_id } => Command::Tournament(TournamentCommand::DeleteTournament(
            DeleteTournamentCommand { tournament_id },
        )),
        Cmd::AddPlayer {
            name,
            phone,
            email,
            gender,
            position,
        } => Command::Player(PlayerCommand::CreatePlayer(NewPlayer {
            name,
            phone,
            email,
            gender: gender.map(Into::into),
            court_position: position.map(Into::into),
        })),
        Cmd::Register {
            tournament_id,
            player_id,
        } => Command::Registration(RegistrationCommand::RegisterSingle {
            tournament_id,
            player_id,
        }),
        Cmd::RegisterPair {
            tournament_id,
            player1_id,
            player2_id,
        } => Command::Registration(RegistrationCommand::RegisterDoubles {
            tournament_id,
            player1_id,
            player2_id,
        }),
        Cmd::Remove {
            tournament_id,
            player_id,
        } => Command::Registration(RegistrationCommand::RemoveRegisteredPlayer {
            tournament_id,
            player_id,
        }),
        Cmd::RemoveWaiting {
            tournament_id,
            player_id,
        } => Command::Registration(RegistrationCommand::RemoveWaitingPlayer {
            tournament_id,
            player_id,
        }),
        Cmd::RemoveFromPair {
            tournament_id,
            pair_id,
            slot,
        } => Command::Registration(RegistrationCommand::RemovePlayerFromPair {
            tournament_id,
            pair_id,
            slot: slot.into(),
        }),
        Cmd::RemovePair {
            tournament_id,
            pair_id,
        } => Command::Registration(RegistrationCommand::RemovePair {
            tournament_id,
            pair_id,
        }),
        Cmd::List | Cmd::Show { .. } | Cmd::Players { .. } => return None,
    };
    Some(command)
}

fn print_response(response: &CommandResponse) {
    match response {
        CommandResponse::Ok => println!("OK"),
        CommandResponse::Unchanged => println!("Nothing changed."),
        CommandResponse::TournamentCreated(detail) => {
            println!("Created tournament {}", detail.tournament_id);
            print_detail(detail);
        }
        CommandResponse::TournamentState(detail) => print_detail(detail),
        CommandResponse::Registration { result, tournament } => {
            match (&result.error, result.placement) {
                (Some(err), _) => println!("Rejected: {err}"),
                (None, Some(placement)) => println!("Accepted: {placement:?}"),
                (None, None) => println!("Accepted"),
            }
            if let Some(detail) = tournament {
                print_detail(detail);
            }
        }
        CommandResponse::PlayerCreated(player) => {
            println!("Created player {} ({})", player.id, player.name);
        }
    }
}

fn print_detail(d: &TournamentDetailDto) {
    println!("=== {} ===", d.name);
    let date = if d.tournament_date.is_empty() {
        "Date not set"
    } else {
        d.tournament_date.as_str()
    };
    println!("  Date: {date}");
    println!("  Location: {}", d.location_summary);
    println!("  Status: {}", d.status.as_str());
    if d.players_locked {
        println!("  Players are locked.");
    }
    match d.max_players {
        0 => println!("  Registered: {}", d.registered_count),
        max => println!("  Registered: {} / {}", d.registered_count, max),
    }

    if d.pairs.is_empty() && d.singles.is_empty() {
        println!("  No registered players yet.");
    }
    for pair in &d.pairs {
        println!(
            "    pair={} | {} ({}) + {} ({})",
            pair.pair_id,
            pair.player1.name,
            pair.player1.player_id,
            pair.player2.name,
            pair.player2.player_id
        );
    }
    for single in &d.singles {
        println!("    single | {} ({})", single.name, single.player_id);
    }

    if !d.waiting_list.is_empty() {
        println!("  Waiting list:");
        for (pos, w) in d.waiting_list.iter().enumerate() {
            println!("    {}. {} ({})", pos + 1, w.name, w.player_id);
        }
    }
}
