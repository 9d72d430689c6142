//! Example Arena - A minimal TUI game demonstrating combat_core
//!
//! This game shows:
//! - Building characters from TOML archetypes (combat_core::config)
//! - Charged and effect-carrying projectiles resolving through the pipeline
//! - Blindness/corrosion/immunity advancing on a fixed simulation tick
//! - Potions raising typed item errors the UI reports to the player

use combat_core::config::{parse_character_configs, parse_projectile_configs, CharacterConfig};
use combat_core::entity::Character;
use combat_core::item::{Consumable, ConsumableKind, Container};
use combat_core::projectile::{Projectile, ProjectileRegistry, ProjectileSpec};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame, Terminal,
};
use std::collections::HashMap;
use std::io;

const CHARACTERS_TOML: &str = include_str!("../config/characters.toml");
const PROJECTILES_TOML: &str = include_str!("../config/projectiles.toml");

/// Fixed simulation step in seconds
const TICK: f64 = 0.05;
/// Mob archetypes cycled through on respawn, with the projectile each throws
const MOB_ROSTER: [(&str, &str); 3] = [
    ("rust_beetle", "bolt"),
    ("acid_slug", "acid_glob"),
    ("gloom_moth", "flash_bomb"),
];

/// Main game state
struct GameState {
    player: Character,
    mob: Character,
    mob_projectile: String,
    mob_attack_in: f64,

    archetypes: HashMap<String, CharacterConfig>,
    registry: ProjectileRegistry,
    potions: Container<Consumable>,

    time: f64,
    kills: u32,
    charging: Option<f64>,
    game_over: bool,
    messages: Vec<String>,
    rng: ChaCha8Rng,
}

fn starting_potions() -> Vec<(Consumable, u32)> {
    vec![
        (
            Consumable {
                id: "health_potion".to_string(),
                name: "Health Potion".to_string(),
                max_holdable: 5,
                kind: ConsumableKind::Healing { amount: 35 },
            },
            3,
        ),
        (
            Consumable {
                id: "war_brew".to_string(),
                name: "War Brew".to_string(),
                max_holdable: 3,
                kind: ConsumableKind::StatBoost {
                    attack_mult: 2.0,
                    defence_mult: 1.5,
                    duration: 6.0,
                },
            },
            2,
        ),
        (
            Consumable {
                id: "immunity_tonic".to_string(),
                name: "Immunity Tonic".to_string(),
                max_holdable: 3,
                kind: ConsumableKind::Immunity { duration: 5.0 },
            },
            2,
        ),
        (
            Consumable {
                id: "longevity_draught".to_string(),
                name: "Longevity Draught".to_string(),
                max_holdable: 2,
                kind: ConsumableKind::Longevity { max_increase: 30 },
            },
            1,
        ),
    ]
}

impl GameState {
    fn new() -> Result<Self, String> {
        let archetypes = parse_character_configs(CHARACTERS_TOML)
            .map_err(|e| format!("characters.toml: {e}"))?;
        let registry = parse_projectile_configs(PROJECTILES_TOML)
            .map_err(|e| format!("projectiles.toml: {e}"))?;

        let player_config = archetypes
            .get("player")
            .ok_or("characters.toml: missing 'player' archetype")?;
        let player = Character::from_config(player_config);
        let placeholder_mob = Character::from_config(player_config);

        let mut potions = Container::new();
        for (potion, count) in starting_potions() {
            potions.add(potion, count);
        }

        let mut state = GameState {
            player,
            mob: placeholder_mob,
            mob_projectile: "bolt".to_string(),
            mob_attack_in: 2.0,
            archetypes,
            registry,
            potions,
            time: 0.0,
            kills: 0,
            charging: None,
            game_over: false,
            messages: vec!["An opponent approaches. Good luck!".to_string()],
            rng: ChaCha8Rng::seed_from_u64(42),
        };
        state.spawn_mob();
        Ok(state)
    }

    fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        while self.messages.len() > 8 {
            self.messages.remove(0);
        }
    }

    fn spawn_mob(&mut self) {
        let (archetype_id, projectile_id) = MOB_ROSTER[self.kills as usize % MOB_ROSTER.len()];
        let Some(config) = self.archetypes.get(archetype_id).cloned() else {
            return;
        };
        let mut mob = Character::from_config(&config);

        // Later waves hit harder
        let scale = 1.0 + self.kills as f64 * 0.15;
        mob.stat_block_mut().attack.scale_multiplier(scale);

        self.mob_projectile = projectile_id.to_string();
        self.mob_attack_in = 1.5 + self.rng.gen_range(0.0..1.0);
        self.push_message(format!("{} enters the arena!", mob.name));
        self.mob = mob;
    }

    /// Advance the simulation by one fixed step.
    fn advance(&mut self) {
        if self.game_over {
            return;
        }
        self.time += TICK;
        if let Some(elapsed) = &mut self.charging {
            *elapsed += TICK;
        }

        let player_tick = self.player.fixed_tick(TICK);
        if player_tick.status.corrosion_expired {
            self.push_message("The corrosion relents.");
        }
        if player_tick.status.blindness_recovered {
            self.push_message("Your vision clears.");
        }
        if player_tick.status.immunity_expired {
            self.push_message("Your immunity fades.");
        }
        if player_tick.stats_reverted {
            self.push_message("The war brew wears off.");
        }
        if player_tick.died {
            self.push_message("The corrosion finishes you off...");
            self.game_over = true;
            return;
        }

        let mob_tick = self.mob.fixed_tick(TICK);
        if mob_tick.died {
            let name = self.mob.name.clone();
            self.push_message(format!("{} dissolves!", name));
            self.on_mob_killed();
            return;
        }

        self.mob_attack_in -= TICK;
        if self.mob_attack_in <= 0.0 && self.mob.is_alive() {
            self.mob_attack();
        }
    }

    fn mob_attack(&mut self) {
        let spec: ProjectileSpec = self.registry.spec_or_default(&self.mob_projectile).clone();
        let mut projectile = Projectile::spawn(&spec);
        let attack = self.mob.stat_block().attack.current_value();
        let mob_name = self.mob.name.clone();

        if let Some(result) = projectile.impact(attack, &mut self.player) {
            self.push_message(format!("{}: {} -> you", mob_name, result.summary()));
            if result.target_killed {
                self.push_message("You fall. Press 'r' to try again.");
                self.game_over = true;
                return;
            }
        }
        self.mob_attack_in = 1.5 + self.rng.gen_range(0.0..1.5);
    }

    /// Fire a projectile at the mob. `charge_time` is how long the shot was
    /// held; uncharged specs ignore it.
    fn fire(&mut self, projectile_id: &str, charge_time: f64) {
        if !self.mob.is_alive() {
            return;
        }
        let spec: ProjectileSpec = self.registry.spec_or_default(projectile_id).clone();
        let mut projectile = Projectile::spawn_charged(&spec, charge_time);
        let attack = self.player.stat_block().attack.current_value();

        if let Some(result) = projectile.impact(attack, &mut self.mob) {
            self.push_message(format!("{}: {}", spec.name, result.summary()));
            if result.target_killed {
                self.on_mob_killed();
            }
        }
    }

    fn on_mob_killed(&mut self) {
        self.kills += 1;
        self.roll_drop();
        self.spawn_mob();
    }

    fn roll_drop(&mut self) {
        // 40% chance for a potion drop
        if !self.rng.gen_bool(0.4) {
            return;
        }
        let all = starting_potions();
        let Some((potion, _)) = all.choose(&mut self.rng) else {
            return;
        };
        let potion = potion.clone();
        let accepted = self.potions.add(potion.clone(), 1);
        if accepted > 0 {
            self.push_message(format!("Dropped: {}", potion.name));
        } else {
            self.push_message(format!("Dropped: {} (you can't carry more)", potion.name));
        }
    }

    fn drink(&mut self, potion_id: &str) {
        let Some(potion) = self.potions.get(potion_id).cloned() else {
            self.push_message("None left.");
            return;
        };
        match potion.use_on(&mut self.player) {
            Ok(_) => {
                self.potions.take(potion_id, 1);
                self.push_message(format!("You drink the {}.", potion.name));
            }
            // Expected, recoverable misuse: tell the player, keep the item
            Err(error) => {
                self.push_message(format!("{}: {}", potion.name, error));
            }
        }
    }

    fn toggle_charge(&mut self) {
        match self.charging.take() {
            None => {
                self.charging = Some(0.0);
                self.push_message("You draw and hold...");
            }
            Some(elapsed) => self.fire("charged_arrow", elapsed),
        }
    }

    fn restart(&mut self) {
        match GameState::new() {
            Ok(fresh) => *self = fresh,
            Err(error) => self.push_message(format!("Restart failed: {error}")),
        }
    }
}

fn health_gauge(character: &Character, color: Color) -> Gauge<'static> {
    let health = character.health_state();
    let ratio = if health.max() > 0 {
        health.current() as f64 / health.max() as f64
    } else {
        0.0
    };
    Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}/{}", health.current(), health.max()))
}

fn status_line(character: &Character) -> Line<'static> {
    let status = character.status_state();
    let mut spans = Vec::new();
    if status.is_blinded() {
        spans.push(Span::styled("BLINDED ", Style::default().fg(Color::Magenta)));
    }
    if status.is_corroded() {
        spans.push(Span::styled("CORRODED ", Style::default().fg(Color::Green)));
    }
    if status.is_immune() {
        spans.push(Span::styled("IMMUNE ", Style::default().fg(Color::Cyan)));
    }
    if character.stat_block().has_temporary_change() {
        spans.push(Span::styled("BOOSTED ", Style::default().fg(Color::Yellow)));
    }
    if spans.is_empty() {
        spans.push(Span::raw("-"));
    }
    Line::from(spans)
}

fn character_panel(character: &Character, state: &GameState, is_player: bool) -> Vec<Line<'static>> {
    let stats = character.stat_block();
    let blindness = character.status_state().blindness();

    let mut lines = vec![
        Line::from(vec![Span::styled(
            character.name.clone(),
            Style::default()
                .fg(if is_player { Color::Green } else { Color::Red })
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(format!(
            "ATK {}  DEF {}  SPD {}",
            stats.attack.current_value(),
            stats.defence.current_value(),
            stats.speed.current_value()
        )),
        Line::from(format!(
            "Blindness: {:.0}/{:.0}",
            blindness.level(),
            blindness.max_level()
        )),
        status_line(character),
    ];

    if is_player {
        if let Some(elapsed) = state.charging {
            let spec = state.registry.spec_or_default("charged_arrow");
            lines.push(Line::from(format!(
                "Charging... power {}",
                spec.power_at(elapsed)
            )));
        } else {
            lines.push(Line::from(""));
        }
    }
    lines
}

fn draw(f: &mut Frame, state: &GameState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(9), // Combatants
            Constraint::Length(3), // Potions
            Constraint::Min(6),    // Messages
            Constraint::Length(3), // Controls
        ])
        .split(f.area());

    let title = if state.game_over {
        format!("Example Arena - GAME OVER - {} kills", state.kills)
    } else {
        format!(
            "Example Arena - time {:.1}s - kills {}",
            state.time, state.kills
        )
    };
    f.render_widget(
        Paragraph::new(title)
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    let sides = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    for (area, character, is_player) in [
        (sides[0], &state.player, true),
        (sides[1], &state.mob, false),
    ] {
        let panel = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .margin(1)
            .split(area);
        f.render_widget(Block::default().borders(Borders::ALL), area);
        f.render_widget(
            health_gauge(
                character,
                if is_player { Color::Green } else { Color::Red },
            ),
            panel[0],
        );
        f.render_widget(
            Paragraph::new(character_panel(character, state, is_player)),
            panel[1],
        );
    }

    let potion_line = [
        "health_potion",
        "war_brew",
        "immunity_tonic",
        "longevity_draught",
    ]
    .iter()
    .enumerate()
    .map(|(i, id)| {
        format!(
            "[{}] {} x{}",
            i + 1,
            id.replace('_', " "),
            state.potions.count(id)
        )
    })
    .collect::<Vec<_>>()
    .join("   ");
    f.render_widget(
        Paragraph::new(potion_line).block(Block::default().borders(Borders::ALL).title("Potions")),
        chunks[2],
    );

    let messages: Vec<Line> = state
        .messages
        .iter()
        .map(|m| Line::from(m.as_str()))
        .collect();
    f.render_widget(
        Paragraph::new(messages).block(Block::default().borders(Borders::ALL).title("Log")),
        chunks[3],
    );

    let controls = if state.game_over {
        "r: restart | q: quit"
    } else {
        "f: bolt | space: hold/release charged arrow | a: acid glob | b: flash bomb | 1-4: potions | q: quit"
    };
    f.render_widget(
        Paragraph::new(controls)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL)),
        chunks[4],
    );
}

fn main() -> io::Result<()> {
    // Create game state before terminal setup so config errors are visible
    let mut state = match GameState::new() {
        Ok(state) => state,
        Err(error) => {
            eprintln!("Error: invalid embedded config: {error}");
            std::process::exit(1);
        }
    };

    if let Err(e) = enable_raw_mode() {
        eprintln!("Error: Cannot enable raw mode: {}", e);
        eprintln!("This demo requires a terminal. Run it directly, not piped.");
        return Err(e);
    }

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        eprintln!("Error: Cannot enter alternate screen: {}", e);
        return Err(e);
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            eprintln!("Error: Cannot create terminal: {}", e);
            return Err(e);
        }
    };

    // Main loop: poll input for one tick's worth of time, then advance the
    // simulation by exactly one fixed step.
    loop {
        terminal.draw(|f| draw(f, &state))?;

        if event::poll(std::time::Duration::from_millis((TICK * 1000.0) as u64))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('r') if state.game_over => state.restart(),
                    KeyCode::Char(' ') if !state.game_over => state.toggle_charge(),
                    KeyCode::Char('f') if !state.game_over => state.fire("bolt", 0.0),
                    KeyCode::Char('a') if !state.game_over => state.fire("acid_glob", 0.0),
                    KeyCode::Char('b') if !state.game_over => state.fire("flash_bomb", 0.0),
                    KeyCode::Char('1') if !state.game_over => state.drink("health_potion"),
                    KeyCode::Char('2') if !state.game_over => state.drink("war_brew"),
                    KeyCode::Char('3') if !state.game_over => state.drink("immunity_tonic"),
                    KeyCode::Char('4') if !state.game_over => state.drink("longevity_draught"),
                    _ => {}
                }
            }
        }

        state.advance();
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}
