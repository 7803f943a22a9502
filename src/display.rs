/// Terminal drawing for a `GameSession`.
///
/// The 1024 × 768 world is scaled onto whatever grid the terminal offers:
/// row 0 is the HUD, rows 1 and h-2 are the frame, the last row holds the
/// key hints.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use platformer::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use platformer::entities::{
    Enemy, EnemyKind, EnemyState, GameSession, GameStatus, ItemKind, Platform, PlatformKind, Trap,
    TrapKind,
};
use platformer::particles::ParticleTint;
use platformer::physics::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_SHIELD: Color = Color::Green;
const C_PLATFORM: Color = Color::Grey;
const C_MOVING: Color = Color::DarkYellow;
const C_BREAKABLE: Color = Color::DarkRed;
const C_TRAP: Color = Color::Red;
const C_PROJECTILE: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// ── Screen geometry ───────────────────────────────────────────────────────────

/// Maps world coordinates onto the bordered play area.
struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    fn cols(&self) -> f32 {
        self.width.saturating_sub(2) as f32
    }

    fn rows(&self) -> f32 {
        self.height.saturating_sub(4) as f32
    }

    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if !(0.0..WORLD_WIDTH).contains(&x) || !(0.0..WORLD_HEIGHT).contains(&y) {
            return None;
        }
        let col = 1 + (x / WORLD_WIDTH * self.cols()) as u16;
        let row = 2 + (y / WORLD_HEIGHT * self.rows()) as u16;
        Some((col, row))
    }

    /// Top row of `rect`, from its left to its right column (at least one cell).
    fn span(&self, rect: &Rect) -> Option<(u16, u16, usize)> {
        let (c0, row) = self.cell(rect.x.max(0.0), rect.y)?;
        let right = (rect.right() - 0.01).min(WORLD_WIDTH - 0.01);
        let (c1, _) = self.cell(right, rect.y)?;
        Some((c0, row, (c1.saturating_sub(c0) + 1) as usize))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameSession) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let vp = Viewport { width, height };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if state.status == GameStatus::Menu {
        draw_menu(out, &vp, state)?;
        return finish(out, &vp);
    }

    draw_border(out, &vp)?;
    draw_hud(out, &vp, state)?;

    for platform in &state.level.platforms {
        draw_platform(out, &vp, platform)?;
    }
    for trap in &state.level.traps {
        draw_trap(out, &vp, trap)?;
    }
    for item in &state.level.items {
        let (x, y) = item.rect.center();
        draw_glyph(out, &vp, x, y, item_glyph(item.kind), item_color(item.kind))?;
    }
    for enemy in &state.level.enemies {
        draw_enemy(out, &vp, enemy)?;
    }
    for p in &state.projectiles {
        let (x, y) = p.body.center();
        draw_glyph(out, &vp, x, y, "•", C_PROJECTILE)?;
    }
    for p in &state.particles.particles {
        draw_glyph(out, &vp, p.x, p.y, "·", particle_color(p.tint))?;
    }

    draw_player(out, &vp, state)?;
    draw_controls_hint(out, &vp)?;

    match state.status {
        GameStatus::Paused => draw_overlay(
            out,
            &vp,
            &[("PAUSED", Color::White), ("P / Enter - Resume   Esc - Menu", Color::DarkGrey)],
        )?,
        GameStatus::GameOver => draw_game_over(out, &vp, state)?,
        GameStatus::LevelComplete => draw_level_complete(out, &vp, state)?,
        GameStatus::Menu | GameStatus::Playing => {}
    }

    finish(out, &vp)
}

fn finish<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn draw_glyph<W: Write>(
    out: &mut W,
    vp: &Viewport,
    x: f32,
    y: f32,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    if let Some((col, row)) = vp.cell(x, y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.width as usize;
    let h = vp.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, vp: &Viewport, state: &GameSession) -> std::io::Result<()> {
    // score | level and power-ups | hearts
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>7}", state.score)))?;

    let p = &state.player;
    let mut centre = format!("[ LEVEL {} ]", state.level.number);
    if p.invulnerable_timer > 0 {
        centre.push_str(&format!(" shield {}s", p.invulnerable_timer / 60));
    }
    if p.speed_boost_timer > 0 {
        centre.push_str(&format!(" boost {}s", p.speed_boost_timer / 60));
    }
    if p.extra_jump_timer > 0 {
        centre.push_str(&format!(" jump+ {}s", p.extra_jump_timer / 60));
    }
    let cx = (vp.width / 2).saturating_sub(centre.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(&centre))?;

    let full = p.health.max(0) as usize;
    let empty = (p.max_health - p.health.max(0)).max(0) as usize;
    let health_text = format!("HP: {}{}", "♥".repeat(full), "♡".repeat(empty));
    let rx = vp.width.saturating_sub(health_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&health_text))?;

    Ok(())
}

// ── World ─────────────────────────────────────────────────────────────────────

fn draw_platform<W: Write>(out: &mut W, vp: &Viewport, platform: &Platform) -> std::io::Result<()> {
    let (ch, color) = match platform.kind {
        // Fake floors pass for normal ones until they start to drop.
        PlatformKind::Normal | PlatformKind::Fake { falling: false, .. } => ("█", C_PLATFORM),
        PlatformKind::Fake { .. } => ("▒", C_HINT),
        PlatformKind::Moving(_) => ("═", C_MOVING),
        PlatformKind::Breakable { destroyed: true, .. } => return Ok(()),
        PlatformKind::Breakable { break_timer, .. } => {
            // Flash while the countdown runs.
            if break_timer > 0 && break_timer % 6 >= 3 {
                ("▓", Color::Red)
            } else {
                ("▓", C_BREAKABLE)
            }
        }
    };
    if let Some((col, row, len)) = vp.span(&platform.rect) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(ch.repeat(len)))?;
    }
    Ok(())
}

fn draw_trap<W: Write>(out: &mut W, vp: &Viewport, trap: &Trap) -> std::io::Result<()> {
    if !trap.active {
        return Ok(());
    }
    match &trap.kind {
        TrapKind::Spike => {
            if let Some((col, row, len)) = vp.span(&trap.rect) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(style::SetForegroundColor(C_TRAP))?;
                out.queue(Print("▲".repeat(len)))?;
            }
        }
        TrapKind::FakePlatform { .. } => {
            if let Some((col, row, len)) = vp.span(&trap.rect) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(style::SetForegroundColor(C_PLATFORM))?;
                out.queue(Print("█".repeat(len)))?;
            }
        }
        TrapKind::MovingSaw { angle, .. } => {
            const BLADES: [&str; 4] = ["✶", "✷", "✸", "✹"];
            let frame = (*angle / 90.0) as usize % BLADES.len();
            let (x, y) = trap.rect.center();
            draw_glyph(out, vp, x, y, BLADES[frame], C_TRAP)?;
        }
    }
    Ok(())
}

fn item_glyph(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::DebugPotion => "◆",
        ItemKind::CodeBoost => "ϟ",
        ItemKind::MemoryUpgrade => "✚",
        ItemKind::JumpExtension => "⇡",
        ItemKind::HealthPack => "♥",
    }
}

fn item_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::DebugPotion => Color::Cyan,
        ItemKind::CodeBoost => Color::Yellow,
        ItemKind::MemoryUpgrade => Color::Green,
        ItemKind::JumpExtension => Color::Blue,
        ItemKind::HealthPack => Color::Red,
    }
}

fn particle_color(tint: ParticleTint) -> Color {
    match tint {
        ParticleTint::Explosion => Color::DarkYellow,
        ParticleTint::Jump => Color::Cyan,
        ParticleTint::Damage => Color::Red,
        ParticleTint::Debris => Color::DarkRed,
        ParticleTint::Pickup => Color::Yellow,
    }
}

fn draw_enemy<W: Write>(out: &mut W, vp: &Viewport, enemy: &Enemy) -> std::io::Result<()> {
    let (glyph, color) = match enemy.kind {
        EnemyKind::SyntaxError => ("✗", Color::Red),
        EnemyKind::RuntimeBug => ("!", Color::DarkYellow),
        EnemyKind::LogicVirus => ("◎", Color::Magenta),
    };
    // Bold when the enemy has noticed the player.
    let color = match enemy.state {
        EnemyState::Patrol => color,
        EnemyState::Chase | EnemyState::Attack => match color {
            Color::Red => Color::DarkRed,
            Color::DarkYellow => Color::Yellow,
            _ => Color::DarkMagenta,
        },
    };
    let (x, y) = enemy.body.center();
    draw_glyph(out, vp, x, y, glyph, color)
}

fn draw_player<W: Write>(out: &mut W, vp: &Viewport, state: &GameSession) -> std::io::Result<()> {
    let p = &state.player;
    // Flicker while invulnerable
    if p.invulnerable_timer > 0 && p.invulnerable_timer % 10 >= 5 {
        return Ok(());
    }
    let color = if p.invulnerable_timer > 0 { C_PLAYER_SHIELD } else { C_PLAYER };
    let glyph = if p.facing_right { "▶" } else { "◀" };
    let (x, y) = p.body.center();
    draw_glyph(out, vp, x, y, glyph, color)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Jump   P : Pause   R : Restart   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_overlay<W: Write>(
    out: &mut W,
    vp: &Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = vp.width / 2;
    let start_row = (vp.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_menu<W: Write>(out: &mut W, vp: &Viewport, state: &GameSession) -> std::io::Result<()> {
    let start = format!("Enter / SPACE - Start at level {}", state.start_level);
    draw_overlay(
        out,
        vp,
        &[
            ("★  HELLO  WORLD  ADVENTURE  ★", Color::Green),
            ("", Color::White),
            (start.as_str(), Color::White),
            ("Q - Quit", Color::White),
            ("", Color::White),
            ("Stomp every bug and grab every item to clear a level.", Color::DarkGrey),
            ("◆ shield  ϟ boost  ✚ max HP  ⇡ extra jump  ♥ heal", Color::DarkGrey),
            ("▲ spikes  ✹ saws  and not every floor is real.", Color::DarkGrey),
        ],
    )
}

fn draw_game_over<W: Write>(out: &mut W, vp: &Viewport, state: &GameSession) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let level_line = format!("Reached level {}", state.level.number);
    draw_overlay(
        out,
        vp,
        &[
            ("╔══════════════════╗", Color::Red),
            ("║    GAME  OVER    ║", Color::Red),
            ("╚══════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            (level_line.as_str(), Color::Yellow),
            ("R / Enter - Play Again   Esc - Menu   Q - Quit", Color::White),
        ],
    )
}

fn draw_level_complete<W: Write>(
    out: &mut W,
    vp: &Viewport,
    state: &GameSession,
) -> std::io::Result<()> {
    let title = format!("LEVEL {} COMPLETE!", state.level.number);
    let score_line = format!("Score: {}", state.score);
    draw_overlay(
        out,
        vp,
        &[
            (title.as_str(), Color::Green),
            (score_line.as_str(), Color::Yellow),
            ("Enter / SPACE - Next level", Color::White),
        ],
    )
}
