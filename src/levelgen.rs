/// Procedural level layout.
///
/// Counts grow linearly with the level number and kinds are drawn by
/// weighted choice.  Positions are sampled uniformly with no overlap
/// avoidance, so entities may spawn inside each other.

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::entities::{Enemy, EnemyKind, Item, ItemKind, Level, Platform, Trap};
use crate::physics::Rect;

const GROUND_TILE: f32 = 150.0;
const GROUND_HEIGHT: f32 = 40.0;
const PLATFORM_HEIGHT: f32 = 15.0;
const ITEM_SIZE: f32 = 25.0;
const MOVING_RANGE: f32 = 100.0;
const MOVING_SPEED: f32 = 2.0;

const ENEMY_KINDS: [EnemyKind; 3] =
    [EnemyKind::SyntaxError, EnemyKind::RuntimeBug, EnemyKind::LogicVirus];

const ITEM_WEIGHTS: [(ItemKind, f32); 5] = [
    (ItemKind::DebugPotion, 0.30),
    (ItemKind::CodeBoost, 0.25),
    (ItemKind::MemoryUpgrade, 0.15),
    (ItemKind::JumpExtension, 0.20),
    (ItemKind::HealthPack, 0.10),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlatformChoice {
    Normal,
    Moving,
    Breakable,
    Fake,
}

// ── Difficulty tables ────────────────────────────────────────────────────────

pub fn difficulty_for(level: u32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * 0.3
}

pub fn platform_count(level: u32) -> usize {
    8 + 2 * level as usize
}

pub fn enemy_count(level: u32) -> usize {
    3 + (level as f32 * 1.5) as usize
}

pub fn item_count(level: u32) -> usize {
    4 + level as usize
}

pub fn trap_count(level: u32) -> usize {
    2 + (level as f32 * 0.8) as usize
}

/// Cumulative pick over `(value, weight)` pairs.  Weights need not sum to 1.
fn pick_weighted<T: Copy>(rng: &mut impl Rng, table: &[(T, f32)]) -> T {
    let total: f32 = table.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0.0..total);
    for &(value, weight) in table {
        if roll < weight {
            return value;
        }
        roll -= weight;
    }
    table[table.len() - 1].0
}

// ── Generator ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct LevelGenerator {
    pub difficulty: f32,
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self { difficulty: 1.0 }
    }
}

impl LevelGenerator {
    fn platform_weights(&self) -> [(PlatformChoice, f32); 4] {
        let fake = (0.05 * self.difficulty).min(0.3);
        [
            (PlatformChoice::Normal, 0.70 - (fake - 0.05)),
            (PlatformChoice::Moving, 0.15),
            (PlatformChoice::Breakable, 0.10),
            (PlatformChoice::Fake, fake),
        ]
    }

    pub fn generate(&mut self, number: u32, rng: &mut impl Rng) -> Level {
        self.difficulty = difficulty_for(number);

        let mut platforms: Vec<Platform> = (0..)
            .map(|i| i as f32 * GROUND_TILE)
            .take_while(|&x| x < WORLD_WIDTH)
            .map(|x| Platform::normal(x, WORLD_HEIGHT - GROUND_HEIGHT, GROUND_TILE, GROUND_HEIGHT))
            .collect();

        let weights = self.platform_weights();
        for _ in 0..platform_count(number) {
            let x = rng.gen_range(50.0..=WORLD_WIDTH - 150.0);
            let y = rng.gen_range(200.0..=WORLD_HEIGHT - 150.0);
            let w = rng.gen_range(60.0..=120.0);
            let h = PLATFORM_HEIGHT;
            platforms.push(match pick_weighted(rng, &weights) {
                PlatformChoice::Normal => Platform::normal(x, y, w, h),
                PlatformChoice::Moving => Platform::moving(x, y, w, h, MOVING_RANGE, MOVING_SPEED),
                PlatformChoice::Breakable => Platform::breakable(x, y, w, h),
                PlatformChoice::Fake => Platform::fake(x, y, w, h),
            });
        }

        let enemies: Vec<Enemy> = (0..enemy_count(number))
            .map(|_| {
                let x = rng.gen_range(100.0..=WORLD_WIDTH - 100.0);
                let y = rng.gen_range(100.0..=WORLD_HEIGHT - 200.0);
                let kind = *ENEMY_KINDS.choose(rng).unwrap_or(&EnemyKind::SyntaxError);
                Enemy::spawn(x, y, kind, rng)
            })
            .collect();

        let items: Vec<Item> = (0..item_count(number))
            .map(|_| {
                let x = rng.gen_range(50.0..=WORLD_WIDTH - 100.0);
                let y = rng.gen_range(150.0..=WORLD_HEIGHT - 250.0);
                Item { rect: Rect::new(x, y, ITEM_SIZE, ITEM_SIZE), kind: pick_weighted(rng, &ITEM_WEIGHTS) }
            })
            .collect();

        let traps: Vec<Trap> = (0..trap_count(number))
            .map(|_| {
                let x = rng.gen_range(100.0..=WORLD_WIDTH - 150.0);
                let y = rng.gen_range(200.0..=WORLD_HEIGHT - 100.0);
                match rng.gen_range(0..3) {
                    0 => Trap::spike(x, y),
                    1 => Trap::fake_platform(x, y),
                    _ => Trap::moving_saw(x, y),
                }
            })
            .collect();

        info!(
            "generated level {number}: {} platforms, {} enemies, {} items, {} traps (difficulty {:.1})",
            platforms.len(),
            enemies.len(),
            items.len(),
            traps.len(),
            self.difficulty
        );

        Level { number, platforms, enemies, items, traps }
    }
}
