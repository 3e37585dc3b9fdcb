//! Draw commands for an external renderer
//!
//! The renderer only knows rectangles, circles, and text in game-space
//! coordinates. This turns a [`GameState`] into that list, back to front.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{EntityKind, GameState, RoundPhase};

/// Colors (0xRRGGBB)
pub mod palette {
    pub const BACKGROUND: u32 = 0x111111;
    pub const PLAYER: u32 = 0x00FF66;
    pub const PROJECTILE: u32 = 0xFFFF00;
    pub const LETTER: u32 = 0xFFFF00;
    pub const LETTER_PENDING: u32 = 0x555555;
    pub const TEXT: u32 = 0xFFFFFF;
    pub const WIN: u32 = 0x00FF66;
    pub const LOSE: u32 = 0xFF3333;
}

/// Text sizes
const HUD_FONT: f32 = 32.0;
const TIMER_FONT: f32 = 24.0;
const LABEL_FONT: f32 = 14.0;
const BANNER_FONT: f32 = 48.0;
/// Horizontal spacing of the target-word HUD letters
const HUD_LETTER_SPACING: f32 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Axis-aligned rectangle centered on `center`
    Rect {
        center: Vec2,
        size: Vec2,
        color: u32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: u32,
        alpha: f32,
    },
    /// Text anchored at its center
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: u32,
    },
}

/// Build the frame for the current state
pub fn build_scene(state: &GameState) -> Vec<DrawCommand> {
    let mut cmds = Vec::with_capacity(state.entities.len() * 2 + 16);
    let width = state.config.play_width;
    let height = state.config.play_height;

    cmds.push(DrawCommand::Rect {
        center: Vec2::new(width / 2.0, height / 2.0),
        size: Vec2::new(width, height),
        color: palette::BACKGROUND,
    });

    // Game scene is hidden once the round is over
    if !state.phase.is_over() {
        push_entities(state, &mut cmds);
    }

    push_hud(state, &mut cmds);

    if let Some((message, color)) = banner(state.phase) {
        let center = Vec2::new(width / 2.0, height / 2.0);
        cmds.push(DrawCommand::Text {
            pos: center - Vec2::new(0.0, 80.0),
            text: message.to_string(),
            size: BANNER_FONT,
            color,
        });
        if state.phase == RoundPhase::Won {
            cmds.push(DrawCommand::Text {
                pos: center + Vec2::new(0.0, 60.0),
                text: format!("Time: {}s", state.elapsed_secs),
                size: 28.0,
                color: palette::TEXT,
            });
        }
    }

    cmds
}

fn banner(phase: RoundPhase) -> Option<(&'static str, u32)> {
    match phase {
        RoundPhase::Won => Some(("Mission Complete!", palette::WIN)),
        RoundPhase::Lost => Some(("Mission Failed", palette::LOSE)),
        RoundPhase::NotStarted | RoundPhase::Playing => None,
    }
}

fn push_entities(state: &GameState, cmds: &mut Vec<DrawCommand>) {
    cmds.push(DrawCommand::Rect {
        center: state.player.pos,
        size: Vec2::splat(PLAYER_SIZE),
        color: palette::PLAYER,
    });

    for entity in state.entities.iter() {
        match entity.kind {
            EntityKind::Projectile => cmds.push(DrawCommand::Rect {
                center: entity.pos,
                size: entity.kind.size(),
                color: palette::PROJECTILE,
            }),
            EntityKind::EnemyBullet { color } => cmds.push(DrawCommand::Rect {
                center: entity.pos,
                size: entity.kind.size(),
                color,
            }),
            EntityKind::Collectible { letter } => cmds.push(DrawCommand::Text {
                pos: entity.pos,
                text: letter.to_string(),
                size: HUD_FONT,
                color: palette::LETTER,
            }),
            EntityKind::Enemy { emotion, .. } => {
                let color = emotion.color();
                cmds.push(DrawCommand::Circle {
                    center: entity.pos,
                    radius: ENEMY_GLOW_RADIUS,
                    color,
                    alpha: 0.3,
                });
                cmds.push(DrawCommand::Circle {
                    center: entity.pos,
                    radius: ENEMY_RADIUS,
                    color,
                    alpha: 1.0,
                });
                cmds.push(DrawCommand::Text {
                    pos: entity.pos,
                    text: emotion.label().to_string(),
                    size: LABEL_FONT,
                    color: palette::TEXT,
                });
            }
        }
    }
}

fn push_hud(state: &GameState, cmds: &mut Vec<DrawCommand>) {
    for (i, &letter) in state.word().iter().enumerate() {
        let color = if state.is_collected(letter) {
            palette::LETTER
        } else {
            palette::LETTER_PENDING
        };
        cmds.push(DrawCommand::Text {
            pos: Vec2::new(10.0 + HUD_LETTER_SPACING * i as f32 + HUD_LETTER_SPACING / 2.0, 26.0),
            text: letter.to_string(),
            size: HUD_FONT,
            color,
        });
    }

    if state.phase == RoundPhase::Playing {
        let text = match state.remaining_secs() {
            Some(left) => format!("Time: {left}s"),
            None => format!("Time: {}s", state.elapsed_secs),
        };
        cmds.push(DrawCommand::Text {
            pos: Vec2::new(state.config.play_width - 70.0, 22.0),
            text,
            size: TIMER_FONT,
            color: palette::TEXT,
        });
    }
}
