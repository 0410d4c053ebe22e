//! Frame composition
//!
//! Turns a read-only [`GameState`] into one triangle batch in canvas
//! pixel coordinates. Draw order, back to front: grass and road, lane
//! dashes, obstacles, jump shadow, player car, particles, speed meter,
//! phase overlay.

use super::shapes::{inset_rect, rect, wheels};
use super::vertex::{Vertex, colors};
use crate::color::Rgba;
use crate::settings::Settings;
use crate::sim::difficulty::speed_progress;
use crate::sim::{GamePhase, GameState, Obstacle, ObstacleKind, Player};
use crate::tuning::Tuning;

/// Lane separator dash and gap length
pub const DASH_LENGTH: f32 = 40.0;
pub const DASH_GAP: f32 = 20.0;
const DASH_WIDTH: f32 = 4.0;

/// Overlay alpha while waiting to start / after a crash
pub const IDLE_OVERLAY_ALPHA: f32 = 0.7;
pub const GAME_OVER_OVERLAY_ALPHA: f32 = 0.5;

/// Build the full frame
pub fn build(state: &GameState, tuning: &Tuning, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(512);

    road(&mut out, state.road_offset, tuning);

    for obstacle in &state.obstacles {
        draw_obstacle(&mut out, obstacle);
    }

    draw_player(&mut out, &state.player, settings.car_rgba());

    if settings.particles {
        for p in &state.particles {
            rect(&mut out, p.pos.x, p.pos.y, p.size, p.size, p.color.faded(p.alpha()));
        }
    }

    if settings.speed_meter && state.phase == GamePhase::Playing {
        speed_meter(&mut out, speed_progress(state.speed_multiplier, tuning));
    }

    match state.phase {
        GamePhase::Idle => overlay(&mut out, tuning, IDLE_OVERLAY_ALPHA),
        GamePhase::GameOver => overlay(&mut out, tuning, GAME_OVER_OVERLAY_ALPHA),
        GamePhase::Playing => {}
    }

    out
}

/// Grass verges, road surface and scrolling lane dashes
fn road(out: &mut Vec<Vertex>, road_offset: f32, tuning: &Tuning) {
    let left = tuning.road_left();
    let width = tuning.road_width();
    let height = tuning.canvas_height;

    rect(out, 0.0, 0.0, left, height, colors::GRASS);
    rect(out, left + width, 0.0, tuning.canvas_width - left - width, height, colors::GRASS);
    rect(out, left, 0.0, width, height, colors::ROAD);

    for y in dash_rows(road_offset, height) {
        for lane in 1..tuning.lane_count {
            let x = left + lane as f32 * tuning.lane_width - DASH_WIDTH / 2.0;
            rect(out, x, y, DASH_WIDTH, DASH_LENGTH, colors::ROAD_LINE);
        }
    }
}

/// Top edge of every dash visible for the given scroll distance
pub fn dash_rows(road_offset: f32, height: f32) -> impl Iterator<Item = f32> {
    let segment = DASH_LENGTH + DASH_GAP;
    let first = -segment + road_offset.rem_euclid(segment);
    (0..)
        .map(move |i| first + i as f32 * segment)
        .take_while(move |y| *y < height)
}

fn draw_obstacle(out: &mut Vec<Vertex>, o: &Obstacle) {
    let (x, y, w, h) = (o.x, o.y, o.width, o.height);
    match o.kind {
        ObstacleKind::Car { paint } => {
            rect(out, x, y, w, h, paint);
            rect(out, x + 5.0, y + 30.0, w - 10.0, 20.0, colors::CAR_ROOF);
            rect(out, x + 8.0, y + 33.0, w - 16.0, 14.0, colors::WINDOW);
            wheels(out, x, y, w, h, colors::WHEEL);
        }
        ObstacleKind::Barrier => {
            rect(out, x, y, w, h, colors::BARRIER);
            for stripe in [10.0, 30.0, 50.0] {
                rect(out, x, y + stripe, w, 8.0, colors::BARRIER_STRIPE);
            }
        }
        ObstacleKind::Oil => {
            rect(out, x, y, w, h, colors::OIL_RIM);
            inset_rect(out, x, y, w, h, 5.0, colors::OIL_POOL);
            rect(out, x + 10.0, y + 8.0, 15.0, 6.0, colors::OIL_SHEEN);
            rect(out, x + 30.0, y + 15.0, 12.0, 5.0, colors::OIL_SHEEN);
        }
    }
}

/// Shadow size while airborne, 1 on the ground down to 0.3
pub fn shadow_scale(player: &Player) -> f32 {
    (1.0 - player.lift() / 100.0).max(0.3)
}

fn draw_player(out: &mut Vec<Vertex>, player: &Player, paint: Rgba) {
    let (x, y, w, h) = (player.x, player.y, player.width, player.height);

    if player.is_jumping {
        let scale = shadow_scale(player);
        let shadow_w = w * scale;
        rect(
            out,
            x + (w - shadow_w) / 2.0,
            player.base_y + h - 5.0,
            shadow_w,
            8.0 * scale,
            colors::SHADOW,
        );
    }

    rect(out, x, y, w, h, paint);
    rect(out, x + 5.0, y + 10.0, w - 10.0, 20.0, paint.shifted(-30));
    rect(out, x + 8.0, y + 13.0, w - 16.0, 14.0, colors::WINDOW);
    wheels(out, x, y, w, h, colors::WHEEL);
    rect(out, x + 8.0, y + h - 8.0, 10.0, 6.0, colors::HEADLIGHT);
    rect(out, x + w - 18.0, y + h - 8.0, 10.0, 6.0, colors::HEADLIGHT);
}

/// Colour band for a speed meter fill in percent
pub fn meter_color(percent: u32) -> Rgba {
    if percent < 33 {
        colors::METER_SLOW
    } else if percent < 66 {
        colors::METER_MID
    } else {
        colors::METER_FAST
    }
}

fn speed_meter(out: &mut Vec<Vertex>, progress: f32) {
    let percent = (progress.clamp(0.0, 1.0) * 100.0) as u32;
    rect(out, 10.0, 10.0, 120.0, 35.0, colors::METER_BOX);
    rect(out, 15.0, 28.0, 100.0, 12.0, colors::METER_TRACK);
    rect(out, 15.0, 28.0, percent as f32, 12.0, meter_color(percent));
}

fn overlay(out: &mut Vec<Vertex>, tuning: &Tuning, alpha: f32) {
    rect(
        out,
        0.0,
        0.0,
        tuning.canvas_width,
        tuning.canvas_height,
        Rgba::BLACK.faded(alpha),
    );
}
