//! Shape generation for 2D primitives, plus per-scene tessellation
//!
//! Everything here is in view coordinates (160x160, y down); the pipeline
//! maps to NDC at upload time.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::scene::{Scene, SceneManager, WorldScene};
use crate::sim::{Clip, Facing, Player};

/// Health bar placement (top-right corner)
const HEALTH_BAR_POS: Vec2 = Vec2::new(WIDTH - 50.0, 1.0);
const HEALTH_BAR_SIZE: Vec2 = Vec2::new(50.0, 10.0);

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let (s1, c1) = theta1.sin_cos();
        let (s2, c2) = theta2.sin_cos();

        let inner1 = center + Vec2::new(c1, s1) * inner_radius;
        let outer1 = center + Vec2::new(c1, s1) * outer_radius;
        let inner2 = center + Vec2::new(c2, s2) * inner_radius;
        let outer2 = center + Vec2::new(c2, s2) * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

fn hero_color(clip: Option<Clip>) -> [f32; 4] {
    match clip {
        Some(Clip::HeroHurt) => colors::HERO_HURT,
        Some(Clip::HeroDefeat) => colors::HERO_DEFEAT,
        Some(Clip::HeroUp | Clip::HeroFall) => colors::HERO_AIR,
        _ => colors::HERO,
    }
}

fn ground(out: &mut Vec<Vertex>) {
    let top = HEIGHT - GROUND_HEIGHT;
    out.extend(rect(
        Vec2::new(0.0, top),
        Vec2::new(WIDTH, GROUND_HEIGHT),
        colors::GROUND,
    ));
    out.extend(rect(Vec2::new(0.0, top), Vec2::new(WIDTH, 2.0), colors::GROUND_EDGE));
}

fn hero(out: &mut Vec<Vertex>, player: &Player) {
    let half = player.body.shape.half_extents();
    let min = player.body.pos - half;
    out.extend(rect(min, half * 2.0, hero_color(player.anim.current())));

    // Eye on the side we face
    let eye_x = match player.facing {
        Facing::Right => player.body.pos.x + half.x * 0.3,
        Facing::Left => player.body.pos.x - half.x * 0.3 - 3.0,
    };
    out.extend(rect(
        Vec2::new(eye_x, min.y + 4.0),
        Vec2::new(3.0, 3.0),
        colors::HERO_EYE,
    ));
}

fn world(out: &mut Vec<Vertex>, world: &WorldScene) {
    let state = &world.state;

    ground(out);

    for rock in &state.rocks {
        let shade = colors::ROCK_SHADES[(rock.frame % 3) as usize];
        let r = rock.radius();
        out.extend(circle(rock.body.pos, r, shade, 16));
        out.extend(ring(rock.body.pos, r * 0.8, r, colors::ROCK_RIM, 16));
    }

    for coin in &state.coins {
        // Spin by squashing horizontally through the sheet's frames
        let def = Clip::CoinSpin.def();
        let step = coin.anim.frame().saturating_sub(def.first_frame) as f32;
        let phase = step / def.frame_count() as f32 * PI;
        let squash = phase.cos().abs().max(0.2);
        let half = coin.body.shape.half_extents() * Vec2::new(squash, 1.0);
        out.extend(rect(coin.body.pos - half, half * 2.0, colors::COIN_EDGE));
        let inner = half * 0.7;
        out.extend(rect(coin.body.pos - inner, inner * 2.0, colors::COIN));
    }

    hero(out, &state.player);

    // Health bar
    let fill = state.player.health.fraction();
    out.extend(rect(HEALTH_BAR_POS, HEALTH_BAR_SIZE, colors::HEALTH_BG));
    if fill > 0.0 {
        out.extend(rect(
            HEALTH_BAR_POS,
            Vec2::new(HEALTH_BAR_SIZE.x * fill, HEALTH_BAR_SIZE.y),
            colors::HEALTH_FILL,
        ));
    }

    let offset = world.camera.offset();
    if offset != Vec2::ZERO {
        for v in out.iter_mut() {
            v.position[0] += offset.x;
            v.position[1] += offset.y;
        }
    }

    let alpha = world.camera.fade_alpha();
    if alpha > 0.0 {
        out.extend(rect(
            Vec2::ZERO,
            Vec2::new(WIDTH, HEIGHT),
            [0.0, 0.0, 0.0, alpha],
        ));
    }
}

/// Tessellate whatever the active scene shows
pub fn scene_vertices(manager: &SceneManager) -> Vec<Vertex> {
    let mut out = Vec::new();
    match manager.scene() {
        Scene::Boot => {}
        Scene::Start => {
            ground(&mut out);
            let spawn = Vec2::new(PLAYER_SPAWN_X, PLAYER_FLOOR_Y - PLAYER_BODY_HEIGHT / 2.0);
            let player = Player::new(spawn, manager.tuning());
            hero(&mut out, &player);
        }
        Scene::World(w) => world(&mut out, w),
        Scene::GameOver(_) => {
            ground(&mut out);
            out.extend(rect(Vec2::ZERO, Vec2::new(WIDTH, HEIGHT), colors::DIM));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::scene::FrameInput;

    fn world_manager() -> SceneManager {
        let tuning = Tuning {
            rock_interval_ms: 1.0e9,
            coin_interval_ms: 1.0e9,
            ..Default::default()
        };
        let mut manager = SceneManager::new(1, tuning);
        manager.tick(&FrameInput::default(), SIM_DT);
        manager.tick(
            &FrameInput {
                jump: true,
                ..Default::default()
            },
            SIM_DT,
        );
        manager
    }

    fn has_color(vertices: &[Vertex], color: [f32; 4]) -> bool {
        vertices.iter().any(|v| v.color == color)
    }

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), colors::COIN);
        assert_eq!(v.len(), 6);
        assert!(v.iter().any(|v| v.position == [1.0, 2.0]));
        assert!(v.iter().any(|v| v.position == [4.0, 6.0]));
    }

    #[test]
    fn test_boot_draws_nothing() {
        let manager = SceneManager::new(1, Tuning::default());
        assert!(scene_vertices(&manager).is_empty());
    }

    #[test]
    fn test_health_bar_fill_tracks_health() {
        let mut manager = world_manager();
        manager.world_mut().unwrap().state.player.health.set(50);
        let vertices = scene_vertices(&manager);
        let fill_right = vertices
            .iter()
            .filter(|v| v.color == colors::HEALTH_FILL)
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert_eq!(fill_right, HEALTH_BAR_POS.x + 25.0);

        manager.world_mut().unwrap().state.player.health.set(0);
        assert!(!has_color(&scene_vertices(&manager), colors::HEALTH_FILL));
    }

    #[test]
    fn test_fade_overlay_only_while_dying() {
        let mut manager = world_manager();
        let overlay = |v: &[Vertex]| v.iter().any(|v| v.color[..3] == [0.0, 0.0, 0.0]);
        assert!(!overlay(&scene_vertices(&manager)));

        manager.world_mut().unwrap().camera.fade_out(100.0);
        manager.tick(&FrameInput::default(), SIM_DT);
        assert!(overlay(&scene_vertices(&manager)));
    }

    #[test]
    fn test_hurt_hero_is_tinted() {
        let mut manager = world_manager();
        let mut events = Vec::new();
        manager
            .world_mut()
            .unwrap()
            .state
            .player
            .on_collide_with_rock(&mut events);
        manager.tick(&FrameInput::default(), SIM_DT);
        assert!(has_color(&scene_vertices(&manager), colors::HERO_HURT));
    }
}
