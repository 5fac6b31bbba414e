// tests/scroll_tests.rs

use std::collections::HashSet;

use macroquad::input::KeyCode;
use tile_scroll::{Camera, Flow, Scroller, TileMap, TileSheet};

struct Sheet;

impl TileSheet for Sheet {
    fn size(&self) -> (u32, u32) {
        (32, 32)
    }
}

fn scroller() -> Scroller {
    let map = TileMap::new(Sheet, 32, 20, 32).unwrap();
    Scroller::new(&map, 640, 320)
}

fn run_frames(scroller: &mut Scroller, keys: &[KeyCode], frames: usize) {
    let down: HashSet<KeyCode> = keys.iter().copied().collect();
    for _ in 0..frames {
        assert_eq!(scroller.tick(|k| down.contains(&k), false), Flow::Continue);
    }
}

#[test]
fn starts_at_map_center() {
    assert_eq!(scroller().camera(), Camera::new(512, 320));
}

#[test]
fn holding_right_scrolls_one_pixel_per_frame() {
    let mut s = scroller().with_camera(Camera::new(320, 160));
    run_frames(&mut s, &[KeyCode::Right], 64);
    assert_eq!(s.camera(), Camera::new(384, 160));
}

#[test]
fn holding_right_stops_at_the_edge() {
    let mut s = scroller().with_camera(Camera::new(320, 160));
    run_frames(&mut s, &[KeyCode::D], 1000);
    assert_eq!(s.camera().x, 704);
}

#[test]
fn top_left_corner_holds_against_left_and_up() {
    let mut s = scroller().with_camera(Camera::new(320, 160));
    run_frames(&mut s, &[KeyCode::Left, KeyCode::W], 10);
    assert_eq!(s.camera(), Camera::new(320, 160));
}

#[test]
fn movement_persists_until_every_bound_key_is_released() {
    let mut s = scroller();
    let start = s.camera();

    run_frames(&mut s, &[KeyCode::Left, KeyCode::A], 5);
    // LEFT released, A still held
    run_frames(&mut s, &[KeyCode::A], 5);
    assert_eq!(s.camera().x, start.x - 10);

    run_frames(&mut s, &[], 5);
    assert_eq!(s.camera().x, start.x - 10);
}

#[test]
fn escape_quits_without_moving() {
    let mut s = scroller();
    let before = s.camera();
    let flow = s.tick(|k| k == KeyCode::Escape || k == KeyCode::Right, false);
    assert_eq!(flow, Flow::Quit);
    assert_eq!(s.camera(), before);
}

#[test]
fn window_close_quits() {
    let mut s = scroller();
    assert_eq!(s.tick(|_| false, true), Flow::Quit);
}

#[test]
fn clamped_camera_never_leaves_bounds() {
    let mut s = scroller();
    let pattern: [&[KeyCode]; 4] = [
        &[KeyCode::Right, KeyCode::Down],
        &[KeyCode::Left],
        &[KeyCode::Up, KeyCode::A],
        &[KeyCode::S, KeyCode::D],
    ];
    for keys in pattern.iter().cycle().take(40) {
        run_frames(&mut s, keys, 97);
        let cam = s.camera();
        assert!((320..=704).contains(&cam.x), "{:?}", cam);
        assert!((160..=480).contains(&cam.y), "{:?}", cam);
    }
}
