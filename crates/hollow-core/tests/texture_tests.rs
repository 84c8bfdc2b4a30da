// Host-side tests for the procedural texture generators.

use hollow_core::error::SceneError;
use hollow_core::texture::{self, PixelCanvas, MAX_CANVAS_EDGE};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn rejects_empty_and_oversized_canvases() {
    assert_eq!(
        PixelCanvas::new(0, 4).unwrap_err(),
        SceneError::EmptyCanvas { width: 0, height: 4 }
    );
    assert!(matches!(
        PixelCanvas::new(MAX_CANVAS_EDGE + 1, 8),
        Err(SceneError::CanvasTooLarge { .. })
    ));
    assert!(PixelCanvas::new(MAX_CANVAS_EDGE, MAX_CANVAS_EDGE).is_ok());
}

#[test]
fn generators_produce_expected_shapes() {
    let mut r = rng();
    let embers = texture::embers(&mut r).unwrap();
    assert_eq!((embers.width(), embers.height()), (32, 32));
    let grass = texture::grass(&mut r).unwrap();
    assert_eq!((grass.width(), grass.height()), (64, 64));
    assert_eq!(grass.repeat, glam::Vec2::new(10.0, 10.0));
    let tv = texture::static_noise(32, 32, &mut r).unwrap();
    assert_eq!(tv.as_bytes().len(), 32 * 32 * 4);
    for canvas in [
        texture::brick(&mut r).unwrap(),
        texture::roof_tiles(&mut r).unwrap(),
        texture::wood(&mut r).unwrap(),
        texture::door_panels().unwrap(),
        texture::sofa_fabric(&mut r).unwrap(),
    ] {
        assert_eq!(canvas.as_bytes().len(), (canvas.width() * canvas.height() * 4) as usize);
    }
}

#[test]
fn embers_use_only_two_colors() {
    let c = texture::embers(&mut rng()).unwrap();
    let hot = texture::hex(0xff6e4a);
    let cold = texture::hex(0x7a1f00);
    for y in 0..c.height() {
        for x in 0..c.width() {
            let p = c.pixel(x, y).unwrap();
            assert!(p == hot || p == cold, "unexpected pixel {:?} at {},{}", p, x, y);
        }
    }
}

#[test]
fn static_is_grey_and_refresh_marks_dirty() {
    let mut r = rng();
    let mut c = texture::static_noise(16, 16, &mut r).unwrap();
    let before = c.version();
    c.refresh_static(&mut r);
    assert!(c.version() > before);
    for y in 0..16 {
        for x in 0..16 {
            let [red, green, blue, alpha] = c.pixel(x, y).unwrap();
            assert_eq!(red, green);
            assert_eq!(green, blue);
            assert_eq!(alpha, 255);
        }
    }
}

#[test]
fn refresh_leaves_most_cells_alone() {
    let mut r = rng();
    let mut c = texture::static_noise(64, 64, &mut r).unwrap();
    let before = c.as_bytes().to_vec();
    c.refresh_static(&mut r);
    let changed = before
        .chunks(4)
        .zip(c.as_bytes().chunks(4))
        .filter(|(a, b)| a != b)
        .count();
    let total = 64 * 64;
    // About 30% of the cells are redrawn, and some keep their old grey.
    assert!(changed > 0);
    assert!(changed < total / 2, "changed {} of {}", changed, total);
}

#[test]
fn door_panels_are_deterministic() {
    let a = texture::door_panels().unwrap();
    let b = texture::door_panels().unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
    assert_eq!(a.pixel(0, 0), Some(texture::hex(0x8b4513)));
}
