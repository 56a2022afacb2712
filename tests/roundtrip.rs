use lsb_matching_with_seed::image::{Image, PixelGrid};
use lsb_matching_with_seed::{StegoEngine, StegoError};

fn seeds(strs: &[&str]) -> Vec<Vec<u8>> {
    strs.iter().map(|s| s.as_bytes().to_vec()).collect()
}

#[test]
fn single_seed_hide_extract_round_trips() {
    let mut grid = PixelGrid::new(40, 40, (128, 128, 128));
    let payload = b"the quick brown fox".to_vec();

    {
        let mut engine = StegoEngine::new(&mut grid, seeds(&["only-seed"]), false, false).unwrap();
        engine.hide(&payload).unwrap();
    }
    {
        let mut engine = StegoEngine::new(&mut grid, seeds(&["only-seed"]), false, false).unwrap();
        let recovered = engine.extract().unwrap();
        assert_eq!(recovered, payload);
    }
}

#[test]
fn chain_of_seeds_round_trips_each_level_independently() {
    let mut grid = PixelGrid::new(60, 60, (10, 20, 30));
    let level_payloads: Vec<Vec<u8>> = vec![
        b"outer layer".to_vec(),
        b"middle layer".to_vec(),
        b"innermost secret".to_vec(),
    ];
    let chain = seeds(&["level-one", "level-two", "level-three"]);

    {
        let mut engine = StegoEngine::new(&mut grid, chain.clone(), false, false).unwrap();
        for (i, payload) in level_payloads.iter().enumerate() {
            engine.hide(payload).unwrap();
            if i + 1 < level_payloads.len() {
                engine.advance().unwrap();
            }
        }
    }
    {
        let mut engine = StegoEngine::new(&mut grid, chain, false, false).unwrap();
        for (i, expected) in level_payloads.iter().enumerate() {
            let recovered = engine.extract().unwrap();
            assert_eq!(&recovered, expected);
            if i + 1 < level_payloads.len() {
                engine.advance().unwrap();
            }
        }
    }
}

#[test]
fn wrong_seed_does_not_recover_original_payload() {
    let mut grid = PixelGrid::new(40, 40, (200, 200, 200));
    let payload = b"sensitive payload".to_vec();

    {
        let mut engine = StegoEngine::new(&mut grid, seeds(&["correct-seed"]), false, false).unwrap();
        engine.hide(&payload).unwrap();
    }

    let mut engine = StegoEngine::new(&mut grid, seeds(&["wrong-seed"]), false, false).unwrap();
    match engine.extract() {
        Ok(recovered) => assert_ne!(recovered, payload),
        Err(StegoError::Truncated { .. }) => {}
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn capacity_exceeded_reports_need_and_availability() {
    let mut grid = PixelGrid::new(4, 4, (0, 0, 0));
    let payload = vec![0xAB; 100];
    let mut engine = StegoEngine::new(&mut grid, seeds(&["tiny-image"]), false, false).unwrap();
    let err = engine.hide(&payload).unwrap_err();
    match err {
        StegoError::CapacityExceeded { payload_len, needed, available } => {
            assert_eq!(payload_len, 100);
            assert_eq!(needed, 3 * 101);
            assert!(available < needed);
        }
        other => panic!("expected CapacityExceeded, got {other}"),
    }
}

#[test]
fn boundary_channel_values_stay_in_range_after_write() {
    let mut grid = PixelGrid::new(20, 20, (0, 0, 255));
    let payload = b"edge".to_vec();
    let mut engine = StegoEngine::new(&mut grid, seeds(&["boundary"]), false, false).unwrap();
    engine.hide(&payload).unwrap();

    for y in 0..20 {
        for x in 0..20 {
            let (r, g, b) = grid.get_pixel(x, y);
            assert!(matches!(r, 0 | 1 | 254 | 255));
            assert!(matches!(g, 0 | 1 | 254 | 255));
            assert!(matches!(b, 0 | 1 | 254 | 255));
        }
    }
}

#[test]
fn advancing_past_last_level_is_an_error() {
    let mut grid = PixelGrid::new(20, 20, (1, 1, 1));
    let mut engine = StegoEngine::new(&mut grid, seeds(&["single"]), false, false).unwrap();
    engine.hide(b"x").unwrap();
    let err = engine.advance().unwrap_err();
    assert!(matches!(err, StegoError::NoMoreSeeds { level: 1, chain_len: 1 }));
}

#[test]
fn test_mode_marks_pixels_without_touching_payload_bits() {
    let mut grid = PixelGrid::new(20, 20, (5, 5, 5));
    let mut engine = StegoEngine::new(&mut grid, seeds(&["marker"]), false, true).unwrap();
    engine.hide(b"ignored in test mode").unwrap();

    let mut marked = 0usize;
    for y in 0..20 {
        for x in 0..20 {
            if grid.get_pixel(x, y) == (255, 0, 0) {
                marked += 1;
            }
        }
    }
    assert!(marked > 0, "expected at least one pixel painted with the level-1 marker colour");
}

#[test]
fn empty_seed_chain_is_rejected() {
    let mut grid = PixelGrid::new(10, 10, (0, 0, 0));
    let err = StegoEngine::new(&mut grid, Vec::new(), false, false).unwrap_err();
    assert!(matches!(err, StegoError::EmptySeedChain));
}
