use std::time::Duration;

use hatlight_app::{
    core::{test_utils::MemoryDisplay, Display, RGB8, ROUND_RECT},
    pattern::{pick_color, PALETTE},
    HatlightError, PatternAnimator, PatternConfig,
};

fn animator(seed: u64, config: PatternConfig) -> PatternAnimator<MemoryDisplay> {
    let _ = env_logger::try_init();
    PatternAnimator::with_rng(MemoryDisplay::new(), config, fastrand::Rng::with_seed(seed))
}

#[tokio::test(start_paused = true)]
async fn test_single_cycle() {
    let mut animator = animator(7, PatternConfig::default());
    let color = animator.cycle().await.unwrap();
    assert_eq!(color, pick_color(&mut fastrand::Rng::with_seed(7)));

    let display = animator.into_display();
    // Fade in and fade out, both commit the initial brightness plus nine steps.
    assert_eq!(display.frames.len(), 20);

    let fb = display.framebuffer();
    assert_eq!(fb.pixel(0, 0), Some(RGB8::default()));
    assert_eq!(fb.pixel(5, 5), Some(color));

    // The brightest frame shows the mask at full intensity.
    let (brightness, frame) = display.frames[10];
    assert!((brightness - 1.0).abs() < f32::EPSILON);
    assert_eq!(frame[5][5], color);
}

#[tokio::test(start_paused = true)]
async fn test_origin_marker() {
    let config = PatternConfig {
        mark_origin: true,
        ..PatternConfig::default()
    };
    let mut animator = animator(1, config);
    animator.cycle().await.unwrap();
    let display = animator.into_display();

    // Marker is lit while fading in.
    let (_, frame) = display.frames[9];
    assert_eq!(frame[0][0], RGB8::new(229, 229, 229));
    // And removed before fading out.
    assert_eq!(display.frames[10].1[0][0], RGB8::default());
}

#[tokio::test(start_paused = true)]
async fn test_run_until_shutdown_turns_display_off() {
    let mut animator = animator(3, PatternConfig::default());
    // A single cycle takes 18 steps of 25ms.
    let shutdown = async {
        tokio::time::sleep(Duration::from_millis(1_010)).await;
        Ok(())
    };
    animator.run_until(shutdown).await.unwrap();

    let display = animator.into_display();
    assert!(display.frames.len() > 40);
    let last = display.last_frame().unwrap();
    assert!(last.iter().flatten().all(|pixel| *pixel == RGB8::default()));

    // The first two cycles have been completed.
    let full: Vec<_> = display
        .frames
        .iter()
        .filter(|(brightness, _)| (brightness - 1.0).abs() < f32::EPSILON)
        .map(|(_, frame)| frame[8][8])
        .collect();
    assert!(full.len() >= 4);
    assert!(full.iter().all(|pixel| PALETTE.contains(pixel)));
}

#[tokio::test(start_paused = true)]
async fn test_failed_shutdown_signal_turns_display_off() {
    let mut animator = animator(5, PatternConfig::default());
    let shutdown = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Err(HatlightError::device("signal handler is gone"))
    };
    assert_eq!(
        animator.run_until(shutdown).await,
        Err(HatlightError::device("signal handler is gone"))
    );

    let display = animator.into_display();
    // Still in the middle of the first fade in.
    assert!(display.frames.len() < 10);
    let last = display.last_frame().unwrap();
    assert!(last.iter().flatten().all(|pixel| *pixel == RGB8::default()));
}

#[test]
fn test_mask_is_symmetric() {
    assert!(ROUND_RECT.is_mirror_symmetric());
}
