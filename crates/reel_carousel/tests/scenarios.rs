//! End-to-end carousel behaviour driven by a deterministic frame clock

use reel_animation::AnimationScheduler;
use reel_carousel::{
    AutoplayState, Carousel, CarouselConfig, CarouselError, IndexChange, Intent, Origin,
};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);
const WIDTH: f32 = 360.0;

fn images(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("https://example.com/{}.jpg", i)).collect()
}

fn mount(scheduler: &AnimationScheduler, config: CarouselConfig) -> Carousel {
    let mut carousel = Carousel::new(scheduler.handle(), config);
    carousel.set_viewport_width(WIDTH);
    carousel
}

/// Run frames for `duration`, pumping the carousel after each one
fn run_for(scheduler: &AnimationScheduler, carousel: &mut Carousel, duration: Duration) {
    let mut remaining = duration;
    while remaining > Duration::ZERO {
        let dt = remaining.min(FRAME);
        scheduler.advance(dt);
        carousel.pump();
        remaining -= dt;
    }
}

/// Swipe on a separate sampling thread, like a gesture worklet would
fn swipe(carousel: &Carousel, displacement: f32) {
    let mut tracker = carousel.pan_tracker();
    thread::spawn(move || {
        tracker.begin();
        for step in 1..=5 {
            tracker.update(displacement * step as f32 / 5.0);
        }
        tracker.end();
    })
    .join()
    .unwrap();
}

fn record_changes(carousel: &mut Carousel) -> Arc<Mutex<Vec<IndexChange>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    carousel.on_index_change(move |change| sink.lock().unwrap().push(*change));
    log
}

#[test]
fn test_swipe_left_walks_forward_and_wraps() {
    let scheduler = AnimationScheduler::new();
    let mut carousel = mount(&scheduler, CarouselConfig::new().images(images(3)));
    assert_eq!(carousel.current_index(), Some(0));

    let mut seen = Vec::new();
    for _ in 0..3 {
        swipe(&carousel, -120.0);
        carousel.pump();
        seen.push(carousel.current_index().unwrap());
    }

    assert_eq!(seen, vec![1, 2, 0]);
}

#[test]
fn test_swipe_right_retreats() {
    let scheduler = AnimationScheduler::new();
    let mut carousel = mount(&scheduler, CarouselConfig::new().images(images(3)));

    swipe(&carousel, 120.0);
    carousel.pump();
    assert_eq!(carousel.current_index(), Some(2));
}

#[test]
fn test_threshold_boundaries() {
    let scheduler = AnimationScheduler::new();
    let mut carousel = mount(&scheduler, CarouselConfig::new().images(images(3)));

    for displacement in [-50.0, 50.0, 0.0, 12.5] {
        swipe(&carousel, displacement);
        assert_eq!(carousel.pump(), 0);
        assert_eq!(carousel.current_index(), Some(0));
    }

    swipe(&carousel, -51.0);
    carousel.pump();
    assert_eq!(carousel.current_index(), Some(1));

    swipe(&carousel, 51.0);
    carousel.pump();
    assert_eq!(carousel.current_index(), Some(0));
}

#[test]
fn test_autoplay_cycles_without_skips() {
    let scheduler = AnimationScheduler::new();
    let mut carousel = mount(
        &scheduler,
        CarouselConfig::new()
            .images(images(4))
            .auto_play(true)
            .slide_interval(500),
    );
    let log = record_changes(&mut carousel);

    run_for(&scheduler, &mut carousel, Duration::from_millis(500 * 9));

    let sequence: Vec<usize> = log.lock().unwrap().iter().map(|c| c.current).collect();
    assert_eq!(sequence, vec![1, 2, 3, 0, 1, 2, 3, 0, 1]);
    assert!(log
        .lock()
        .unwrap()
        .iter()
        .all(|c| c.origin == Origin::Auto));
}

#[test]
fn test_two_slide_autoplay_timing() {
    let scheduler = AnimationScheduler::new();
    let mut carousel = mount(
        &scheduler,
        CarouselConfig::new()
            .images(images(2))
            .auto_play(true)
            .slide_interval(1000),
    );

    assert_eq!(carousel.current_index(), Some(0));

    run_for(&scheduler, &mut carousel, Duration::from_millis(999));
    assert_eq!(carousel.current_index(), Some(0));
    run_for(&scheduler, &mut carousel, Duration::from_millis(1));
    assert_eq!(carousel.current_index(), Some(1));

    run_for(&scheduler, &mut carousel, Duration::from_millis(1000));
    assert_eq!(carousel.current_index(), Some(0));
}

#[test]
fn test_manual_swipe_grants_full_interval() {
    let scheduler = AnimationScheduler::new();
    let mut carousel = mount(
        &scheduler,
        CarouselConfig::new()
            .images(images(3))
            .auto_play(true)
            .slide_interval(1000),
    );

    // Swipe just before the autoplay tick would have fired
    run_for(&scheduler, &mut carousel, Duration::from_millis(960));
    swipe(&carousel, -200.0);
    carousel.pump();
    assert_eq!(carousel.current_index(), Some(1));
    assert_eq!(carousel.autoplay_state(), AutoplayState::Running);
    assert_eq!(carousel.next_autoplay_in(), Some(Duration::from_millis(1000)));

    // The stale schedule would have fired 40ms later; the fresh one must not
    run_for(&scheduler, &mut carousel, Duration::from_millis(992));
    assert_eq!(carousel.current_index(), Some(1));

    run_for(&scheduler, &mut carousel, Duration::from_millis(8));
    assert_eq!(carousel.current_index(), Some(2));
}

#[test]
fn test_indicator_tap_follows_manual_ordering() {
    let scheduler = AnimationScheduler::new();
    let mut carousel = mount(
        &scheduler,
        CarouselConfig::new()
            .images(images(5))
            .auto_play(true)
            .slide_interval(1000)
            .show_indicators(true),
    );
    let log = record_changes(&mut carousel);

    run_for(&scheduler, &mut carousel, Duration::from_millis(500));
    carousel.intent_sender().send(Intent::Select(3));
    carousel.pump();

    let frame = carousel.frame();
    assert_eq!(frame.current_index, Some(3));
    assert_eq!(frame.indicators.unwrap().active_index(), Some(3));
    assert_eq!(carousel.next_autoplay_in(), Some(Duration::from_millis(1000)));
    assert_eq!(
        log.lock().unwrap().last().copied(),
        Some(IndexChange {
            previous: 0,
            current: 3,
            origin: Origin::Manual,
        })
    );
}

#[test]
fn test_indicator_leads_the_animation() {
    let scheduler = AnimationScheduler::new();
    let mut carousel = mount(&scheduler, CarouselConfig::new().images(images(3)));

    carousel.advance().unwrap();
    scheduler.advance(Duration::from_millis(100));

    let offset = carousel.offset().unwrap();
    assert!(offset < 0.0 && offset > -WIDTH);
    assert_eq!(carousel.indicators().active_index(), Some(1));

    scheduler.advance(Duration::from_millis(200));
    assert_eq!(carousel.offset(), Some(-WIDTH));
}

#[test]
fn test_new_request_retargets_in_flight_transition() {
    let scheduler = AnimationScheduler::new();
    let mut carousel = mount(&scheduler, CarouselConfig::new().images(images(4)));

    carousel.advance().unwrap();
    scheduler.advance(Duration::from_millis(100));
    carousel.select(3).unwrap();

    assert_eq!(scheduler.tween_count(), 1);
    assert_eq!(carousel.target_offset(), Some(-3.0 * WIDTH));

    scheduler.advance(Duration::from_millis(300));
    assert_eq!(carousel.offset(), Some(-3.0 * WIDTH));
}

#[test]
fn test_empty_collection_never_moves() {
    let scheduler = AnimationScheduler::new();
    let mut carousel = mount(
        &scheduler,
        CarouselConfig::new().auto_play(true).show_indicators(true),
    );

    swipe(&carousel, -300.0);
    run_for(&scheduler, &mut carousel, Duration::from_millis(10_000));

    assert_eq!(scheduler.timer_count(), 0);
    assert_eq!(carousel.current_index(), None);
    assert_eq!(carousel.select(0), Err(CarouselError::EmptyCollection));
    assert_eq!(carousel.frame().indicators.map(|i| i.len()), Some(0));
}

#[test]
fn test_unmeasured_viewport_gates_everything() {
    let scheduler = AnimationScheduler::new();
    let mut carousel = Carousel::new(
        scheduler.handle(),
        CarouselConfig::new().images(images(3)).auto_play(true),
    );

    swipe(&carousel, -300.0);
    run_for(&scheduler, &mut carousel, Duration::from_millis(10_000));
    assert_eq!(carousel.current_index(), None);
    assert_eq!(scheduler.timer_count(), 0);

    carousel.set_viewport_width(WIDTH);
    assert_eq!(carousel.current_index(), Some(0));
    assert_eq!(carousel.offset(), Some(0.0));
}

#[test]
fn test_reconfiguring_interval_replaces_timer() {
    let scheduler = AnimationScheduler::new();
    let config = CarouselConfig::new()
        .images(images(3))
        .auto_play(true)
        .slide_interval(3000);
    let mut carousel = mount(&scheduler, config.clone());

    run_for(&scheduler, &mut carousel, Duration::from_millis(2000));
    carousel.set_config(config.clone().slide_interval(500));
    assert_eq!(scheduler.timer_count(), 1);

    run_for(&scheduler, &mut carousel, Duration::from_millis(1000));
    assert_eq!(carousel.current_index(), Some(2));

    carousel.set_config(config.slide_interval(-500));
    assert_eq!(carousel.autoplay_state(), AutoplayState::Stopped);
    assert_eq!(scheduler.timer_count(), 0);
}

#[test]
fn test_disabling_autoplay_stops_ticks() {
    let scheduler = AnimationScheduler::new();
    let config = CarouselConfig::new()
        .images(images(3))
        .auto_play(true)
        .slide_interval(1000);
    let mut carousel = mount(&scheduler, config.clone());

    carousel.set_config(config.auto_play(false));
    run_for(&scheduler, &mut carousel, Duration::from_millis(5000));
    assert_eq!(carousel.current_index(), Some(0));

    swipe(&carousel, -100.0);
    carousel.pump();
    assert_eq!(carousel.autoplay_state(), AutoplayState::Stopped);
}

#[test]
fn test_unmount_while_running_leaves_no_timer() {
    let scheduler = AnimationScheduler::new();
    let mut carousel = mount(
        &scheduler,
        CarouselConfig::new()
            .images(images(3))
            .auto_play(true)
            .slide_interval(1000),
    );
    let log = record_changes(&mut carousel);
    let tracker = carousel.pan_tracker();

    carousel.advance().unwrap();
    carousel.unmount();
    assert_eq!(scheduler.timer_count(), 0);
    assert_eq!(scheduler.tween_count(), 0);

    let before = log.lock().unwrap().len();
    drop(tracker);
    run_for(&scheduler, &mut carousel, Duration::from_millis(10_000));
    assert_eq!(log.lock().unwrap().len(), before);
    assert_eq!(carousel.current_index(), None);
}

#[test]
fn test_dropping_carousel_releases_timer() {
    let scheduler = AnimationScheduler::new();
    {
        let _carousel = mount(
            &scheduler,
            CarouselConfig::new().images(images(2)).auto_play(true),
        );
        assert_eq!(scheduler.timer_count(), 1);
    }
    assert_eq!(scheduler.timer_count(), 0);
}

#[test]
fn test_slide_count_changes_restart_autoplay() {
    let scheduler = AnimationScheduler::new();
    let config = CarouselConfig::new()
        .images(images(3))
        .auto_play(true)
        .slide_interval(1000);
    let mut carousel = mount(&scheduler, config.clone());

    run_for(&scheduler, &mut carousel, Duration::from_millis(800));
    carousel.set_config(config.clone().images(images(5)));
    assert_eq!(carousel.autoplay_state(), AutoplayState::Running);
    assert_eq!(carousel.next_autoplay_in(), Some(Duration::from_millis(1000)));

    // The old schedule would have fired at 1000ms
    run_for(&scheduler, &mut carousel, Duration::from_millis(999));
    assert_eq!(carousel.current_index(), Some(0));

    carousel.set_config(config.clone().images(images(0)));
    assert_eq!(carousel.autoplay_state(), AutoplayState::Stopped);
    assert_eq!(scheduler.timer_count(), 0);
    assert_eq!(carousel.current_index(), None);

    carousel.set_config(config.images(images(2)));
    assert_eq!(carousel.autoplay_state(), AutoplayState::Running);
    assert_eq!(scheduler.timer_count(), 1);
    assert_eq!(carousel.current_index(), Some(0));
    assert_eq!(carousel.next_autoplay_in(), Some(Duration::from_millis(1000)));
}
