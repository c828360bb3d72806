use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cadence_keyframes::{
    KeyframeRequest, KeyframeScheduler, RecordingExecutor, SliceBuilder, Timeline, Window,
};

type Log = Arc<Mutex<Vec<&'static str>>>;

fn logger(log: &Log, name: &'static str) -> impl Fn() + Send + Sync + 'static {
    let log = log.clone();
    move || log.lock().unwrap().push(name)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Run every keyframe effect of a request and return the log contents
fn fire_all(request: &KeyframeRequest, log: &Log) -> Vec<&'static str> {
    log.lock().unwrap().clear();
    for keyframe in &request.keyframes {
        (keyframe.effect)();
    }
    log.lock().unwrap().clone()
}

#[test]
fn appends_leave_the_original_untouched() {
    let base = Timeline::new(1.0).append(0.0, 0.4, || {});
    let direct = base.append(0.2, 0.6, || {});
    let sliced = base.append_slices(0.4, 0.6, |b| b.slice(0.0, 0.3, || {}));

    assert_eq!(base.len(), 1);
    assert!(approx(base.segments()[0].duration(), 0.4));
    assert_eq!(direct.len(), 2);
    assert_eq!(sliced.len(), 2);
}

#[test]
fn direct_appends_keep_call_order() {
    let starts = [0.5, 0.1, 0.3, 0.0, 0.9];
    let timeline = starts
        .iter()
        .fold(Timeline::new(1.0), |t, &at| t.append(at, 0.1, || {}));

    assert_eq!(timeline.len(), starts.len());
    for (segment, &at) in timeline.segments().iter().zip(starts.iter()) {
        assert!(approx(segment.start(), at));
    }
}

#[test]
fn slice_offsets_follow_window_start() {
    for &(start, a, b) in &[(0.0, 0.0, 0.3), (5.0, 1.0, 2.0), (2.5, -1.0, 0.5), (1.0, 0.8, 0.2)] {
        let builder = SliceBuilder::new(Window::new(start, 1.0)).slice(a, b, || {});
        let segment = &builder.output()[0];
        assert!(approx(segment.start(), start + a));
        assert!(approx(segment.duration(), b - a));
    }
}

#[test]
fn chained_slices_share_the_window_origin() {
    let builder = SliceBuilder::new(Window::new(2.0, 3.0))
        .slice(0.0, 1.0, || {})
        .slice(2.0, 3.0, || {})
        .slice(1.0, 2.0, || {});

    let starts: Vec<f64> = builder.output().iter().map(|s| s.start()).collect();
    assert_eq!(starts, vec![2.0, 4.0, 3.0]);
}

#[test]
fn run_normalizes_against_total_duration() {
    let mut executor = RecordingExecutor::new();
    Timeline::new(0.7)
        .append(0.2, 0.3, || {})
        .run(&mut executor, None);

    let keyframe = &executor.requests()[0].keyframes[0];
    assert!(approx(keyframe.relative_start, 0.285_714_285_714_285_7));
    assert!(approx(keyframe.relative_duration, 0.428_571_428_571_428_6));
}

#[test]
fn empty_timeline_never_reaches_the_executor() {
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = completions.clone();
    let mut executor = RecordingExecutor::new();

    let handle = Timeline::new(1.0).run(
        &mut executor,
        Some(Box::new(move |_: bool| {
            counter.fetch_add(1, Ordering::SeqCst);
        })),
    );

    assert!(handle.is_none());
    assert!(executor.requests().is_empty());
    assert_eq!(completions.load(Ordering::SeqCst), 0);
}

#[test]
fn unsliced_window_is_never_forwarded() {
    let mut executor = RecordingExecutor::new();
    let handle = Timeline::new(1.0)
        .append_slices(0.0, 1.0, |window| window)
        .run(&mut executor, None);

    assert!(handle.is_none());
    assert!(executor.requests().is_empty());
}

#[test]
fn scenario_two_direct_keyframes() {
    let log = Log::default();
    let mut executor = RecordingExecutor::new();

    Timeline::new(1.0)
        .with_delay(0.1)
        .append(0.0, 0.4, logger(&log, "a"))
        .append(0.2, 0.6, logger(&log, "b"))
        .run(&mut executor, None);

    assert_eq!(executor.requests().len(), 1);
    let request = &executor.requests()[0];
    assert!(approx(request.delay, 0.1));
    assert_eq!(request.keyframes.len(), 2);
    assert!(approx(request.keyframes[0].relative_start, 0.0));
    assert!(approx(request.keyframes[0].relative_duration, 0.4));
    assert!(approx(request.keyframes[1].relative_start, 0.2));
    assert!(approx(request.keyframes[1].relative_duration, 0.6));
    assert_eq!(fire_all(request, &log), vec!["a", "b"]);
}

#[test]
fn scenario_sliced_keyframe() {
    let log = Log::default();
    let mut executor = RecordingExecutor::new();

    Timeline::new(1.0)
        .append_slices(0.0, 0.4, |b| {
            b.slice(0.0, 0.3, logger(&log, "first"))
                .slice(0.3, 0.4, logger(&log, "second"))
        })
        .run(&mut executor, None);

    let request = &executor.requests()[0];
    assert_eq!(request.keyframes.len(), 2);
    assert!(approx(request.keyframes[0].relative_start, 0.0));
    assert!(approx(request.keyframes[0].relative_duration, 0.3));
    assert!(approx(request.keyframes[1].relative_start, 0.3));
    assert!(approx(request.keyframes[1].relative_duration, 0.1));
    assert_eq!(fire_all(request, &log), vec!["first", "second"]);
}

#[test]
fn scenario_late_window_in_long_timeline() {
    let log = Log::default();
    let mut executor = RecordingExecutor::new();

    Timeline::new(7.0)
        .append_slices(5.0, 2.0, |b| {
            b.slice(0.0, 1.0, logger(&log, "x"))
                .slice(1.0, 2.0, logger(&log, "y"))
        })
        .run(&mut executor, None);

    let keyframes = &executor.requests()[0].keyframes;
    assert!(approx(keyframes[0].relative_start, 5.0 / 7.0));
    assert!(approx(keyframes[0].relative_duration, 1.0 / 7.0));
    assert!(approx(keyframes[1].relative_start, 6.0 / 7.0));
    assert!(approx(keyframes[1].relative_duration, 1.0 / 7.0));
}

#[test]
fn run_is_repeatable() {
    let timeline = Timeline::new(2.0)
        .append(0.5, 0.5, || {})
        .append(1.0, 1.0, || {});
    let mut executor = RecordingExecutor::new();

    assert_eq!(timeline.run(&mut executor, None), Some(0));
    assert_eq!(timeline.run(&mut executor, None), Some(1));

    let [first, second] = executor.requests() else {
        panic!("expected two requests");
    };
    for (a, b) in first.keyframes.iter().zip(second.keyframes.iter()) {
        assert_eq!(a.relative_start, b.relative_start);
        assert_eq!(a.relative_duration, b.relative_duration);
    }
    assert_eq!(timeline.len(), 2);
}

#[test]
fn scheduler_plays_crossfade_to_completion() {
    let log = Log::default();
    let finished = Arc::new(Mutex::new(None));
    let slot = finished.clone();
    let mut scheduler = KeyframeScheduler::new();

    let id = Timeline::new(0.7)
        .append(0.2, 0.3, logger(&log, "label-out"))
        .append(0.3, 0.3, logger(&log, "label-in"))
        .run(
            &mut scheduler,
            Some(Box::new(move |done: bool| {
                *slot.lock().unwrap() = Some(done);
            })),
        )
        .flatten()
        .expect("valid timeline is scheduled");

    scheduler.tick(0.25);
    assert_eq!(*log.lock().unwrap(), vec!["label-out"]);
    assert!(scheduler.is_running(id));

    scheduler.tick(0.5);
    assert_eq!(*log.lock().unwrap(), vec!["label-out", "label-in"]);
    assert!(!scheduler.has_active_animations());
    assert_eq!(*finished.lock().unwrap(), Some(true));
}

#[test]
fn scheduler_plays_sliced_windows() {
    let log = Log::default();
    let mut scheduler = KeyframeScheduler::new();

    Timeline::new(7.0)
        .append_slices(5.0, 2.0, |b| {
            b.slice(0.0, 1.0, logger(&log, "out-dim"))
                .slice(1.0, 2.0, logger(&log, "out-hide"))
        })
        .append_slices(5.0, 2.0, |b| {
            b.slice(0.0, 1.0, logger(&log, "in-dim"))
                .slice(1.0, 2.0, logger(&log, "in-show"))
        })
        .run(&mut scheduler, None);

    scheduler.tick(5.5);
    assert_eq!(*log.lock().unwrap(), vec!["out-dim", "in-dim"]);

    scheduler.tick(1.5);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["out-dim", "in-dim", "out-hide", "in-show"]
    );
    assert!(!scheduler.has_active_animations());
}

#[test]
fn scheduler_rejects_zero_duration_timeline() {
    let finished = Arc::new(Mutex::new(None));
    let slot = finished.clone();
    let mut scheduler = KeyframeScheduler::new();

    let handle = Timeline::new(0.0).append(0.0, 1.0, || {}).run(
        &mut scheduler,
        Some(Box::new(move |done: bool| {
            *slot.lock().unwrap() = Some(done);
        })),
    );

    assert_eq!(handle, Some(None));
    assert_eq!(*finished.lock().unwrap(), Some(false));
    assert_eq!(scheduler.animation_count(), 0);
}
