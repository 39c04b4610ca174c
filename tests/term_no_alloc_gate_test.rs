use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use blockfall::core::{GameSession, GameSnapshot};
use blockfall::term::{encode_diff_into, FrameBuffer, GameView, RowFlashes, Viewport};
use blockfall::types::{ClearedRow, FlashHint, GameCommand, RowsCleared};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    // Only the measuring thread counts; harness threads allocate freely.
    static COUNT_THIS_THREAD: Cell<bool> = const { Cell::new(false) };
}

fn counting() -> bool {
    COUNT_ENABLED.load(Ordering::Relaxed)
        && COUNT_THIS_THREAD.try_with(Cell::get).unwrap_or(false)
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if counting() {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if counting() {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_THIS_THREAD.with(|flag| flag.set(true));
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    COUNT_THIS_THREAD.with(|flag| flag.set(false));
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn term_frame_path_is_allocation_free_after_warmup() {
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    let mut session = GameSession::default();
    session.apply_command(GameCommand::Start);
    session.drain_events().for_each(drop);

    let mut flashes = RowFlashes::new();
    flashes.push(
        &RowsCleared {
            rows: vec![ClearedRow {
                index: 19,
                cells: vec![1; 12],
            }],
            hint: FlashHint::default(),
        },
        0,
    );

    // Warm-up (resize/initial buffers).
    let mut snap = GameSnapshot::default();
    session.snapshot_into(&mut snap);
    view.render_into(&snap, &flashes, 0, viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for i in 0..200u64 {
            let command = if i % 2 == 0 {
                GameCommand::MoveLeft
            } else {
                GameCommand::MoveRight
            };
            session.apply_command(command);
            session.snapshot_into(&mut snap);
            view.render_into(&snap, &flashes, i, viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}

#[test]
fn diff_encoding_is_allocation_free_after_warmup() {
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let flashes = RowFlashes::new();
    let mut prev = FrameBuffer::new(viewport.width, viewport.height);
    let mut next = FrameBuffer::new(viewport.width, viewport.height);
    let mut out = Vec::with_capacity(64 * 1024);

    let mut session = GameSession::default();
    session.apply_command(GameCommand::Start);
    session.drain_events().for_each(drop);

    let mut snap = GameSnapshot::default();
    session.snapshot_into(&mut snap);
    view.render_into(&snap, &flashes, 0, viewport, &mut prev);
    session.apply_command(GameCommand::MoveLeft);
    session.snapshot_into(&mut snap);
    view.render_into(&snap, &flashes, 0, viewport, &mut next);
    encode_diff_into(&prev, &next, &mut out).unwrap();

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            out.clear();
            encode_diff_into(&prev, &next, &mut out).unwrap();
            std::mem::swap(&mut prev, &mut next);
        }
    });

    assert!(!out.is_empty());
    assert_eq!(allocs, 0);
}
