//! Refresh coordination: which parts of the overview need recomputation.
//!
//! The overview has three independently refreshable aspects -- the rasterized
//! **content**, the cursor/viewport **indicators**, and external
//! **annotations** (search matches, diagnostics, VCS hunks). A burst of host
//! events (rapid cursor movement, rapid edits) should collapse to at most one
//! recomputation per aspect, and a pure cursor move must never re-rasterize
//! the buffer.
//!
//! Triggers are plain data. The host observes an event, calls
//! [`MapSession::note`](crate::MapSession::note), and at its next convenient
//! point (end of an event-loop turn) calls
//! [`MapSession::sync`](crate::MapSession::sync), which drains the dirty set
//! here. Dirty marks coalesce in between; only the latest state matters.
//!
//! Each aspect remembers the key it was last computed from (content
//! fingerprint, cursor+viewport tuple, annotation data version), so a drain
//! skips aspects whose inputs have not actually changed even if a trigger
//! implicated them.

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// External events the coordinator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Buffer text changed: everything is implicated, because a new scale
    /// cache moves indicators and annotations too.
    TextChanged,
    /// Cursor moved without editing.
    CursorMoved,
    /// Viewport scrolled without editing.
    Scrolled,
    /// The overview target geometry changed (host window resize).
    Resized,
    /// An external annotation source published new data.
    AnnotationsChanged,
}

/// Dirty flags for the three aspects, drained in dependency order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dirty {
    pub content: bool,
    pub indicators: bool,
    pub annotations: bool,
}

/// Which aspects a drain actually recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub content: bool,
    pub indicators: bool,
    pub annotations: bool,
}

/// Host-side collaborator feeding the overview.
///
/// This is the interface boundary of the engine: window management, styling,
/// and the actual sourcing of annotations live behind it.
pub trait OverviewSource {
    /// Whether the display surface still exists. A closed surface turns a
    /// drain into a no-op (the deferred recomputation outlived its target).
    fn is_open(&self) -> bool;

    /// Current buffer lines, or `None` when the underlying resource has
    /// disappeared. Zero lines and `None` both degrade to an empty overview.
    fn lines(&self) -> Option<Vec<String>>;

    /// 1-based cursor line.
    fn cursor_line(&self) -> usize;

    /// 1-based first and last visible source lines.
    fn view_span(&self) -> (usize, usize);

    /// Monotonic version of the annotation data.
    fn annotations_version(&self) -> u64;

    /// Current annotation marks.
    fn annotations(&self) -> Vec<Annotation>;
}

/// One external mark on a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    /// 1-based source line the mark sits on.
    pub source_line: usize,
    pub kind: AnnotationKind,
}

/// What produced an annotation. [`AnnotationKind::priority`] decides which
/// mark wins when several source lines fold into the same rendered row;
/// there is no other ordering between kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    HunkAdded,
    HunkChanged,
    HunkDeleted,
    Search,
    Diagnostic,
}

impl AnnotationKind {
    /// Higher wins within a rendered row.
    pub fn priority(self) -> u8 {
        match self {
            AnnotationKind::HunkAdded | AnnotationKind::HunkChanged => 1,
            AnnotationKind::HunkDeleted => 2,
            AnnotationKind::Search => 3,
            AnnotationKind::Diagnostic => 4,
        }
    }
}

/// Cursor and viewport positions in rendered-row coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorFrame {
    /// Rendered row containing the cursor line.
    pub cursor_row: usize,
    /// First rendered row of the viewport.
    pub view_top: usize,
    /// Last rendered row of the viewport.
    pub view_bottom: usize,
}

/// One annotation mark folded onto a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMark {
    pub rendered_row: usize,
    pub kind: AnnotationKind,
}

/// Annotations folded onto rendered rows, one winning mark per row, sorted
/// by row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationFrame {
    pub marks: Vec<RowMark>,
}

/// Fingerprint of buffer content, cheap to compare across drains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ContentKey(u64);

impl ContentKey {
    pub(crate) fn of(lines: &[String]) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_usize(lines.len());
        for line in lines {
            hasher.write(line.as_bytes());
            hasher.write_u8(b'\n');
        }
        Self(hasher.finish())
    }
}

/// Per-aspect dirty flags and "last computed from" keys.
///
/// Pure bookkeeping: the session performs the actual recomputation and asks
/// this struct whether each aspect's inputs changed.
#[derive(Debug, Default)]
pub(crate) struct RefreshCoordinator {
    dirty: Dirty,
    content_key: Option<ContentKey>,
    indicator_key: Option<(usize, usize, usize)>,
    annotation_version: Option<u64>,
}

impl RefreshCoordinator {
    /// Mark the aspects implicated by a trigger. Repeated triggers coalesce.
    pub(crate) fn note(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::TextChanged | Trigger::Resized => {
                self.dirty.content = true;
                self.dirty.indicators = true;
                self.dirty.annotations = true;
            },
            Trigger::CursorMoved | Trigger::Scrolled => {
                self.dirty.indicators = true;
            },
            Trigger::AnnotationsChanged => {
                self.dirty.annotations = true;
            },
        }
        // A resize changes the target geometry, so the cached content key no
        // longer proves the frame is current.
        if trigger == Trigger::Resized {
            self.content_key = None;
            self.indicator_key = None;
            self.annotation_version = None;
        }
    }

    /// Take and clear the pending dirty set.
    pub(crate) fn take_dirty(&mut self) -> Dirty {
        std::mem::take(&mut self.dirty)
    }

    /// Record the content key; returns whether it differs from the last
    /// computed one.
    pub(crate) fn content_changed(&mut self, key: ContentKey) -> bool {
        let changed = self.content_key != Some(key);
        self.content_key = Some(key);
        changed
    }

    /// Record the indicator key (cursor, view top, view bottom); returns
    /// whether it changed.
    pub(crate) fn indicators_changed(&mut self, cursor: usize, top: usize, bottom: usize) -> bool {
        let key = (cursor, top, bottom);
        let changed = self.indicator_key != Some(key);
        self.indicator_key = Some(key);
        changed
    }

    /// Record the annotation data version; returns whether it changed.
    pub(crate) fn annotations_changed(&mut self, version: u64) -> bool {
        let changed = self.annotation_version != Some(version);
        self.annotation_version = Some(version);
        changed
    }

    /// Forget all keys, forcing the next drain to recompute everything it
    /// touches. Used when the content went away.
    pub(crate) fn forget_keys(&mut self) {
        self.content_key = None;
        self.indicator_key = None;
        self.annotation_version = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_move_only_dirties_indicators() {
        let mut coordinator = RefreshCoordinator::default();
        coordinator.note(Trigger::CursorMoved);
        assert_eq!(
            coordinator.take_dirty(),
            Dirty {
                content: false,
                indicators: true,
                annotations: false,
            }
        );
    }

    #[test]
    fn text_change_dirties_everything() {
        let mut coordinator = RefreshCoordinator::default();
        coordinator.note(Trigger::TextChanged);
        let dirty = coordinator.take_dirty();
        assert!(dirty.content && dirty.indicators && dirty.annotations);
    }

    #[test]
    fn triggers_coalesce_until_drained() {
        let mut coordinator = RefreshCoordinator::default();
        coordinator.note(Trigger::CursorMoved);
        coordinator.note(Trigger::CursorMoved);
        coordinator.note(Trigger::Scrolled);
        let dirty = coordinator.take_dirty();
        assert!(dirty.indicators && !dirty.content);
        // Drained: nothing left pending.
        assert_eq!(coordinator.take_dirty(), Dirty::default());
    }

    #[test]
    fn content_key_detects_change_and_sameness() {
        let mut coordinator = RefreshCoordinator::default();
        let a = ContentKey::of(&["one".into(), "two".into()]);
        let b = ContentKey::of(&["one".into(), "two!".into()]);
        assert!(coordinator.content_changed(a));
        assert!(!coordinator.content_changed(a));
        assert!(coordinator.content_changed(b));
    }

    #[test]
    fn content_key_distinguishes_line_boundaries() {
        let joined = ContentKey::of(&["ab".into()]);
        let split = ContentKey::of(&["a".into(), "b".into()]);
        assert_ne!(joined, split);
    }

    #[test]
    fn resize_forgets_cached_keys() {
        let mut coordinator = RefreshCoordinator::default();
        let key = ContentKey::of(&["x".into()]);
        assert!(coordinator.content_changed(key));
        coordinator.note(Trigger::Resized);
        assert!(coordinator.content_changed(key));
    }

    #[test]
    fn annotation_priorities_rank_diagnostics_highest() {
        assert!(AnnotationKind::Diagnostic.priority() > AnnotationKind::Search.priority());
        assert!(AnnotationKind::Search.priority() > AnnotationKind::HunkDeleted.priority());
        assert!(AnnotationKind::HunkDeleted.priority() > AnnotationKind::HunkAdded.priority());
        // Added and changed hunks are peers; neither displaces the other.
        assert_eq!(
            AnnotationKind::HunkAdded.priority(),
            AnnotationKind::HunkChanged.priority()
        );
    }
}
