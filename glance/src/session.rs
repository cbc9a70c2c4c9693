//! Per-overview session state.
//!
//! A [`MapSession`] owns everything one overview instance needs: the resolved
//! [`EncodeOptions`], the last rendered frame (rows plus [`ScaleCache`]), the
//! indicator and annotation frames, and the refresh bookkeeping. All
//! operations take the session explicitly, so several overviews (one per
//! window, say) coexist without any shared state.
//!
//! Two usage styles:
//!
//! - **Coordinated**: the host forwards events via [`MapSession::note`] and
//!   drains them with [`MapSession::sync`] once per event-loop turn. Bursts
//!   of triggers collapse to one recomputation per aspect.
//! - **Direct**: call [`MapSession::rerasterize`] with fresh lines and read
//!   the frame back. Useful for one-shot rendering (the CLI does this).

use crate::{
    encode::{encode, encode_mask, EncodeOptions, Rendered},
    mask::Mask,
    refresh::{
        Annotation, AnnotationFrame, AnnotationKind, ContentKey, IndicatorFrame, OverviewSource,
        RefreshCoordinator, RefreshOutcome, RowMark, Trigger,
    },
    scale::ScaleCache,
};
use rustc_hash::FxHashMap;
use tracing::debug;

/// One overview instance: options, last frames, refresh state.
#[derive(Debug)]
pub struct MapSession {
    options: EncodeOptions,
    rendered: Rendered,
    indicators: IndicatorFrame,
    annotations: AnnotationFrame,
    refresh: RefreshCoordinator,
}

impl MapSession {
    pub fn new(options: EncodeOptions) -> Self {
        Self {
            options,
            rendered: Rendered::default(),
            indicators: IndicatorFrame::default(),
            annotations: AnnotationFrame::default(),
            refresh: RefreshCoordinator::default(),
        }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Replace the options (new geometry or symbol table). Forces full
    /// recomputation on the next drain.
    pub fn set_options(&mut self, options: EncodeOptions) {
        self.options = options;
        self.refresh.forget_keys();
        self.refresh.note(Trigger::Resized);
    }

    /// Last rendered frame. Rows and scale cache always correspond.
    pub fn rendered(&self) -> &Rendered {
        &self.rendered
    }

    pub fn scale(&self) -> &ScaleCache {
        &self.rendered.scale
    }

    pub fn indicators(&self) -> &IndicatorFrame {
        &self.indicators
    }

    pub fn annotations(&self) -> &AnnotationFrame {
        &self.annotations
    }

    /// Map a 1-based source line to its rendered row in the last frame.
    pub fn source_to_rendered(&self, source_line: usize) -> usize {
        self.rendered.scale.source_to_rendered(source_line)
    }

    /// Map a 1-based rendered row back to a source line in the last frame.
    pub fn rendered_to_source(&self, rendered_row: usize) -> usize {
        self.rendered.scale.rendered_to_source(rendered_row)
    }

    /// Direct path: rasterize fresh lines now and store the frame.
    pub fn rerasterize<S: AsRef<str>>(&mut self, lines: &[S]) -> &Rendered {
        self.rendered = encode(lines, &self.options);
        self.refresh.forget_keys();
        &self.rendered
    }

    /// Direct path over raw byte lines (invalid UTF-8 lines degrade to
    /// whole-byte classification).
    pub fn rerasterize_bytes<B: AsRef<[u8]>>(&mut self, lines: &[B]) -> &Rendered {
        let mask = Mask::from_byte_lines(lines, self.options.tab_width());
        self.rendered = encode_mask(&mask, &self.options);
        self.refresh.forget_keys();
        &self.rendered
    }

    /// Record a host event. Cheap; call as often as events arrive.
    pub fn note(&mut self, trigger: Trigger) {
        self.refresh.note(trigger);
    }

    /// Drain pending triggers, recomputing only the aspects whose inputs
    /// actually changed, in dependency order: content, then indicators, then
    /// annotations.
    ///
    /// A closed surface makes this a no-op (pending work is dropped).
    /// Unavailable or empty content degrades to an empty frame and skips the
    /// dependent aspects -- an expected state, not an error.
    pub fn sync<S: OverviewSource>(&mut self, source: &S) -> RefreshOutcome {
        let mut outcome = RefreshOutcome::default();

        if !source.is_open() {
            self.refresh.take_dirty();
            debug!("surface closed, dropping pending refresh");
            return outcome;
        }

        let dirty = self.refresh.take_dirty();

        if dirty.content {
            let lines = source.lines().unwrap_or_default();
            if lines.is_empty() {
                self.degrade_to_empty();
                outcome.content = true;
                return outcome;
            }
            let key = ContentKey::of(&lines);
            if self.refresh.content_changed(key) {
                self.rendered = encode(&lines, &self.options);
                outcome.content = true;
            }
        }

        // A fresh scale cache moves rendered-row positions even when the
        // cursor and annotations themselves did not change, so a content
        // recomputation forces the dependent aspects through.
        if dirty.indicators || outcome.content {
            let cursor = source.cursor_line();
            let (top, bottom) = source.view_span();
            if self.refresh.indicators_changed(cursor, top, bottom) || outcome.content {
                self.indicators = self.place_indicators(cursor, top, bottom);
                outcome.indicators = true;
            }
        }

        if dirty.annotations || outcome.content {
            let version = source.annotations_version();
            if self.refresh.annotations_changed(version) || outcome.content {
                self.annotations = fold_annotations(&source.annotations(), &self.rendered.scale);
                outcome.annotations = true;
            }
        }

        outcome
    }

    fn place_indicators(&self, cursor: usize, top: usize, bottom: usize) -> IndicatorFrame {
        let scale = &self.rendered.scale;
        let view_top = scale.source_to_rendered(top.min(bottom));
        let view_bottom = scale.source_to_rendered(top.max(bottom));
        IndicatorFrame {
            cursor_row: scale.source_to_rendered(cursor),
            view_top,
            view_bottom,
        }
    }

    fn degrade_to_empty(&mut self) {
        debug!("source content unavailable, degrading to empty overview");
        self.rendered = Rendered::default();
        self.indicators = IndicatorFrame::default();
        self.annotations = AnnotationFrame::default();
        self.refresh.forget_keys();
    }
}

/// Fold per-line annotations onto rendered rows; when several lines land in
/// one row the highest-priority kind wins.
fn fold_annotations(annotations: &[Annotation], scale: &ScaleCache) -> AnnotationFrame {
    let mut best: FxHashMap<usize, AnnotationKind> = FxHashMap::default();
    for annotation in annotations {
        let row = scale.source_to_rendered(annotation.source_line);
        best.entry(row)
            .and_modify(|kind| {
                if annotation.kind.priority() > kind.priority() {
                    *kind = annotation.kind;
                }
            })
            .or_insert(annotation.kind);
    }
    let mut marks: Vec<RowMark> = best
        .into_iter()
        .map(|(rendered_row, kind)| RowMark { rendered_row, kind })
        .collect();
    marks.sort_by_key(|mark| mark.rendered_row);
    AnnotationFrame { marks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolTable;

    fn session() -> MapSession {
        MapSession::new(
            EncodeOptions::builder()
                .max_rows(3)
                .max_cols(2)
                .symbols(SymbolTable::block_1x2())
                .build(),
        )
    }

    #[test]
    fn direct_rerasterize_updates_scale_atomically() {
        let mut session = session();
        let rendered = session.rerasterize(&["aaaaa", " b b", "", " d d", "e e"]);
        assert_eq!(rendered.rows, vec!["██", "▌▌", "█ "]);
        assert_eq!(session.scale().rendered_rows, 3);
        assert_eq!(session.source_to_rendered(5), 3);
        assert_eq!(session.rendered_to_source(3), 5);
    }

    #[test]
    fn byte_path_matches_text_path_for_valid_utf8() {
        let mut text_session = session();
        let mut byte_session = session();
        let lines = ["fn x()", "  y;", "}"];
        let bytes: Vec<&[u8]> = lines.iter().map(|l| l.as_bytes()).collect();
        let a = text_session.rerasterize(&lines).clone();
        let b = byte_session.rerasterize_bytes(&bytes).clone();
        assert_eq!(a, b);
    }

    #[test]
    fn annotations_fold_to_highest_priority() {
        // 10 lines into 3 rendered rows: lines 1..=4 share row 1.
        let scale = ScaleCache {
            source_rows: 10,
            rescaled_rows: 3,
            resolution_row: 1,
            rendered_rows: 3,
        };
        let frame = fold_annotations(
            &[
                Annotation {
                    source_line: 1,
                    kind: AnnotationKind::HunkAdded,
                },
                Annotation {
                    source_line: 2,
                    kind: AnnotationKind::Diagnostic,
                },
                Annotation {
                    source_line: 9,
                    kind: AnnotationKind::Search,
                },
            ],
            &scale,
        );
        assert_eq!(
            frame.marks,
            vec![
                RowMark {
                    rendered_row: 1,
                    kind: AnnotationKind::Diagnostic,
                },
                RowMark {
                    rendered_row: 3,
                    kind: AnnotationKind::Search,
                },
            ]
        );
    }

    #[test]
    fn new_session_maps_everything_to_row_one() {
        let session = session();
        assert_eq!(session.source_to_rendered(42), 1);
        assert_eq!(session.rendered_to_source(42), 1);
    }
}
