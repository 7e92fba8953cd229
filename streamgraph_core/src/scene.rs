// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained scene and its diff protocol.

use hashbrown::HashMap;
use kurbo::Rect;

use crate::mark::{Mark, MarkId, MarkPayload};

/// A change to the retained scene, produced by [`Scene::tick`], [`Scene::replace`], or
/// [`Scene::clear`].
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark that was not present in the previous frame.
    Enter {
        /// Mark id.
        id: MarkId,
        /// Paint-order hint.
        z_index: i32,
        /// Geometric bounds, if known.
        bounds: Option<Rect>,
        /// The new payload.
        new: Box<MarkPayload>,
    },
    /// A mark whose payload or z-index changed.
    Update {
        /// Mark id.
        id: MarkId,
        /// Previous paint-order hint.
        old_z_index: i32,
        /// New paint-order hint.
        new_z_index: i32,
        /// Previous payload.
        old: Box<MarkPayload>,
        /// New payload.
        new: Box<MarkPayload>,
    },
    /// A mark that is no longer present.
    Exit {
        /// Mark id.
        id: MarkId,
        /// Bounds of the removed payload, if known.
        bounds: Option<Rect>,
        /// The removed payload.
        old: Box<MarkPayload>,
    },
}

impl MarkDiff {
    /// Returns the id of the mark this diff refers to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}

/// Retained marks of the last applied frame.
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, (i32, MarkPayload)>,
    generation: u64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retained marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Number of frames applied so far (ticks, replaces, and clears).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Looks up a retained mark.
    pub fn get(&self, id: MarkId) -> Option<(i32, &MarkPayload)> {
        self.marks.get(&id).map(|(z, p)| (*z, p))
    }

    /// Returns retained marks in paint order (`(z_index, id)`).
    pub fn sorted(&self) -> Vec<(MarkId, i32, &MarkPayload)> {
        let mut out: Vec<_> = self
            .marks
            .iter()
            .map(|(id, (z, payload))| (*id, *z, payload))
            .collect();
        out.sort_by_key(|(id, z, _)| (*z, *id));
        out
    }

    /// Applies a new frame, diffing it against the retained one.
    ///
    /// Marks with an id already present and an identical payload/z-index produce no diff. If
    /// `marks` repeats an id, the last occurrence wins.
    ///
    /// Diff order: exits (by id), then enters/updates in input order.
    pub fn tick(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let mut next: HashMap<MarkId, (i32, MarkPayload)> = HashMap::new();
        let mut order: Vec<MarkId> = Vec::new();
        for mark in marks {
            if next.insert(mark.id, (mark.z_index, mark.payload)).is_some() {
                tracing::warn!(id = mark.id.0, "duplicate mark id in frame, keeping the last");
            } else {
                order.push(mark.id);
            }
        }

        let mut exits: Vec<MarkId> = self
            .marks
            .keys()
            .filter(|id| !next.contains_key(*id))
            .copied()
            .collect();
        exits.sort();

        let mut diffs = Vec::new();
        for id in exits {
            if let Some((_z, old)) = self.marks.remove(&id) {
                diffs.push(MarkDiff::Exit {
                    id,
                    bounds: old.bounds(),
                    old: Box::new(old),
                });
            }
        }

        for id in order {
            let Some((z_index, new)) = next.remove(&id) else {
                continue;
            };
            match self.marks.get_mut(&id) {
                Some(slot) => {
                    if slot.0 != z_index || slot.1 != new {
                        let (old_z_index, old) =
                            core::mem::replace(slot, (z_index, new.clone()));
                        diffs.push(MarkDiff::Update {
                            id,
                            old_z_index,
                            new_z_index: z_index,
                            old: Box::new(old),
                            new: Box::new(new),
                        });
                    }
                }
                None => {
                    diffs.push(MarkDiff::Enter {
                        id,
                        z_index,
                        bounds: new.bounds(),
                        new: Box::new(new.clone()),
                    });
                    self.marks.insert(id, (z_index, new));
                }
            }
        }

        self.generation += 1;
        diffs
    }

    /// Discards every retained mark and enters `marks` from scratch.
    ///
    /// Unlike [`Scene::tick`], unchanged marks are reported as an exit followed by an enter.
    pub fn replace(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let mut diffs = self.clear();
        diffs.extend(self.tick(marks));
        diffs
    }

    /// Removes every retained mark.
    pub fn clear(&mut self) -> Vec<MarkDiff> {
        let mut ids: Vec<MarkId> = self.marks.keys().copied().collect();
        ids.sort();
        let mut diffs = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some((_z, old)) = self.marks.remove(&id) {
                diffs.push(MarkDiff::Exit {
                    id,
                    bounds: old.bounds(),
                    old: Box::new(old),
                });
            }
        }
        self.generation += 1;
        diffs
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use peniko::color::palette::css;

    use super::*;

    fn rect_mark(id: u64, x: f64) -> Mark {
        Mark::builder(MarkId(id))
            .rect(Rect::new(x, 0.0, x + 1.0, 1.0))
            .fill(css::BLACK)
            .build()
    }

    #[test]
    fn tick_reports_enter_update_and_exit() {
        let mut scene = Scene::new();
        let diffs = scene.tick([rect_mark(1, 0.0), rect_mark(2, 0.0)]);
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(|d| matches!(d, MarkDiff::Enter { .. })));

        let diffs = scene.tick([rect_mark(1, 0.0), rect_mark(3, 0.0), rect_mark(2, 5.0)]);
        assert_eq!(diffs.len(), 2, "unchanged mark 1 emits nothing: {diffs:?}");
        assert!(matches!(diffs[0], MarkDiff::Enter { id: MarkId(3), .. }));
        assert!(matches!(diffs[1], MarkDiff::Update { id: MarkId(2), .. }));

        let diffs = scene.tick([rect_mark(3, 0.0)]);
        let exits: Vec<_> = diffs.iter().map(MarkDiff::id).collect();
        assert_eq!(exits, vec![MarkId(1), MarkId(2)]);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn replace_exits_everything_before_entering() {
        let mut scene = Scene::new();
        scene.tick([rect_mark(1, 0.0)]);
        let diffs = scene.replace([rect_mark(1, 0.0)]);
        assert!(matches!(diffs[0], MarkDiff::Exit { id: MarkId(1), .. }));
        assert!(matches!(diffs[1], MarkDiff::Enter { id: MarkId(1), .. }));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn clear_empties_the_scene() {
        let mut scene = Scene::new();
        scene.tick([rect_mark(1, 0.0), rect_mark(2, 1.0)]);
        let diffs = scene.clear();
        assert_eq!(diffs.len(), 2);
        assert!(scene.is_empty());
        assert_eq!(scene.generation(), 2);
    }

    #[test]
    fn sorted_orders_by_z_then_id() {
        let mut scene = Scene::new();
        let low = Mark::builder(MarkId(9))
            .z_index(-1)
            .rect(Rect::ZERO)
            .build();
        scene.tick([rect_mark(2, 0.0), rect_mark(1, 0.0), low]);
        let ids: Vec<_> = scene.sorted().iter().map(|(id, _, _)| id.0).collect();
        assert_eq!(ids, vec![9, 1, 2]);
    }
}
