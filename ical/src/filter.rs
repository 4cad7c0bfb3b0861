// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Selecting sub-components of a calendar by their end time.

use std::mem;
use std::str::FromStr;

use jiff::Timestamp;
use strum::IntoEnumIterator;

use crate::component::Component;
use crate::error::ParseOptionError;

/// Which direct children of a calendar to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum FilterMode {
    /// Keep everything.
    None,

    /// Keep the child that ends first, among those not yet ended.
    #[default]
    Next,

    /// Keep the child that ends last, among those already ended.
    Last,

    /// Keep every child not yet ended.
    Future,

    /// Keep every child already ended.
    Past,
}

impl FromStr for FilterMode {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|mode| mode.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOptionError::new("filter", s, "none, next, last, future, past"))
    }
}

/// Filter the direct children of `root` against `now`, in place.
///
/// Children without a computable end instant always stay and never take part
/// in the `next`/`last` selection. On equal end instants the first child
/// seen is kept. Grandchildren are left untouched.
pub fn filter(root: &mut Component, mode: FilterMode, now: Timestamp) {
    if mode == FilterMode::None {
        return;
    }

    let children = mem::take(&mut root.components);
    let mut slots: Vec<Option<Component>> = Vec::with_capacity(children.len());
    let mut best: Option<(usize, Timestamp)> = None;

    for child in children {
        let Some(end) = child.end_instant() else {
            slots.push(Some(child));
            continue;
        };

        let keep = match mode {
            FilterMode::None => true,
            FilterMode::Future => end >= now,
            FilterMode::Past => end <= now,
            FilterMode::Next | FilterMode::Last => {
                let qualifies = if mode == FilterMode::Next {
                    end >= now
                } else {
                    end <= now
                };
                let better = best.is_none_or(|(_, best_end)| {
                    if mode == FilterMode::Next {
                        end < best_end
                    } else {
                        end > best_end
                    }
                });

                if qualifies && better {
                    if let Some(slot) = best.and_then(|(i, _)| slots.get_mut(i)) {
                        *slot = None;
                    }
                    best = Some((slots.len(), end));
                    true
                } else {
                    false
                }
            }
        };

        if keep {
            slots.push(Some(child));
        }
    }

    root.components = slots.into_iter().flatten().collect();
    tracing::debug!(%mode, kept = root.components.len(), "filtered components");
}
