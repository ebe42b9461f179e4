// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`RenderBackend`] that records what it is asked to do.

extern crate std;

use std::string::String;
use std::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::Color;

use crate::RenderBackend;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlacedText {
    pub(crate) text: String,
    pub(crate) anchor: Point,
    pub(crate) font_size: f64,
    pub(crate) color: Color,
}

/// Renders every point of font size as two device pixels of height.
#[derive(Debug)]
pub(crate) struct RecordingBackend {
    page_height_px: f64,
    draws: usize,
    placed: usize,
    slots: Vec<Option<PlacedText>>,
    map_region: Option<Rect>,
}

impl RecordingBackend {
    pub(crate) fn new(page_height_px: f64) -> Self {
        Self {
            page_height_px,
            draws: 0,
            placed: 0,
            slots: Vec::new(),
            map_region: None,
        }
    }

    pub(crate) fn texts(&self) -> Vec<&PlacedText> {
        self.slots.iter().flatten().collect()
    }

    pub(crate) fn placed_count(&self) -> usize {
        self.placed
    }

    pub(crate) fn draw_count(&self) -> usize {
        self.draws
    }

    pub(crate) fn map_region(&self) -> Option<Rect> {
        self.map_region
    }
}

impl RenderBackend for RecordingBackend {
    type TextHandle = usize;

    fn page_height_px(&self) -> f64 {
        self.page_height_px
    }

    fn is_drawn(&self) -> bool {
        self.draws > 0
    }

    fn draw(&mut self) {
        self.draws += 1;
    }

    fn place_text(&mut self, text: &str, anchor: Point, font_size: f64, color: Color) -> usize {
        self.placed += 1;
        self.slots.push(Some(PlacedText {
            text: text.into(),
            anchor,
            font_size,
            color,
        }));
        self.slots.len() - 1
    }

    fn text_bounds_px(&self, handle: &usize) -> Option<Size> {
        if !self.is_drawn() {
            return None;
        }
        let placed = self.slots.get(*handle)?.as_ref()?;
        let width = 1.2 * placed.font_size * placed.text.chars().count() as f64;
        Some(Size::new(width, 2.0 * placed.font_size))
    }

    fn remove_text(&mut self, handle: usize) {
        if let Some(slot) = self.slots.get_mut(handle) {
            *slot = None;
        }
    }

    fn move_map_region(&mut self, rect: Rect) {
        self.map_region = Some(rect);
    }
}
