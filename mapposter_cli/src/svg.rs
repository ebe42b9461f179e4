// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An SVG page implementing [`RenderBackend`].

use std::fmt::Write as _;

use kurbo::{Affine, BezPath, Point, Rect, Size};
use mapposter_layout::{PageGeometry, RenderBackend};
use mapposter_text::{FontFamily, FontWeight, POINTS_PER_INCH, TextMeasurer, TextStyle};
use peniko::Color;

use crate::streets::StreetGraph;

/// How streets are stroked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StreetStyle {
    pub(crate) color: Color,
    /// Stroke width in points.
    pub(crate) width_pt: f64,
}

#[derive(Clone, Debug)]
struct SvgText {
    text: String,
    anchor: Point,
    font_size: f64,
    color: Color,
}

#[derive(Clone, Debug)]
struct MapLayer {
    region: Rect,
    /// Street path in map-local units: `[-1, 1]` spans the fetch radius.
    path: BezPath,
    style: StreetStyle,
}

/// One poster page rendered to SVG.
///
/// Text extents come from the configured [`TextMeasurer`], scaled to device pixels, and
/// only become available after the first [`RenderBackend::draw`].
pub(crate) struct SvgBackend<M> {
    page_px: Size,
    px_per_pt: f64,
    measurer: M,
    font_family: FontFamily,
    font_weight: FontWeight,
    background: Color,
    map: Option<MapLayer>,
    texts: Vec<Option<SvgText>>,
    draws: usize,
}

impl<M> std::fmt::Debug for SvgBackend<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgBackend")
            .field("page_px", &self.page_px)
            .field("draws", &self.draws)
            .finish_non_exhaustive()
    }
}

impl<M: TextMeasurer> SvgBackend<M> {
    pub(crate) fn new(geometry: &PageGeometry, dpi: f64, measurer: M) -> Self {
        Self {
            page_px: geometry.page_size_px(dpi),
            px_per_pt: dpi / POINTS_PER_INCH,
            measurer,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            background: Color::WHITE,
            map: None,
            texts: Vec::new(),
            draws: 0,
        }
    }

    pub(crate) fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Sets the caption font, used both for measuring and in the SVG output.
    pub(crate) fn with_font(mut self, family: FontFamily, weight: FontWeight) -> Self {
        self.font_family = family;
        self.font_weight = weight;
        self
    }

    fn text_style(&self, font_size: f64) -> TextStyle {
        TextStyle::new(font_size)
            .with_family(self.font_family.clone())
            .with_weight(self.font_weight)
    }

    /// Draws `graph` filling `region` (normalized page coordinates), clipped to it.
    pub(crate) fn draw_map(&mut self, region: Rect, graph: &StreetGraph, style: StreetStyle) {
        let mut path = BezPath::new();
        let scale = 1.0 / graph.radius_m;
        for edge in &graph.edges {
            path.move_to((edge.p0.x * scale, edge.p0.y * scale));
            path.line_to((edge.p1.x * scale, edge.p1.y * scale));
        }
        self.map = Some(MapLayer {
            region,
            path,
            style,
        });
    }

    /// Converts a normalized, Y-up page point to SVG pixels.
    fn to_px(&self, p: Point) -> Point {
        Point::new(p.x * self.page_px.width, (1.0 - p.y) * self.page_px.height)
    }

    fn region_px(&self, region: Rect) -> Rect {
        Rect::from_points(
            self.to_px(Point::new(region.x0, region.y0)),
            self.to_px(Point::new(region.x1, region.y1)),
        )
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let (w, h) = (self.page_px.width, self.page_px.height);
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = writeln!(
            out,
            r#"viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#
        );
        out.push_str(r#"<rect x="0" y="0" width="100%" height="100%""#);
        write_paint_attr(&mut out, "fill", self.background);
        out.push_str("/>\n");

        if let Some(map) = &self.map {
            let r = self.region_px(map.region);
            let _ = writeln!(
                out,
                r#"<clipPath id="map-clip"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                r.x0,
                r.y0,
                r.width(),
                r.height()
            );
            // Fill the region: the longer side spans the full fetch diameter.
            let half = 0.5 * r.width().max(r.height());
            let transform = Affine::translate(r.center().to_vec2())
                * Affine::scale_non_uniform(half, -half);
            let d = (transform * map.path.clone()).to_svg();
            let _ = write!(out, r#"<path clip-path="url(#map-clip)" fill="none" d="{d}""#);
            write_paint_attr(&mut out, "stroke", map.style.color);
            let _ = write!(
                out,
                r#" stroke-width="{}" stroke-linecap="round"/>"#,
                map.style.width_pt * self.px_per_pt
            );
            out.push('\n');
        }

        let family = escape_xml(self.font_family.as_css_family());
        for t in self.texts.iter().flatten() {
            let p = self.to_px(t.anchor);
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" font-family="{family}" font-weight="{}""#,
                p.x,
                p.y,
                t.font_size * self.px_per_pt,
                self.font_weight.0
            );
            out.push_str(r#" text-anchor="middle" dominant-baseline="hanging""#);
            write_paint_attr(&mut out, "fill", t.color);
            out.push('>');
            out.push_str(&escape_xml(&t.text));
            out.push_str("</text>\n");
        }

        out.push_str("</svg>\n");
        out
    }
}

impl<M: TextMeasurer> RenderBackend for SvgBackend<M> {
    type TextHandle = usize;

    fn page_height_px(&self) -> f64 {
        self.page_px.height
    }

    fn is_drawn(&self) -> bool {
        self.draws > 0
    }

    fn draw(&mut self) {
        self.draws += 1;
        tracing::trace!(pass = self.draws, "svg draw pass");
    }

    fn place_text(&mut self, text: &str, anchor: Point, font_size: f64, color: Color) -> usize {
        self.texts.push(Some(SvgText {
            text: text.to_string(),
            anchor,
            font_size,
            color,
        }));
        self.texts.len() - 1
    }

    fn text_bounds_px(&self, handle: &usize) -> Option<Size> {
        if !self.is_drawn() {
            return None;
        }
        let t = self.texts.get(*handle)?.as_ref()?;
        let metrics = self
            .measurer
            .measure(&t.text, &self.text_style(t.font_size))
            .scaled(self.px_per_pt);
        Some(Size::new(metrics.advance_width, metrics.height()))
    }

    fn remove_text(&mut self, handle: usize) {
        if let Some(slot) = self.texts.get_mut(handle) {
            *slot = None;
        }
    }

    fn move_map_region(&mut self, rect: Rect) {
        if let Some(map) = &mut self.map {
            map.region = rect;
        }
    }
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let rgba = color.to_rgba8();
    let _ = write!(
        out,
        r##" {name}="#{:02x}{:02x}{:02x}""##,
        rgba.r, rgba.g, rgba.b
    );
    if rgba.a != 255 {
        let _ = write!(out, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
